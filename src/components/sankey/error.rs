use thiserror::Error;

/// A rejected [`SankeyConfig`](super::SankeyConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
	/// A size was negative, NaN or infinite.
	#[error("invalid {field}: {value}")]
	InvalidDimension {
		/// Name of the offending field.
		field: &'static str,
		/// The rejected value.
		value: f64,
	},
	/// Nothing can be laid out on a zero-width surface.
	#[error("width must be greater than zero")]
	ZeroWidth,
	/// The config could not be decoded.
	#[error("malformed config: {0}")]
	Json(#[from] serde_json::Error),
}

/// Browser-side failures while preparing the drawing surface.
#[derive(Debug, Error)]
pub enum CanvasError {
	/// The canvas refused to hand out a 2D context.
	#[error("2d context unavailable")]
	NoContext,
	/// The context object was not a `CanvasRenderingContext2d`.
	#[error("context is not a CanvasRenderingContext2d")]
	WrongContextType,
}
