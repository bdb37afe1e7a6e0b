use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// One observed path of step labels, weighted by how often it was recorded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Journey {
	/// Step labels in visit order.
	pub path: Vec<String>,
	/// Number of times this exact path was observed.
	pub count: u64,
	/// Share of all journeys this path represents.
	#[serde(default)]
	pub percentage: f64,
}

impl Journey {
	/// Creates a journey from anything that yields step labels.
	pub fn new<I, S>(path: I, count: u64, percentage: f64) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			path: path.into_iter().map(Into::into).collect(),
			count,
			percentage,
		}
	}
}

/// Cuts every journey down to its first `steps` labels and merges paths that
/// become identical, summing their counts and percentages.
///
/// The result is ordered by descending count so a journey cutoff keeps the
/// heaviest paths. Ties keep first-seen order.
pub fn truncate_journeys(journeys: &[Journey], steps: usize) -> Vec<Journey> {
	let mut merged: Vec<Journey> = Vec::new();
	let mut index: HashMap<Vec<String>, usize> = HashMap::new();

	for journey in journeys {
		let path: Vec<String> = journey.path.iter().take(steps).cloned().collect();
		match index.get(&path) {
			Some(&i) => {
				merged[i].count += journey.count;
				merged[i].percentage += journey.percentage;
			}
			None => {
				index.insert(path.clone(), merged.len());
				merged.push(Journey {
					path,
					count: journey.count,
					percentage: journey.percentage,
				});
			}
		}
	}

	merged.sort_by(|a, b| b.count.cmp(&a.count));
	merged
}

/// Sizing knobs for a rendered diagram.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SankeyConfig {
	/// Width of the drawing surface in pixels.
	pub width: f64,
	/// Horizontal thickness of a node bar.
	pub node_width: f64,
	/// Vertical space between stacked nodes of one layer.
	pub node_gap: f64,
	/// Total vertical padding, split evenly above and below the tallest layer.
	pub vertical_padding: f64,
	/// Thickness of the heaviest link.
	pub max_link_thickness: f64,
	/// Smallest height a node bar is drawn with.
	pub min_node_height: f64,
	/// Smallest canvas height, however few flows there are.
	pub min_height: f64,
	/// Only this many journeys (in input order) are laid out.
	pub max_journeys: usize,
}

impl Default for SankeyConfig {
	fn default() -> Self {
		Self {
			width: 800.0,
			node_width: 12.0,
			node_gap: 12.0,
			vertical_padding: 40.0,
			max_link_thickness: 60.0,
			min_node_height: 4.0,
			min_height: 200.0,
			max_journeys: 50,
		}
	}
}

impl SankeyConfig {
	/// Decodes a config from JSON; missing fields take their defaults.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks that every dimension is finite and non-negative and that there
	/// is horizontal room to draw into.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let dimensions = [
			("width", self.width),
			("node_width", self.node_width),
			("node_gap", self.node_gap),
			("vertical_padding", self.vertical_padding),
			("max_link_thickness", self.max_link_thickness),
			("min_node_height", self.min_node_height),
			("min_height", self.min_height),
		];
		for (field, value) in dimensions {
			if !value.is_finite() || value < 0.0 {
				return Err(ConfigError::InvalidDimension { field, value });
			}
		}
		if self.width == 0.0 {
			return Err(ConfigError::ZeroWidth);
		}
		Ok(())
	}
}
