mod color;
mod component;
mod error;
mod graph;
mod layout;
mod reachability;
mod render;
mod scale;
mod state;
mod types;

pub use color::{NEUTRAL_COLOR, PALETTE, SegmentColorer, colorize, link_color, segment_key};
pub use component::SankeyCanvas;
pub use error::{CanvasError, ConfigError};
pub use graph::{Graph, GraphBuilder, Link, LinkId, Node, NodeId, build};
pub use layout::{LayoutExtent, LayoutParams, LinkCurve, layout, link_curve, svg_path};
pub use reachability::{Direction, Highlight, HoverTarget, compute_highlight, connected};
pub use scale::FlowScale;
pub use state::{HoverState, SankeyState};
pub use types::{Journey, SankeyConfig, truncate_journeys};
