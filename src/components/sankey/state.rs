use log::debug;

use super::color::colorize;
use super::graph::{Graph, LinkId, NodeId, build};
use super::layout::{LayoutExtent, LayoutParams, LinkCurve, layout, link_curve};
use super::reachability::{Highlight, HoverTarget, compute_highlight};
use super::scale::FlowScale;
use super::types::{Journey, SankeyConfig};

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub target: Option<HoverTarget>,
	pub highlight: Highlight,
}

/// A laid-out diagram plus the interaction state drawn on top of it.
pub struct SankeyState {
	pub graph: Graph,
	pub scale: FlowScale,
	pub params: LayoutParams,
	pub extent: LayoutExtent,
	pub hover: HoverState,
	config: SankeyConfig,
	journeys: Vec<Journey>,
	steps: usize,
}

impl SankeyState {
	/// Runs build, scale, layout and colorize over `journeys`.
	pub fn new(journeys: &[Journey], steps: usize, config: SankeyConfig) -> Self {
		let mut graph = build(journeys, config.max_journeys);
		let scale = FlowScale::for_graph(&graph, config.max_link_thickness);
		let params = LayoutParams::from_config(&config, steps);
		let extent = layout(&mut graph, &scale, &params);
		colorize(&mut graph);

		debug!(
			"sankey rebuilt: {} of {} journeys, {} nodes, {} links, height {}",
			journeys.len().min(config.max_journeys),
			journeys.len(),
			graph.nodes().len(),
			graph.links().len(),
			extent.height
		);

		Self {
			graph,
			scale,
			params,
			extent,
			hover: HoverState::default(),
			config,
			journeys: journeys.to_vec(),
			steps,
		}
	}

	/// Replaces the input and lays everything out again.
	pub fn rebuild(&mut self, journeys: &[Journey], steps: usize) {
		*self = Self::new(journeys, steps, self.config.clone());
	}

	/// Lays the same input out for a new surface width.
	pub fn resize(&mut self, width: f64) {
		let config = SankeyConfig {
			width,
			..self.config.clone()
		};
		let journeys = std::mem::take(&mut self.journeys);
		*self = Self::new(&journeys, self.steps, config);
	}

	pub fn config(&self) -> &SankeyConfig {
		&self.config
	}

	pub fn width(&self) -> f64 {
		self.config.width
	}

	pub fn height(&self) -> f64 {
		self.extent.height
	}

	pub fn curve(&self, id: LinkId) -> Option<LinkCurve> {
		link_curve(&self.graph, id, self.params.node_width)
	}

	pub fn node_at_position(&self, x: f64, y: f64) -> Option<NodeId> {
		let node_width = self.params.node_width;
		self.graph
			.nodes()
			.iter()
			.find(|n| {
				let top = n.top();
				x >= n.x && x <= n.x + node_width && y >= top && y <= top + n.height
			})
			.map(|n| n.id)
	}

	/// The thinnest link whose ribbon covers the point.
	pub fn link_at_position(&self, x: f64, y: f64) -> Option<LinkId> {
		self.graph
			.links()
			.iter()
			.filter(|l| {
				self.curve(l.id)
					.and_then(|c| c.y_at(x))
					.is_some_and(|cy| (y - cy).abs() <= l.thickness / 2.0)
			})
			.min_by(|a, b| a.thickness.total_cmp(&b.thickness))
			.map(|l| l.id)
	}

	pub fn target_at_position(&self, x: f64, y: f64) -> Option<HoverTarget> {
		self.node_at_position(x, y)
			.map(HoverTarget::Node)
			.or_else(|| self.link_at_position(x, y).map(HoverTarget::Link))
	}

	/// Recomputes the highlight for a new hover target.
	pub fn set_hover(&mut self, target: Option<HoverTarget>) {
		if self.hover.target == target {
			return;
		}
		self.hover.target = target;
		self.hover.highlight = target
			.map(|t| compute_highlight(&self.graph, t))
			.unwrap_or_default();
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.target.is_some()
	}

	pub fn is_node_highlighted(&self, id: NodeId) -> bool {
		self.hover.highlight.nodes.contains(&id)
	}

	pub fn is_link_highlighted(&self, id: LinkId) -> bool {
		self.hover.highlight.links.contains(&id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config() -> SankeyConfig {
		SankeyConfig {
			width: 300.0,
			node_width: 10.0,
			node_gap: 10.0,
			vertical_padding: 20.0,
			max_link_thickness: 40.0,
			min_node_height: 4.0,
			min_height: 50.0,
			max_journeys: 10,
		}
	}

	fn state() -> SankeyState {
		SankeyState::new(
			&[
				Journey::new(["/a", "/b", "/c"], 10, 50.0),
				Journey::new(["/x", "/y", "/z"], 10, 50.0),
			],
			3,
			config(),
		)
	}

	#[test]
	fn hit_tests_nodes() {
		let s = state();
		let a = s.graph.node_id(0, "/a").unwrap();
		let y = s.graph.node_id(1, "/y").unwrap();
		assert_eq!(s.node_at_position(5.0, 30.0), Some(a));
		assert_eq!(s.node_at_position(105.0, 80.0), Some(y));
		assert_eq!(s.node_at_position(50.0, 30.0), None);
	}

	#[test]
	fn hit_tests_links_along_the_ribbon() {
		let s = state();
		let a = s.graph.node_id(0, "/a").unwrap();
		let b = s.graph.node_id(1, "/b").unwrap();
		let ab = s.graph.link_between(a, b).unwrap();
		assert_eq!(s.link_at_position(50.0, 30.0), Some(ab));
		assert_eq!(s.link_at_position(50.0, 51.0), None);
		assert_eq!(
			s.target_at_position(50.0, 30.0),
			Some(HoverTarget::Link(ab))
		);
	}

	#[test]
	fn hover_highlights_only_connected_flow() {
		let mut s = state();
		let b = s.graph.node_id(1, "/b").unwrap();
		s.set_hover(Some(HoverTarget::Node(b)));
		assert!(s.has_active_highlight());
		assert!(s.is_node_highlighted(s.graph.node_id(2, "/c").unwrap()));
		assert!(!s.is_node_highlighted(s.graph.node_id(1, "/y").unwrap()));
		assert_eq!(s.hover.highlight.links.len(), 2);

		s.set_hover(None);
		assert!(!s.has_active_highlight());
		assert!(s.hover.highlight.is_empty());
	}

	#[test]
	fn resize_relayouts_and_clears_hover() {
		let mut s = state();
		let b = s.graph.node_id(1, "/b").unwrap();
		s.set_hover(Some(HoverTarget::Node(b)));
		s.resize(600.0);
		assert_eq!(s.width(), 600.0);
		assert_eq!(s.graph.node(b).unwrap().x, 200.0);
		assert!(!s.has_active_highlight());
	}

	#[test]
	fn rebuild_honours_journey_cutoff() {
		let mut s = SankeyState::new(
			&[],
			2,
			SankeyConfig {
				max_journeys: 1,
				..config()
			},
		);
		s.rebuild(
			&[
				Journey::new(["/a", "/b"], 5, 50.0),
				Journey::new(["/c", "/d"], 5, 50.0),
			],
			2,
		);
		assert_eq!(s.graph.nodes().len(), 2);
		assert_eq!(s.height(), 60.0);
	}
}
