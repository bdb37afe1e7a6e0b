//! Layered placement of nodes and link anchors.
//!
//! Layer `k` sits at `x = k * layer_width`. Inside a layer nodes stack
//! top-down in creation order, separated by `node_gap`. On each side of a node
//! its links stack top-down by descending value, so the heaviest flows leave
//! and arrive at the top of the bar.

use super::graph::{Graph, LinkId};
use super::scale::FlowScale;
use super::types::SankeyConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
	/// Horizontal distance between the left edges of adjacent layers.
	pub layer_width: f64,
	pub node_width: f64,
	pub node_gap: f64,
	pub vertical_padding: f64,
	pub min_node_height: f64,
	pub min_height: f64,
}

impl LayoutParams {
	/// Splits the configured width evenly across `steps` layers.
	pub fn from_config(config: &SankeyConfig, steps: usize) -> Self {
		Self {
			layer_width: config.width / steps.max(1) as f64,
			node_width: config.node_width,
			node_gap: config.node_gap,
			vertical_padding: config.vertical_padding,
			min_node_height: config.min_node_height,
			min_height: config.min_height,
		}
	}
}

/// Size of the laid-out diagram.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutExtent {
	pub width: f64,
	pub height: f64,
}

/// Positions every node and link of `graph` in place.
pub fn layout(graph: &mut Graph, scale: &FlowScale, params: &LayoutParams) -> LayoutExtent {
	let heights: Vec<f64> = graph
		.nodes()
		.iter()
		.map(|n| scale.node_height(graph.inflow(n.id), graph.outflow(n.id), params.min_node_height))
		.collect();
	for link in graph.links_mut() {
		link.thickness = scale.scale(link.value);
	}

	let top_margin = params.vertical_padding / 2.0;
	let layers = graph.layers().to_vec();
	let mut tallest: f64 = 0.0;
	for (layer, ids) in layers.iter().enumerate() {
		let mut offset = top_margin;
		for &id in ids {
			let node = &mut graph.nodes_mut()[id.index()];
			node.height = heights[id.index()];
			node.x = layer as f64 * params.layer_width;
			node.y = offset + node.height / 2.0;
			offset += node.height + params.node_gap;
		}
		if !ids.is_empty() {
			tallest = tallest.max(offset - params.node_gap - top_margin);
		}
	}

	stack_links(graph);

	LayoutExtent {
		width: layers.len() as f64 * params.layer_width,
		height: (tallest + params.vertical_padding).max(params.min_height),
	}
}

/// Orders each node's link lists by descending value (stable) and assigns the
/// anchor offsets that stack them from the node's top edge.
fn stack_links(graph: &mut Graph) {
	let values: Vec<u64> = graph.links().iter().map(|l| l.value).collect();
	for node in graph.nodes_mut() {
		node.outgoing
			.sort_by(|a, b| values[b.index()].cmp(&values[a.index()]));
		node.incoming
			.sort_by(|a, b| values[b.index()].cmp(&values[a.index()]));
	}

	let thickness: Vec<f64> = graph.links().iter().map(|l| l.thickness).collect();
	let mut source_offsets = vec![0.0; values.len()];
	let mut target_offsets = vec![0.0; values.len()];
	for node in graph.nodes() {
		stack(&node.outgoing, &thickness, &mut source_offsets);
		stack(&node.incoming, &thickness, &mut target_offsets);
	}

	for link in graph.links_mut() {
		link.source_offset = source_offsets[link.id.index()];
		link.target_offset = target_offsets[link.id.index()];
	}
}

fn stack(ids: &[LinkId], thickness: &[f64], offsets: &mut [f64]) {
	let mut running = 0.0;
	for id in ids {
		let t = thickness[id.index()];
		offsets[id.index()] = running + t / 2.0;
		running += t;
	}
}

/// Cubic Bezier from a source anchor to a target anchor.
///
/// Control points sit at one third and two thirds of the horizontal gap, at
/// the start and end heights respectively. With that spacing `x` is linear in
/// the curve parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkCurve {
	pub start: (f64, f64),
	pub control1: (f64, f64),
	pub control2: (f64, f64),
	pub end: (f64, f64),
}

impl LinkCurve {
	pub fn new(start: (f64, f64), end: (f64, f64)) -> Self {
		let dx = end.0 - start.0;
		Self {
			start,
			control1: (start.0 + dx / 3.0, start.1),
			control2: (start.0 + dx * 2.0 / 3.0, end.1),
			end,
		}
	}

	/// Height of the curve's centerline at `x`, `None` outside its span.
	pub fn y_at(&self, x: f64) -> Option<f64> {
		let span = self.end.0 - self.start.0;
		if span <= 0.0 {
			return None;
		}
		let t = (x - self.start.0) / span;
		if !(0.0..=1.0).contains(&t) {
			return None;
		}
		let u = 1.0 - t;
		Some(
			u * u * u * self.start.1
				+ 3.0 * u * u * t * self.control1.1
				+ 3.0 * u * t * t * self.control2.1
				+ t * t * t * self.end.1,
		)
	}

	pub fn to_svg_path(&self) -> String {
		format!(
			"M{},{}C{},{} {},{} {},{}",
			self.start.0,
			self.start.1,
			self.control1.0,
			self.control1.1,
			self.control2.0,
			self.control2.1,
			self.end.0,
			self.end.1
		)
	}
}

/// Curve of a laid-out link, from the source bar's right edge to the target
/// bar's left edge.
pub fn link_curve(graph: &Graph, id: LinkId, node_width: f64) -> Option<LinkCurve> {
	let link = graph.link(id)?;
	let source = graph.node(link.source)?;
	let target = graph.node(link.target)?;
	Some(LinkCurve::new(
		(source.x + node_width, source.top() + link.source_offset),
		(target.x, target.top() + link.target_offset),
	))
}

/// SVG path data for a link; empty when the link does not exist.
pub fn svg_path(graph: &Graph, id: LinkId, node_width: f64) -> String {
	link_curve(graph, id, node_width)
		.map(|c| c.to_svg_path())
		.unwrap_or_default()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::sankey::graph::build;
	use crate::components::sankey::types::Journey;

	fn params() -> LayoutParams {
		LayoutParams {
			layer_width: 100.0,
			node_width: 10.0,
			node_gap: 10.0,
			vertical_padding: 20.0,
			min_node_height: 4.0,
			min_height: 50.0,
		}
	}

	fn laid_out(journeys: &[Journey]) -> (Graph, LayoutExtent) {
		let mut graph = build(journeys, journeys.len());
		let scale = FlowScale::for_graph(&graph, 40.0);
		let extent = layout(&mut graph, &scale, &params());
		(graph, extent)
	}

	#[test]
	fn nodes_stack_within_their_layer() {
		let (graph, _) = laid_out(&[
			Journey::new(["/a", "/b"], 10, 50.0),
			Journey::new(["/a", "/c"], 10, 50.0),
		]);
		let b = graph.node(graph.node_id(1, "/b").unwrap()).unwrap();
		let c = graph.node(graph.node_id(1, "/c").unwrap()).unwrap();
		assert_eq!(b.x, 100.0);
		assert_eq!(b.height, 40.0);
		assert_eq!(b.y, 10.0 + 20.0);
		assert_eq!(c.top(), 10.0 + 40.0 + 10.0);

		let a = graph.node(graph.node_id(0, "/a").unwrap()).unwrap();
		assert_eq!(a.x, 0.0);
		assert_eq!(a.height, 80.0);
	}

	#[test]
	fn canvas_height_covers_tallest_layer() {
		let (_, extent) = laid_out(&[
			Journey::new(["/a", "/b"], 10, 50.0),
			Journey::new(["/a", "/c"], 10, 50.0),
		]);
		// layer 1: 40 + 10 + 40, plus padding
		assert_eq!(extent.height, 110.0);
		assert_eq!(extent.width, 200.0);
	}

	#[test]
	fn canvas_height_is_floored() {
		let (_, extent) = laid_out(&[Journey::new(["/a", "/b"], 1, 100.0)]);
		assert_eq!(extent.height, 60.0);

		let mut graph = Graph::default();
		let extent = layout(&mut graph, &FlowScale::new(0, 40.0), &params());
		assert_eq!(extent.height, 50.0);
	}

	#[test]
	fn links_stack_largest_first() {
		let (graph, _) = laid_out(&[
			Journey::new(["/a", "/c"], 3, 37.5),
			Journey::new(["/a", "/b"], 5, 62.5),
		]);
		let a = graph.node(graph.node_id(0, "/a").unwrap()).unwrap();
		let heavy = graph.link(a.outgoing[0]).unwrap();
		let light = graph.link(a.outgoing[1]).unwrap();
		assert_eq!(heavy.value, 5);
		assert_eq!(light.value, 3);
		assert_eq!(heavy.thickness, 40.0);
		assert_eq!(heavy.source_offset, 20.0);
		assert_eq!(light.source_offset, 40.0 + 12.0);
		assert_eq!(heavy.target_offset, 20.0);
	}

	#[test]
	fn curve_runs_between_bar_edges() {
		let (graph, _) = laid_out(&[Journey::new(["/a", "/b"], 10, 100.0)]);
		let id = graph.links()[0].id;
		let curve = link_curve(&graph, id, 10.0).unwrap();
		assert_eq!(curve.start, (10.0, 30.0));
		assert_eq!(curve.end, (100.0, 30.0));
		assert_eq!(curve.control1, (40.0, 30.0));
		assert_eq!(curve.control2, (70.0, 30.0));
		assert_eq!(svg_path(&graph, id, 10.0), "M10,30C40,30 70,30 100,30");
	}

	#[test]
	fn curve_height_interpolates_between_anchors() {
		let curve = LinkCurve::new((0.0, 0.0), (90.0, 30.0));
		assert_eq!(curve.y_at(0.0), Some(0.0));
		assert_eq!(curve.y_at(90.0), Some(30.0));
		assert!((curve.y_at(45.0).unwrap() - 15.0).abs() < 1e-9);
		assert_eq!(curve.y_at(-1.0), None);
		assert_eq!(curve.y_at(91.0), None);
	}

	#[test]
	fn dangling_link_has_empty_path() {
		let graph = Graph::default();
		let other = build(&[Journey::new(["/a", "/b"], 1, 100.0)], 1);
		assert_eq!(svg_path(&graph, other.links()[0].id, 10.0), "");
	}
}
