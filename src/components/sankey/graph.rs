//! Flow graph built from weighted journeys.
//!
//! Every journey contributes one node per position in its path and one link
//! per consecutive pair of positions. Nodes are keyed on `(layer, label)`, so a
//! label revisited later in a path gets a fresh node in the later layer and
//! every link points exactly one layer ahead. Repeated transitions add their
//! count to the existing link instead of creating a second one.

use std::collections::HashMap;

use super::color::NEUTRAL_COLOR;
use super::types::Journey;

/// Position of a node inside its [`Graph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
	/// Index into [`Graph::nodes`].
	pub fn index(self) -> usize {
		self.0
	}
}

/// Position of a link inside its [`Graph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(usize);

impl LinkId {
	/// Index into [`Graph::links`].
	pub fn index(self) -> usize {
		self.0
	}
}

/// A unique `(layer, label)` step of the diagram.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: NodeId,
	pub label: String,
	/// Zero-based position in the journeys' paths.
	pub layer: usize,
	/// Outgoing flow for layer 0, incoming flow everywhere else.
	pub total_flow: u64,
	/// Percentage of the first journey that visits `label` at `layer`.
	pub percentage: f64,
	pub incoming: Vec<LinkId>,
	pub outgoing: Vec<LinkId>,
	/// Left edge, set by layout.
	pub x: f64,
	/// Vertical center, set by layout.
	pub y: f64,
	/// Bar height, set by layout.
	pub height: f64,
	pub color: &'static str,
}

impl Node {
	fn new(id: NodeId, layer: usize, label: &str, percentage: f64) -> Self {
		Self {
			id,
			label: label.to_owned(),
			layer,
			total_flow: 0,
			percentage,
			incoming: Vec::new(),
			outgoing: Vec::new(),
			x: 0.0,
			y: 0.0,
			height: 0.0,
			color: NEUTRAL_COLOR,
		}
	}

	/// Upper edge of the bar.
	pub fn top(&self) -> f64 {
		self.y - self.height / 2.0
	}
}

/// Aggregated flow from one node to a node in the next layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
	pub id: LinkId,
	pub source: NodeId,
	pub target: NodeId,
	/// Sum of the counts of every journey making this transition.
	pub value: u64,
	/// Rendered thickness, set by layout.
	pub thickness: f64,
	/// Anchor center below the source node's top edge.
	pub source_offset: f64,
	/// Anchor center below the target node's top edge.
	pub target_offset: f64,
}

impl Link {
	/// The ordered `(source, target)` pair identifying this link.
	pub fn key(&self) -> (NodeId, NodeId) {
		(self.source, self.target)
	}
}

/// Layered multigraph produced by [`build`]. Owns all nodes and links.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	nodes: Vec<Node>,
	links: Vec<Link>,
	node_index: HashMap<(usize, String), NodeId>,
	link_index: HashMap<(NodeId, NodeId), LinkId>,
	layers: Vec<Vec<NodeId>>,
}

impl Graph {
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn links(&self) -> &[Link] {
		&self.links
	}

	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(id.0)
	}

	pub fn link(&self, id: LinkId) -> Option<&Link> {
		self.links.get(id.0)
	}

	/// Looks up the node for `label` at `layer`.
	pub fn node_id(&self, layer: usize, label: &str) -> Option<NodeId> {
		self.node_index.get(&(layer, label.to_owned())).copied()
	}

	/// Looks up the link running from `source` to `target`.
	pub fn link_between(&self, source: NodeId, target: NodeId) -> Option<LinkId> {
		self.link_index.get(&(source, target)).copied()
	}

	/// Node ids grouped by layer, each layer in creation order.
	pub fn layers(&self) -> &[Vec<NodeId>] {
		&self.layers
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Largest single link value, `0` without links.
	pub fn max_link_value(&self) -> u64 {
		self.links.iter().map(|l| l.value).max().unwrap_or(0)
	}

	/// Sum of the values of the links entering `id`.
	pub fn inflow(&self, id: NodeId) -> u64 {
		self.node(id)
			.map(|n| self.sum_values(&n.incoming))
			.unwrap_or(0)
	}

	/// Sum of the values of the links leaving `id`.
	pub fn outflow(&self, id: NodeId) -> u64 {
		self.node(id)
			.map(|n| self.sum_values(&n.outgoing))
			.unwrap_or(0)
	}

	fn sum_values(&self, ids: &[LinkId]) -> u64 {
		ids.iter().filter_map(|&id| self.link(id)).map(|l| l.value).sum()
	}

	pub(super) fn nodes_mut(&mut self) -> &mut [Node] {
		&mut self.nodes
	}

	pub(super) fn links_mut(&mut self) -> &mut [Link] {
		&mut self.links
	}
}

/// Incrementally assembles a [`Graph`] while keeping node identity and link
/// uniqueness intact.
#[derive(Debug, Default)]
pub struct GraphBuilder {
	graph: Graph,
}

impl GraphBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds every step and transition of `journey`.
	pub fn add_journey(&mut self, journey: &Journey) -> &mut Self {
		let mut previous = None;
		for (layer, label) in journey.path.iter().enumerate() {
			let node = self.node(layer, label, journey.percentage);
			if let Some(source) = previous {
				self.add_flow(source, node, journey.count);
			}
			previous = Some(node);
		}
		self
	}

	fn node(&mut self, layer: usize, label: &str, percentage: f64) -> NodeId {
		let graph = &mut self.graph;
		if let Some(&id) = graph.node_index.get(&(layer, label.to_owned())) {
			return id;
		}

		let id = NodeId(graph.nodes.len());
		graph.nodes.push(Node::new(id, layer, label, percentage));
		graph.node_index.insert((layer, label.to_owned()), id);
		if graph.layers.len() <= layer {
			graph.layers.resize_with(layer + 1, Vec::new);
		}
		graph.layers[layer].push(id);
		id
	}

	fn add_flow(&mut self, source: NodeId, target: NodeId, count: u64) -> LinkId {
		let graph = &mut self.graph;
		if let Some(&id) = graph.link_index.get(&(source, target)) {
			graph.links[id.0].value += count;
			return id;
		}

		let id = LinkId(graph.links.len());
		graph.links.push(Link {
			id,
			source,
			target,
			value: count,
			thickness: 0.0,
			source_offset: 0.0,
			target_offset: 0.0,
		});
		graph.link_index.insert((source, target), id);
		id
	}

	/// Wires adjacency lists and node totals, then hands out the graph.
	pub fn finish(self) -> Graph {
		let mut graph = self.graph;

		for link in &graph.links {
			graph.nodes[link.source.0].outgoing.push(link.id);
			graph.nodes[link.target.0].incoming.push(link.id);
		}

		for i in 0..graph.nodes.len() {
			let id = NodeId(i);
			let total = if graph.nodes[i].layer == 0 {
				graph.outflow(id)
			} else {
				graph.inflow(id)
			};
			graph.nodes[i].total_flow = total;
		}

		graph
	}
}

/// Builds the flow graph from the first `cutoff` journeys; the rest are ignored.
pub fn build(journeys: &[Journey], cutoff: usize) -> Graph {
	let mut builder = GraphBuilder::new();
	for journey in journeys.iter().take(cutoff) {
		builder.add_journey(journey);
	}
	builder.finish()
}
