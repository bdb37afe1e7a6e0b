//! Connected-subgraph queries behind hover highlighting.
//!
//! Every query is recomputed from scratch against a finished graph and has no
//! side effects; the renderer decides what to do with the resulting sets.

use std::collections::{HashSet, VecDeque};

use super::graph::{Graph, LinkId, NodeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
	/// Follow outgoing links of each link's target.
	Forward,
	/// Follow incoming links of each link's source.
	Backward,
}

/// Breadth-first walk from `start` in one direction.
///
/// The result always contains `start` when it exists in `graph` and never
/// contains a link twice.
pub fn connected(graph: &Graph, start: LinkId, direction: Direction) -> HashSet<LinkId> {
	let mut visited: HashSet<(NodeId, NodeId)> = HashSet::new();
	let mut found = HashSet::new();
	let mut queue = VecDeque::from([start]);

	while let Some(id) = queue.pop_front() {
		let Some(link) = graph.link(id) else {
			continue;
		};
		if !visited.insert(link.key()) {
			continue;
		}
		found.insert(id);

		let next = match direction {
			Direction::Forward => graph.node(link.target).map(|n| &n.outgoing),
			Direction::Backward => graph.node(link.source).map(|n| &n.incoming),
		};
		queue.extend(next.into_iter().flatten().copied());
	}

	found
}

/// What the pointer is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTarget {
	Node(NodeId),
	Link(LinkId),
}

/// Nodes and links to keep emphasised; everything else is dimmed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Highlight {
	pub nodes: HashSet<NodeId>,
	pub links: HashSet<LinkId>,
}

impl Highlight {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.links.is_empty()
	}
}

/// Everything reachable through `seed` in either direction.
///
/// For a node, each link touching it seeds a forward and a backward walk and
/// the results are unioned. For a link, one walk in each direction is run from
/// the link itself. The node set is the endpoints of the found links, plus the
/// hovered node so that an isolated node still highlights itself.
pub fn compute_highlight(graph: &Graph, seed: HoverTarget) -> Highlight {
	let mut highlight = Highlight::default();

	let seeds: Vec<LinkId> = match seed {
		HoverTarget::Node(id) => {
			let Some(node) = graph.node(id) else {
				return highlight;
			};
			highlight.nodes.insert(id);
			node.incoming.iter().chain(&node.outgoing).copied().collect()
		}
		HoverTarget::Link(id) => vec![id],
	};

	for start in seeds {
		highlight.links.extend(connected(graph, start, Direction::Forward));
		highlight.links.extend(connected(graph, start, Direction::Backward));
	}

	for &id in &highlight.links {
		if let Some(link) = graph.link(id) {
			highlight.nodes.insert(link.source);
			highlight.nodes.insert(link.target);
		}
	}

	highlight
}
