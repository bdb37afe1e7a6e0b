use std::collections::HashMap;

use super::graph::{Graph, LinkId};

pub const PALETTE: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// Color of labels whose segment appears only once.
pub const NEUTRAL_COLOR: &str = "#b0b7c3";

/// First non-empty `/`-separated component of `label`, or the label itself.
pub fn segment_key(label: &str) -> &str {
	label.split('/').find(|s| !s.is_empty()).unwrap_or(label)
}

/// Assigns palette colors to segment keys that recur across nodes.
#[derive(Clone, Debug, Default)]
pub struct SegmentColorer {
	colors: HashMap<String, &'static str>,
}

impl SegmentColorer {
	/// Counts segment keys over `labels` (one entry per node) and hands out
	/// palette colors round-robin, in first-seen order, to keys seen more
	/// than once.
	pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
		let mut order: Vec<&str> = Vec::new();
		let mut counts: HashMap<&str, usize> = HashMap::new();
		for label in labels {
			let key = segment_key(label);
			let count = counts.entry(key).or_insert(0);
			if *count == 0 {
				order.push(key);
			}
			*count += 1;
		}

		let colors = order
			.into_iter()
			.filter(|key| counts[key] > 1)
			.enumerate()
			.map(|(i, key)| (key.to_owned(), PALETTE[i % PALETTE.len()]))
			.collect();
		Self { colors }
	}

	pub fn color_for(&self, label: &str) -> &'static str {
		self.colors
			.get(segment_key(label))
			.copied()
			.unwrap_or(NEUTRAL_COLOR)
	}
}

/// Stores a color on every node of `graph`.
pub fn colorize(graph: &mut Graph) {
	let colorer = SegmentColorer::new(graph.nodes().iter().map(|n| n.label.as_str()));
	for node in graph.nodes_mut() {
		node.color = colorer.color_for(&node.label);
	}
}

/// A link takes its source node's color.
pub fn link_color(graph: &Graph, id: LinkId) -> &'static str {
	graph
		.link(id)
		.and_then(|l| graph.node(l.source))
		.map(|n| n.color)
		.unwrap_or(NEUTRAL_COLOR)
}
