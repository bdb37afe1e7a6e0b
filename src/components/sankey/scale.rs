use super::graph::Graph;

/// Linear map from flow volume to drawn thickness.
///
/// The domain runs from `0` to the heaviest link in the graph, the range from
/// `0` to a thickness cap. Values above the domain extrapolate linearly, so a
/// node carrying several maximal links is taller than the cap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowScale {
	domain_max: f64,
	range_max: f64,
}

impl FlowScale {
	/// An empty domain (`domain_max == 0`) is widened to `1`.
	pub fn new(domain_max: u64, range_max: f64) -> Self {
		Self {
			domain_max: domain_max.max(1) as f64,
			range_max,
		}
	}

	pub fn for_graph(graph: &Graph, range_max: f64) -> Self {
		Self::new(graph.max_link_value(), range_max)
	}

	pub fn scale(&self, value: u64) -> f64 {
		value as f64 / self.domain_max * self.range_max
	}

	/// Height of a node bar: the larger of its two flow totals, scaled, but
	/// never below `min_height`.
	pub fn node_height(&self, inflow: u64, outflow: u64, min_height: f64) -> f64 {
		self.scale(inflow.max(outflow)).max(min_height)
	}
}
