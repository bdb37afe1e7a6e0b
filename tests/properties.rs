use std::collections::{HashMap, HashSet};

use journey_sankey::sankey::{
	Direction, Graph, Journey, NodeId, SankeyConfig, SankeyState, build, connected,
};
use proptest::prelude::*;

const LABELS: &[&str] = &["/", "/docs", "/docs/api", "/pricing", "/signup", "/blog"];

fn journey() -> impl Strategy<Value = Journey> {
	(
		prop::collection::vec(prop::sample::select(LABELS), 0..6),
		0u64..500,
		0.0f64..100.0,
	)
		.prop_map(|(path, count, percentage)| Journey::new(path, count, percentage))
}

fn journeys() -> impl Strategy<Value = Vec<Journey>> {
	prop::collection::vec(journey(), 0..16)
}

fn label(graph: &Graph, id: NodeId) -> (usize, String) {
	let node = graph.node(id).unwrap();
	(node.layer, node.label.clone())
}

proptest! {
	#[test]
	fn link_values_sum_matching_transitions(journeys in journeys()) {
		let graph = build(&journeys, journeys.len());

		let mut expected: HashMap<(usize, String, String), u64> = HashMap::new();
		for j in &journeys {
			for (layer, pair) in j.path.windows(2).enumerate() {
				*expected
					.entry((layer, pair[0].clone(), pair[1].clone()))
					.or_insert(0) += j.count;
			}
		}

		prop_assert_eq!(graph.links().len(), expected.len());
		for link in graph.links() {
			let (layer, source) = label(&graph, link.source);
			let (target_layer, target) = label(&graph, link.target);
			prop_assert_eq!(target_layer, layer + 1);
			prop_assert_eq!(Some(&link.value), expected.get(&(layer, source, target)));
		}
	}

	#[test]
	fn one_node_per_layer_and_label(journeys in journeys()) {
		let graph = build(&journeys, journeys.len());
		let mut seen = HashSet::new();
		for node in graph.nodes() {
			prop_assert!(seen.insert((node.layer, node.label.clone())));
		}
		let distinct: HashSet<(usize, &String)> = journeys
			.iter()
			.flat_map(|j| j.path.iter().enumerate())
			.collect();
		prop_assert_eq!(graph.nodes().len(), distinct.len());
	}

	#[test]
	fn total_flow_follows_layer_rule(journeys in journeys()) {
		let graph = build(&journeys, journeys.len());
		for node in graph.nodes() {
			let expected = if node.layer == 0 {
				graph.outflow(node.id)
			} else {
				graph.inflow(node.id)
			};
			prop_assert_eq!(node.total_flow, expected);
		}
	}

	#[test]
	fn rebuilding_is_deterministic(journeys in journeys(), steps in 1usize..6) {
		let config = SankeyConfig::default();
		let first = SankeyState::new(&journeys, steps, config.clone());
		let second = SankeyState::new(&journeys, steps, config);

		prop_assert_eq!(first.graph.nodes().len(), second.graph.nodes().len());
		for (a, b) in first.graph.nodes().iter().zip(second.graph.nodes()) {
			prop_assert_eq!(&a.label, &b.label);
			prop_assert_eq!(a.total_flow, b.total_flow);
			prop_assert!((a.y - b.y).abs() < 1e-9);
			prop_assert!((a.height - b.height).abs() < 1e-9);
			prop_assert_eq!(a.color, b.color);
		}
		for (a, b) in first.graph.links().iter().zip(second.graph.links()) {
			prop_assert_eq!(a.key(), b.key());
			prop_assert_eq!(a.value, b.value);
			prop_assert!((a.source_offset - b.source_offset).abs() < 1e-9);
		}
		prop_assert!((first.height() - second.height()).abs() < 1e-9);
	}

	#[test]
	fn reachability_contains_seed_and_stays_bounded(journeys in journeys()) {
		let graph = build(&journeys, journeys.len());
		for link in graph.links() {
			let forward = connected(&graph, link.id, Direction::Forward);
			let backward = connected(&graph, link.id, Direction::Backward);
			prop_assert!(forward.contains(&link.id));
			prop_assert!(backward.contains(&link.id));
			prop_assert!(forward.len() <= graph.links().len());
			prop_assert!(backward.len() <= graph.links().len());
		}
	}

	#[test]
	fn anchors_stack_heaviest_first(journeys in journeys()) {
		let state = SankeyState::new(&journeys, 5, SankeyConfig::default());
		let graph = &state.graph;
		for node in graph.nodes() {
			for pair in node.outgoing.windows(2) {
				let (a, b) = (graph.link(pair[0]).unwrap(), graph.link(pair[1]).unwrap());
				prop_assert!(a.value >= b.value);
				prop_assert!(a.source_offset <= b.source_offset);
			}
			for pair in node.incoming.windows(2) {
				let (a, b) = (graph.link(pair[0]).unwrap(), graph.link(pair[1]).unwrap());
				prop_assert!(a.value >= b.value);
				prop_assert!(a.target_offset <= b.target_offset);
			}
			prop_assert!(node.height >= SankeyConfig::default().min_node_height);
		}
	}
}
