use std::collections::BTreeSet;
use std::rc::Rc;

use academic_constellation::error::MalformedDatasetError;
use academic_constellation::graph::{EMBEDDED_DATASET, EdgeId, NodeId, NodeKind, load_graph};
use academic_constellation::highlight::{HighlightController, Selection, dimmed, focused};
use academic_constellation::projection::{MemorySurface, Projection};
use academic_constellation::reveal::{Indicator, RevealSequencer, RevealState};

const SCENARIO: &str = r#"{
	"nodes": [
		{"id": 1, "label": "Central", "type": "central"},
		{"id": 2, "label": "Paper", "type": "paper", "year": 2005},
		{"id": 3, "label": "Coauthor", "type": "coauthor"}
	],
	"links": [
		{"source": 2, "target": 3, "value": 1},
		{"source": 1, "target": 2, "value": 1}
	]
}"#;

fn ids<'a>(it: impl Iterator<Item = &'a NodeId>) -> BTreeSet<String> {
	it.map(|id| id.to_string()).collect()
}

#[test]
fn scenario_reveals_everything_then_completes() {
	let graph = Rc::new(load_graph(SCENARIO).unwrap());
	let mut sequencer = RevealSequencer::new(graph).unwrap();
	let mut projection = Projection::new(MemorySurface::default());

	sequencer.advance(&mut projection).unwrap();
	sequencer.advance(&mut projection).unwrap();
	assert_eq!(sequencer.state(), RevealState::Resetting);
	assert_eq!((projection.node_count(), projection.edge_count()), (1, 0));

	let rest = sequencer.run_to_completion(&mut projection).unwrap();
	assert_eq!(rest, [Indicator::Year(2005), Indicator::Complete]);
	assert_eq!(
		rest.iter().map(ToString::to_string).collect::<Vec<_>>(),
		["2005", "Complete"]
	);
	assert_eq!(
		ids(projection.node_ids()),
		["1", "2", "3"].map(String::from).into()
	);
	assert!(projection.contains_edge(EdgeId(0)));
	assert!(projection.contains_edge(EdgeId(1)));
}

#[test]
fn highlight_after_reveal() {
	let graph = Rc::new(load_graph(SCENARIO).unwrap());
	let mut sequencer = RevealSequencer::new(graph).unwrap();
	let mut projection = Projection::new(MemorySurface::default());
	sequencer.run_to_completion(&mut projection).unwrap();

	let mut controller = HighlightController::new();
	controller.select(&mut projection, Selection::Edge(EdgeId(1)));
	assert_eq!(ids(dimmed(&projection).iter()), ["3".to_string()].into());
	assert_eq!(
		ids(focused(&projection).iter()),
		["1", "2"].map(String::from).into()
	);

	controller.select(&mut projection, Selection::Empty);
	assert!(dimmed(&projection).is_empty());
}

#[test]
fn unknown_endpoint_fails_the_load() {
	let json = SCENARIO.replace(r#""target": 3"#, r#""target": 99"#);
	let err = load_graph(&json).unwrap_err();
	assert!(matches!(
		err,
		MalformedDatasetError::UnknownEndpoint { ref id, .. } if id.as_str() == "99"
	));
}

#[test]
fn embedded_dataset_reveals_in_year_order() {
	let graph = Rc::new(load_graph(EMBEDDED_DATASET).unwrap());
	let expected: Vec<Indicator> = graph
		.papers_by_year()
		.iter()
		.filter_map(|n| match n.kind {
			NodeKind::Paper { year } => Some(Indicator::Year(year)),
			_ => None,
		})
		.collect();
	let distinct = graph
		.nodes()
		.iter()
		.map(|n| n.id.clone())
		.collect::<BTreeSet<_>>();
	assert_eq!(distinct.len(), graph.nodes().len());

	let mut sequencer = RevealSequencer::new(graph).unwrap();
	let mut projection = Projection::new(MemorySurface::default());
	let emitted = sequencer.run_to_completion(&mut projection).unwrap();

	let years: Vec<Indicator> = emitted
		.iter()
		.copied()
		.filter(|i| matches!(i, Indicator::Year(_)))
		.collect();
	assert_eq!(years, expected);
	assert!(years.windows(2).all(|w| match (w[0], w[1]) {
		(Indicator::Year(a), Indicator::Year(b)) => a <= b,
		_ => false,
	}));
	assert_eq!(emitted.last(), Some(&Indicator::Complete));
}
