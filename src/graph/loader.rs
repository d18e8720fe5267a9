use std::collections::HashSet;

use log::info;
use serde_json::Value;

use super::dataset::GraphData;
use super::model::{DEFAULT_NODE_SIZE, Edge, Graph, Node, NodeId, NodeKind};
use crate::error::MalformedDatasetError;

/// Dataset compiled into the bundle; read once at startup.
pub const EMBEDDED_DATASET: &str = include_str!("../../public/full_data.json");

/// Parse and validate a `{nodes, links}` document.
pub fn load_graph(json: &str) -> Result<Graph, MalformedDatasetError> {
	let data: GraphData = serde_json::from_str(json)?;
	let graph = Graph::from_dataset(data)?;
	info!(
		"Loaded dataset: {} nodes, {} edges",
		graph.nodes().len(),
		graph.edge_count()
	);
	Ok(graph)
}

impl Graph {
	/// Validate a parsed document. Nodes and edges keep their input order.
	pub fn from_dataset(data: GraphData) -> Result<Self, MalformedDatasetError> {
		let mut seen = HashSet::new();
		let mut nodes = Vec::with_capacity(data.nodes.len());

		for raw in data.nodes {
			let id = NodeId::from(raw.id);
			if !seen.insert(id.clone()) {
				return Err(MalformedDatasetError::DuplicateNode(id));
			}
			let kind = match raw.kind.as_deref() {
				Some("central") => NodeKind::Central,
				Some("coauthor") => NodeKind::Coauthor,
				Some("institution") => NodeKind::Institution,
				Some("paper") => NodeKind::Paper {
					year: paper_year(&id, raw.year)?,
				},
				_ => NodeKind::Other,
			};
			nodes.push(Node {
				id,
				label: raw.label,
				size: raw.size.unwrap_or(DEFAULT_NODE_SIZE),
				kind,
			});
		}

		let central = nodes.iter().filter(|n| n.kind == NodeKind::Central).count();
		if central != 1 {
			return Err(MalformedDatasetError::CentralCount(central));
		}

		let mut edges = Vec::with_capacity(data.links.len());
		for (i, link) in data.links.into_iter().enumerate() {
			let (source, target) = (NodeId::from(link.source), NodeId::from(link.target));
			for id in [&source, &target] {
				if !seen.contains(id) {
					return Err(MalformedDatasetError::UnknownEndpoint {
						edge: i,
						id: id.clone(),
					});
				}
			}
			edges.push(Edge {
				source,
				target,
				value: link.value,
			});
		}

		Ok(Graph::from_parts(nodes, edges))
	}
}

fn paper_year(id: &NodeId, year: Option<Value>) -> Result<i32, MalformedDatasetError> {
	let value = year.ok_or_else(|| MalformedDatasetError::MissingYear(id.clone()))?;
	value
		.as_i64()
		.and_then(|y| i32::try_from(y).ok())
		.or_else(|| {
			value
				.as_f64()
				.filter(|y| y.fract() == 0.0 && y.abs() <= i32::MAX as f64)
				.map(|y| y as i32)
		})
		.ok_or_else(|| MalformedDatasetError::NonNumericYear {
			id: id.clone(),
			value: value.to_string(),
		})
}

#[cfg(test)]
mod tests {
	use super::*;

	const SCENARIO: &str = r#"{
		"nodes": [
			{"id": 1, "label": "Central", "type": "central"},
			{"id": 2, "label": "Paper", "type": "paper", "year": 2005},
			{"id": 3, "label": "Coauthor", "type": "coauthor", "size": 14}
		],
		"links": [
			{"source": 2, "target": 3, "value": 1},
			{"source": 1, "target": 2, "value": 1}
		]
	}"#;

	#[test]
	fn loads_scenario() {
		let graph = load_graph(SCENARIO).unwrap();
		assert_eq!(graph.nodes().len(), 3);
		assert_eq!(graph.edge_count(), 2);
		assert_eq!(graph.central().unwrap().id, NodeId::from(1));
		let coauthor = graph.node(&"3".into()).unwrap();
		assert_eq!(coauthor.size, 14.0);
		assert_eq!(graph.node(&"1".into()).unwrap().size, DEFAULT_NODE_SIZE);
		assert_eq!(
			graph.node(&"2".into()).unwrap().kind,
			NodeKind::Paper { year: 2005 }
		);
	}

	#[test]
	fn normalized_edges_mirror_endpoints() {
		let graph = load_graph(SCENARIO).unwrap();
		for (_, edge) in graph.edges() {
			assert_eq!(edge.from(), &edge.source);
			assert_eq!(edge.to(), &edge.target);
		}
	}

	#[test]
	fn string_and_integer_ids_coincide() {
		let json = r#"{
			"nodes": [
				{"id": "1", "label": "C", "type": "central"},
				{"id": 2, "label": "A", "type": "coauthor"}
			],
			"links": [{"source": 1, "target": "2", "value": 3}]
		}"#;
		let graph = load_graph(json).unwrap();
		assert_eq!(graph.edge(crate::graph::EdgeId(0)).unwrap().value, 3.0);
	}

	#[test]
	fn unknown_endpoint_is_rejected() {
		let json = SCENARIO.replace(r#""target": 3"#, r#""target": 99"#);
		match load_graph(&json) {
			Err(MalformedDatasetError::UnknownEndpoint { edge, id }) => {
				assert_eq!(edge, 0);
				assert_eq!(id, NodeId::from(99));
			}
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[test]
	fn paper_year_must_be_numeric() {
		let json = SCENARIO.replace(r#""year": 2005"#, r#""year": "2005""#);
		assert!(matches!(
			load_graph(&json),
			Err(MalformedDatasetError::NonNumericYear { .. })
		));

		let json = SCENARIO.replace(r#", "year": 2005"#, "");
		assert!(matches!(
			load_graph(&json),
			Err(MalformedDatasetError::MissingYear(_))
		));

		let json = SCENARIO.replace(r#""year": 2005"#, r#""year": 2005.0"#);
		assert!(load_graph(&json).is_ok());
	}

	#[test]
	fn exactly_one_central() {
		let json = SCENARIO.replace(r#""type": "central""#, r#""type": "coauthor""#);
		assert!(matches!(
			load_graph(&json),
			Err(MalformedDatasetError::CentralCount(0))
		));
	}

	#[test]
	fn duplicate_ids_are_rejected() {
		let json = SCENARIO.replace(r#""id": 3"#, r#""id": 2"#);
		assert!(matches!(
			load_graph(&json),
			Err(MalformedDatasetError::DuplicateNode(_))
		));
	}

	#[test]
	fn missing_value_is_a_parse_error() {
		let json = SCENARIO.replace(r#", "value": 1}"#, "}");
		assert!(matches!(
			load_graph(&json),
			Err(MalformedDatasetError::Parse(_))
		));
	}

	#[test]
	fn embedded_dataset_loads() {
		let graph = load_graph(EMBEDDED_DATASET).unwrap();
		assert!(!graph.papers_by_year().is_empty());
	}
}
