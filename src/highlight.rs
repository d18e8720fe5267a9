//! Click-to-focus on a single edge.

use log::{debug, warn};

use crate::graph::{EdgeId, NodeId};
use crate::projection::{NodeVisual, Projection, RenderSurface};

/// What a pointer click resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
	/// An edge; its endpoints stay focused.
	Edge(EdgeId),
	/// A node; no effect on visuals.
	Node(NodeId),
	/// Background; restores every node.
	Empty,
}

/// Tracks the focused edge, if any.
#[derive(Debug, Default)]
pub struct HighlightController {
	selected: Option<EdgeId>,
}

impl HighlightController {
	/// No edge selected.
	pub fn new() -> Self {
		Self::default()
	}

	/// The currently focused edge.
	pub fn selected(&self) -> Option<EdgeId> {
		self.selected
	}

	/// Re-apply the current selection after the projection changed.
	///
	/// Nodes added since the last selection are dimmed like the rest. If the
	/// selected edge left the projection (a reset), every node is restored.
	pub fn refresh<S: RenderSurface>(&mut self, projection: &mut Projection<S>) {
		match self.selected {
			Some(edge) if projection.contains_edge(edge) => {
				self.select(projection, Selection::Edge(edge));
			}
			Some(_) => self.select(projection, Selection::Empty),
			None => {}
		}
	}

	/// Recompute every projected node's visual from `selection`.
	pub fn select<S: RenderSurface>(
		&mut self,
		projection: &mut Projection<S>,
		selection: Selection,
	) {
		debug!("Highlight selection: {selection:?}");
		match selection {
			Selection::Edge(edge) => {
				let Some((from, to)) = projection
					.edge_endpoints(edge)
					.map(|(a, b)| (a.clone(), b.clone()))
				else {
					warn!("Selected edge #{edge} is not in the projection");
					return;
				};
				let ids: Vec<NodeId> = projection.node_ids().cloned().collect();
				for id in &ids {
					let visual = if *id == from || *id == to {
						NodeVisual::FOCUSED
					} else {
						NodeVisual::DIMMED
					};
					projection.set_visual(id, visual);
				}
				self.selected = Some(edge);
			}
			Selection::Empty => {
				let ids: Vec<NodeId> = projection.node_ids().cloned().collect();
				for id in &ids {
					projection.set_visual(id, NodeVisual::FOCUSED);
				}
				self.selected = None;
			}
			Selection::Node(_) => {}
		}
	}
}

/// Nodes currently drawn dimmed.
pub fn dimmed<S: RenderSurface>(projection: &Projection<S>) -> Vec<NodeId> {
	with_visual(projection, NodeVisual::DIMMED)
}

/// Nodes currently drawn at full opacity.
pub fn focused<S: RenderSurface>(projection: &Projection<S>) -> Vec<NodeId> {
	with_visual(projection, NodeVisual::FOCUSED)
}

fn with_visual<S: RenderSurface>(projection: &Projection<S>, visual: NodeVisual) -> Vec<NodeId> {
	projection
		.node_ids()
		.filter(|id| projection.visual(id) == Some(visual))
		.cloned()
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::load_graph;
	use crate::projection::{MemorySurface, SurfaceEvent};
	use crate::reveal::RevealSequencer;

	fn projection() -> Projection<MemorySurface> {
		let graph = load_graph(
			r#"{
				"nodes": [
					{"id": "A", "label": "A", "type": "central"},
					{"id": "B", "label": "B", "type": "paper", "year": 2001},
					{"id": "C", "label": "C", "type": "coauthor"},
					{"id": "D", "label": "D", "type": "coauthor"}
				],
				"links": [
					{"source": "A", "target": "B", "value": 1},
					{"source": "B", "target": "C", "value": 1},
					{"source": "B", "target": "D", "value": 1}
				]
			}"#,
		)
		.unwrap();
		let mut projection = Projection::new(MemorySurface::default());
		projection.prime(&graph).unwrap();
		projection
	}

	fn ids(names: &[&str]) -> Vec<NodeId> {
		names.iter().map(|&n| n.into()).collect()
	}

	#[test]
	fn edge_selection_dims_all_but_endpoints() {
		let mut projection = projection();
		let mut controller = HighlightController::new();
		controller.select(&mut projection, Selection::Edge(EdgeId(0)));
		assert_eq!(dimmed(&projection), ids(&["C", "D"]));
		assert_eq!(focused(&projection), ids(&["A", "B"]));
		assert_eq!(controller.selected(), Some(EdgeId(0)));

		controller.select(&mut projection, Selection::Empty);
		assert!(dimmed(&projection).is_empty());
		assert_eq!(controller.selected(), None);
	}

	#[test]
	fn reselecting_is_idempotent() {
		let mut projection = projection();
		let mut controller = HighlightController::new();
		controller.select(&mut projection, Selection::Edge(EdgeId(1)));
		let events = projection.surface().events.len();
		controller.select(&mut projection, Selection::Edge(EdgeId(1)));
		assert_eq!(projection.surface().events.len(), events);
		assert_eq!(dimmed(&projection), ids(&["A", "D"]));
	}

	#[test]
	fn switching_edges_refocuses_previous_endpoints() {
		let mut projection = projection();
		let mut controller = HighlightController::new();
		controller.select(&mut projection, Selection::Edge(EdgeId(1)));
		controller.select(&mut projection, Selection::Edge(EdgeId(2)));
		assert_eq!(dimmed(&projection), ids(&["A", "C"]));
	}

	#[test]
	fn node_selection_changes_nothing() {
		let mut projection = projection();
		let mut controller = HighlightController::new();
		let before = projection.surface().events.clone();
		controller.select(&mut projection, Selection::Node("C".into()));
		assert_eq!(projection.surface().events, before);
		assert!(dimmed(&projection).is_empty());
	}

	#[test]
	fn refresh_dims_nodes_revealed_after_selection() {
		let graph = std::rc::Rc::new(
			load_graph(
				r#"{
					"nodes": [
						{"id": "c", "label": "C", "type": "central"},
						{"id": "p1", "label": "P1", "type": "paper", "year": 2001},
						{"id": "p2", "label": "P2", "type": "paper", "year": 2002},
						{"id": "a", "label": "A", "type": "coauthor"}
					],
					"links": [
						{"source": "c", "target": "p1", "value": 1},
						{"source": "c", "target": "p2", "value": 1},
						{"source": "p2", "target": "a", "value": 1}
					]
				}"#,
			)
			.unwrap(),
		);
		let mut sequencer = RevealSequencer::new(graph).unwrap();
		let mut projection = Projection::new(MemorySurface::default());
		for _ in 0..3 {
			sequencer.advance(&mut projection).unwrap();
		}
		assert_eq!(projection.node_count(), 2);

		let mut controller = HighlightController::new();
		controller.select(&mut projection, Selection::Edge(EdgeId(0)));
		sequencer.advance(&mut projection).unwrap();
		controller.refresh(&mut projection);

		assert_eq!(controller.selected(), Some(EdgeId(0)));
		assert_eq!(dimmed(&projection), ids(&["p2", "a"]));
		assert_eq!(focused(&projection), ids(&["c", "p1"]));
	}

	#[test]
	fn refresh_after_reset_drops_the_selection() {
		let mut projection = projection();
		let mut controller = HighlightController::new();
		controller.select(&mut projection, Selection::Edge(EdgeId(1)));

		let central = load_graph(
			r#"{"nodes": [{"id": "A", "label": "A", "type": "central"}], "links": []}"#,
		)
		.unwrap()
		.central()
		.cloned()
		.unwrap();
		projection.reset_to(&central);
		controller.refresh(&mut projection);

		assert_eq!(controller.selected(), None);
		assert!(dimmed(&projection).is_empty());
	}

	#[test]
	fn unknown_edge_is_ignored() {
		let mut projection = projection();
		let mut controller = HighlightController::new();
		controller.select(&mut projection, Selection::Edge(EdgeId(42)));
		assert!(dimmed(&projection).is_empty());
		assert!(
			!projection
				.surface()
				.events
				.iter()
				.any(|e| matches!(e, SurfaceEvent::Visual(..)))
		);
	}
}
