//! The live subset of the graph shown on a rendering surface.
//!
//! [`Projection`] is the only write path to a [`RenderSurface`]: it keeps its
//! own record of what has been pushed so controllers can query membership
//! without reaching into the surface.

use std::collections::{HashMap, HashSet};

use crate::error::ProjectionError;
use crate::graph::{Edge, EdgeId, Graph, Node, NodeId, NodeView};

/// Per-node visual attributes the highlight controller may change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeVisual {
	/// 0 to 1.
	pub opacity: f64,
	/// CSS color of the label.
	pub font_color: &'static str,
}

impl NodeVisual {
	/// Normal look.
	pub const FOCUSED: Self = Self {
		opacity: 1.0,
		font_color: "white",
	};
	/// Faded look for nodes outside the focused edge.
	pub const DIMMED: Self = Self {
		opacity: 0.2,
		font_color: "#666",
	};
}

impl Default for NodeVisual {
	fn default() -> Self {
		Self::FOCUSED
	}
}

/// Operations a drawing backend must accept.
pub trait RenderSurface {
	/// Start drawing a node. Never called twice for one id between clears.
	fn add_node(&mut self, node: &NodeView);
	/// Both endpoints have already been added.
	fn add_edge(&mut self, id: EdgeId, edge: &Edge);
	/// Remove every node and edge.
	fn clear(&mut self);
	/// Change how an existing node is drawn.
	fn set_node_visual(&mut self, id: &NodeId, visual: NodeVisual);
	/// Show or hide the whole drawing.
	fn set_visible(&mut self, visible: bool);
}

#[derive(Clone, Debug)]
struct Projected {
	view: NodeView,
	visual: NodeVisual,
}

/// Nodes and edges currently pushed to a surface `S`.
pub struct Projection<S> {
	nodes: Vec<Projected>,
	index: HashMap<NodeId, usize>,
	edges: Vec<(EdgeId, NodeId, NodeId)>,
	edge_set: HashSet<EdgeId>,
	surface: S,
}

impl<S: RenderSurface> Projection<S> {
	/// Empty projection over `surface`.
	pub fn new(surface: S) -> Self {
		Self {
			nodes: Vec::new(),
			index: HashMap::new(),
			edges: Vec::new(),
			edge_set: HashSet::new(),
			surface,
		}
	}

	/// Load the whole graph, hidden, so the surface can settle its layout.
	pub fn prime(&mut self, graph: &Graph) -> Result<(), ProjectionError> {
		self.surface.set_visible(false);
		for node in graph.nodes() {
			self.add_node(node.view());
		}
		for (id, edge) in graph.edges() {
			self.add_edge(id, edge)?;
		}
		Ok(())
	}

	/// Drop everything, keep only `root`, and show the surface.
	pub fn reset_to(&mut self, root: &Node) {
		self.nodes.clear();
		self.index.clear();
		self.edges.clear();
		self.edge_set.clear();
		self.surface.clear();
		self.add_node(root.view());
		self.surface.set_visible(true);
	}

	/// Returns `false` if the node was already present.
	pub fn add_node(&mut self, view: NodeView) -> bool {
		if self.index.contains_key(&view.id) {
			return false;
		}
		self.surface.add_node(&view);
		self.index.insert(view.id.clone(), self.nodes.len());
		self.nodes.push(Projected {
			view,
			visual: NodeVisual::default(),
		});
		true
	}

	/// Returns `Ok(false)` if the edge was already present.
	pub fn add_edge(&mut self, id: EdgeId, edge: &Edge) -> Result<bool, ProjectionError> {
		if self.edge_set.contains(&id) {
			return Ok(false);
		}
		for endpoint in [edge.from(), edge.to()] {
			if !self.contains_node(endpoint) {
				return Err(ProjectionError::DanglingEdge {
					edge: id,
					missing: endpoint.clone(),
				});
			}
		}
		self.surface.add_edge(id, edge);
		self.edges.push((id, edge.from().clone(), edge.to().clone()));
		self.edge_set.insert(id);
		Ok(true)
	}

	/// No-op for nodes not in the projection.
	pub fn set_visual(&mut self, id: &NodeId, visual: NodeVisual) {
		let Some(&i) = self.index.get(id) else {
			return;
		};
		if self.nodes[i].visual != visual {
			self.nodes[i].visual = visual;
			self.surface.set_node_visual(id, visual);
		}
	}

	/// Current visual of a projected node.
	pub fn visual(&self, id: &NodeId) -> Option<NodeVisual> {
		self.index.get(id).map(|&i| self.nodes[i].visual)
	}

	/// Whether the node has been pushed.
	pub fn contains_node(&self, id: &NodeId) -> bool {
		self.index.contains_key(id)
	}

	/// Whether the edge has been pushed.
	pub fn contains_edge(&self, id: EdgeId) -> bool {
		self.edge_set.contains(&id)
	}

	/// Projected node count.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Projected edge count.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Ids in insertion order.
	pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
		self.nodes.iter().map(|p| &p.view.id)
	}

	/// Endpoints of a projected edge.
	pub fn edge_endpoints(&self, id: EdgeId) -> Option<(&NodeId, &NodeId)> {
		self.edges
			.iter()
			.find(|(e, _, _)| *e == id)
			.map(|(_, from, to)| (from, to))
	}

	/// Read access for picking and drawing.
	pub fn surface(&self) -> &S {
		&self.surface
	}

	/// For view-only state (pan, zoom, drag); graph content goes through `Projection`.
	pub fn surface_mut(&mut self) -> &mut S {
		&mut self.surface
	}
}

/// What a [`MemorySurface`] was asked to do.
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum SurfaceEvent {
	AddNode(NodeId),
	AddEdge(EdgeId),
	Clear,
	Visual(NodeId, NodeVisual),
	Visible(bool),
}

/// Headless surface that records every call.
#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
	/// Calls in the order received.
	pub events: Vec<SurfaceEvent>,
}

impl RenderSurface for MemorySurface {
	fn add_node(&mut self, node: &NodeView) {
		self.events.push(SurfaceEvent::AddNode(node.id.clone()));
	}

	fn add_edge(&mut self, id: EdgeId, _edge: &Edge) {
		self.events.push(SurfaceEvent::AddEdge(id));
	}

	fn clear(&mut self) {
		self.events.push(SurfaceEvent::Clear);
	}

	fn set_node_visual(&mut self, id: &NodeId, visual: NodeVisual) {
		self.events.push(SurfaceEvent::Visual(id.clone(), visual));
	}

	fn set_visible(&mut self, visible: bool) {
		self.events.push(SurfaceEvent::Visible(visible));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::load_graph;

	fn graph() -> Graph {
		load_graph(
			r#"{
				"nodes": [
					{"id": "c", "label": "C", "type": "central"},
					{"id": "p", "label": "P", "type": "paper", "year": 2000},
					{"id": "a", "label": "A", "type": "coauthor"}
				],
				"links": [
					{"source": "p", "target": "a", "value": 2},
					{"source": "c", "target": "p", "value": 1}
				]
			}"#,
		)
		.unwrap()
	}

	#[test]
	fn dangling_edge_is_refused() {
		let graph = graph();
		let mut projection = Projection::new(MemorySurface::default());
		projection.reset_to(graph.central().unwrap());
		let edge = graph.edge(EdgeId(1)).unwrap();
		assert_eq!(
			projection.add_edge(EdgeId(1), edge),
			Err(ProjectionError::DanglingEdge {
				edge: EdgeId(1),
				missing: "p".into(),
			})
		);
		assert_eq!(projection.edge_count(), 0);
		assert!(
			!projection
				.surface()
				.events
				.contains(&SurfaceEvent::AddEdge(EdgeId(1)))
		);
	}

	#[test]
	fn duplicate_adds_are_ignored() {
		let graph = graph();
		let mut projection = Projection::new(MemorySurface::default());
		let central = graph.central().unwrap();
		assert!(projection.add_node(central.view()));
		assert!(!projection.add_node(central.view()));
		assert_eq!(projection.node_count(), 1);
	}

	#[test]
	fn prime_then_reset_leaves_only_root() {
		let graph = graph();
		let mut projection = Projection::new(MemorySurface::default());
		projection.prime(&graph).unwrap();
		assert_eq!(projection.node_count(), 3);
		assert_eq!(projection.edge_count(), 2);

		projection.reset_to(graph.central().unwrap());
		assert_eq!(projection.node_count(), 1);
		assert_eq!(projection.edge_count(), 0);
		assert!(projection.contains_node(&"c".into()));
		assert_eq!(
			projection.surface().events.last(),
			Some(&SurfaceEvent::Visible(true))
		);
	}

	#[test]
	fn unchanged_visual_is_not_forwarded() {
		let graph = graph();
		let mut projection = Projection::new(MemorySurface::default());
		projection.reset_to(graph.central().unwrap());
		let before = projection.surface().events.len();
		projection.set_visual(&"c".into(), NodeVisual::FOCUSED);
		assert_eq!(projection.surface().events.len(), before);
		projection.set_visual(&"c".into(), NodeVisual::DIMMED);
		assert_eq!(projection.visual(&"c".into()), Some(NodeVisual::DIMMED));
	}
}
