use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use super::style::{self, NodeStyle};

/// Default display size for nodes that omit `size`.
pub const DEFAULT_NODE_SIZE: f64 = 10.0;

/// Stable node identifier. Numeric ids in the dataset are kept in decimal form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
	/// Borrow the id text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for NodeId {
	fn from(s: &str) -> Self {
		Self(s.to_owned())
	}
}

impl From<i64> for NodeId {
	fn from(n: i64) -> Self {
		Self(n.to_string())
	}
}

/// Position of an edge in the dataset's `links` array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EdgeId(pub usize);

impl fmt::Display for EdgeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

/// Node category. Only papers carry a year.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	/// The researcher the graph is about.
	Central,
	/// A co-author of the central researcher.
	Coauthor,
	/// An affiliation.
	Institution,
	/// A publication.
	Paper {
		/// Publication year.
		year: i32,
	},
	/// Any type the style table does not know.
	Other,
}

impl NodeKind {
	/// The year, for papers.
	pub fn year(&self) -> Option<i32> {
		match self {
			NodeKind::Paper { year } => Some(*year),
			_ => None,
		}
	}

	/// Whether the reveal may pull this node in alongside a paper.
	pub fn is_coauthor(&self) -> bool {
		matches!(self, NodeKind::Coauthor)
	}
}

/// A validated dataset node.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Unique id.
	pub id: NodeId,
	/// Display label.
	pub label: String,
	/// Display size; [`DEFAULT_NODE_SIZE`] when the dataset omits it.
	pub size: f64,
	/// Category, carrying the year for papers.
	pub kind: NodeKind,
}

impl Node {
	/// Style for this node's category.
	pub fn style(&self) -> NodeStyle {
		style::lookup(&self.kind)
	}

	/// Tooltip text; papers append their year.
	pub fn title(&self) -> String {
		match self.kind {
			NodeKind::Paper { year } => format!("{}\n📅 {}", self.label, year),
			_ => self.label.clone(),
		}
	}

	/// The display-relevant subset handed to a rendering surface.
	pub fn view(&self) -> NodeView {
		let style = self.style();
		NodeView {
			id: self.id.clone(),
			label: self.label.clone(),
			title: self.title(),
			color: style.color,
			size: self.size,
			shape: style.shape,
			font: style.font,
			shadow: style.shadow,
		}
	}
}

/// What a rendering surface is allowed to see of a node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeView {
	/// Node id.
	pub id: NodeId,
	/// Text drawn under the node.
	pub label: String,
	/// Hover tooltip.
	pub title: String,
	/// Fill color.
	pub color: &'static str,
	/// Radius before zoom.
	pub size: f64,
	/// Marker shape.
	pub shape: style::Shape,
	/// Label font.
	pub font: style::Font,
	/// Whether a glow is drawn behind the node.
	pub shadow: bool,
}

/// Undirected relation stored with a from/to orientation.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	/// First endpoint as written in the dataset.
	pub source: NodeId,
	/// Second endpoint as written in the dataset.
	pub target: NodeId,
	/// Collaboration weight; drives the drawn width.
	pub value: f64,
}

impl Edge {
	/// Alias of `source`.
	pub fn from(&self) -> &NodeId {
		&self.source
	}

	/// Alias of `target`.
	pub fn to(&self) -> &NodeId {
		&self.target
	}

	/// Whether `id` is either endpoint.
	pub fn touches(&self, id: &NodeId) -> bool {
		&self.source == id || &self.target == id
	}

	/// The endpoint opposite `id`. Assumes `id` is an endpoint.
	pub fn other(&self, id: &NodeId) -> &NodeId {
		if &self.source == id {
			&self.target
		} else {
			&self.source
		}
	}
}

impl Serialize for Edge {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut s = serializer.serialize_struct("Edge", 6)?;
		s.serialize_field("source", &self.source)?;
		s.serialize_field("target", &self.target)?;
		s.serialize_field("from", self.from())?;
		s.serialize_field("to", self.to())?;
		s.serialize_field("value", &self.value)?;
		s.serialize_field("color", style::EDGE_COLOR)?;
		s.end()
	}
}

/// The immutable source-of-truth graph.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	nodes: Vec<Node>,
	index: HashMap<NodeId, usize>,
	edges: Vec<Edge>,
}

impl Graph {
	/// Callers must have validated ids; see `loader`.
	pub(super) fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
		let index = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();
		Self {
			nodes,
			index,
			edges,
		}
	}

	/// Nodes in input order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Edges in input order with their ids.
	pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
		self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i), e))
	}

	/// Look up an edge by id.
	pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
		self.edges.get(id.0)
	}

	/// Number of edges.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Look up a node by id.
	pub fn node(&self, id: &NodeId) -> Option<&Node> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	/// The single central node. Loading guarantees it exists.
	pub fn central(&self) -> Option<&Node> {
		self.nodes.iter().find(|n| n.kind == NodeKind::Central)
	}

	/// Papers ascending by year; equal years keep input order.
	pub fn papers_by_year(&self) -> Vec<&Node> {
		self.paper_positions_by_year()
			.into_iter()
			.map(|i| &self.nodes[i])
			.collect()
	}

	/// Same order as [`Graph::papers_by_year`], as positions in [`Graph::nodes`].
	pub fn paper_positions_by_year(&self) -> Vec<usize> {
		let mut papers: Vec<usize> = self
			.nodes
			.iter()
			.enumerate()
			.filter(|(_, n)| matches!(n.kind, NodeKind::Paper { .. }))
			.map(|(i, _)| i)
			.collect();
		papers.sort_by_key(|&i| self.nodes[i].kind.year());
		papers
	}

	/// Edges touching `id`, in input order.
	pub fn incident_edges<'a>(
		&'a self,
		id: &'a NodeId,
	) -> impl Iterator<Item = (EdgeId, &'a Edge)> + 'a {
		self.edges().filter(move |(_, e)| e.touches(id))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str, kind: NodeKind) -> Node {
		Node {
			id: id.into(),
			label: id.to_uppercase(),
			size: DEFAULT_NODE_SIZE,
			kind,
		}
	}

	#[test]
	fn papers_sort_stably_by_year() {
		let graph = Graph::from_parts(
			vec![
				node("c", NodeKind::Central),
				node("p1", NodeKind::Paper { year: 2010 }),
				node("p2", NodeKind::Paper { year: 2001 }),
				node("p3", NodeKind::Paper { year: 2010 }),
				node("p4", NodeKind::Paper { year: 1999 }),
			],
			vec![],
		);
		let order: Vec<&str> = graph
			.papers_by_year()
			.iter()
			.map(|n| n.id.as_str())
			.collect();
		assert_eq!(order, ["p4", "p2", "p1", "p3"]);
		assert_eq!(graph.paper_positions_by_year(), [4, 2, 1, 3]);
	}

	#[test]
	fn edge_serializes_both_namings() {
		let edge = Edge {
			source: "2".into(),
			target: "3".into(),
			value: 1.0,
		};
		let json = serde_json::to_value(&edge).unwrap();
		assert_eq!(json["from"], json["source"]);
		assert_eq!(json["to"], json["target"]);
		assert_eq!(json["color"], "#aaaaaa");
	}

	#[test]
	fn paper_title_carries_year() {
		let paper = node("p", NodeKind::Paper { year: 2005 });
		assert_eq!(paper.title(), "P\n📅 2005");
		assert_eq!(node("a", NodeKind::Coauthor).title(), "A");
	}
}
