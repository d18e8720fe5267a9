//! Wire shape of the `{nodes, links}` dataset file.

use serde::Deserialize;

use super::model::NodeId;

/// Node and edge ids may be JSON strings or integers.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawId {
	/// `"id": 3`
	Int(i64),
	/// `"id": "p3"`
	Text(String),
}

impl From<RawId> for NodeId {
	fn from(raw: RawId) -> Self {
		match raw {
			RawId::Int(n) => NodeId::from(n),
			RawId::Text(s) => NodeId(s),
		}
	}
}

/// One entry of `nodes`.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique id.
	pub id: RawId,
	/// Display label.
	pub label: String,
	/// `central`, `coauthor`, `institution` or `paper`.
	#[serde(rename = "type", default)]
	pub kind: Option<String>,
	/// Display size override.
	#[serde(default)]
	pub size: Option<f64>,
	/// Kept raw so a non-numeric year is reported rather than rejected by serde.
	#[serde(default)]
	pub year: Option<serde_json::Value>,
}

/// One entry of `links`.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// One endpoint.
	pub source: RawId,
	/// The other endpoint.
	pub target: RawId,
	/// Collaboration weight.
	pub value: f64,
}

/// The whole document.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	/// Declared nodes.
	pub nodes: Vec<GraphNode>,
	/// Undirected relations between them.
	pub links: Vec<GraphLink>,
}
