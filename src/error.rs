//! Error types shared by the loader, the projection and the browser shell.

use thiserror::Error;

use crate::graph::{EdgeId, NodeId};

/// The dataset violates its schema. Fatal at startup; nothing is rendered.
#[derive(Debug, Error)]
pub enum MalformedDatasetError {
	/// Invalid JSON or a missing required field.
	#[error("failed to parse dataset: {0}")]
	Parse(#[from] serde_json::Error),
	/// Two nodes share an id.
	#[error("duplicate node id `{0}`")]
	DuplicateNode(NodeId),
	/// An edge endpoint does not resolve to a declared node.
	#[error("edge #{edge} references unknown node id `{id}`")]
	UnknownEndpoint {
		/// Position of the offending edge in `links`.
		edge: usize,
		/// The unresolved endpoint.
		id: NodeId,
	},
	/// A paper node without a `year`.
	#[error("paper `{0}` has no year")]
	MissingYear(NodeId),
	/// A paper node whose `year` is not an integral number.
	#[error("paper `{id}` has non-numeric year `{value}`")]
	NonNumericYear {
		/// The paper.
		id: NodeId,
		/// The raw JSON value found.
		value: String,
	},
	/// Not exactly one node of type `central`.
	#[error("expected exactly one central node, found {0}")]
	CentralCount(usize),
}

/// The canvas or its host could not be initialized.
#[derive(Debug, Clone, Error)]
#[error("rendering surface unavailable: {reason}")]
pub struct RenderingSurfaceUnavailableError {
	/// What was missing.
	pub reason: String,
}

impl RenderingSurfaceUnavailableError {
	/// Build from anything printable.
	pub fn new(reason: impl Into<String>) -> Self {
		Self {
			reason: reason.into(),
		}
	}
}

/// Page configuration could not be read.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Invalid JSON.
	#[error("failed to parse config: {0}")]
	Parse(#[from] serde_json::Error),
	/// A field holds an unusable value.
	#[error("invalid config value for `{field}`: {reason}")]
	Invalid {
		/// Field name.
		field: &'static str,
		/// Why it was rejected.
		reason: String,
	},
}

/// A mutation would break the projection's invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
	/// An edge was added before one of its endpoints.
	#[error("edge #{edge} has endpoint `{missing}` not present in the projection")]
	DanglingEdge {
		/// The edge.
		edge: EdgeId,
		/// The missing endpoint.
		missing: NodeId,
	},
}

/// Any startup failure surfaced by the page.
#[derive(Debug, Error)]
pub enum ConstellationError {
	/// See [`MalformedDatasetError`].
	#[error(transparent)]
	Dataset(#[from] MalformedDatasetError),
	/// See [`ConfigError`].
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// See [`RenderingSurfaceUnavailableError`].
	#[error(transparent)]
	Surface(#[from] RenderingSurfaceUnavailableError),
	/// See [`ProjectionError`].
	#[error(transparent)]
	Projection(#[from] ProjectionError),
}
