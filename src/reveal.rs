//! Chronological time-lapse reveal of the graph.
//!
//! The sequencer first loads the whole graph so the layout engine can settle,
//! then clears back to the central node and adds one paper per step, oldest
//! first, together with any co-authors it brings in.

use std::fmt;
use std::rc::Rc;

use log::{debug, info};

use crate::error::{MalformedDatasetError, ProjectionError};
use crate::graph::{Graph, NodeKind};
use crate::projection::{Projection, RenderSurface};

/// Where the sequencer is in its one-way run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
	/// Nothing pushed yet.
	Idle,
	/// The whole graph is loaded, hidden, so the layout can settle.
	Priming,
	/// Only the central node is shown.
	Resetting,
	/// Papers before `next` are shown.
	Revealing {
		/// Index into the year-sorted papers.
		next: usize,
	},
	/// Every paper has been revealed.
	Complete,
}

/// Text for the on-screen year indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indicator {
	/// Shown while the layout primes.
	Starting,
	/// Year of the paper just revealed.
	Year(i32),
	/// Shown once every paper is out.
	Complete,
}

impl fmt::Display for Indicator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Indicator::Starting => f.write_str("Starting..."),
			Indicator::Year(year) => write!(f, "{year}"),
			Indicator::Complete => f.write_str("Complete"),
		}
	}
}

/// Drives a [`Projection`] through the reveal, one transition per call.
pub struct RevealSequencer {
	graph: Rc<Graph>,
	central: usize,
	/// Positions in `graph.nodes()`, ascending by year, ties in input order.
	papers: Vec<usize>,
	state: RevealState,
}

impl RevealSequencer {
	/// Fails only for a graph without a central node.
	pub fn new(graph: Rc<Graph>) -> Result<Self, MalformedDatasetError> {
		let central = graph
			.nodes()
			.iter()
			.position(|n| n.kind == NodeKind::Central)
			.ok_or(MalformedDatasetError::CentralCount(0))?;
		let papers = graph.paper_positions_by_year();
		Ok(Self {
			graph,
			central,
			papers,
			state: RevealState::Idle,
		})
	}

	/// Current state.
	pub fn state(&self) -> RevealState {
		self.state
	}

	/// Whether the last paper has been revealed.
	pub fn is_complete(&self) -> bool {
		self.state == RevealState::Complete
	}

	/// Number of papers the run will reveal.
	pub fn paper_count(&self) -> usize {
		self.papers.len()
	}

	/// Perform exactly one transition. Returns the new indicator text if it changed.
	pub fn advance<S: RenderSurface>(
		&mut self,
		projection: &mut Projection<S>,
	) -> Result<Option<Indicator>, ProjectionError> {
		match self.state {
			RevealState::Idle => {
				projection.prime(&self.graph)?;
				self.enter(RevealState::Priming);
				Ok(Some(Indicator::Starting))
			}
			RevealState::Priming => {
				projection.reset_to(&self.graph.nodes()[self.central]);
				self.enter(RevealState::Resetting);
				Ok(None)
			}
			RevealState::Resetting => self.reveal(0, projection),
			RevealState::Revealing { next } => self.reveal(next, projection),
			RevealState::Complete => Ok(None),
		}
	}

	/// Advance until complete, collecting every indicator change.
	pub fn run_to_completion<S: RenderSurface>(
		&mut self,
		projection: &mut Projection<S>,
	) -> Result<Vec<Indicator>, ProjectionError> {
		let mut emitted = Vec::new();
		while !self.is_complete() {
			emitted.extend(self.advance(projection)?);
		}
		Ok(emitted)
	}

	fn reveal<S: RenderSurface>(
		&mut self,
		next: usize,
		projection: &mut Projection<S>,
	) -> Result<Option<Indicator>, ProjectionError> {
		let Some(&paper_idx) = self.papers.get(next) else {
			self.enter(RevealState::Complete);
			return Ok(Some(Indicator::Complete));
		};
		let graph = Rc::clone(&self.graph);
		let paper = &graph.nodes()[paper_idx];
		projection.add_node(paper.view());

		let mut coauthors = 0;
		for (edge_id, edge) in graph.incident_edges(&paper.id) {
			let other = edge.other(&paper.id);
			if !projection.contains_node(other) {
				match graph.node(other) {
					Some(node) if node.kind.is_coauthor() => {
						projection.add_node(node.view());
						coauthors += 1;
					}
					// Institutions and not-yet-revealed papers wait.
					_ => continue,
				}
			}
			projection.add_edge(edge_id, edge)?;
		}

		let year = paper.kind.year().unwrap_or_default();
		debug!(
			"Revealed paper {} ({year}) with {coauthors} new co-authors",
			paper.id
		);
		self.state = RevealState::Revealing { next: next + 1 };
		Ok(Some(Indicator::Year(year)))
	}

	fn enter(&mut self, state: RevealState) {
		info!("Reveal: {:?} -> {:?}", self.state, state);
		self.state = state;
	}
}
