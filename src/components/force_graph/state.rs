use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::config::{Config, Physics};
use crate::graph::style::Shape;
use crate::graph::{Edge, EdgeId, NodeId, NodeView};
use crate::highlight::Selection;
use crate::projection::{NodeVisual, RenderSurface};

pub const HIT_RADIUS: f64 = 12.0;
/// Screen-space distance within which a click selects an edge.
pub const EDGE_HIT_PX: f64 = 6.0;
/// Pointer travel beyond which a press is a drag, not a click.
pub const CLICK_SLOP_PX: f64 = 4.0;
const SPAWN_RADIUS: f64 = 100.0;
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: NodeId,
	pub label: String,
	pub title: String,
	pub color: &'static str,
	pub radius: f64,
	pub shape: Shape,
	pub font_size: f64,
	pub shadow: bool,
	pub visual: NodeVisual,
}

impl NodeInfo {
	fn from_view(view: &NodeView) -> Self {
		Self {
			id: view.id.clone(),
			label: view.label.clone(),
			title: view.title.clone(),
			color: view.color,
			radius: (view.size * 0.5).max(3.0),
			shape: view.shape,
			font_size: view.font.size,
			shadow: view.shadow,
			visual: NodeVisual::default(),
		}
	}
}

#[derive(Clone, Debug)]
pub struct EdgeInfo {
	pub width: f64,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Tracks whether a press has travelled far enough to stop being a click.
#[derive(Clone, Debug, Default)]
pub struct PointerState {
	pub down_x: f64,
	pub down_y: f64,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub x: f64,
	pub y: f64,
}

/// A background star; position is a fraction of the viewport.
#[derive(Clone, Debug)]
pub struct Star {
	pub x: f64,
	pub y: f64,
	pub size: f64,
	pub phase: f64,
}

impl Star {
	/// Opacity in [0.3, 1.0] on a five second cycle.
	pub fn alpha(&self, time: f64) -> f64 {
		let wave = 0.5 - 0.5 * (2.0 * PI * (time / 5.0 + self.phase)).cos();
		0.3 + 0.7 * wave
	}
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, EdgeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub pointer: PointerState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	pub visible: bool,
	pub background: String,
	pub stars: Vec<Star>,
	physics: Physics,
	id_to_idx: HashMap<NodeId, DefaultNodeIdx>,
	edges: Vec<(EdgeId, DefaultNodeIdx, DefaultNodeIdx)>,
	/// Positions remembered across `clear` so re-added nodes land where they settled.
	hints: HashMap<NodeId, (f32, f32)>,
}

fn simulation(physics: &Physics) -> SimulationParameters {
	SimulationParameters {
		force_charge: physics.force_charge,
		force_spring: physics.force_spring,
		force_max: physics.force_max,
		node_speed: physics.node_speed,
		damping_factor: physics.damping_factor,
	}
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

fn starfield(count: usize) -> Vec<Star> {
	(0..count)
		.map(|i| Star {
			x: rand_simple(i * 4),
			y: rand_simple(i * 4 + 1),
			size: 0.5 + rand_simple(i * 4 + 2) * 2.5,
			phase: rand_simple(i * 4 + 3),
		})
		.collect()
}

impl ForceGraphState {
	pub fn new(config: &Config, width: f64, height: f64) -> Self {
		Self {
			graph: ForceGraph::new(simulation(&config.physics)),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			pointer: PointerState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
			visible: false,
			background: config.background.clone(),
			stars: starfield(config.star_count),
			physics: config.physics,
			id_to_idx: HashMap::new(),
			edges: Vec::new(),
			hints: HashMap::new(),
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// World-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS.max(node.data.user_data.radius) {
				found = Some(node.index());
			}
		});
		found
	}

	/// Nearest edge within `EDGE_HIT_PX` of the screen point.
	pub fn edge_at_position(&self, sx: f64, sy: f64) -> Option<EdgeId> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let threshold = EDGE_HIT_PX / self.transform.k;
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});

		self.edges
			.iter()
			.filter_map(|(id, src, tgt)| {
				let (a, b) = (positions.get(src)?, positions.get(tgt)?);
				Some((*id, segment_distance((gx, gy), *a, *b)))
			})
			.filter(|(_, d)| *d <= threshold)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(id, _)| id)
	}

	/// Resolve a click: nodes win over edges, edges over empty space.
	pub fn pick(&self, sx: f64, sy: f64) -> Selection {
		if let Some(idx) = self.node_at_position(sx, sy) {
			if let Some(id) = self.node_id(idx) {
				return Selection::Node(id);
			}
		}
		match self.edge_at_position(sx, sy) {
			Some(edge) => Selection::Edge(edge),
			None => Selection::Empty,
		}
	}

	fn node_id(&self, idx: DefaultNodeIdx) -> Option<NodeId> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>, sx: f64, sy: f64) {
		self.hover.node = node;
		self.hover.x = sx;
		self.hover.y = sy;
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
	}

	/// Title of the hovered node, for the tooltip.
	pub fn hovered_title(&self) -> Option<String> {
		let idx = self.hover.node?;
		let mut title = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				title = Some(node.data.user_data.title.clone());
			}
		});
		title
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	fn spawn_position(&self) -> (f32, f32) {
		let n = self.id_to_idx.len() as f64;
		let angle = n * GOLDEN_ANGLE;
		let r = SPAWN_RADIUS * (1.0 + n.sqrt() * 0.1);
		((r * angle.cos()) as f32, (r * angle.sin()) as f32)
	}
}

fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (dx, dy) = (b.0 - a.0, b.1 - a.1);
	let len_sq = dx * dx + dy * dy;
	let t = if len_sq < 1e-9 {
		0.0
	} else {
		(((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
	((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

impl RenderSurface for ForceGraphState {
	fn add_node(&mut self, view: &NodeView) {
		let (x, y) = self
			.hints
			.get(&view.id)
			.copied()
			.unwrap_or_else(|| self.spawn_position());
		let idx = self.graph.add_node(NodeData {
			x,
			y,
			mass: 10.0,
			is_anchor: false,
			user_data: NodeInfo::from_view(view),
		});
		self.id_to_idx.insert(view.id.clone(), idx);
	}

	fn add_edge(&mut self, id: EdgeId, edge: &Edge) {
		if let (Some(&src), Some(&tgt)) =
			(self.id_to_idx.get(edge.from()), self.id_to_idx.get(edge.to()))
		{
			self.graph.add_edge(
				src,
				tgt,
				EdgeData {
					user_data: EdgeInfo {
						width: 1.0 + edge.value.max(0.0).sqrt(),
					},
				},
			);
			self.edges.push((id, src, tgt));
		}
	}

	fn clear(&mut self) {
		let mut hints = HashMap::new();
		self.graph.visit_nodes(|node| {
			hints.insert(node.data.user_data.id.clone(), (node.x(), node.y()));
		});
		self.hints = hints;
		self.graph = ForceGraph::new(simulation(&self.physics));
		self.id_to_idx.clear();
		self.edges.clear();
		self.drag = DragState::default();
		self.hover = HoverState::default();
	}

	fn set_node_visual(&mut self, id: &NodeId, visual: NodeVisual) {
		let Some(&idx) = self.id_to_idx.get(id) else {
			return;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.user_data.visual = visual;
			}
		});
	}

	fn set_visible(&mut self, visible: bool) {
		self.visible = visible;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn segment_distance_clamps_to_endpoints() {
		assert_eq!(segment_distance((0.0, 5.0), (-10.0, 0.0), (10.0, 0.0)), 5.0);
		assert_eq!(segment_distance((13.0, 4.0), (-10.0, 0.0), (10.0, 0.0)), 5.0);
	}

	#[test]
	fn stars_twinkle_within_bounds() {
		for star in starfield(50) {
			assert!((0.0..=1.0).contains(&star.x) && (0.0..=1.0).contains(&star.y));
			for step in 0..20 {
				let alpha = star.alpha(step as f64 * 0.37);
				assert!((0.3 - 1e-9..=1.0 + 1e-9).contains(&alpha));
			}
		}
	}
}
