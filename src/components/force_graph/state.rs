use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::{EdgeStyle, NodeKind, RenderGraph};
use super::viewport::{Bounds, ViewTransform, ViewportCommand};

pub const HIT_RADIUS: f64 = 12.0;
/// Pointer travel (screen px) below which a press-release counts as a click.
pub const CLICK_SLOP: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub color: String,
	pub radius: f64,
}

/// Drawn edge; the simulation itself only knows the endpoints.
#[derive(Clone, Debug)]
pub struct EdgeLink {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub style: EdgeStyle,
	pub width_scale: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
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

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub selected: Option<DefaultNodeIdx>,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	pub edges: Vec<EdgeLink>,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
	radii: HashMap<DefaultNodeIdx, f64>,
}

/// Radius of the seeding ring; grows with the node count so large graphs start spread out.
fn ring_radius(n: usize) -> f64 {
	(n as f64 * 6.0).max(100.0)
}

impl ForceGraphState {
	pub fn new(data: &RenderGraph, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();
		let mut radii = HashMap::new();
		let mut edges = Vec::new();

		let n = data.nodes.len();
		let radius = ring_radius(n);
		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / n as f64;
			// Entities sit on an outer ring around the decisions that reference them.
			let r = if node.kind == NodeKind::Decision {
				radius
			} else {
				radius * 1.5
			};
			let idx = graph.add_node(NodeData {
				x: (r * angle.cos()) as f32,
				y: (r * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color: node.kind.color().to_string(),
					radius: node.kind.radius(),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
			radii.insert(idx, node.kind.radius());
		}

		for edge in &data.edges {
			if let (Some(&src), Some(&tgt)) = (id_to_idx.get(&edge.source), id_to_idx.get(&edge.target)) {
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push(EdgeLink {
					source: src,
					target: tgt,
					style: edge.style,
					width_scale: edge.width_scale(),
				});
			}
		}

		Self {
			graph,
			edges,
			id_to_idx,
			radii,
			transform: ViewTransform::centered(width, height),
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			selected: None,
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		}
	}

	pub fn node_count(&self) -> usize {
		self.id_to_idx.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.transform.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS.max(node.data.user_data.radius) {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn radius(&self, idx: DefaultNodeIdx) -> f64 {
		self.radii.get(&idx).copied().unwrap_or(5.0)
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	pub fn set_selected(&mut self, id: Option<&str>) {
		self.selected = id.and_then(|id| self.id_to_idx.get(id).copied());
	}

	pub fn is_selected(&self, idx: DefaultNodeIdx) -> bool {
		self.selected == Some(idx)
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::with_capacity(self.node_count());
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	pub fn bounds(&self) -> Option<Bounds> {
		Bounds::from_points(self.positions().into_values())
	}

	pub fn apply(&mut self, cmd: ViewportCommand) {
		let bounds = self.bounds();
		cmd.apply(&mut self.transform, self.width, self.height, bounds);
	}

	/// Mouse button released. Returns the clicked node when the press did not turn into a drag.
	pub fn release(&mut self) -> Option<DefaultNodeIdx> {
		let clicked = if self.drag.active && !self.drag.moved {
			self.drag.node_idx
		} else {
			None
		};
		if self.drag.active && self.drag.moved {
			if let Some(idx) = self.drag.node_idx {
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.is_anchor = true;
					}
				});
			}
		}
		self.drag = DragState::default();
		self.pan.active = false;
		clicked
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for edge in &self.edges {
				if edge.source == idx {
					self.hover.neighbors.insert(edge.target);
				} else if edge.target == idx {
					self.hover.neighbors.insert(edge.source);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::{RenderEdge, RenderNode};
	use crate::components::knowledge_graph::normalize::tests::{decision_node, entity_node};
	use crate::api::EntityKind;

	fn render_graph() -> RenderGraph {
		let nodes = vec![
			RenderNode {
				id: "d1".into(),
				label: "Decision d1".into(),
				kind: NodeKind::Decision,
				node: decision_node("d1", None, None),
			},
			RenderNode {
				id: "kafka".into(),
				label: "kafka".into(),
				kind: NodeKind::Entity(EntityKind::Technology),
				node: entity_node("kafka", EntityKind::Technology),
			},
		];
		let edges = vec![
			RenderEdge {
				id: "x1".into(),
				source: "d1".into(),
				target: "kafka".into(),
				style: EdgeStyle::Involves,
				weight: 1.0,
			},
			RenderEdge {
				id: "x2".into(),
				source: "d1".into(),
				target: "missing".into(),
				style: EdgeStyle::Related,
				weight: 1.0,
			},
		];
		RenderGraph { nodes, edges }
	}

	#[test]
	fn builds_simulation_from_render_graph() {
		let state = ForceGraphState::new(&render_graph(), 800.0, 600.0);
		assert_eq!(state.node_count(), 2);
		assert_eq!(state.edge_count(), 1);
		assert_eq!(state.transform, ViewTransform::centered(800.0, 600.0));
	}

	#[test]
	fn selection_and_ids_resolve() {
		let mut state = ForceGraphState::new(&render_graph(), 800.0, 600.0);
		state.set_selected(Some("kafka"));
		let idx = state.selected.unwrap();
		assert!(state.is_selected(idx));
		assert_eq!(state.node_id(idx).as_deref(), Some("kafka"));
		state.set_selected(Some("nope"));
		assert_eq!(state.selected, None);
	}

	#[test]
	fn hover_collects_neighbors() {
		let mut state = ForceGraphState::new(&render_graph(), 800.0, 600.0);
		let d1 = state.id_to_idx["d1"];
		let kafka = state.id_to_idx["kafka"];
		state.set_hover(Some(d1));
		assert!(state.hover.neighbors.contains(&kafka));
		assert!(state.is_highlighted(kafka));
	}

	#[test]
	fn press_release_without_motion_is_a_click() {
		let mut state = ForceGraphState::new(&render_graph(), 800.0, 600.0);
		let d1 = state.id_to_idx["d1"];
		state.drag.active = true;
		state.drag.node_idx = Some(d1);
		assert_eq!(state.release(), Some(d1));

		state.drag.active = true;
		state.drag.moved = true;
		state.drag.node_idx = Some(d1);
		assert_eq!(state.release(), None);
		assert!(!state.drag.active);
	}

	#[test]
	fn hit_test_finds_seeded_node() {
		let state = ForceGraphState::new(&render_graph(), 800.0, 600.0);
		// d1 is seeded at angle 0 on the inner ring
		let (sx, sy) = (400.0 + ring_radius(2), 300.0);
		let hit = state.node_at_position(sx, sy);
		assert_eq!(hit.and_then(|i| state.node_id(i)).as_deref(), Some("d1"));
	}

	#[test]
	fn fit_uses_node_bounds() {
		let mut state = ForceGraphState::new(&render_graph(), 800.0, 600.0);
		state.apply(ViewportCommand::Fit);
		let bounds = state.bounds().unwrap();
		let (cx, cy) = bounds.center();
		let screen = (
			cx * state.transform.k + state.transform.x,
			cy * state.transform.k + state.transform.y,
		);
		assert!((screen.0 - 400.0).abs() < 1e-6 && (screen.1 - 300.0).abs() < 1e-6);
	}
}
