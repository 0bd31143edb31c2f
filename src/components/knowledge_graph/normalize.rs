use std::collections::HashSet;

use log::debug;

use super::filter::FilterState;
use crate::api::{GraphData, GraphNode, NodePayload};
use crate::components::force_graph::{EdgeStyle, NodeKind, RenderEdge, RenderGraph, RenderNode};

/// Turn an API payload into what the canvas draws.
///
/// Decisions outside the active filters are dropped, entities always survive, and an edge
/// is kept only when both of its endpoints are still in the node set.
pub fn normalize(data: Option<&GraphData>, filters: &FilterState) -> RenderGraph {
	let Some(data) = data else {
		return RenderGraph::default();
	};

	let nodes: Vec<RenderNode> = data
		.nodes
		.iter()
		.filter(|node| survives(node, filters))
		.map(|node| RenderNode {
			id: node.id.clone(),
			label: node.label.clone(),
			kind: node_kind(&node.payload),
			node: node.clone(),
		})
		.collect();

	let visible: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
	let edges: Vec<RenderEdge> = data
		.edges
		.iter()
		.filter(|edge| {
			let keep = visible.contains(edge.source.as_str()) && visible.contains(edge.target.as_str());
			if !keep {
				debug!("dropping edge {} ({} -> {})", edge.id, edge.source, edge.target);
			}
			keep
		})
		.map(|edge| RenderEdge {
			id: edge.id.clone(),
			source: edge.source.clone(),
			target: edge.target.clone(),
			style: EdgeStyle::from_relationship(&edge.relationship),
			weight: edge.weight,
		})
		.collect();

	RenderGraph { nodes, edges }
}

fn survives(node: &GraphNode, filters: &FilterState) -> bool {
	match &node.payload {
		NodePayload::Decision(decision) => filters.matches_decision(decision),
		NodePayload::Entity(_) => true,
	}
}

pub fn node_kind(payload: &NodePayload) -> NodeKind {
	match payload {
		NodePayload::Decision(_) => NodeKind::Decision,
		NodePayload::Entity(entity) => NodeKind::Entity(entity.kind.clone()),
	}
}

/// Counts shown by the stats panel; always taken from the rendered graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphStats {
	pub nodes: usize,
	pub edges: usize,
	pub decisions: usize,
	pub entities: usize,
}

impl GraphStats {
	pub fn of(graph: &RenderGraph) -> Self {
		let decisions = graph
			.nodes
			.iter()
			.filter(|n| n.kind == NodeKind::Decision)
			.count();
		Self {
			nodes: graph.nodes.len(),
			edges: graph.edges.len(),
			decisions,
			entities: graph.nodes.len() - decisions,
		}
	}

	pub fn nodes_label(&self) -> String {
		format!("{} nodes", self.nodes)
	}

	pub fn edges_label(&self) -> String {
		format!("{} edges", self.edges)
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use crate::api::{Decision, DecisionSource, Entity, EntityKind, GraphEdge};

	pub(crate) fn decision_node(id: &str, source: Option<DecisionSource>, project: Option<&str>) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: format!("Decision {id}"),
			has_embedding: true,
			payload: NodePayload::Decision(Decision {
				id: id.into(),
				trigger: "Need to pick a queue".into(),
				context: "High write volume".into(),
				options: vec!["Kafka".into(), "RabbitMQ".into()],
				decision: "Kafka".into(),
				rationale: "Replay and throughput".into(),
				confidence: 0.8,
				created_at: "2024-03-01T12:00:00Z".into(),
				source,
				project_name: project.map(Into::into),
				entities: vec![],
			}),
		}
	}

	pub(crate) fn entity_node(id: &str, kind: EntityKind) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: id.into(),
			has_embedding: false,
			payload: NodePayload::Entity(Entity {
				id: id.into(),
				name: id.into(),
				kind,
			}),
		}
	}

	pub(crate) fn edge(id: &str, source: &str, target: &str, relationship: &str) -> GraphEdge {
		GraphEdge {
			id: id.into(),
			source: source.into(),
			target: target.into(),
			relationship: relationship.into(),
			weight: 1.0,
		}
	}

	/// Three nodes, one edge.
	pub(crate) fn sample() -> GraphData {
		GraphData {
			nodes: vec![
				decision_node("d1", Some(DecisionSource::Interview), Some("alpha")),
				entity_node("kafka", EntityKind::Technology),
				entity_node("events", EntityKind::Concept),
			],
			edges: vec![edge("x1", "d1", "kafka", "INVOLVES")],
		}
	}

	#[test]
	fn missing_data_yields_empty_graph() {
		assert!(normalize(None, &FilterState::default()).is_empty());
		assert!(normalize(Some(&GraphData::default()), &FilterState::default()).is_empty());
	}

	#[test]
	fn unfiltered_graph_keeps_every_node_and_edge() {
		let data = sample();
		let graph = normalize(Some(&data), &FilterState::default());
		assert_eq!(graph.nodes.len(), data.nodes.len());
		assert_eq!(graph.edges.len(), data.edges.len());
		assert_eq!(graph.nodes[0].kind, NodeKind::Decision);
		assert_eq!(graph.nodes[1].kind, NodeKind::Entity(EntityKind::Technology));
		assert_eq!(graph.edges[0].style, EdgeStyle::Involves);
		assert_eq!(graph.nodes[0].node, data.nodes[0]);
	}

	#[test]
	fn stats_labels_match_rendered_graph() {
		let graph = normalize(Some(&sample()), &FilterState::default());
		let stats = GraphStats::of(&graph);
		assert_eq!(stats.nodes_label(), "3 nodes");
		assert_eq!(stats.edges_label(), "1 edges");
		assert_eq!(stats.decisions, 1);
		assert_eq!(stats.entities, 2);
	}

	#[test]
	fn filtered_out_decision_takes_its_edges_along() {
		let filters = FilterState {
			source: Some("manual".into()),
			project: None,
		};
		let graph = normalize(Some(&sample()), &filters);
		assert_eq!(graph.nodes.len(), 2);
		assert!(graph.edges.is_empty());
		assert!(graph.node("d1").is_none());
	}

	#[test]
	fn dangling_edges_are_dropped() {
		let mut data = sample();
		data.edges.push(edge("x2", "kafka", "ghost", "RELATED_TO"));
		let graph = normalize(Some(&data), &FilterState::default());
		assert_eq!(graph.edges.len(), 1);
		assert_eq!(graph.edges[0].id, "x1");
	}

	#[test]
	fn decision_without_project_only_survives_unfiltered() {
		let data = GraphData {
			nodes: vec![decision_node("d9", None, None)],
			edges: vec![],
		};
		assert_eq!(normalize(Some(&data), &FilterState::default()).nodes.len(), 1);
		let filters = FilterState {
			source: None,
			project: Some("alpha".into()),
		};
		assert!(normalize(Some(&data), &filters).is_empty());
	}
}
