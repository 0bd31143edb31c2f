//! Wire model of the knowledge graph API.

use std::collections::BTreeMap;
use std::fmt;

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Per-key counts returned by the aggregate endpoints (`/api/graph/sources`, `/api/graph/projects`).
pub type FilterCounts = BTreeMap<String, usize>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	#[serde(default, deserialize_with = "skip_malformed")]
	pub nodes: Vec<GraphNode>,
	#[serde(default, deserialize_with = "skip_malformed")]
	pub edges: Vec<GraphEdge>,
}

/// Decode a list item by item, dropping (and logging) entries that do not fit the model
/// so one bad record cannot take the whole graph down with it.
fn skip_malformed<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: Deserializer<'de>,
	T: DeserializeOwned,
{
	let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
	Ok(raw
		.into_iter()
		.filter_map(|value| {
			serde_json::from_value(value)
				.inspect_err(|e| warn!("dropping malformed graph item: {e}"))
				.ok()
		})
		.collect())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
	#[serde(default)]
	pub has_embedding: bool,
	/// `type` and `data` on the wire.
	#[serde(flatten)]
	pub payload: NodePayload,
}

impl GraphNode {
	pub fn is_decision(&self) -> bool {
		matches!(self.payload, NodePayload::Decision(_))
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum NodePayload {
	Decision(Decision),
	Entity(Entity),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decision {
	pub id: String,
	pub trigger: String,
	pub context: String,
	#[serde(default)]
	pub options: Vec<String>,
	pub decision: String,
	pub rationale: String,
	pub confidence: f64,
	pub created_at: String,
	#[serde(default)]
	pub source: Option<DecisionSource>,
	#[serde(default)]
	pub project_name: Option<String>,
	#[serde(default)]
	pub entities: Vec<Entity>,
}

impl Decision {
	/// Source used for filtering and display; a missing source counts as unknown.
	pub fn source_or_unknown(&self) -> DecisionSource {
		self.source.unwrap_or(DecisionSource::Unknown)
	}

	/// Confidence as a whole percentage, trusting the backend's `[0, 1]` range.
	pub fn confidence_percent(&self) -> i64 {
		(self.confidence * 100.0).round() as i64
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
	ClaudeLogs,
	Interview,
	Manual,
	#[serde(other)]
	Unknown,
}

impl DecisionSource {
	/// Key used by the `source_filter` query parameter and the sources endpoint.
	pub fn key(&self) -> &'static str {
		match self {
			DecisionSource::ClaudeLogs => "claude_logs",
			DecisionSource::Interview => "interview",
			DecisionSource::Manual => "manual",
			DecisionSource::Unknown => "unknown",
		}
	}

	pub fn label(&self) -> &'static str {
		match self {
			DecisionSource::ClaudeLogs => "Claude Logs",
			DecisionSource::Interview => "Interview",
			DecisionSource::Manual => "Manual",
			DecisionSource::Unknown => "Unknown",
		}
	}

	pub fn from_key(key: &str) -> Self {
		match key {
			"claude_logs" => DecisionSource::ClaudeLogs,
			"interview" => DecisionSource::Interview,
			"manual" => DecisionSource::Manual,
			_ => DecisionSource::Unknown,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
	pub id: String,
	pub name: String,
	#[serde(rename = "type")]
	pub kind: EntityKind,
}

/// Entity category; kinds this client does not know are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityKind {
	Concept,
	System,
	Person,
	Technology,
	Pattern,
	Other(String),
}

impl EntityKind {
	pub fn as_str(&self) -> &str {
		match self {
			EntityKind::Concept => "concept",
			EntityKind::System => "system",
			EntityKind::Person => "person",
			EntityKind::Technology => "technology",
			EntityKind::Pattern => "pattern",
			EntityKind::Other(s) => s,
		}
	}
}

impl From<String> for EntityKind {
	fn from(s: String) -> Self {
		match s.as_str() {
			"concept" => EntityKind::Concept,
			"system" => EntityKind::System,
			"person" => EntityKind::Person,
			"technology" => EntityKind::Technology,
			"pattern" => EntityKind::Pattern,
			_ => EntityKind::Other(s),
		}
	}
}

impl From<EntityKind> for String {
	fn from(kind: EntityKind) -> Self {
		kind.as_str().to_string()
	}
}

impl fmt::Display for EntityKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

fn default_weight() -> f64 {
	1.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
	pub id: String,
	pub source: String,
	pub target: String,
	pub relationship: String,
	#[serde(default = "default_weight")]
	pub weight: f64,
}

#[cfg(test)]
mod tests {
	use super::*;

	const SAMPLE: &str = r#"{
		"nodes": [
			{
				"id": "d1",
				"type": "decision",
				"label": "Use PostgreSQL",
				"has_embedding": true,
				"data": {
					"id": "d1",
					"trigger": "Need a database",
					"context": "Relational data",
					"options": ["PostgreSQL", "MongoDB"],
					"decision": "PostgreSQL",
					"rationale": "ACID and joins",
					"confidence": 0.92,
					"created_at": "2024-01-01T00:00:00Z",
					"source": "interview",
					"entities": [{"id": "e1", "name": "PostgreSQL", "type": "technology"}]
				}
			},
			{
				"id": "e1",
				"type": "entity",
				"label": "PostgreSQL",
				"has_embedding": false,
				"data": {"id": "e1", "name": "PostgreSQL", "type": "technology"}
			}
		],
		"edges": [
			{"id": "x1", "source": "d1", "target": "e1", "relationship": "INVOLVES", "weight": 1.0}
		]
	}"#;

	#[test]
	fn decodes_tagged_node_payloads() {
		let data: GraphData = serde_json::from_str(SAMPLE).unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.edges.len(), 1);

		let NodePayload::Decision(decision) = &data.nodes[0].payload else {
			panic!("expected a decision payload");
		};
		assert_eq!(decision.source, Some(DecisionSource::Interview));
		assert_eq!(decision.project_name, None);
		assert_eq!(decision.entities[0].kind, EntityKind::Technology);
		assert!(data.nodes[0].is_decision());

		let NodePayload::Entity(entity) = &data.nodes[1].payload else {
			panic!("expected an entity payload");
		};
		assert_eq!(entity.name, "PostgreSQL");
	}

	#[test]
	fn confidence_rounds_to_percent() {
		let data: GraphData = serde_json::from_str(SAMPLE).unwrap();
		let NodePayload::Decision(decision) = &data.nodes[0].payload else {
			panic!("expected a decision payload");
		};
		assert_eq!(decision.confidence_percent(), 92);
	}

	#[test]
	fn unknown_source_and_entity_kind_are_kept() {
		let json = r#"{
			"id": "d2", "trigger": "t", "context": "c", "decision": "d",
			"rationale": "r", "confidence": 0.5, "created_at": "2024-01-01",
			"source": "slack"
		}"#;
		let decision: Decision = serde_json::from_str(json).unwrap();
		assert_eq!(decision.source, Some(DecisionSource::Unknown));
		assert!(decision.options.is_empty());

		let entity: Entity =
			serde_json::from_str(r#"{"id": "e", "name": "Queue", "type": "component"}"#).unwrap();
		assert_eq!(entity.kind, EntityKind::Other("component".into()));
		assert_eq!(entity.kind.to_string(), "component");
	}

	#[test]
	fn missing_source_counts_as_unknown() {
		let json = r#"{
			"id": "d3", "trigger": "t", "context": "c", "decision": "d",
			"rationale": "r", "confidence": 1.0, "created_at": "2024-01-01"
		}"#;
		let decision: Decision = serde_json::from_str(json).unwrap();
		assert_eq!(decision.source, None);
		assert_eq!(decision.source_or_unknown(), DecisionSource::Unknown);
	}

	#[test]
	fn malformed_node_is_dropped_without_losing_the_rest() {
		let json = r#"{
			"nodes": [
				{
					"id": "d1", "type": "decision", "label": "No timestamp",
					"data": {
						"id": "d1", "trigger": "t", "context": "c", "decision": "d",
						"rationale": "r", "confidence": 0.5
					}
				},
				{
					"id": "e1", "type": "entity", "label": "Redis",
					"data": {"id": "e1", "name": "Redis", "type": "technology"}
				}
			],
			"edges": [
				{"id": "x1", "source": "d1", "target": "e1", "relationship": "INVOLVES"},
				{"id": "x2", "source": "d1"}
			]
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		assert_eq!(data.nodes.len(), 1);
		assert_eq!(data.nodes[0].id, "e1");
		assert_eq!(data.edges.len(), 1);
		assert_eq!(data.edges[0].id, "x1");
	}

	#[test]
	fn edge_weight_defaults_to_one() {
		let edge: GraphEdge =
			serde_json::from_str(r#"{"id": "x", "source": "a", "target": "b", "relationship": "RELATED_TO"}"#)
				.unwrap();
		assert_eq!(edge.weight, 1.0);
	}

	#[test]
	fn counts_keep_key_order() {
		let counts: FilterCounts =
			serde_json::from_str(r#"{"manual": 2, "claude_logs": 5, "interview": 3}"#).unwrap();
		let keys: Vec<_> = counts.keys().map(String::as_str).collect();
		assert_eq!(keys, ["claude_logs", "interview", "manual"]);
	}
}
