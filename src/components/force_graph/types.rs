//! Renderer-ready graph shapes produced by the normalizer.

use crate::api::{EntityKind, GraphNode};

/// Visual category of a node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Decision,
	Entity(EntityKind),
}

impl NodeKind {
	pub fn color(&self) -> &'static str {
		match self {
			NodeKind::Decision => "#8b5cf6",
			NodeKind::Entity(EntityKind::Concept) => "#3b82f6",
			NodeKind::Entity(EntityKind::System) => "#10b981",
			NodeKind::Entity(EntityKind::Person) => "#f59e0b",
			NodeKind::Entity(EntityKind::Technology) => "#ec4899",
			NodeKind::Entity(EntityKind::Pattern) => "#14b8a6",
			NodeKind::Entity(EntityKind::Other(_)) => "#71717a",
		}
	}

	pub fn label(&self) -> &'static str {
		match self {
			NodeKind::Decision => "Decision",
			NodeKind::Entity(EntityKind::Concept) => "Concept",
			NodeKind::Entity(EntityKind::System) => "System",
			NodeKind::Entity(EntityKind::Person) => "Person",
			NodeKind::Entity(EntityKind::Technology) => "Technology",
			NodeKind::Entity(EntityKind::Pattern) => "Pattern",
			NodeKind::Entity(EntityKind::Other(_)) => "Other",
		}
	}

	/// Decisions are drawn larger than the entities they reference.
	pub fn radius(&self) -> f64 {
		match self {
			NodeKind::Decision => 7.0,
			NodeKind::Entity(_) => 5.0,
		}
	}

	/// Kinds shown in the legend, in display order.
	pub fn legend() -> [NodeKind; 7] {
		[
			NodeKind::Decision,
			NodeKind::Entity(EntityKind::Concept),
			NodeKind::Entity(EntityKind::System),
			NodeKind::Entity(EntityKind::Person),
			NodeKind::Entity(EntityKind::Technology),
			NodeKind::Entity(EntityKind::Pattern),
			NodeKind::Entity(EntityKind::Other(String::new())),
		]
	}
}

/// Stroke style derived from an edge's relationship name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeStyle {
	Involves,
	SimilarTo,
	InfluencedBy,
	Contradicts,
	Related,
}

impl EdgeStyle {
	pub fn from_relationship(relationship: &str) -> Self {
		match relationship.to_ascii_uppercase().as_str() {
			"INVOLVES" => EdgeStyle::Involves,
			"SIMILAR_TO" => EdgeStyle::SimilarTo,
			"INFLUENCED_BY" => EdgeStyle::InfluencedBy,
			"CONTRADICTS" => EdgeStyle::Contradicts,
			_ => EdgeStyle::Related,
		}
	}

	/// RGB triple; alpha is applied by the renderer.
	pub fn rgb(&self) -> (u8, u8, u8) {
		match self {
			EdgeStyle::Involves => (100, 180, 255),
			EdgeStyle::SimilarTo => (139, 92, 246),
			EdgeStyle::InfluencedBy => (245, 158, 11),
			EdgeStyle::Contradicts => (239, 68, 68),
			EdgeStyle::Related => (161, 161, 170),
		}
	}

	pub fn css_color(&self) -> String {
		let (r, g, b) = self.rgb();
		format!("rgb({r}, {g}, {b})")
	}

	/// `(dash, gap)` in world units, `None` for a solid line.
	pub fn dash(&self) -> Option<(f64, f64)> {
		match self {
			EdgeStyle::SimilarTo => Some((8.0, 4.0)),
			EdgeStyle::InfluencedBy => Some((2.0, 3.0)),
			_ => None,
		}
	}

	pub fn animated(&self) -> bool {
		matches!(self, EdgeStyle::SimilarTo)
	}

	pub fn label(&self) -> &'static str {
		match self {
			EdgeStyle::Involves => "Involves",
			EdgeStyle::SimilarTo => "Similar to",
			EdgeStyle::InfluencedBy => "Influenced by",
			EdgeStyle::Contradicts => "Contradicts",
			EdgeStyle::Related => "Related",
		}
	}

	pub fn all() -> [EdgeStyle; 5] {
		[
			EdgeStyle::Involves,
			EdgeStyle::SimilarTo,
			EdgeStyle::InfluencedBy,
			EdgeStyle::Contradicts,
			EdgeStyle::Related,
		]
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderNode {
	pub id: String,
	pub label: String,
	pub kind: NodeKind,
	/// Original node, kept for the detail panel and click callbacks.
	pub node: GraphNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderEdge {
	pub id: String,
	pub source: String,
	pub target: String,
	pub style: EdgeStyle,
	pub weight: f64,
}

impl RenderEdge {
	/// Line width multiplier in `[0.5, 3.0]`.
	pub fn width_scale(&self) -> f64 {
		if self.weight.is_finite() {
			self.weight.clamp(0.5, 3.0)
		} else {
			1.0
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderGraph {
	pub nodes: Vec<RenderNode>,
	pub edges: Vec<RenderEdge>,
}

impl RenderGraph {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn node(&self, id: &str) -> Option<&RenderNode> {
		self.nodes.iter().find(|n| n.id == id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn relationship_names_map_case_insensitively() {
		assert_eq!(EdgeStyle::from_relationship("INVOLVES"), EdgeStyle::Involves);
		assert_eq!(EdgeStyle::from_relationship("similar_to"), EdgeStyle::SimilarTo);
		assert_eq!(EdgeStyle::from_relationship("SUPERSEDES"), EdgeStyle::Related);
	}

	#[test]
	fn weight_scale_is_bounded() {
		let mut edge = RenderEdge {
			id: "e".into(),
			source: "a".into(),
			target: "b".into(),
			style: EdgeStyle::Related,
			weight: 0.1,
		};
		assert_eq!(edge.width_scale(), 0.5);
		edge.weight = 9.0;
		assert_eq!(edge.width_scale(), 3.0);
		edge.weight = f64::NAN;
		assert_eq!(edge.width_scale(), 1.0);
	}
}
