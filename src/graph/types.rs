use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Synthetic node identifier, assigned in first-seen order by the normalizer.
pub type NodeId = u32;

/// A 2D position in graph (world) space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
	}

	pub fn midpoint(self, other: Point) -> Point {
		Point::new(self.x + 0.5 * (other.x - self.x), self.y + 0.5 * (other.y - self.y))
	}
}

/// Food-group and knowledge-graph categories a node can carry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category {
	Menu,
	A1,
	A2,
	A3,
	B1,
	B2,
	B3,
	C,
	D,
	HealthBenefit,
	/// A category string the backend sent that we do not recognise.
	Unknown(String),
}

/// One row of the on-canvas legend.
pub struct LegendEntry {
	pub category: Category,
	pub color: &'static str,
	pub label: &'static str,
}

pub const FALLBACK_COLOR: &str = "rgb(247,238,246)";

pub static LEGEND: [LegendEntry; 8] = [
	LegendEntry { category: Category::A1, color: "rgb(81,132,178)", label: "Grains" },
	LegendEntry { category: Category::A2, color: "rgb(170,212,248)", label: "Vegetables" },
	LegendEntry { category: Category::A3, color: "rgb(119,194,243)", label: "Fruits" },
	LegendEntry { category: Category::B1, color: "rgb(213,82,118)", label: "Meat" },
	LegendEntry { category: Category::B2, color: "rgb(241,167,181)", label: "Egg & Dairy" },
	LegendEntry { category: Category::B3, color: "rgb(169,111,176)", label: "Seafood" },
	LegendEntry { category: Category::C, color: "rgb(139,95,162)", label: "Processed food" },
	LegendEntry { category: Category::D, color: "rgb(182,136,203)", label: "Condiments" },
];

impl Category {
	pub fn parse(raw: &str) -> Self {
		match raw.trim() {
			"menu" => Self::Menu,
			"A1" => Self::A1,
			"A2" => Self::A2,
			"A3" => Self::A3,
			"B1" => Self::B1,
			"B2" => Self::B2,
			"B3" => Self::B3,
			"C" => Self::C,
			"D" => Self::D,
			"HealthBenefit" | "effect" => Self::HealthBenefit,
			other => Self::Unknown(other.to_string()),
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			Self::Menu => "menu",
			Self::A1 => "A1",
			Self::A2 => "A2",
			Self::A3 => "A3",
			Self::B1 => "B1",
			Self::B2 => "B2",
			Self::B3 => "B3",
			Self::C => "C",
			Self::D => "D",
			Self::HealthBenefit => "HealthBenefit",
			Self::Unknown(raw) => raw,
		}
	}

	/// True for the eight food-group codes, the only clickable categories.
	pub fn is_food_group(&self) -> bool {
		LEGEND.iter().any(|entry| entry.category == *self)
	}

	pub fn color(&self) -> &'static str {
		LEGEND
			.iter()
			.find(|entry| entry.category == *self)
			.map(|entry| entry.color)
			.unwrap_or(FALLBACK_COLOR)
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: NodeId,
	pub display_name: String,
	pub category: Category,
	/// Present in more than one source subgraph before merging.
	pub is_shared: bool,
	/// Owned by the simulation once the node is in view.
	pub position: Point,
	/// Set while the node is being dragged.
	pub pinned: Option<Point>,
}

impl Node {
	pub fn new(id: NodeId, display_name: impl Into<String>, category: Category) -> Self {
		Self {
			id,
			display_name: display_name.into(),
			category,
			is_shared: false,
			position: Point::ORIGIN,
			pinned: None,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Link {
	pub source: NodeId,
	pub target: NodeId,
	/// May be a `", "` joined merge of several relations between the same pair.
	pub relation: String,
	pub is_shared: bool,
	/// Stable binding key, independent of the link's position in the array.
	pub sequence_index: usize,
}

impl Link {
	pub fn new(source: NodeId, target: NodeId, relation: impl Into<String>, sequence_index: usize) -> Self {
		Self {
			source,
			target,
			relation: relation.into(),
			is_shared: false,
			sequence_index,
		}
	}

	pub fn touches(&self, id: NodeId) -> bool {
		self.source == id || self.target == id
	}
}

/// A self-consistent node and link slice handed to the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
	pub nodes: Vec<Node>,
	pub links: Vec<Link>,
}

impl Dataset {
	pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> Self {
		Self { nodes, links }
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.iter().find(|node| node.id == id)
	}

	pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
		self.nodes.iter_mut().find(|node| node.id == id)
	}

	pub fn contains(&self, id: NodeId) -> bool {
		self.nodes.iter().any(|node| node.id == id)
	}

	pub fn node_ids(&self) -> HashSet<NodeId> {
		self.nodes.iter().map(|node| node.id).collect()
	}

	/// Ids directly linked to `id`, in either direction.
	pub fn neighbors(&self, id: NodeId) -> HashSet<NodeId> {
		let mut out = HashSet::new();
		for link in &self.links {
			if link.source == id {
				out.insert(link.target);
			} else if link.target == id {
				out.insert(link.source);
			}
		}
		out
	}
}

/// A subject-relation-object fact from the backend's knowledge extraction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
	pub subject: String,
	pub relation: String,
	pub object: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
}

impl Triple {
	pub fn new(subject: impl Into<String>, relation: impl Into<String>, object: impl Into<String>) -> Self {
		Self {
			subject: subject.into(),
			relation: relation.into(),
			object: object.into(),
			category: None,
		}
	}

	pub fn with_category(mut self, category: impl Into<String>) -> Self {
		self.category = Some(category.into());
		self
	}
}

/// Column-oriented knowledge graph as the backend ships it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeGraphPayload {
	#[serde(default)]
	pub subject: Vec<String>,
	#[serde(default)]
	pub relation: Vec<String>,
	#[serde(default)]
	pub object: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cat: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn category_parse_is_case_sensitive_for_food_groups() {
		assert_eq!(Category::parse("A1"), Category::A1);
		assert_eq!(Category::parse("a1"), Category::Unknown("a1".into()));
		assert_eq!(Category::parse("effect"), Category::HealthBenefit);
		assert_eq!(Category::parse(" menu "), Category::Menu);
	}

	#[test]
	fn only_food_groups_are_clickable() {
		for entry in &LEGEND {
			assert!(entry.category.is_food_group());
		}
		assert!(!Category::Menu.is_food_group());
		assert!(!Category::HealthBenefit.is_food_group());
		assert!(!Category::Unknown("X".into()).is_food_group());
	}

	#[test]
	fn colors_fall_back_for_non_food_groups() {
		assert_eq!(Category::B1.color(), "rgb(213,82,118)");
		assert_eq!(Category::Menu.color(), FALLBACK_COLOR);
	}

	#[test]
	fn payload_accepts_missing_categories() {
		let payload: KnowledgeGraphPayload = serde_json::from_str(
			r#"{"subject":["Salad"],"relation":["含有"],"object":["Tomato"]}"#,
		)
		.unwrap();
		assert_eq!(payload.subject, vec!["Salad"]);
		assert!(payload.cat.is_none());
	}
}
