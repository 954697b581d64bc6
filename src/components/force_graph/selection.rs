//! Hover focus and click tooltip, as two orthogonal state machines.

use std::collections::HashSet;

use log::info;

use super::scene::OpacityPlan;
use crate::api::{HistoryKind, Preference};
use crate::graph::{Dataset, Node, NodeId, Point};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
	#[default]
	Idle,
	Focused(NodeId),
}

/// Contextual include/exclude prompt anchored at the click point.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	pub node: NodeId,
	pub x: f64,
	pub y: f64,
	pub title: String,
	pub content: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
	/// Category is not a food group; nothing happens.
	Ignored,
	Opened,
}

/// `id` plus every node linked to it.
pub fn closed_neighborhood(id: NodeId, dataset: &Dataset) -> HashSet<NodeId> {
	let mut members = dataset.neighbors(id);
	members.insert(id);
	members
}

#[derive(Clone, Debug, Default)]
pub struct Selection {
	focus: Focus,
	tooltip: Option<Tooltip>,
	clicked: Option<Node>,
}

impl Selection {
	pub fn focus_state(&self) -> Focus {
		self.focus
	}

	pub fn hovered(&self) -> Option<NodeId> {
		match self.focus {
			Focus::Focused(id) => Some(id),
			Focus::Idle => None,
		}
	}

	pub fn tooltip(&self) -> Option<&Tooltip> {
		self.tooltip.as_ref()
	}

	pub fn clicked_node(&self) -> Option<&Node> {
		self.clicked.as_ref()
	}

	/// `Idle -> Focused(id)`; also moves focus directly between nodes.
	pub fn focus(&mut self, id: NodeId, dataset: &Dataset) -> OpacityPlan {
		self.focus = Focus::Focused(id);
		OpacityPlan::Neighborhood {
			center: id,
			members: closed_neighborhood(id, dataset),
		}
	}

	pub fn unfocus(&mut self) -> OpacityPlan {
		self.focus = Focus::Idle;
		OpacityPlan::AllVisible
	}

	/// Opens the tooltip for food-group nodes; anything else is only logged.
	pub fn click(&mut self, node: &Node, at: Point) -> ClickOutcome {
		if !node.category.is_food_group() {
			info!(
				"ignoring click on {} ({}): not a food group",
				node.display_name, node.category
			);
			return ClickOutcome::Ignored;
		}
		self.clicked = Some(node.clone());
		self.tooltip = Some(Tooltip {
			node: node.id,
			x: at.x,
			y: at.y,
			title: node.display_name.clone(),
			content: node.display_name.clone(),
		});
		ClickOutcome::Opened
	}

	pub fn close_tooltip(&mut self) -> Option<Tooltip> {
		self.tooltip.take()
	}

	/// Closes the tooltip with a choice, returning the history record to write.
	pub fn choose(&mut self, preference: Preference) -> Option<(HistoryKind, String)> {
		let tooltip = self.tooltip.take()?;
		Some((preference.into(), tooltip.title))
	}

	/// Dataset replaced: drop every handle into the old one.
	pub fn reset(&mut self) {
		self.focus = Focus::Idle;
		self.tooltip = None;
		self.clicked = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{Category, Triple, normalize};

	#[test]
	fn subjects_default_to_menu() {
		assert_eq!(dataset().nodes[0].category, Category::Menu);
	}

	fn dataset() -> Dataset {
		normalize(&[
			Triple::new("Salad", "含有", "Tomato").with_category("A2"),
			Triple::new("Salad", "含有", "Lettuce").with_category("A2"),
			Triple::new("Soup", "含有", "Tomato"),
			Triple::new("Bread", "含有", "Flour").with_category("A1"),
		])
	}

	#[test]
	fn focus_members_are_the_closed_neighbourhood() {
		let data = dataset();
		let mut selection = Selection::default();
		for node in &data.nodes {
			let plan = selection.focus(node.id, &data);
			let mut expected = data.neighbors(node.id);
			expected.insert(node.id);
			assert_eq!(
				plan,
				OpacityPlan::Neighborhood {
					center: node.id,
					members: expected
				}
			);
			assert_eq!(selection.hovered(), Some(node.id));
		}
		assert_eq!(selection.unfocus(), OpacityPlan::AllVisible);
		assert_eq!(selection.focus_state(), Focus::Idle);
	}

	#[test]
	fn menu_click_is_ignored() {
		let data = dataset();
		let mut selection = Selection::default();
		let outcome = selection.click(&data.nodes[0], Point::new(3.0, 4.0));
		assert_eq!(outcome, ClickOutcome::Ignored);
		assert!(selection.tooltip().is_none());
		assert!(selection.clicked_node().is_none());
	}

	#[test]
	fn food_group_click_opens_tooltip_at_the_pointer() {
		let data = dataset();
		let mut selection = Selection::default();
		let tomato = data.node(1).unwrap();
		assert_eq!(selection.click(tomato, Point::new(120.0, 80.0)), ClickOutcome::Opened);
		let tooltip = selection.tooltip().unwrap();
		assert_eq!((tooltip.x, tooltip.y), (120.0, 80.0));
		assert_eq!(tooltip.title, "Tomato");
		assert_eq!(selection.clicked_node().map(|n| n.id), Some(1));
	}

	#[test]
	fn choosing_closes_and_reports() {
		let data = dataset();
		let mut selection = Selection::default();
		selection.click(data.node(1).unwrap(), Point::ORIGIN);
		assert_eq!(
			selection.choose(Preference::Exclude),
			Some((HistoryKind::Exclude, "Tomato".to_string()))
		);
		assert!(selection.tooltip().is_none());
		assert_eq!(selection.choose(Preference::Include), None);
	}

	#[test]
	fn reset_clears_both_machines() {
		let data = dataset();
		let mut selection = Selection::default();
		selection.focus(1, &data);
		selection.click(data.node(1).unwrap(), Point::ORIGIN);
		selection.reset();
		assert_eq!(selection.focus_state(), Focus::Idle);
		assert!(selection.tooltip().is_none());
		assert!(selection.clicked_node().is_none());
	}
}
