//! Retained, keyed draw elements bound to the dataset in view.
//!
//! Node glyphs are keyed by node id and link glyphs by `sequence_index`.
//! [`Scene::join`] reuses surviving glyphs so their paint state (opacity,
//! position) carries over, creates glyphs for new keys and drops stale ones.

use std::collections::{BTreeMap, HashMap, HashSet};

use log::warn;

use crate::graph::{Category, Dataset, Link, NodeId, Point};

/// Relation drawn dashed like a shared link.
pub const BENEFIT_RELATION: &str = "功效";

const LABEL_HEIGHT: f64 = 16.0;

/// Radius by (shared, top-N) membership.
pub fn node_radius(is_shared: bool, is_top: bool) -> f64 {
	match (is_shared, is_top) {
		(true, true) => 14.0,
		(true, false) => 12.0,
		(false, true) => 12.0,
		(false, false) => 10.0,
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeGlyph {
	pub id: NodeId,
	pub label: String,
	pub category: Category,
	pub fill: &'static str,
	pub radius: f64,
	pub is_shared: bool,
	pub position: Point,
	pub opacity: f64,
	pub label_opacity: f64,
}

impl NodeGlyph {
	/// Top-left of the label box, centred above the node.
	pub fn label_anchor(&self) -> Point {
		let chars = self.label.chars().count() as f64;
		Point::new(self.position.x - (chars * 2.0 + 4.0), self.position.y - 20.0)
	}

	pub fn label_size(&self) -> (f64, f64) {
		(self.label.chars().count() as f64 * 4.0 + 8.0, LABEL_HEIGHT)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinkGlyph {
	pub key: usize,
	pub source: NodeId,
	pub target: NodeId,
	pub relation: String,
	pub stroke_width: f64,
	pub dashed: bool,
	pub from: Point,
	pub to: Point,
	pub opacity: f64,
	pub label_opacity: f64,
}

impl LinkGlyph {
	pub fn label_anchor(&self) -> Point {
		self.from.midpoint(self.to)
	}

	/// Rotation of the relation label, in degrees.
	pub fn label_angle(&self) -> f64 {
		(self.to.y - self.from.y).atan2(self.to.x - self.from.x).to_degrees()
	}
}

/// What a focus transition does to opacity.
#[derive(Clone, Debug, PartialEq)]
pub enum OpacityPlan {
	/// Everything visible except relation labels.
	AllVisible,
	/// Only the closed neighbourhood of `center` stays visible.
	Neighborhood {
		center: NodeId,
		members: HashSet<NodeId>,
	},
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoinStats {
	pub entered: usize,
	pub updated: usize,
	pub exited: usize,
}

/// Links ready for binding: parallel links per ordered pair merged, links
/// with a missing endpoint dropped.
pub fn bind_links(dataset: &Dataset) -> Vec<Link> {
	let ids = dataset.node_ids();
	let mut merged: Vec<Link> = Vec::with_capacity(dataset.links.len());
	let mut by_pair: HashMap<(NodeId, NodeId), usize> = HashMap::new();

	for link in &dataset.links {
		if !ids.contains(&link.source) || !ids.contains(&link.target) {
			warn!(
				"dropping link {} ({} -> {}): endpoint not in view",
				link.sequence_index, link.source, link.target
			);
			continue;
		}
		match by_pair.get(&(link.source, link.target)) {
			Some(&at) => {
				let existing = &mut merged[at];
				existing.relation.push_str(", ");
				existing.relation.push_str(&link.relation);
				existing.is_shared |= link.is_shared;
			}
			None => {
				by_pair.insert((link.source, link.target), merged.len());
				merged.push(link.clone());
			}
		}
	}
	merged
}

#[derive(Debug, Default)]
pub struct Scene {
	nodes: BTreeMap<NodeId, NodeGlyph>,
	links: BTreeMap<usize, LinkGlyph>,
	plan: Option<OpacityPlan>,
}

impl Scene {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn nodes(&self) -> impl Iterator<Item = &NodeGlyph> {
		self.nodes.values()
	}

	pub fn links(&self) -> impl Iterator<Item = &LinkGlyph> {
		self.links.values()
	}

	pub fn node(&self, id: NodeId) -> Option<&NodeGlyph> {
		self.nodes.get(&id)
	}

	pub fn link(&self, key: usize) -> Option<&LinkGlyph> {
		self.links.get(&key)
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.links.is_empty()
	}

	pub fn len(&self) -> usize {
		self.nodes.len() + self.links.len()
	}

	/// Detaches every glyph.
	pub fn clear(&mut self) {
		self.nodes.clear();
		self.links.clear();
		self.plan = None;
	}

	/// Enter/update/exit against `dataset`. `top` is the degree-ranked subset
	/// drawn with larger radii.
	pub fn join(&mut self, dataset: &Dataset, top: &HashSet<NodeId>) -> JoinStats {
		let mut stats = JoinStats::default();

		let live: HashSet<NodeId> = dataset.node_ids();
		let before = self.nodes.len();
		self.nodes.retain(|id, _| live.contains(id));
		stats.exited += before - self.nodes.len();

		for node in &dataset.nodes {
			let radius = node_radius(node.is_shared, top.contains(&node.id));
			match self.nodes.get_mut(&node.id) {
				Some(glyph) => {
					glyph.label = node.display_name.clone();
					glyph.category = node.category.clone();
					glyph.fill = node.category.color();
					glyph.radius = radius;
					glyph.is_shared = node.is_shared;
					stats.updated += 1;
				}
				None => {
					self.nodes.insert(
						node.id,
						NodeGlyph {
							id: node.id,
							label: node.display_name.clone(),
							category: node.category.clone(),
							fill: node.category.color(),
							radius,
							is_shared: node.is_shared,
							position: node.pinned.unwrap_or(node.position),
							opacity: 1.0,
							label_opacity: 1.0,
						},
					);
					stats.entered += 1;
				}
			}
		}

		let links = bind_links(dataset);
		let live: HashSet<usize> = links.iter().map(|l| l.sequence_index).collect();
		let before = self.links.len();
		self.links.retain(|key, _| live.contains(key));
		stats.exited += before - self.links.len();

		for link in links {
			let emphasised = link.is_shared || link.relation == BENEFIT_RELATION;
			let (stroke_width, dashed) = if emphasised { (2.0, true) } else { (1.0, false) };
			match self.links.get_mut(&link.sequence_index) {
				Some(glyph) => {
					glyph.source = link.source;
					glyph.target = link.target;
					glyph.relation = link.relation;
					glyph.stroke_width = stroke_width;
					glyph.dashed = dashed;
					stats.updated += 1;
				}
				None => {
					self.links.insert(
						link.sequence_index,
						LinkGlyph {
							key: link.sequence_index,
							source: link.source,
							target: link.target,
							relation: link.relation,
							stroke_width,
							dashed,
							from: Point::ORIGIN,
							to: Point::ORIGIN,
							opacity: 1.0,
							label_opacity: 0.0,
						},
					);
					stats.entered += 1;
				}
			}
		}

		self.sync_link_ends();
		if let Some(plan) = self.plan.clone() {
			self.apply_opacity(&plan);
		}
		stats
	}

	/// Pushes simulated positions into the glyphs and re-derives link ends.
	pub fn update_positions(&mut self, positions: impl IntoIterator<Item = (NodeId, Point)>) {
		for (id, at) in positions {
			if let Some(glyph) = self.nodes.get_mut(&id) {
				glyph.position = at;
			}
		}
		self.sync_link_ends();
	}

	fn sync_link_ends(&mut self) {
		let nodes = &self.nodes;
		for glyph in self.links.values_mut() {
			if let (Some(s), Some(t)) = (nodes.get(&glyph.source), nodes.get(&glyph.target)) {
				glyph.from = s.position;
				glyph.to = t.position;
			}
		}
	}

	pub fn apply_opacity(&mut self, plan: &OpacityPlan) {
		match plan {
			OpacityPlan::AllVisible => {
				for glyph in self.nodes.values_mut() {
					glyph.opacity = 1.0;
					glyph.label_opacity = 1.0;
				}
				for glyph in self.links.values_mut() {
					glyph.opacity = 1.0;
					glyph.label_opacity = 0.0;
				}
			}
			OpacityPlan::Neighborhood { center, members } => {
				for glyph in self.nodes.values_mut() {
					let visible = if members.contains(&glyph.id) { 1.0 } else { 0.0 };
					glyph.opacity = visible;
					glyph.label_opacity = visible;
				}
				for glyph in self.links.values_mut() {
					let incident = glyph.source == *center || glyph.target == *center;
					let visible = if incident { 1.0 } else { 0.0 };
					glyph.opacity = visible;
					glyph.label_opacity = visible;
				}
			}
		}
		self.plan = Some(plan.clone());
	}

	/// Topmost node under `at` (world space), within its radius plus `slack`.
	pub fn node_at(&self, at: Point, slack: f64) -> Option<NodeId> {
		self.nodes
			.values()
			.filter(|glyph| glyph.position.distance(at) <= glyph.radius + slack)
			.min_by(|a, b| {
				a.position
					.distance(at)
					.partial_cmp(&b.position.distance(at))
					.unwrap_or(std::cmp::Ordering::Equal)
			})
			.map(|glyph| glyph.id)
	}
}
