//! View model behind the canvas: one dataset, one simulation, one scene.

use std::collections::HashMap;

use log::debug;

use super::layout::Simulation;
use super::scene::{OpacityPlan, Scene};
use super::selection::{ClickOutcome, Selection, Tooltip};
use super::types::{RELATED_STEPS, Scope, ViewEvent};
use crate::api::Preference;
use crate::config::ViewConfig;
use crate::graph::reduce::{
	expand_from_seed, filter_to_mentioned, reveal_neighborhood, top_by_degree,
};
use crate::graph::{Dataset, NodeId, Point};

#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<NodeId>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Point,
	/// Pointer travelled past the click tolerance.
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Eases focus dimming in and out instead of snapping.
#[derive(Clone, Debug)]
pub struct HighlightFade {
	/// 0 shows every glyph at full strength, 1 shows the scene's opacity plan.
	pub t: f64,
	target: f64,
}

impl Default for HighlightFade {
	fn default() -> Self {
		Self { t: 0.0, target: 0.0 }
	}
}

impl HighlightFade {
	const SPEED_IN: f64 = 1.8;
	const SPEED_OUT: f64 = 1.26;

	fn advance(&mut self, dt: f64) {
		let speed = if self.target > self.t { Self::SPEED_IN } else { Self::SPEED_OUT };
		self.t += (self.target - self.t) * (speed * dt * 10.0).min(1.0);
		if (self.t - self.target).abs() < 0.01 {
			self.t = self.target;
		}
	}

	/// Opacity to paint for a glyph whose planned opacity is `planned`.
	pub fn blend(&self, planned: f64) -> f64 {
		1.0 + (planned - 1.0) * self.t
	}
}

pub struct GraphView {
	config: ViewConfig,
	source: Dataset,
	dataset: Dataset,
	mentioned: Vec<NodeId>,
	simulation: Option<Simulation>,
	scene: Scene,
	selection: Selection,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub fade: HighlightFade,
	/// Plan to apply once the fade has fully eased out.
	settle_plan: Option<OpacityPlan>,
	pub width: f64,
	pub height: f64,
	mounted: bool,
	generation: u64,
}

impl GraphView {
	pub fn new(config: ViewConfig) -> Self {
		Self {
			config,
			source: Dataset::default(),
			dataset: Dataset::default(),
			mentioned: Vec::new(),
			simulation: None,
			scene: Scene::new(),
			selection: Selection::default(),
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			fade: HighlightFade::default(),
			settle_plan: None,
			width: 0.0,
			height: 0.0,
			mounted: false,
			generation: 0,
		}
	}

	pub fn config(&self) -> &ViewConfig {
		&self.config
	}

	/// Dataset as handed in, before any mention filter.
	pub fn source(&self) -> &Dataset {
		&self.source
	}

	/// Dataset currently drawn.
	pub fn dataset(&self) -> &Dataset {
		&self.dataset
	}

	pub fn mentioned(&self) -> &[NodeId] {
		&self.mentioned
	}

	pub fn scene(&self) -> &Scene {
		&self.scene
	}

	pub fn selection(&self) -> &Selection {
		&self.selection
	}

	pub fn simulation(&self) -> Option<&Simulation> {
		self.simulation.as_ref()
	}

	pub fn is_mounted(&self) -> bool {
		self.mounted
	}

	/// Bumped on every rebuild.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn is_settled(&self) -> bool {
		self.simulation.as_ref().is_none_or(|sim| !sim.is_running())
	}

	fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}

	pub fn mount(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.mounted = true;
		self.rebuild();
	}

	pub fn unmount(&mut self) {
		self.teardown();
		self.mounted = false;
	}

	/// Replaces the whole dataset and clears any mention filter.
	pub fn set_dataset(&mut self, dataset: Dataset) {
		self.source = dataset.clone();
		self.dataset = dataset;
		self.mentioned.clear();
		self.rebuild();
	}

	/// Narrows the view to `ids`; an empty list shows the whole source again.
	pub fn set_mentioned(&mut self, ids: Vec<NodeId>) {
		self.mentioned = ids;
		self.dataset = self.mentioned_view();
		self.rebuild();
	}

	fn mentioned_view(&self) -> Dataset {
		if self.mentioned.is_empty() {
			self.source.clone()
		} else {
			filter_to_mentioned(&self.mentioned, &self.source)
		}
	}

	/// Related and component scopes are taken from the full source, ignoring
	/// the mention filter; `All` goes back to it.
	pub fn set_scope(&mut self, scope: Scope) {
		self.dataset = match scope {
			Scope::All => self.mentioned_view(),
			Scope::Related { seed, step } => {
				reveal_neighborhood(seed, &self.source, step, RELATED_STEPS)
			}
			Scope::Component(seed) => expand_from_seed(seed, &self.source),
		};
		self.rebuild();
	}

	fn teardown(&mut self) {
		if let Some(mut sim) = self.simulation.take() {
			sim.stop();
		}
		self.scene.clear();
		self.selection.reset();
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.fade = HighlightFade::default();
		self.settle_plan = None;
	}

	fn rebuild(&mut self) {
		if !self.mounted {
			return;
		}
		self.teardown();

		let top = top_by_degree(self.config.highlight_top_n, &self.dataset);
		let sim = Simulation::new(&self.dataset, self.center(), self.config.layout.clone());
		let stats = self.scene.join(&self.dataset, &top);
		self.scene.update_positions(sim.positions());
		self.scene.apply_opacity(&OpacityPlan::AllVisible);
		self.simulation = Some(sim);
		self.generation += 1;
		debug!(
			"graph view rebuilt (generation {}): {} nodes, {} links, +{} -{}",
			self.generation,
			self.dataset.nodes.len(),
			self.dataset.links.len(),
			stats.entered,
			stats.exited
		);
	}

	/// Advances the layout one step; false once it has settled.
	pub fn tick(&mut self) -> bool {
		if !self.mounted {
			return false;
		}
		let Some(sim) = self.simulation.as_mut() else {
			return false;
		};
		if !sim.step() {
			return false;
		}
		let positions: HashMap<NodeId, Point> = sim.positions().into_iter().collect();
		for node in &mut self.dataset.nodes {
			if let Some(&at) = positions.get(&node.id) {
				node.position = at;
			}
		}
		self.scene.update_positions(positions);
		true
	}

	/// Advances presentation-only animation by `dt` seconds.
	pub fn animate(&mut self, dt: f64) {
		self.fade.advance(dt);
		if self.fade.t == 0.0 {
			if let Some(plan) = self.settle_plan.take() {
				self.scene.apply_opacity(&plan);
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		let center = self.center();
		if let Some(sim) = self.simulation.as_mut() {
			sim.set_center(center);
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Point {
		Point::new(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeId> {
		if !self.mounted {
			return None;
		}
		let slack = self.config.hit_slack / self.transform.k;
		self.scene.node_at(self.screen_to_graph(sx, sy), slack)
	}

	pub fn focus(&mut self, id: NodeId) {
		if !self.mounted || !self.dataset.contains(id) || self.selection.hovered() == Some(id) {
			return;
		}
		let plan = self.selection.focus(id, &self.dataset);
		self.scene.apply_opacity(&plan);
		self.settle_plan = None;
		self.fade.target = 1.0;
		if let Some(sim) = self.simulation.as_mut() {
			sim.set_focus(Some(id));
		}
	}

	pub fn unfocus(&mut self) {
		if !self.mounted || self.selection.hovered().is_none() {
			return;
		}
		// the dimmed plan stays on the scene while the fade eases out
		self.settle_plan = Some(self.selection.unfocus());
		self.fade.target = 0.0;
		if let Some(sim) = self.simulation.as_mut() {
			sim.set_focus(None);
		}
	}

	/// Click on `id` at screen point `at`; the tooltip opens there.
	pub fn click(&mut self, id: NodeId, at: Point) -> Vec<ViewEvent> {
		if !self.mounted {
			return Vec::new();
		}
		let Some(node) = self.dataset.node(id) else {
			return Vec::new();
		};
		match self.selection.click(node, at) {
			ClickOutcome::Ignored => Vec::new(),
			ClickOutcome::Opened => vec![
				ViewEvent::NodeClicked(id),
				ViewEvent::click_history(node.display_name.clone()),
			],
		}
	}

	pub fn tooltip(&self) -> Option<&Tooltip> {
		self.selection.tooltip()
	}

	pub fn close_tooltip(&mut self) {
		self.selection.close_tooltip();
	}

	/// Answers the open tooltip.
	pub fn choose(&mut self, preference: Preference) -> Option<ViewEvent> {
		let (kind, content) = self.selection.choose(preference)?;
		Some(ViewEvent::History { kind, content })
	}

	pub fn drag_start(&mut self, id: NodeId, sx: f64, sy: f64) -> bool {
		if !self.mounted {
			return false;
		}
		let Some(at) = self.simulation.as_mut().and_then(|sim| sim.drag_start(id)) else {
			return false;
		};
		if let Some(node) = self.dataset.node_mut(id) {
			node.pinned = Some(at);
		}
		self.drag = DragState {
			active: true,
			node: Some(id),
			start_x: sx,
			start_y: sy,
			node_start: at,
			moved: false,
		};
		true
	}

	pub fn drag_move(&mut self, sx: f64, sy: f64) {
		let (true, Some(id)) = (self.drag.active, self.drag.node) else {
			return;
		};
		let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
		if !self.drag.moved && dx.hypot(dy) <= self.config.click_tolerance {
			return;
		}
		self.drag.moved = true;
		let to = Point::new(
			self.drag.node_start.x + dx / self.transform.k,
			self.drag.node_start.y + dy / self.transform.k,
		);
		let Some(sim) = self.simulation.as_mut() else {
			return;
		};
		if sim.drag_move(id, to) {
			if let Some(node) = self.dataset.node_mut(id) {
				node.pinned = Some(to);
				node.position = to;
			}
			self.scene.update_positions([(id, to)]);
		}
	}

	/// Releases the dragged node; a release without movement is a click.
	pub fn drag_end(&mut self, sx: f64, sy: f64) -> Vec<ViewEvent> {
		let drag = std::mem::take(&mut self.drag);
		let (true, Some(id)) = (drag.active, drag.node) else {
			return Vec::new();
		};
		if let Some(sim) = self.simulation.as_mut() {
			sim.drag_end(id);
		}
		if let Some(node) = self.dataset.node_mut(id) {
			node.pinned = None;
		}
		if drag.moved {
			Vec::new()
		} else {
			self.click(id, Point::new(sx, sy))
		}
	}

	pub fn pan_start(&mut self, sx: f64, sy: f64) {
		if !self.mounted {
			return;
		}
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_move(&mut self, sx: f64, sy: f64) {
		if !self.pan.active {
			return;
		}
		self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
		self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
	}

	pub fn pan_end(&mut self) {
		self.pan.active = false;
	}

	/// Zooms about the screen point, keeping the world point under it fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta_y: f64) {
		if !self.mounted {
			return;
		}
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let k = (self.transform.k * factor).clamp(self.config.min_zoom, self.config.max_zoom);
		let world = self.screen_to_graph(sx, sy);
		self.transform.x = sx - world.x * k;
		self.transform.y = sy - world.y * k;
		self.transform.k = k;
	}

	/// Pointer pressed: grab the node under it, or start panning.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		match self.node_at_position(sx, sy) {
			Some(id) if self.drag_start(id, sx, sy) => {}
			_ => self.pan_start(sx, sy),
		}
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if self.drag.active {
			self.drag_move(sx, sy);
		} else if self.pan.active {
			self.pan_move(sx, sy);
		} else {
			match self.node_at_position(sx, sy) {
				Some(id) => self.focus(id),
				None => self.unfocus(),
			}
		}
	}

	pub fn pointer_up(&mut self, sx: f64, sy: f64) -> Vec<ViewEvent> {
		self.pan_end();
		self.drag_end(sx, sy)
	}

	/// Pointer left the canvas: drop gestures without clicking.
	pub fn pointer_leave(&mut self) {
		if let Some(id) = self.drag.node.filter(|_| self.drag.active) {
			if let Some(sim) = self.simulation.as_mut() {
				sim.drag_end(id);
			}
			if let Some(node) = self.dataset.node_mut(id) {
				node.pinned = None;
			}
		}
		self.drag = DragState::default();
		self.pan_end();
		self.unfocus();
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;
	use crate::api::HistoryKind;
	use crate::graph::{Triple, normalize};

	fn salad() -> Dataset {
		// 0:Salad 1:Tomato(A2) 2:Lettuce(A2) 3:Soup 4:Tofu(B2)
		normalize(&[
			Triple::new("Salad", "含有", "Tomato").with_category("A2"),
			Triple::new("Salad", "含有", "Lettuce").with_category("A2"),
			Triple::new("Soup", "含有", "Tofu").with_category("B2"),
			Triple::new("Soup", "含有", "Tomato"),
		])
	}

	fn bread() -> Dataset {
		normalize(&[Triple::new("Sandwich", "含有", "Bread").with_category("A1")])
	}

	fn mounted(data: Dataset) -> GraphView {
		let mut view = GraphView::new(ViewConfig::default());
		view.mount(800.0, 600.0);
		view.set_dataset(data);
		view
	}

	fn scene_ids(view: &GraphView) -> HashSet<NodeId> {
		view.scene().nodes().map(|g| g.id).collect()
	}

	fn screen_of(view: &GraphView, id: NodeId) -> Point {
		let at = view.scene().node(id).unwrap().position;
		Point::new(
			at.x * view.transform.k + view.transform.x,
			at.y * view.transform.k + view.transform.y,
		)
	}

	#[test]
	fn commands_are_inert_before_mount() {
		let mut view = GraphView::new(ViewConfig::default());
		view.set_dataset(salad());
		assert!(view.simulation().is_none());
		assert!(view.scene().is_empty());
		assert!(!view.tick());
		view.focus(1);
		assert_eq!(view.selection().hovered(), None);
		assert!(view.click(1, Point::ORIGIN).is_empty());
		assert_eq!(view.generation(), 0);

		view.mount(400.0, 300.0);
		assert_eq!(view.generation(), 1);
		assert_eq!(scene_ids(&view), salad().node_ids());
	}

	#[test]
	fn dataset_swap_leaves_one_simulation_and_no_stale_glyphs() {
		let mut view = mounted(salad());
		let before = view.generation();
		view.click(1, Point::new(5.0, 5.0));
		view.focus(1);

		view.set_dataset(bread());
		assert_eq!(view.generation(), before + 1);
		assert!(view.simulation().is_some_and(|sim| sim.is_running()));
		assert_eq!(scene_ids(&view), bread().node_ids());
		assert_eq!(view.scene().links().count(), 1);
		assert!(view.tooltip().is_none());
		assert_eq!(view.selection().hovered(), None);
	}

	#[test]
	fn menu_click_emits_nothing() {
		let mut view = mounted(salad());
		assert!(view.click(0, Point::new(1.0, 1.0)).is_empty());
		assert!(view.tooltip().is_none());
	}

	#[test]
	fn food_click_opens_tooltip_and_reports_once() {
		let mut view = mounted(bread());
		let events = view.click(1, Point::new(40.0, 50.0));
		assert_eq!(
			events,
			vec![
				ViewEvent::NodeClicked(1),
				ViewEvent::History {
					kind: HistoryKind::Click,
					content: "Bread".into()
				}
			]
		);
		let tooltip = view.tooltip().unwrap();
		assert_eq!((tooltip.x, tooltip.y), (40.0, 50.0));

		assert_eq!(
			view.choose(Preference::Include),
			Some(ViewEvent::History {
				kind: HistoryKind::Include,
				content: "Bread".into()
			})
		);
		assert!(view.tooltip().is_none());
	}

	#[test]
	fn mention_filter_narrows_and_empty_restores() {
		let mut view = mounted(salad());
		view.set_mentioned(vec![3, 4]);
		assert_eq!(scene_ids(&view), HashSet::from([3, 4]));
		assert_eq!(view.dataset().links.len(), 1);

		view.set_mentioned(Vec::new());
		assert_eq!(scene_ids(&view), salad().node_ids());
		assert_eq!(view.source().nodes.len(), 5);
	}

	#[test]
	fn component_scope_follows_links() {
		let mut view = mounted(salad());
		view.set_scope(Scope::Component(4));
		assert_eq!(scene_ids(&view), HashSet::from([0, 1, 2, 3, 4]));
		view.set_dataset(bread());
		view.set_scope(Scope::Component(0));
		assert_eq!(scene_ids(&view), HashSet::from([0, 1]));
	}

	#[test]
	fn related_scope_reveals_neighbours_step_by_step() {
		let mut view = mounted(salad());
		view.set_mentioned(vec![3, 4]);
		let seed = 1;
		view.set_scope(Scope::Related { seed, step: 0 });
		assert_eq!(scene_ids(&view), HashSet::from([1]));

		// Tomato sits between Salad and Soup
		view.set_scope(Scope::Related { seed, step: 3 });
		assert_eq!(scene_ids(&view), HashSet::from([0, 1]));
		view.set_scope(Scope::Related { seed, step: RELATED_STEPS });
		assert_eq!(scene_ids(&view), HashSet::from([0, 1, 3]));
		assert_eq!(view.scene().links().count(), 2);

		view.set_scope(Scope::All);
		assert_eq!(scene_ids(&view), HashSet::from([3, 4]));
		view.set_mentioned(Vec::new());
		assert_eq!(scene_ids(&view), salad().node_ids());
	}

	#[test]
	fn clicked_node_can_scope_to_its_neighbours() {
		let mut view = mounted(salad());
		let events = view.click(1, Point::new(10.0, 10.0));
		let Some(ViewEvent::NodeClicked(seed)) = events.first().cloned() else {
			panic!("expected a click event");
		};
		view.set_scope(Scope::Related { seed, step: RELATED_STEPS });
		assert!(view.tooltip().is_none());
		assert_eq!(scene_ids(&view), HashSet::from([0, 1, 3]));
	}

	#[test]
	fn focus_dims_everything_outside_the_neighbourhood() {
		let mut view = mounted(salad());
		view.focus(4);
		let visible: HashSet<NodeId> = view
			.scene()
			.nodes()
			.filter(|g| g.opacity > 0.0)
			.map(|g| g.id)
			.collect();
		assert_eq!(visible, HashSet::from([3, 4]));
		assert_eq!(view.simulation().unwrap().focused(), Some(4));

		view.unfocus();
		assert_eq!(view.simulation().unwrap().focused(), None);
		for _ in 0..200 {
			view.animate(0.016);
		}
		assert!(view.scene().nodes().all(|g| g.opacity == 1.0));
	}

	#[test]
	fn ticks_move_glyphs_and_dataset_together() {
		let mut view = mounted(salad());
		assert!(view.tick());
		for node in &view.dataset().nodes {
			assert_eq!(view.scene().node(node.id).unwrap().position, node.position);
		}
	}

	#[test]
	fn press_and_release_in_place_is_a_click() {
		let mut view = mounted(bread());
		let at = screen_of(&view, 1);
		view.pointer_down(at.x, at.y);
		assert!(view.drag.active);
		assert!(view.simulation().unwrap().is_pinned(1));

		let events = view.pointer_up(at.x + 1.0, at.y);
		assert_eq!(events.first(), Some(&ViewEvent::NodeClicked(1)));
		assert!(!view.simulation().unwrap().is_pinned(1));
		assert!(view.dataset().node(1).unwrap().pinned.is_none());
	}

	#[test]
	fn dragging_moves_the_node_and_is_not_a_click() {
		let mut view = mounted(bread());
		let at = screen_of(&view, 1);
		view.pointer_down(at.x, at.y);
		view.pointer_move(at.x + 50.0, at.y + 20.0);

		let moved = view.scene().node(1).unwrap().position;
		let start = view.drag.node_start;
		assert!((moved.x - (start.x + 50.0)).abs() < 1e-6);
		assert!((moved.y - (start.y + 20.0)).abs() < 1e-6);
		assert!(view.dataset().node(1).unwrap().pinned.is_some());

		assert!(view.pointer_up(at.x + 50.0, at.y + 20.0).is_empty());
		assert!(view.tooltip().is_none());
		assert!(!view.simulation().unwrap().is_pinned(1));
	}

	#[test]
	fn empty_space_pans() {
		let mut view = mounted(bread());
		view.pointer_down(5.0, 5.0);
		assert!(view.pan.active);
		view.pointer_move(25.0, 15.0);
		assert_eq!((view.transform.x, view.transform.y), (20.0, 10.0));
		view.pointer_up(25.0, 15.0);
		assert!(!view.pan.active);
	}

	#[test]
	fn zoom_is_clamped_and_keeps_the_pointer_anchor() {
		let mut view = mounted(bread());
		let before = view.screen_to_graph(300.0, 200.0);
		view.zoom_at(300.0, 200.0, -1.0);
		let after = view.screen_to_graph(300.0, 200.0);
		assert!((before.x - after.x).abs() < 1e-9 && (before.y - after.y).abs() < 1e-9);

		for _ in 0..100 {
			view.zoom_at(0.0, 0.0, -1.0);
		}
		assert_eq!(view.transform.k, view.config().max_zoom);
	}

	#[test]
	fn hover_follows_the_pointer() {
		let mut view = mounted(bread());
		let at = screen_of(&view, 0);
		view.pointer_move(at.x, at.y);
		assert_eq!(view.selection().hovered(), Some(0));
		view.pointer_move(-500.0, -500.0);
		assert_eq!(view.selection().hovered(), None);
	}

	#[test]
	fn fade_eases_toward_the_plan() {
		let mut view = mounted(salad());
		view.focus(4);
		view.animate(0.016);
		assert!(view.fade.t > 0.0 && view.fade.t < 1.0);
		for _ in 0..200 {
			view.animate(0.016);
		}
		assert_eq!(view.fade.t, 1.0);
		assert_eq!(view.fade.blend(0.0), 0.0);
	}

	#[test]
	fn fade_out_keeps_dimming_until_it_has_eased() {
		let mut view = mounted(salad());
		view.focus(4);
		for _ in 0..200 {
			view.animate(0.016);
		}
		view.unfocus();
		view.animate(0.016);
		assert!(view.fade.t > 0.0 && view.fade.t < 1.0);
		let tomato = view.scene().node(1).unwrap().opacity;
		let painted = view.fade.blend(tomato);
		assert!(painted > 0.0 && painted < 1.0, "painted at {painted}");

		for _ in 0..200 {
			view.animate(0.016);
		}
		assert_eq!(view.fade.t, 0.0);
		assert!(view.scene().nodes().all(|g| g.opacity == 1.0));
		assert!(view.scene().links().all(|g| g.label_opacity == 0.0));
	}

	#[test]
	fn refocusing_mid_fade_keeps_the_new_plan() {
		let mut view = mounted(salad());
		view.focus(4);
		view.animate(0.016);
		view.unfocus();
		view.focus(0);
		for _ in 0..200 {
			view.animate(0.016);
		}
		assert_eq!(view.fade.t, 1.0);
		assert_eq!(view.scene().node(4).unwrap().opacity, 0.0);
		assert_eq!(view.scene().node(0).unwrap().opacity, 1.0);
	}

	#[test]
	fn unmount_tears_everything_down() {
		let mut view = mounted(salad());
		view.unmount();
		assert!(view.simulation().is_none());
		assert!(view.scene().is_empty());
		assert!(!view.tick());
	}
}
