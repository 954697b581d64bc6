use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::config::LayoutConfig;
use crate::graph::{Dataset, NodeId, Point};

/// Radius of the ring new nodes are seeded on.
const SEED_RADIUS: f64 = 100.0;

/// Force layout over one dataset.
///
/// Charge and spring integration come from `force_graph`; link length,
/// collision and centering are applied afterwards as positional passes. The
/// whole thing cools like a d3 simulation: `alpha` eases toward
/// `alpha_target` every tick and stepping ends once it drops under
/// `alpha_min` with no target heat left.
pub struct Simulation {
	graph: ForceGraph<NodeId, ()>,
	index: HashMap<NodeId, DefaultNodeIdx>,
	pairs: Vec<(NodeId, NodeId)>,
	config: LayoutConfig,
	center: Point,
	alpha: f64,
	alpha_target: f64,
	focused: Option<NodeId>,
	stopped: bool,
	ticks: u64,
}

#[derive(Clone, Copy)]
struct Body {
	id: NodeId,
	at: Point,
	anchored: bool,
}

type Shifts = HashMap<NodeId, (f64, f64)>;

/// Split of a displacement between two bodies, zero for anchored ones.
fn weights(a: &Body, b: &Body) -> Option<(f64, f64)> {
	match (a.anchored, b.anchored) {
		(true, true) => None,
		(true, false) => Some((0.0, 1.0)),
		(false, true) => Some((1.0, 0.0)),
		(false, false) => Some((0.5, 0.5)),
	}
}

fn push(shifts: &mut Shifts, id: NodeId, dx: f64, dy: f64) {
	let entry = shifts.entry(id).or_default();
	entry.0 += dx;
	entry.1 += dy;
}

impl Simulation {
	pub fn new(dataset: &Dataset, center: Point, config: LayoutConfig) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: config.charge,
			force_spring: config.spring,
			force_max: config.force_max,
			node_speed: config.node_speed,
			damping_factor: config.damping,
		});
		let mut index = HashMap::new();

		let count = dataset.nodes.len().max(1) as f64;
		for (i, node) in dataset.nodes.iter().enumerate() {
			let start = node.pinned.unwrap_or_else(|| {
				if node.position == Point::ORIGIN {
					let angle = (i as f64) * 2.0 * PI / count;
					Point::new(
						center.x + SEED_RADIUS * angle.cos(),
						center.y + SEED_RADIUS * angle.sin(),
					)
				} else {
					node.position
				}
			});
			let idx = graph.add_node(NodeData {
				x: start.x as f32,
				y: start.y as f32,
				mass: config.node_mass,
				is_anchor: node.pinned.is_some(),
				user_data: node.id,
			});
			index.insert(node.id, idx);
		}

		let mut seen = HashSet::new();
		let mut pairs = Vec::new();
		for link in &dataset.links {
			if link.source == link.target {
				continue;
			}
			let (Some(&a), Some(&b)) = (index.get(&link.source), index.get(&link.target)) else {
				continue;
			};
			let key = (link.source.min(link.target), link.source.max(link.target));
			if seen.insert(key) {
				graph.add_edge(a, b, EdgeData::default());
				pairs.push(key);
			}
		}

		Self {
			graph,
			index,
			pairs,
			config,
			center,
			alpha: 1.0,
			alpha_target: 0.0,
			focused: None,
			stopped: false,
			ticks: 0,
		}
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	pub fn is_stopped(&self) -> bool {
		self.stopped
	}

	/// Still hot enough to move, and not stopped.
	pub fn is_running(&self) -> bool {
		!self.stopped && (self.alpha >= self.config.alpha_min || self.alpha_target > 0.0)
	}

	/// Advances one tick. Returns `false` once the layout has settled or been stopped.
	pub fn step(&mut self) -> bool {
		if !self.is_running() {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
		self.graph.update(self.config.time_step * self.alpha as f32);
		self.relax_links();
		self.separate();
		self.recenter();
		self.ticks += 1;
		true
	}

	/// Halts the simulation for good; a replacement is built instead of restarting.
	pub fn stop(&mut self) {
		self.stopped = true;
		self.alpha_target = 0.0;
	}

	pub fn reheat(&mut self, alpha: f64) {
		if !self.stopped {
			self.alpha = alpha;
		}
	}

	pub fn set_center(&mut self, center: Point) {
		self.center = center;
	}

	/// Widens the links around `focused` and nudges the layout awake.
	pub fn set_focus(&mut self, focused: Option<NodeId>) {
		if self.focused == focused {
			return;
		}
		self.focused = focused;
		if !self.stopped && self.alpha < self.config.focus_alpha {
			self.alpha = self.config.focus_alpha;
		}
	}

	pub fn focused(&self) -> Option<NodeId> {
		self.focused
	}

	pub fn position(&self, id: NodeId) -> Option<Point> {
		let idx = self.index.get(&id)?;
		self.graph
			.get_graph()
			.node_weight(*idx)
			.map(|node| Point::new(node.x() as f64, node.y() as f64))
	}

	pub fn positions(&self) -> Vec<(NodeId, Point)> {
		let mut out = Vec::with_capacity(self.index.len());
		self.graph.visit_nodes(|node| {
			out.push((node.data.user_data, Point::new(node.x() as f64, node.y() as f64)));
		});
		out
	}

	pub fn is_pinned(&self, id: NodeId) -> bool {
		self.bodies().iter().any(|body| body.id == id && body.anchored)
	}

	/// Pins the node where it is and raises the heat so neighbours react.
	pub fn drag_start(&mut self, id: NodeId) -> Option<Point> {
		let at = self.position(id)?;
		self.pin(id, Some(at));
		self.alpha_target = self.config.drag_alpha_target;
		Some(at)
	}

	pub fn drag_move(&mut self, id: NodeId, to: Point) -> bool {
		if !self.index.contains_key(&id) {
			return false;
		}
		self.pin(id, Some(to));
		self.alpha_target = self.config.drag_alpha_target;
		true
	}

	/// Frees the node and lets the layout cool down.
	pub fn drag_end(&mut self, id: NodeId) {
		self.pin(id, None);
		self.alpha_target = 0.0;
	}

	fn pin(&mut self, id: NodeId, at: Option<Point>) {
		self.graph.visit_nodes_mut(|node| {
			if node.data.user_data != id {
				return;
			}
			match at {
				Some(p) => {
					node.data.x = p.x as f32;
					node.data.y = p.y as f32;
					node.data.is_anchor = true;
				}
				None => node.data.is_anchor = false,
			}
		});
	}

	fn bodies(&self) -> Vec<Body> {
		let mut out = Vec::with_capacity(self.index.len());
		self.graph.visit_nodes(|node| {
			out.push(Body {
				id: node.data.user_data,
				at: Point::new(node.x() as f64, node.y() as f64),
				anchored: node.data.is_anchor,
			});
		});
		out
	}

	fn displace(&mut self, shifts: &Shifts) {
		if shifts.is_empty() {
			return;
		}
		self.graph.visit_nodes_mut(|node| {
			if node.data.is_anchor {
				return;
			}
			if let Some(&(dx, dy)) = shifts.get(&node.data.user_data) {
				node.data.x += dx as f32;
				node.data.y += dy as f32;
			}
		});
	}

	fn link_distance(&self, a: NodeId, b: NodeId) -> f64 {
		match self.focused {
			Some(f) if f == a || f == b => self.config.focused_link_distance,
			_ => self.config.link_distance,
		}
	}

	fn relax_links(&mut self) {
		let bodies: HashMap<NodeId, Body> = self.bodies().into_iter().map(|b| (b.id, b)).collect();
		let mut shifts = Shifts::new();
		for &(a, b) in &self.pairs {
			let (Some(body_a), Some(body_b)) = (bodies.get(&a), bodies.get(&b)) else {
				continue;
			};
			let Some((wa, wb)) = weights(body_a, body_b) else {
				continue;
			};
			let d = body_a.at.distance(body_b.at);
			if d < 1e-6 {
				continue;
			}
			let l = (d - self.link_distance(a, b)) / d * self.alpha * self.config.link_strength;
			let (dx, dy) = ((body_b.at.x - body_a.at.x) * l, (body_b.at.y - body_a.at.y) * l);
			push(&mut shifts, a, dx * wa, dy * wa);
			push(&mut shifts, b, -dx * wb, -dy * wb);
		}
		self.displace(&shifts);
	}

	fn separate(&mut self) {
		let bodies = self.bodies();
		let min = self.config.collision_radius * 2.0;
		let mut shifts = Shifts::new();
		for i in 0..bodies.len() {
			for j in (i + 1)..bodies.len() {
				let (a, b) = (&bodies[i], &bodies[j]);
				let Some((wa, wb)) = weights(a, b) else {
					continue;
				};
				let (mut dx, mut dy) = (b.at.x - a.at.x, b.at.y - a.at.y);
				let mut d = (dx * dx + dy * dy).sqrt();
				if d >= min {
					continue;
				}
				if d < 1e-6 {
					// coincident bodies, pick a direction from the pair
					let angle = ((i as f64) * 0.618_034 + (j as f64) * 0.414_214) * 2.0 * PI;
					(dx, dy, d) = (angle.cos(), angle.sin(), 1.0);
				}
				let overlap = (min - d) / d * self.config.collision_strength;
				push(&mut shifts, a.id, -dx * overlap * wa, -dy * overlap * wa);
				push(&mut shifts, b.id, dx * overlap * wb, dy * overlap * wb);
			}
		}
		self.displace(&shifts);
	}

	fn recenter(&mut self) {
		let bodies = self.bodies();
		let free: Vec<&Body> = bodies.iter().filter(|b| !b.anchored).collect();
		if free.is_empty() {
			return;
		}
		let n = bodies.len() as f64;
		let (sx, sy) = bodies.iter().fold((0.0, 0.0), |(sx, sy), b| (sx + b.at.x, sy + b.at.y));
		let (dx, dy) = (self.center.x - sx / n, self.center.y - sy / n);
		// anchored bodies hold still, so the free ones carry the whole correction
		let scale = n / free.len() as f64;
		let shifts: Shifts = free.iter().map(|b| (b.id, (dx * scale, dy * scale))).collect();
		self.displace(&shifts);
	}
}
