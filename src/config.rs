//! Tunables for the graph view and the backend connection.

/// Physics parameters for the force layout.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Repulsion between every node pair (`force_graph` charge).
	pub charge: f32,
	/// Spring stiffness along links (`force_graph` spring).
	pub spring: f32,
	pub force_max: f32,
	pub node_speed: f32,
	pub damping: f32,
	pub node_mass: f32,
	/// Target length of a link.
	pub link_distance: f64,
	/// Target length of links touching the focused node.
	pub focused_link_distance: f64,
	/// How hard a link pulls back toward its target length per tick.
	pub link_strength: f64,
	/// Collision radius; two nodes are kept at least twice this apart.
	pub collision_radius: f64,
	pub collision_strength: f64,
	pub alpha_decay: f64,
	pub alpha_min: f64,
	/// Heat held while a node is being dragged.
	pub drag_alpha_target: f64,
	/// Heat injected when the focused node changes.
	pub focus_alpha: f64,
	/// Seconds of simulated time per tick at full heat.
	pub time_step: f32,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			charge: 150.0,
			spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping: 0.9,
			node_mass: 10.0,
			link_distance: 100.0,
			focused_link_distance: 160.0,
			link_strength: 0.3,
			collision_radius: 30.0,
			collision_strength: 0.7,
			alpha_decay: 0.05,
			alpha_min: 0.001,
			drag_alpha_target: 0.3,
			focus_alpha: 0.1,
			time_step: 0.016,
		}
	}
}

/// Presentation settings for the graph canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewConfig {
	pub layout: LayoutConfig,
	/// Size of the "top-N by degree" subset drawn with larger radii.
	pub highlight_top_n: usize,
	/// Extra slack around a node's radius when hit-testing the pointer.
	pub hit_slack: f64,
	/// Pointer travel (screen px) under which a press on a node counts as a click.
	pub click_tolerance: f64,
	pub min_zoom: f64,
	pub max_zoom: f64,
}

impl Default for ViewConfig {
	fn default() -> Self {
		Self {
			layout: LayoutConfig::default(),
			highlight_top_n: 5,
			hit_slack: 2.0,
			click_tolerance: 3.0,
			min_zoom: 0.1,
			max_zoom: 4.0,
		}
	}
}

/// Where the chat/recommendation backend lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
	pub base_url: String,
}

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5001";

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			base_url: option_env!("HEALTH_MATE_SERVER_URL")
				.unwrap_or(DEFAULT_SERVER_URL)
				.trim_end_matches('/')
				.to_string(),
		}
	}
}

impl ServerConfig {
	pub fn new(base_url: impl Into<String>) -> Self {
		let base_url: String = base_url.into();
		Self {
			base_url: base_url.trim_end_matches('/').to_string(),
		}
	}

	/// Absolute URL of an `/api` route.
	pub fn endpoint(&self, route: &str) -> String {
		format!("{}/api/{}", self.base_url, route.trim_start_matches('/'))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoint_joins_without_double_slashes() {
		let config = ServerConfig::new("http://example.test/");
		assert_eq!(config.endpoint("/history"), "http://example.test/api/history");
		assert_eq!(config.endpoint("question"), "http://example.test/api/question");
	}
}
