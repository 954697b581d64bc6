mod component;
mod layout;
mod render;
mod scene;
mod selection;
mod state;
mod tooltip;
mod types;

pub use component::ForceGraphCanvas;
pub use layout::Simulation;
pub use scene::Scene;
pub use selection::Selection;
pub use state::GraphView;
pub use types::{RELATED_STEPS, Scope, ViewEvent};
