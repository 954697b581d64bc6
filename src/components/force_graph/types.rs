use crate::api::HistoryKind;
use crate::graph::NodeId;

/// Something the graph view wants the page to act on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewEvent {
	/// An actionable node was clicked.
	NodeClicked(NodeId),
	/// A history record should be written; the page adds user id and time.
	History { kind: HistoryKind, content: String },
}

impl ViewEvent {
	pub fn click_history(content: impl Into<String>) -> Self {
		ViewEvent::History {
			kind: HistoryKind::Click,
			content: content.into(),
		}
	}
}

/// Steps of the related-nodes reveal; the last one shows every neighbour.
pub const RELATED_STEPS: usize = 5;

/// Which part of the dataset the view draws.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scope {
	/// The whole dataset, narrowed by the mention filter if one is set.
	#[default]
	All,
	/// `seed` and the first `step` of [`RELATED_STEPS`] shares of its neighbours.
	Related { seed: NodeId, step: usize },
	/// The connected component around `seed`.
	Component(NodeId),
}
