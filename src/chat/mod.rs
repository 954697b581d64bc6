//! Chat transcript, request correlation and the pending preference log.

mod history;
mod session;

pub use history::HistoryLog;
pub use session::{
	ChatMessage, ChatSession, FALLBACK_REPLY, GRAPH_ERROR_REPLY, Resolution, Speaker, Ticket,
};
