use log::{error, warn};

use crate::api::{Answer, ApiError};
use crate::graph::normalize::triples_from_columns;
use crate::graph::subgraph::mark_shared;
use crate::graph::{Dataset, GraphError, KnowledgeGraphPayload, normalize};

pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";
pub const GRAPH_ERROR_REPLY: &str = "Sorry, the knowledge graph in this answer could not be drawn.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speaker {
	User,
	Bot,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
	pub id: u64,
	pub from: Speaker,
	pub content: String,
}

/// Handle for one outstanding backend request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// What the caller should do after a response was applied.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
	/// A newer request superseded this one; nothing was changed.
	Stale,
	/// The fallback bubble was shown.
	Failed,
	Answered {
		/// Dataset to render next, if the answer carried a usable graph.
		graph: Option<Dataset>,
		keywords: Vec<String>,
	},
}

/// Conversation transcript plus request correlation.
///
/// Only the most recently issued ticket may change the transcript; older
/// responses that arrive late are dropped.
#[derive(Clone, Debug, Default)]
pub struct ChatSession {
	messages: Vec<ChatMessage>,
	next_message: u64,
	issued: u64,
	pending: Option<Ticket>,
}

impl ChatSession {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn messages(&self) -> &[ChatMessage] {
		&self.messages
	}

	/// True while the latest request has not been resolved.
	pub fn is_waiting(&self) -> bool {
		self.pending.is_some()
	}

	pub fn pending(&self) -> Option<Ticket> {
		self.pending
	}

	fn push(&mut self, from: Speaker, content: impl Into<String>) {
		self.next_message += 1;
		self.messages.push(ChatMessage {
			id: self.next_message,
			from,
			content: content.into(),
		});
	}

	pub fn push_bot(&mut self, content: impl Into<String>) {
		self.push(Speaker::Bot, content);
	}

	/// Issues a ticket without adding a user bubble (recommendations, apply).
	pub fn begin(&mut self) -> Ticket {
		self.issued += 1;
		let ticket = Ticket(self.issued);
		self.pending = Some(ticket);
		ticket
	}

	/// Like [`begin`](Self::begin), but refuses while another reply is pending
	/// so that request is not superseded.
	pub fn begin_if_idle(&mut self) -> Option<Ticket> {
		if self.is_waiting() {
			return None;
		}
		Some(self.begin())
	}

	/// Records the user's question. Blank input is refused.
	pub fn submit(&mut self, text: &str) -> Option<Ticket> {
		let text = text.trim();
		if text.is_empty() {
			return None;
		}
		self.push(Speaker::User, text);
		Some(self.begin())
	}

	pub fn resolve(&mut self, ticket: Ticket, result: Result<Answer, ApiError>) -> Resolution {
		if self.pending != Some(ticket) {
			warn!("dropping stale response for request {}", ticket.0);
			return Resolution::Stale;
		}
		self.pending = None;

		let answer = match result {
			Ok(answer) => answer,
			Err(err) => {
				error!("request {} failed: {err}", ticket.0);
				self.push_bot(FALLBACK_REPLY);
				return Resolution::Failed;
			}
		};

		if let Some(query) = answer.recommendation_query.as_deref().filter(|q| !q.trim().is_empty()) {
			self.push_bot(query);
		}
		if !answer.final_answer.trim().is_empty() {
			self.push_bot(answer.final_answer.as_str());
		}

		let graph = match answer.knowledge_graph.as_ref().map(answer_dataset) {
			None => None,
			Some(Ok(dataset)) => Some(dataset),
			Some(Err(err)) => {
				error!("unusable knowledge graph in request {}: {err}", ticket.0);
				self.push_bot(GRAPH_ERROR_REPLY);
				None
			}
		};

		Resolution::Answered {
			graph,
			keywords: answer.keywords.unwrap_or_default(),
		}
	}

	pub fn clear(&mut self) {
		self.messages.clear();
		self.pending = None;
	}
}

/// Normalizes an answer's graph and marks nodes that several recipes share.
fn answer_dataset(payload: &KnowledgeGraphPayload) -> Result<Dataset, GraphError> {
	let triples = triples_from_columns(payload)?;
	let mut dataset = normalize(&triples);
	mark_shared(&mut dataset, &triples);
	Ok(dataset)
}
