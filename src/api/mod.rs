//! HTTP client for the Q&A, recommendation and history backend.

mod client;
mod types;

pub use client::{ApiClient, ApiError, Result};
pub use types::{
	Answer, DeleteHistoryRequest, HistoryKind, HistoryRecord, HistoryResponse, IncludeExcludeRequest,
	NodeRecommendRequest, Operation, Preference, QuestionRequest, RecommendRequest,
};
