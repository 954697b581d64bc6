use log::debug;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{
	Answer, DeleteHistoryRequest, ErrorBody, HistoryRecord, HistoryResponse, IncludeExcludeRequest,
	NodeRecommendRequest, Preference, QuestionRequest, RecommendRequest,
};
use crate::config::ServerConfig;

#[derive(Debug, Error)]
pub enum ApiError {
	#[error("request failed: {0}")]
	Transport(#[from] reqwest::Error),

	#[error("server answered {status}: {message}")]
	Status { status: u16, message: String },

	#[error("malformed response: {0}")]
	Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Prefers the `error` field of a JSON body, then the raw body, then the reason phrase.
pub(crate) fn status_message(body: &str, reason: &str) -> String {
	if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
		return parsed.error;
	}
	let body = body.trim();
	if body.is_empty() {
		reason.to_string()
	} else {
		body.to_string()
	}
}

/// Thin typed wrapper over the backend's `/api` routes.
#[derive(Clone, Debug)]
pub struct ApiClient {
	client: reqwest::Client,
	config: ServerConfig,
}

impl Default for ApiClient {
	fn default() -> Self {
		Self::new(ServerConfig::default())
	}
}

impl ApiClient {
	pub fn new(config: ServerConfig) -> Self {
		Self {
			client: reqwest::Client::new(),
			config,
		}
	}

	pub fn config(&self) -> &ServerConfig {
		&self.config
	}

	async fn send(request: RequestBuilder) -> Result<Response> {
		let response = request.send().await?;
		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			let message = status_message(&body, status.canonical_reason().unwrap_or("unknown status"));
			return Err(ApiError::Status {
				status: status.as_u16(),
				message,
			});
		}
		Ok(response)
	}

	async fn read<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
		let body = Self::send(request).await?.text().await?;
		Ok(serde_json::from_str(&body)?)
	}

	pub async fn ask_question(&self, question: &str, user_id: &str) -> Result<Answer> {
		let url = self.config.endpoint("question");
		debug!("POST {url}");
		let body = QuestionRequest {
			question: question.to_string(),
			user_id: user_id.to_string(),
		};
		Self::read(self.client.post(url).json(&body)).await
	}

	/// Recommendation based on the user's whole history.
	pub async fn recommend(&self, user_id: &str) -> Result<Answer> {
		let url = self.config.endpoint("recommend");
		debug!("POST {url}");
		let body = RecommendRequest {
			user_id: user_id.to_string(),
		};
		Self::read(self.client.post(url).json(&body)).await
	}

	pub async fn recommend_for_node(&self, node_name: &str, preference: Preference) -> Result<Answer> {
		let url = self.config.endpoint("recommend");
		debug!("POST {url} for {node_name}");
		let body = NodeRecommendRequest {
			node_name: node_name.to_string(),
			preference,
		};
		Self::read(self.client.post(url).json(&body)).await
	}

	pub async fn fetch_history(&self, user_id: &str) -> Result<Vec<HistoryRecord>> {
		let url = self.config.endpoint("history");
		debug!("GET {url}");
		let response: HistoryResponse = Self::read(self.client.get(url).query(&[("id", user_id)])).await?;
		Ok(response.history)
	}

	pub async fn append_history(&self, record: &HistoryRecord) -> Result<()> {
		let url = self.config.endpoint("history");
		debug!("POST {url} ({:?})", record.kind);
		Self::send(self.client.post(url).json(record)).await?;
		Ok(())
	}

	/// Deletes the record written by `user_id` at `time`.
	pub async fn delete_last_history(&self, user_id: &str, time: &str) -> Result<()> {
		let url = self.config.endpoint("history");
		debug!("DELETE {url}");
		let body = DeleteHistoryRequest {
			id: user_id.to_string(),
			time: time.to_string(),
		};
		Self::send(self.client.delete(url).json(&body)).await?;
		Ok(())
	}

	pub async fn include_exclude(&self, request: &IncludeExcludeRequest) -> Result<Answer> {
		let url = self.config.endpoint("include_exclude");
		debug!(
			"POST {url} (+{} -{})",
			request.operation.include.len(),
			request.operation.exclude.len()
		);
		Self::read(self.client.post(url).json(request)).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_message_prefers_json_error_field() {
		assert_eq!(status_message(r#"{"error":"no user"}"#, "Bad Request"), "no user");
		assert_eq!(status_message("  upstream down ", "Bad Gateway"), "upstream down");
		assert_eq!(status_message("", "Not Found"), "Not Found");
	}

	#[test]
	fn status_errors_render_code_and_message() {
		let err = ApiError::Status {
			status: 500,
			message: "boom".into(),
		};
		assert_eq!(err.to_string(), "server answered 500: boom");
	}

	#[test]
	fn client_builds_routes_from_config() {
		let client = ApiClient::new(ServerConfig::new("http://backend.test"));
		assert_eq!(client.config().endpoint("recommend"), "http://backend.test/api/recommend");
	}
}
