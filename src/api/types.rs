//! Wire shapes exchanged with the backend. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::graph::KnowledgeGraphPayload;

/// What a history record describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
	Chat,
	Recommendation,
	Include,
	Exclude,
	Click,
	Apply,
	/// Any type this client does not know about.
	#[serde(other)]
	Other,
}

impl HistoryKind {
	/// Include/exclude records are the ones the history panel lets the user review.
	pub fn is_preference(self) -> bool {
		matches!(self, HistoryKind::Include | HistoryKind::Exclude)
	}
}

/// The user's answer to the include/exclude prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
	Include,
	Exclude,
}

impl From<Preference> for HistoryKind {
	fn from(value: Preference) -> Self {
		match value {
			Preference::Include => HistoryKind::Include,
			Preference::Exclude => HistoryKind::Exclude,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
	/// The user id the record belongs to.
	pub id: String,
	#[serde(rename = "type")]
	pub kind: HistoryKind,
	pub content: String,
	/// Client-side local timestamp, also the key for deleting the record.
	pub time: String,
}

impl HistoryRecord {
	pub fn new(
		user_id: impl Into<String>,
		kind: HistoryKind,
		content: impl Into<String>,
		time: impl Into<String>,
	) -> Self {
		Self {
			id: user_id.into(),
			kind,
			content: content.into(),
			time: time.into(),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
	pub question: String,
	pub user_id: String,
}

/// Reply to a question, a recommendation or an include/exclude application.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
	#[serde(default)]
	pub final_answer: String,
	#[serde(default)]
	pub knowledge_graph: Option<KnowledgeGraphPayload>,
	#[serde(default)]
	pub keywords: Option<Vec<String>>,
	/// Only present on recommendations.
	#[serde(default, alias = "recommendQuery")]
	pub recommendation_query: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
	pub user_id: String,
}

/// Recommendation request scoped to one clicked node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecommendRequest {
	pub node_name: String,
	#[serde(rename = "type")]
	pub preference: Preference,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct HistoryResponse {
	#[serde(default)]
	pub history: Vec<HistoryRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeleteHistoryRequest {
	pub id: String,
	pub time: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
	pub include: Vec<String>,
	pub exclude: Vec<String>,
}

impl Operation {
	pub fn is_empty(&self) -> bool {
		self.include.is_empty() && self.exclude.is_empty()
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludeExcludeRequest {
	pub user_id: String,
	pub operation: Operation,
}

/// Error body some endpoints return alongside a failing status.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct ErrorBody {
	pub error: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn history_record_uses_type_on_the_wire() {
		let record = HistoryRecord::new("u1", HistoryKind::Click, "番茄", "2024/5/1 10:00:00");
		let json = serde_json::to_value(&record).unwrap();
		assert_eq!(json["type"], "click");
		assert_eq!(json["id"], "u1");

		let back: HistoryRecord = serde_json::from_value(json).unwrap();
		assert_eq!(back, record);
	}

	#[test]
	fn unknown_history_types_survive_decoding() {
		let body = r#"{"history":[{"id":"u1","type":"bookmark","content":"x","time":"t"}]}"#;
		let response: HistoryResponse = serde_json::from_str(body).unwrap();
		assert_eq!(response.history[0].kind, HistoryKind::Other);
		assert!(!response.history[0].kind.is_preference());
	}

	#[test]
	fn requests_are_camel_case() {
		let question = QuestionRequest {
			question: "晚饭吃什么".into(),
			user_id: "u1".into(),
		};
		let json = serde_json::to_value(&question).unwrap();
		assert_eq!(json["userId"], "u1");

		let node = NodeRecommendRequest {
			node_name: "豆腐".into(),
			preference: Preference::Exclude,
		};
		let json = serde_json::to_value(&node).unwrap();
		assert_eq!(json["nodeName"], "豆腐");
		assert_eq!(json["type"], "exclude");
	}

	#[test]
	fn answer_tolerates_missing_graph_and_keywords() {
		let answer: Answer = serde_json::from_str(r#"{"finalAnswer":"多喝水"}"#).unwrap();
		assert_eq!(answer.final_answer, "多喝水");
		assert!(answer.knowledge_graph.is_none());
		assert!(answer.keywords.is_none());
	}

	#[test]
	fn answer_reads_both_recommendation_spellings() {
		let a: Answer = serde_json::from_str(r#"{"recommendationQuery":"q"}"#).unwrap();
		let b: Answer = serde_json::from_str(r#"{"recommendQuery":"q"}"#).unwrap();
		assert_eq!(a.recommendation_query.as_deref(), Some("q"));
		assert_eq!(b.recommendation_query.as_deref(), Some("q"));
	}

	#[test]
	fn answer_carries_the_knowledge_graph_columns() {
		let body = r#"{
			"finalAnswer": "ok",
			"knowledgeGraph": {"subject": ["沙拉"], "relation": ["含有"], "object": ["番茄"], "cat": ["A2"]},
			"keywords": ["番茄"]
		}"#;
		let answer: Answer = serde_json::from_str(body).unwrap();
		let graph = answer.knowledge_graph.unwrap();
		assert_eq!(graph.object, vec!["番茄".to_string()]);
		assert_eq!(answer.keywords, Some(vec!["番茄".to_string()]));
	}
}
