use crate::api::{HistoryKind, HistoryRecord, Operation};

/// Include/exclude choices not yet applied, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryLog {
	operations: Vec<HistoryRecord>,
}

impl HistoryLog {
	/// Keeps only the preference records of a server history.
	pub fn from_server(records: Vec<HistoryRecord>) -> Self {
		Self {
			operations: records.into_iter().filter(|r| r.kind.is_preference()).collect(),
		}
	}

	pub fn operations(&self) -> &[HistoryRecord] {
		&self.operations
	}

	pub fn is_empty(&self) -> bool {
		self.operations.is_empty()
	}

	/// Returns whether the record was kept.
	pub fn record(&mut self, record: HistoryRecord) -> bool {
		if !record.kind.is_preference() {
			return false;
		}
		self.operations.push(record);
		true
	}

	pub fn last(&self) -> Option<&HistoryRecord> {
		self.operations.last()
	}

	/// Call once the server has confirmed the delete.
	pub fn undo_last(&mut self) -> Option<HistoryRecord> {
		self.operations.pop()
	}

	/// Folds the log into one operation; a later choice about the same name wins.
	pub fn to_operation(&self) -> Operation {
		let mut latest: Vec<(&str, HistoryKind)> = Vec::new();
		for record in &self.operations {
			latest.retain(|(name, _)| *name != record.content);
			latest.push((record.content.as_str(), record.kind));
		}
		let mut operation = Operation::default();
		for (name, kind) in latest {
			match kind {
				HistoryKind::Include => operation.include.push(name.to_string()),
				HistoryKind::Exclude => operation.exclude.push(name.to_string()),
				_ => {}
			}
		}
		operation
	}

	/// Takes the pending operation and empties the log.
	pub fn apply(&mut self) -> Operation {
		let operation = self.to_operation();
		self.operations.clear();
		operation
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rec(kind: HistoryKind, content: &str, time: &str) -> HistoryRecord {
		HistoryRecord::new("u1", kind, content, time)
	}

	#[test]
	fn server_history_keeps_preferences_only() {
		let log = HistoryLog::from_server(vec![
			rec(HistoryKind::Chat, "hello", "1"),
			rec(HistoryKind::Include, "番茄", "2"),
			rec(HistoryKind::Click, "番茄", "3"),
			rec(HistoryKind::Exclude, "牛肉", "4"),
			rec(HistoryKind::Other, "?", "5"),
		]);
		let kinds: Vec<_> = log.operations().iter().map(|r| r.kind).collect();
		assert_eq!(kinds, vec![HistoryKind::Include, HistoryKind::Exclude]);
	}

	#[test]
	fn record_ignores_non_preferences() {
		let mut log = HistoryLog::default();
		assert!(!log.record(rec(HistoryKind::Click, "番茄", "1")));
		assert!(log.record(rec(HistoryKind::Include, "番茄", "2")));
		assert_eq!(log.operations().len(), 1);
	}

	#[test]
	fn undo_removes_the_most_recent() {
		let mut log = HistoryLog::default();
		log.record(rec(HistoryKind::Include, "番茄", "1"));
		log.record(rec(HistoryKind::Exclude, "牛肉", "2"));
		assert_eq!(log.undo_last().map(|r| r.content), Some("牛肉".to_string()));
		assert_eq!(log.last().map(|r| r.time.as_str()), Some("1"));
		log.undo_last();
		assert_eq!(log.undo_last(), None);
	}

	#[test]
	fn later_choice_about_a_name_wins() {
		let mut log = HistoryLog::default();
		log.record(rec(HistoryKind::Include, "番茄", "1"));
		log.record(rec(HistoryKind::Exclude, "牛肉", "2"));
		log.record(rec(HistoryKind::Exclude, "番茄", "3"));
		assert_eq!(
			log.to_operation(),
			Operation {
				include: vec![],
				exclude: vec!["牛肉".into(), "番茄".into()],
			}
		);
	}

	#[test]
	fn apply_drains_the_log() {
		let mut log = HistoryLog::default();
		log.record(rec(HistoryKind::Include, "豆腐", "1"));
		let op = log.apply();
		assert_eq!(op.include, vec!["豆腐".to_string()]);
		assert!(log.is_empty());
		assert!(log.apply().is_empty());
	}
}
