//! Bounded calculator history.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

/// Maximum number of entries kept in the history.
pub const HISTORY_CAPACITY: usize = 10;

/// Outcome of a calculation: a number, or an error message such as
/// `"Error: Division by zero"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CalcResult {
    Value(f64),
    Message(String),
}

impl CalcResult {
    pub fn is_error(&self) -> bool {
        matches!(self, CalcResult::Message(_))
    }
}

impl From<Result<f64, DomainError>> for CalcResult {
    fn from(result: Result<f64, DomainError>) -> Self {
        match result {
            Ok(v) => CalcResult::Value(v),
            Err(e) => CalcResult::Message(format!("Error: {}", e)),
        }
    }
}

/// One recorded calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    #[schema(example = "5 + 3")]
    pub expression: String,
    #[schema(example = 8)]
    pub result: CalcResult,
    #[serde(default)]
    #[schema(example = "2025-10-25 12:00:00")]
    pub timestamp: String,
}

impl HistoryEntry {
    pub fn new(
        expression: impl Into<String>,
        result: CalcResult,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            expression: expression.into(),
            result,
            timestamp: timestamp.into(),
        }
    }
}

/// Calculator history, newest entry first, never longer than
/// [`HISTORY_CAPACITY`].
///
/// Serializes as `{"history": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct History {
    #[serde(default, deserialize_with = "newest_within_capacity")]
    history: Vec<HistoryEntry>,
}

/// Drops stored entries past capacity, keeping the newest.
fn newest_within_capacity<'de, D>(deserializer: D) -> Result<Vec<HistoryEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut entries = Vec::<HistoryEntry>::deserialize(deserializer)?;
    entries.truncate(HISTORY_CAPACITY);
    Ok(entries)
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends `entry`, evicting the oldest entries beyond capacity.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.history.insert(0, entry);
        self.history.truncate(HISTORY_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl FromIterator<HistoryEntry> for History {
    /// Builds a history from entries given oldest first.
    fn from_iter<I: IntoIterator<Item = HistoryEntry>>(iter: I) -> Self {
        let mut history = History::new();
        for entry in iter {
            history.push(entry);
        }
        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(i: usize) -> HistoryEntry {
        HistoryEntry::new(
            format!("{i} + 1"),
            CalcResult::Value((i + 1) as f64),
            format!("2025-10-25 12:00:{i:02}"),
        )
    }

    #[test]
    fn test_push_prepends() {
        let mut history = History::new();
        history.push(entry(1));
        history.push(entry(2));
        history.push(entry(3));

        let expressions: Vec<_> = history.entries().iter().map(|e| e.expression.as_str()).collect();
        assert_eq!(expressions, ["3 + 1", "2 + 1", "1 + 1"]);
    }

    #[test]
    fn test_history_limited_to_capacity() {
        let history: History = (1..=15).map(entry).collect();

        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.entries()[0].expression, "15 + 1");
        assert_eq!(history.entries()[9].expression, "6 + 1");
    }

    #[test]
    fn test_clear() {
        let mut history: History = (1..=3).map(entry).collect();
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_history_json_shape() {
        let mut history = History::new();
        history.push(HistoryEntry::new(
            "10 / 0",
            CalcResult::Message("Error: Division by zero".into()),
            "2025-10-25 12:00:00",
        ));
        history.push(entry(5));

        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json["history"][0]["result"], 6.0);
        assert_eq!(json["history"][1]["result"], "Error: Division by zero");

        let parsed: History = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, history);
    }

    #[test]
    fn test_history_accepts_integer_results_and_missing_fields() {
        let parsed: History = serde_json::from_str(
            r#"{"history": [{"expression": "5 + 3", "result": 8}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.entries()[0].result, CalcResult::Value(8.0));
        assert_eq!(parsed.entries()[0].timestamp, "");

        let empty: History = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_oversized_stored_history_is_capped() {
        let entries: Vec<_> = (1..=14).rev().map(entry).collect();
        let json = serde_json::json!({ "history": entries });

        let parsed: History = serde_json::from_value(json).unwrap();

        assert_eq!(parsed.len(), HISTORY_CAPACITY);
        assert_eq!(parsed.entries()[0].expression, "14 + 1");
        assert_eq!(parsed.entries()[9].expression, "5 + 1");
    }

    #[test]
    fn test_calc_result_from_division_by_zero() {
        let result = CalcResult::from(Err(DomainError::DivisionByZero));
        assert_eq!(result, CalcResult::Message("Error: Division by zero".into()));
        assert!(result.is_error());
    }
}
