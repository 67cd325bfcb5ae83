//! Review API data structures and verdict interpretation

use crate::error::BotError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One homework entry as returned by the review API.
///
/// Both fields are optional at the decoding stage; their presence is
/// enforced by [`VerdictMapping::interpret`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeworkRecord {
    #[serde(default)]
    pub homework_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl HomeworkRecord {
    pub fn new(homework_name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            homework_name: Some(homework_name.into()),
            status: Some(status.into()),
        }
    }

    /// Read a raw API entry. Absent or null fields stay `None`; non-string
    /// scalars are kept in their JSON rendering so the interpreter decides.
    pub fn from_value(value: &Value) -> Result<Self, BotError> {
        let object = value.as_object().ok_or_else(|| {
            BotError::malformed(
                "homework_not_an_object",
                format!("latest homework is not an object: {}", value),
            )
        })?;

        let field = |name: &str| match object.get(name) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };

        Ok(Self {
            homework_name: field("homework_name"),
            status: field("status"),
        })
    }
}

/// Validated review API response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// Raw entries, most recent first. Only the latest is ever decoded.
    pub homeworks: Vec<Value>,
    /// Server-side timestamp for the next `from_date`, None when absent or unusable
    pub current_date: Option<i64>,
}

impl ApiResponse {
    /// Cursor supplied by the server for the next query window
    pub fn cursor(&self) -> Result<i64, BotError> {
        self.current_date.ok_or_else(|| {
            BotError::MissingCursor("current_date is absent or not a non-negative integer".into())
        })
    }

    pub fn latest(&self) -> Option<&Value> {
        self.homeworks.first()
    }
}

/// Fixed mapping from review status code to the text shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerdictMapping(BTreeMap<String, String>);

impl Default for VerdictMapping {
    fn default() -> Self {
        Self::from_pairs([
            (
                "approved",
                "The work has been reviewed: the reviewer liked everything. Hooray!",
            ),
            ("reviewing", "The work has been taken for review by the reviewer."),
            (
                "rejected",
                "The work has been reviewed: the reviewer has some remarks.",
            ),
        ])
    }
}

impl VerdictMapping {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(code, verdict)| (code.to_string(), verdict.to_string()))
                .collect(),
        )
    }

    pub fn verdict(&self, status: &str) -> Option<&str> {
        self.0.get(status).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the status-change message for a homework record.
    pub fn interpret(&self, record: &HomeworkRecord) -> Result<String, BotError> {
        let homework_name = record
            .homework_name
            .as_deref()
            .ok_or(BotError::MissingField("homework_name"))?;
        let status = record
            .status
            .as_deref()
            .ok_or(BotError::MissingField("status"))?;
        let verdict = self
            .verdict(status)
            .ok_or_else(|| BotError::UnknownStatus(status.to_string()))?;
        Ok(format!(
            "Status changed for \"{}\". {}",
            homework_name, verdict
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> VerdictMapping {
        VerdictMapping::from_pairs([
            ("approved", "Great, accepted!"),
            ("rejected", "Needs revision."),
        ])
    }

    #[test]
    fn test_interpret_contains_name_and_verdict() {
        let message = mapping()
            .interpret(&HomeworkRecord::new("proj1", "approved"))
            .unwrap();
        assert!(message.contains("proj1"));
        assert!(message.contains("Great, accepted!"));
        assert_eq!(message, "Status changed for \"proj1\". Great, accepted!");
    }

    #[test]
    fn test_interpret_unknown_status() {
        let err = mapping()
            .interpret(&HomeworkRecord::new("proj1", "lost"))
            .unwrap_err();
        assert!(matches!(err, BotError::UnknownStatus(ref s) if s == "lost"));
    }

    #[test]
    fn test_interpret_missing_fields() {
        let no_name = HomeworkRecord {
            homework_name: None,
            status: Some("approved".into()),
        };
        assert!(matches!(
            mapping().interpret(&no_name),
            Err(BotError::MissingField("homework_name"))
        ));

        let no_status = HomeworkRecord {
            homework_name: Some("proj1".into()),
            status: None,
        };
        assert!(matches!(
            mapping().interpret(&no_status),
            Err(BotError::MissingField("status"))
        ));
    }

    #[test]
    fn test_from_value_keeps_odd_types_for_interpreter() {
        let record = HomeworkRecord::from_value(&serde_json::json!({
            "homework_name": 17,
            "status": 5,
            "reviewer_comment": null
        }))
        .unwrap();
        assert_eq!(record.homework_name.as_deref(), Some("17"));
        assert!(matches!(
            mapping().interpret(&record),
            Err(BotError::UnknownStatus(ref s)) if s == "5"
        ));

        let no_status =
            HomeworkRecord::from_value(&serde_json::json!({"homework_name": "a", "status": null}))
                .unwrap();
        assert!(matches!(
            mapping().interpret(&no_status),
            Err(BotError::MissingField("status"))
        ));

        assert!(matches!(
            HomeworkRecord::from_value(&serde_json::json!("junk")),
            Err(BotError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_default_mapping_codes() {
        let defaults = VerdictMapping::default();
        assert!(defaults.verdict("approved").is_some());
        assert!(defaults.verdict("reviewing").is_some());
        assert!(defaults.verdict("rejected").is_some());
        assert!(defaults.verdict("unknown").is_none());
    }

    #[test]
    fn test_cursor_missing() {
        let response = ApiResponse {
            homeworks: vec![],
            current_date: None,
        };
        assert!(matches!(response.cursor(), Err(BotError::MissingCursor(_))));
    }
}
