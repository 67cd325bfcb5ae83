//! Review API response validation
//!
//! The fetcher hands over untyped JSON; nothing downstream sees it until it
//! has passed through [`validate_response`].

use crate::error::BotError;
use crate::models::ApiResponse;
use serde_json::Value;

/// JSON type name for diagnostics
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Check the shape of a decoded response and convert it to [`ApiResponse`].
///
/// Entries of `homeworks` are left untouched; only the latest one is ever
/// decoded, by the poller. A missing or unusable `current_date` is not a
/// failure here; it shows up as `current_date: None` and is reported by
/// [`ApiResponse::cursor`].
pub fn validate_response(value: Value) -> Result<ApiResponse, BotError> {
    let mut object = match value {
        Value::Object(map) => map,
        other => {
            return Err(BotError::malformed(
                "not_an_object",
                format!("expected object, received {}", type_name(&other)),
            ))
        }
    };

    let homeworks = match object.remove("homeworks") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(BotError::malformed(
                "homeworks_not_a_list",
                format!("homeworks is not a list, received {}", type_name(&other)),
            ))
        }
        None => {
            return Err(BotError::malformed(
                "missing_homeworks",
                "missing required key \"homeworks\"",
            ))
        }
    };

    let current_date = object
        .get("current_date")
        .and_then(Value::as_i64)
        .filter(|ts| *ts >= 0);

    Ok(ApiResponse {
        homeworks,
        current_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorFingerprint;
    use serde_json::json;

    #[test]
    fn test_valid_response() {
        let response = validate_response(json!({
            "homeworks": [
                {"homework_name": "proj2", "status": "reviewing", "id": 7},
                {"homework_name": "proj1", "status": "approved"}
            ],
            "current_date": 1000
        }))
        .unwrap();

        assert_eq!(response.current_date, Some(1000));
        assert_eq!(response.homeworks.len(), 2);
        assert_eq!(
            response.latest().and_then(|hw| hw["homework_name"].as_str()),
            Some("proj2")
        );
    }

    #[test]
    fn test_not_an_object() {
        let err = validate_response(json!([1, 2, 3])).unwrap_err();
        assert_eq!(
            err.fingerprint(),
            ErrorFingerprint::MalformedResponse("not_an_object")
        );
    }

    #[test]
    fn test_missing_homeworks() {
        let err = validate_response(json!({"current_date": 5})).unwrap_err();
        assert_eq!(
            err.fingerprint(),
            ErrorFingerprint::MalformedResponse("missing_homeworks")
        );
    }

    #[test]
    fn test_homeworks_not_a_list() {
        let err = validate_response(json!({"homeworks": {}, "current_date": 5})).unwrap_err();
        assert_eq!(
            err.fingerprint(),
            ErrorFingerprint::MalformedResponse("homeworks_not_a_list")
        );
    }

    #[test]
    fn test_older_entries_are_not_inspected() {
        let response = validate_response(json!({
            "homeworks": [
                {"homework_name": "new", "status": "approved"},
                {"homework_name": 17, "status": "approved"},
                "junk"
            ],
            "current_date": 1000
        }))
        .unwrap();
        assert_eq!(response.homeworks.len(), 3);
        assert_eq!(response.current_date, Some(1000));
    }

    #[test]
    fn test_missing_or_invalid_cursor_is_not_fatal() {
        let missing = validate_response(json!({"homeworks": []})).unwrap();
        assert_eq!(missing.current_date, None);
        assert!(matches!(missing.cursor(), Err(BotError::MissingCursor(_))));

        let wrong_type = validate_response(json!({"homeworks": [], "current_date": "today"})).unwrap();
        assert_eq!(wrong_type.current_date, None);

        let negative = validate_response(json!({"homeworks": [], "current_date": -1})).unwrap();
        assert_eq!(negative.current_date, None);
    }
}
