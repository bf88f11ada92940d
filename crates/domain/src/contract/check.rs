//! Contract check definitions and evaluation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::outcome::CheckOutcome;
use crate::response::ResponseCapture;

/// Expected JSON type for a typed field check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// A whole number (no fractional part).
    Integer,
    /// Any JSON number.
    Number,
    /// A JSON string.
    String,
    /// A JSON boolean.
    Boolean,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
    /// The JSON null value.
    Null,
}

impl FieldType {
    /// Returns the type name used in descriptions and mismatches.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Null => "null",
        }
    }

    /// Returns true if the value is of this type.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
            Self::Null => value.is_null(),
        }
    }
}

/// Returns the JSON type name of a value, for mismatch messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A check applied to one element of a sequence body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemCheck {
    /// The element has the named field (its value may be null).
    HasField {
        /// Field name to look up.
        name: String,
    },
    /// The named field strictly equals the expected JSON value.
    FieldEquals {
        /// Field name to look up.
        name: String,
        /// Expected value, compared without coercion.
        expected: Value,
    },
    /// The named field is of the expected JSON type.
    FieldIsType {
        /// Field name to look up.
        name: String,
        /// Expected JSON type.
        expected: FieldType,
    },
}

impl ItemCheck {
    /// Returns a one-line description of this check.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::HasField { name } => format!("field '{name}' present"),
            Self::FieldEquals { name, expected } => format!("field '{name}' equals {expected}"),
            Self::FieldIsType { name, expected } => {
                format!("field '{name}' is {}", expected.name())
            }
        }
    }

    /// Evaluates this check against one element of a sequence.
    #[must_use]
    pub fn evaluate(&self, element: &Value) -> CheckOutcome {
        let result = match self {
            Self::HasField { name } => check_has_field(element, name),
            Self::FieldEquals { name, expected } => check_field_equals(element, name, expected),
            Self::FieldIsType { name, expected } => check_field_is_type(element, name, *expected),
        };
        into_outcome(self.description(), result)
    }
}

/// A check applied to a response capture.
///
/// Serialized form is internally tagged, so suite documents read as
/// `{"type": "status_equals", "expected": 200}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Check {
    /// The status code equals the expected value exactly.
    StatusEquals {
        /// Expected status code.
        expected: u16,
    },
    /// The status code falls within an inclusive range.
    StatusInRange {
        /// Minimum status code (inclusive).
        min: u16,
        /// Maximum status code (inclusive).
        max: u16,
    },
    /// The body is a JSON object with the named field present.
    HasField {
        /// Field name to look up.
        name: String,
    },
    /// The named body field strictly equals the expected JSON value.
    FieldEquals {
        /// Field name to look up.
        name: String,
        /// Expected value, compared without coercion.
        expected: Value,
    },
    /// The named body field is of the expected JSON type.
    FieldIsType {
        /// Field name to look up.
        name: String,
        /// Expected JSON type.
        expected: FieldType,
    },
    /// The body is a JSON sequence.
    IsSequence,
    /// Every element of a sequence body satisfies all given checks.
    ///
    /// Fails on the first failing element, reporting its index.
    AllSatisfy {
        /// Checks applied to each element in order.
        checks: Vec<ItemCheck>,
    },
}

impl Check {
    /// Returns a one-line description of this check.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusEquals { expected } => format!("status = {expected}"),
            Self::StatusInRange { min, max } => format!("status in {min}-{max}"),
            Self::HasField { name } => format!("field '{name}' present"),
            Self::FieldEquals { name, expected } => format!("field '{name}' equals {expected}"),
            Self::FieldIsType { name, expected } => {
                format!("field '{name}' is {}", expected.name())
            }
            Self::IsSequence => "body is a sequence".to_string(),
            Self::AllSatisfy { checks } => {
                let parts: Vec<_> = checks.iter().map(ItemCheck::description).collect();
                format!("all elements satisfy: {}", parts.join(", "))
            }
        }
    }

    /// Evaluates this check against a response capture.
    #[must_use]
    pub fn evaluate(&self, response: &ResponseCapture) -> CheckOutcome {
        match self {
            Self::StatusEquals { expected } => self.check_status(response, |s| s == *expected),
            Self::StatusInRange { min, max } => {
                self.check_status(response, |s| s >= *min && s <= *max)
            }
            Self::HasField { name } => self.check_body(response, |body| check_has_field(body, name)),
            Self::FieldEquals { name, expected } => {
                self.check_body(response, |body| check_field_equals(body, name, expected))
            }
            Self::FieldIsType { name, expected } => {
                self.check_body(response, |body| check_field_is_type(body, name, *expected))
            }
            Self::IsSequence => self.check_body(response, check_is_sequence),
            Self::AllSatisfy { checks } => {
                self.check_body(response, |body| check_all_satisfy(body, checks))
            }
        }
    }

    fn check_status(&self, response: &ResponseCapture, accepts: impl Fn(u16) -> bool) -> CheckOutcome {
        let actual = response.status;
        if accepts(actual) {
            CheckOutcome::pass_with(self.description(), actual.to_string())
        } else {
            CheckOutcome::fail_with(
                self.description(),
                actual.to_string(),
                format!("expected {}, got {actual}", self.description()),
            )
        }
    }

    fn check_body(
        &self,
        response: &ResponseCapture,
        check: impl FnOnce(&Value) -> Result<String, String>,
    ) -> CheckOutcome {
        let result = match response.body_json() {
            Some(body) => check(body),
            None => Err("body is not JSON".to_string()),
        };
        into_outcome(self.description(), result)
    }
}

/// Converts an `Ok(actual) / Err(mismatch)` pair into an outcome.
fn into_outcome(description: String, result: Result<String, String>) -> CheckOutcome {
    match result {
        Ok(actual) => CheckOutcome::pass_with(description, actual),
        Err(mismatch) => CheckOutcome::fail(description, mismatch),
    }
}

fn check_has_field(target: &Value, name: &str) -> Result<String, String> {
    let Some(object) = target.as_object() else {
        return Err(format!("expected a JSON object, got {}", json_type_name(target)));
    };
    match object.get(name) {
        Some(value) => Ok(value.to_string()),
        None => Err(format!("field '{name}' not found in body")),
    }
}

fn check_field_equals(target: &Value, name: &str, expected: &Value) -> Result<String, String> {
    let Some(object) = target.as_object() else {
        return Err(format!("expected a JSON object, got {}", json_type_name(target)));
    };
    match object.get(name) {
        Some(actual) if actual == expected => Ok(actual.to_string()),
        Some(actual) => Err(format!(
            "expected field '{name}' to equal {expected}, got {actual}"
        )),
        None => Err(format!("field '{name}' not found in body")),
    }
}

fn check_field_is_type(target: &Value, name: &str, expected: FieldType) -> Result<String, String> {
    let Some(object) = target.as_object() else {
        return Err(format!("expected a JSON object, got {}", json_type_name(target)));
    };
    match object.get(name) {
        Some(actual) if expected.matches(actual) => Ok(json_type_name(actual).to_string()),
        Some(actual) => Err(format!(
            "expected field '{name}' to be {}, got {} ({actual})",
            expected.name(),
            json_type_name(actual)
        )),
        None => Err(format!("field '{name}' not found in body")),
    }
}

fn check_is_sequence(target: &Value) -> Result<String, String> {
    match target.as_array() {
        Some(elements) => Ok(format!("{} elements", elements.len())),
        None => Err(format!(
            "expected a JSON sequence, got {}",
            json_type_name(target)
        )),
    }
}

fn check_all_satisfy(target: &Value, checks: &[ItemCheck]) -> Result<String, String> {
    let Some(elements) = target.as_array() else {
        return Err(format!(
            "expected a JSON sequence, got {}",
            json_type_name(target)
        ));
    };
    for (index, element) in elements.iter().enumerate() {
        for check in checks {
            let outcome = check.evaluate(element);
            if let Some(mismatch) = outcome.failure_reason() {
                return Err(format!("element {index}: {mismatch}"));
            }
        }
    }
    Ok(format!("{} elements", elements.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    fn json_response(status: u16, body: &str) -> ResponseCapture {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        ResponseCapture::new(status, headers, body.as_bytes().to_vec(), Duration::from_millis(10))
    }

    fn plain_response(status: u16, body: &str) -> ResponseCapture {
        ResponseCapture::new(
            status,
            HashMap::new(),
            body.as_bytes().to_vec(),
            Duration::from_millis(10),
        )
    }

    #[test]
    fn test_status_equals() {
        let check = Check::StatusEquals { expected: 200 };
        assert!(check.evaluate(&json_response(200, "{}")).passed);

        let outcome = check.evaluate(&json_response(404, "{}"));
        assert!(!outcome.passed);
        assert_eq!(
            outcome.failure_reason(),
            Some("expected status = 200, got 404")
        );
    }

    #[test]
    fn test_status_in_range() {
        let check = Check::StatusInRange { min: 200, max: 299 };
        assert!(check.evaluate(&json_response(201, "{}")).passed);
        assert!(check.evaluate(&json_response(299, "{}")).passed);
        assert!(!check.evaluate(&json_response(300, "{}")).passed);
        assert!(!check.evaluate(&json_response(199, "{}")).passed);
    }

    #[test]
    fn test_has_field_accepts_null_value() {
        let response = json_response(200, r#"{"title": null}"#);
        let check = Check::HasField {
            name: "title".to_string(),
        };
        assert!(check.evaluate(&response).passed);
    }

    #[test]
    fn test_has_field_missing() {
        let response = json_response(200, r#"{"id": 1}"#);
        let check = Check::HasField {
            name: "title".to_string(),
        };
        let outcome = check.evaluate(&response);
        assert!(!outcome.passed);
        assert_eq!(
            outcome.failure_reason(),
            Some("field 'title' not found in body")
        );
    }

    #[test]
    fn test_field_equals_strict_equality() {
        let response = json_response(200, r#"{"completed": false, "title": "New Task"}"#);

        let check = Check::FieldEquals {
            name: "completed".to_string(),
            expected: json!(false),
        };
        assert!(check.evaluate(&response).passed);

        // no boolean/string coercion
        let coerced = Check::FieldEquals {
            name: "completed".to_string(),
            expected: json!("false"),
        };
        assert!(!coerced.evaluate(&response).passed);

        let title = Check::FieldEquals {
            name: "title".to_string(),
            expected: json!("New Task"),
        };
        assert!(title.evaluate(&response).passed);
    }

    #[test]
    fn test_field_is_type() {
        let response = json_response(
            200,
            r#"{"userId": 1, "id": 2, "title": "delectus", "completed": false}"#,
        );

        for (name, expected) in [
            ("userId", FieldType::Integer),
            ("id", FieldType::Integer),
            ("title", FieldType::String),
            ("completed", FieldType::Boolean),
        ] {
            let check = Check::FieldIsType {
                name: name.to_string(),
                expected,
            };
            let outcome = check.evaluate(&response);
            assert!(outcome.passed, "field {name} should be {}", expected.name());
        }

        let wrong = Check::FieldIsType {
            name: "title".to_string(),
            expected: FieldType::Boolean,
        };
        let outcome = wrong.evaluate(&response);
        assert!(!outcome.passed);
        assert_eq!(
            outcome.failure_reason(),
            Some("expected field 'title' to be boolean, got string (\"delectus\")")
        );
    }

    #[test]
    fn test_integer_rejects_fractional_numbers() {
        let response = json_response(200, r#"{"id": 1.5}"#);
        let check = Check::FieldIsType {
            name: "id".to_string(),
            expected: FieldType::Integer,
        };
        assert!(!check.evaluate(&response).passed);

        let number = Check::FieldIsType {
            name: "id".to_string(),
            expected: FieldType::Number,
        };
        assert!(number.evaluate(&response).passed);
    }

    #[test]
    fn test_is_sequence() {
        assert!(Check::IsSequence.evaluate(&json_response(200, "[]")).passed);
        assert!(
            Check::IsSequence
                .evaluate(&json_response(200, r#"[{"id": 1}]"#))
                .passed
        );

        let outcome = Check::IsSequence.evaluate(&json_response(200, "{}"));
        assert!(!outcome.passed);
        assert_eq!(
            outcome.failure_reason(),
            Some("expected a JSON sequence, got object")
        );
    }

    #[test]
    fn test_all_satisfy_reports_first_failing_index() {
        let response = json_response(
            200,
            r#"[
                {"userId": 1, "id": 1, "title": "a", "completed": false},
                {"userId": 2, "id": 2, "title": "b", "completed": true},
                {"userId": 3, "id": 3, "completed": false}
            ]"#,
        );
        let check = Check::AllSatisfy {
            checks: vec![
                ItemCheck::HasField {
                    name: "userId".to_string(),
                },
                ItemCheck::HasField {
                    name: "title".to_string(),
                },
            ],
        };

        let outcome = check.evaluate(&response);
        assert!(!outcome.passed);
        assert_eq!(
            outcome.failure_reason(),
            Some("element 2: field 'title' not found in body")
        );
    }

    #[test]
    fn test_all_satisfy_passes_over_whole_sequence() {
        let response = json_response(
            200,
            r#"[{"id": 1, "completed": false}, {"id": 2, "completed": true}]"#,
        );
        let check = Check::AllSatisfy {
            checks: vec![
                ItemCheck::FieldIsType {
                    name: "id".to_string(),
                    expected: FieldType::Integer,
                },
                ItemCheck::FieldIsType {
                    name: "completed".to_string(),
                    expected: FieldType::Boolean,
                },
            ],
        };
        let outcome = check.evaluate(&response);
        assert!(outcome.passed);
        assert_eq!(outcome.actual.as_deref(), Some("2 elements"));
    }

    #[test]
    fn test_all_satisfy_rejects_non_object_element() {
        let response = json_response(200, r#"[{"id": 1}, 42]"#);
        let check = Check::AllSatisfy {
            checks: vec![ItemCheck::HasField {
                name: "id".to_string(),
            }],
        };
        let outcome = check.evaluate(&response);
        assert!(!outcome.passed);
        assert_eq!(
            outcome.failure_reason(),
            Some("element 1: expected a JSON object, got number")
        );
    }

    #[test]
    fn test_body_checks_fail_without_json() {
        let response = plain_response(200, "not json");
        let check = Check::HasField {
            name: "id".to_string(),
        };
        let outcome = check.evaluate(&response);
        assert!(!outcome.passed);
        assert_eq!(outcome.failure_reason(), Some("body is not JSON"));
    }

    #[test]
    fn test_field_check_on_sequence_body_fails() {
        let response = json_response(200, "[]");
        let check = Check::HasField {
            name: "id".to_string(),
        };
        let outcome = check.evaluate(&response);
        assert!(!outcome.passed);
        assert_eq!(
            outcome.failure_reason(),
            Some("expected a JSON object, got array")
        );
    }

    #[test]
    fn test_check_serde_round_trip() {
        let check = Check::AllSatisfy {
            checks: vec![ItemCheck::FieldIsType {
                name: "userId".to_string(),
                expected: FieldType::Integer,
            }],
        };
        let json = serde_json::to_value(&check).unwrap();
        assert_eq!(
            json,
            json!({
                "type": "all_satisfy",
                "checks": [{"type": "field_is_type", "name": "userId", "expected": "integer"}]
            })
        );
        let parsed: Check = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, check);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(
            Check::StatusEquals { expected: 201 }.description(),
            "status = 201"
        );
        assert_eq!(Check::IsSequence.description(), "body is a sequence");
        assert_eq!(
            Check::FieldIsType {
                name: "completed".to_string(),
                expected: FieldType::Boolean,
            }
            .description(),
            "field 'completed' is boolean"
        );
    }
}
