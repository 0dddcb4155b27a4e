//! Decoder for the `select` invocation argument.
//!
//! The embedded module sends a dynamically-keyed JSON object.  This module
//! turns it into a [`Repository`] with an explicit lookup-and-typecheck for
//! every field; nothing is assumed to be present.
//!
//! # Strictness policy
//!
//! ```text
//! field          missing        wrong type     effect
//! ─────────────────────────────────────────────────────────────────
//! id             hard failure   hard failure   no Repository produced
//! name           hard failure   hard failure   no Repository produced
//! fullName       hard failure   hard failure   no Repository produced
//! description    None           None           lenient
//! avatarUrl      None           None           lenient
//! htmlUrl        None           None           lenient
//! commits        None           None           lenient (non-array)
//! commits[i]     dropped        dropped        other items kept in order
//! ```
//!
//! A commit whose `sha` is the empty string is dropped as well.
//!
//! Identity fields are strict because a malformed identifier corrupts
//! equality and lookup.  Everything else may be rendered as a placeholder.
//!
//! # Identifier coercion
//!
//! `id` accepts any JSON number.  Integers are taken as-is, fractional values
//! are truncated toward zero, and values outside the `i64` range are
//! rejected with [`DecodeError::OutOfRange`].

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::domain::repository::{Commit, RepoId, Repository};

/// Wire key of the repository identifier.
pub const FIELD_ID: &str = "id";
/// Wire key of the short repository name.
pub const FIELD_NAME: &str = "name";
/// Wire key of the owner-qualified repository name.
pub const FIELD_FULL_NAME: &str = "fullName";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_AVATAR_URL: &str = "avatarUrl";
pub const FIELD_HTML_URL: &str = "htmlUrl";
/// Wire key of the optional commit list.
pub const FIELD_COMMITS: &str = "commits";
pub const FIELD_SHA: &str = "sha";
pub const FIELD_AUTHOR_NAME: &str = "authorName";
pub const FIELD_MESSAGE: &str = "message";

/// Errors that make a payload undecodable as a whole.
///
/// Malformed commit entries are *not* represented here; they are dropped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The invocation argument was not a JSON object.
    #[error("payload must be an object, got {found}")]
    NotAnObject { found: &'static str },

    /// A required field was absent (or explicitly `null`).
    #[error("required field `{field}` is missing")]
    MissingField { field: &'static str },

    /// A required field was present with the wrong JSON type.
    #[error("required field `{field}` must be {expected}, got {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A numeric field did not fit the target integer type.
    #[error("field `{field}` value {value} is out of range")]
    OutOfRange { field: &'static str, value: String },
}

impl DecodeError {
    /// The wire key this error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            DecodeError::NotAnObject { .. } => None,
            DecodeError::MissingField { field }
            | DecodeError::WrongType { field, .. }
            | DecodeError::OutOfRange { field, .. } => Some(*field),
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Decodes the `select` argument into a validated [`Repository`].
///
/// Commits are read first, then the repository-level fields.  See the module
/// docs for the strictness policy.
///
/// # Errors
///
/// Returns [`DecodeError`] when the argument is not an object, or when `id`,
/// `name`, or `fullName` is missing or mistyped.
///
/// # Example
///
/// ```rust
/// use repo_bridge_core::decode_repository;
/// use serde_json::json;
///
/// let repo = decode_repository(&json!({
///     "id": 42,
///     "name": "octo",
///     "fullName": "octo/repo",
///     "commits": [{"sha": "abc1234", "authorName": "Ada", "message": "init"}]
/// }))
/// .unwrap();
/// assert_eq!(repo.id(), 42);
/// assert_eq!(repo.commits().unwrap()[0].sha(), "abc1234");
/// ```
pub fn decode_repository(raw: &Value) -> Result<Repository, DecodeError> {
    let obj = raw.as_object().ok_or(DecodeError::NotAnObject {
        found: kind_of(raw),
    })?;

    let commits = decode_commits(obj);

    let id = required_id(obj)?;
    let name = required_str(obj, FIELD_NAME)?;
    let full_name = required_str(obj, FIELD_FULL_NAME)?;

    Ok(Repository::new(
        id,
        name,
        full_name,
        optional_str(obj, FIELD_DESCRIPTION),
        optional_str(obj, FIELD_AVATAR_URL),
        optional_str(obj, FIELD_HTML_URL),
        commits,
    ))
}

// ── Field helpers ─────────────────────────────────────────────────────────────

/// Best-effort extraction of the commit list.
///
/// `None` when the key is absent or not an array; otherwise every well-formed
/// element in input order.
fn decode_commits(obj: &Map<String, Value>) -> Option<Vec<Commit>> {
    let items = obj.get(FIELD_COMMITS)?.as_array()?;

    let commits: Vec<Commit> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let commit = decode_commit(item);
            if commit.is_none() {
                debug!("dropping malformed commit entry at index {index}");
            }
            commit
        })
        .collect();

    Some(commits)
}

fn decode_commit(item: &Value) -> Option<Commit> {
    let entry = item.as_object()?;
    let sha = entry.get(FIELD_SHA)?.as_str().filter(|s| !s.is_empty())?;
    let author_name = entry.get(FIELD_AUTHOR_NAME)?.as_str()?;
    let message = entry.get(FIELD_MESSAGE)?.as_str()?;
    Some(Commit::new(
        sha.to_string(),
        author_name.to_string(),
        message.to_string(),
    ))
}

fn required_id(obj: &Map<String, Value>) -> Result<RepoId, DecodeError> {
    let value = required(obj, FIELD_ID)?;
    let Value::Number(number) = value else {
        return Err(DecodeError::WrongType {
            field: FIELD_ID,
            expected: "a number",
            found: kind_of(value),
        });
    };

    if let Some(i) = number.as_i64() {
        return Ok(i);
    }

    let out_of_range = || DecodeError::OutOfRange {
        field: FIELD_ID,
        value: number.to_string(),
    };

    // u64 above i64::MAX lands here as well; as_f64 is always Some for a
    // non-i64 number without arbitrary precision.
    if number.is_u64() {
        return Err(out_of_range());
    }
    let f = number.as_f64().ok_or_else(out_of_range)?;
    let truncated = f.trunc();
    // i64::MAX as f64 rounds up to 2^63, which itself is out of range.
    if truncated >= -(2f64.powi(63)) && truncated < 2f64.powi(63) {
        Ok(truncated as i64)
    } else {
        Err(out_of_range())
    }
}

fn required_str(obj: &Map<String, Value>, field: &'static str) -> Result<String, DecodeError> {
    let value = required(obj, field)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or(DecodeError::WrongType {
            field,
            expected: "a string",
            found: kind_of(value),
        })
}

fn required<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, DecodeError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(DecodeError::MissingField { field }),
        Some(value) => Ok(value),
    }
}

fn optional_str(obj: &Map<String, Value>, field: &str) -> Option<String> {
    obj.get(field).and_then(Value::as_str).map(str::to_string)
}

/// Human-readable JSON kind used in error messages.
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_payload() -> Value {
        json!({
            "id": 42,
            "name": "octo",
            "fullName": "octo/repo",
            "description": "A test repository",
            "avatarUrl": "https://avatars.example.com/u/1",
            "htmlUrl": "https://example.com/octo/repo",
            "commits": [
                {"sha": "abc1234def", "authorName": "Ada", "message": "init"},
                {"sha": "fff0000aaa", "authorName": "Grace", "message": "second"}
            ]
        })
    }

    // ── Success path ──────────────────────────────────────────────────────────

    #[test]
    fn test_full_payload_decodes_every_field() {
        // Arrange
        let raw = full_payload();

        // Act
        let repo = decode_repository(&raw).unwrap();

        // Assert
        assert_eq!(repo.id(), 42);
        assert_eq!(repo.name(), "octo");
        assert_eq!(repo.full_name(), "octo/repo");
        assert_eq!(repo.description(), Some("A test repository"));
        assert_eq!(repo.avatar_url(), Some("https://avatars.example.com/u/1"));
        assert_eq!(repo.html_url(), Some("https://example.com/octo/repo"));
        let commits = repo.commits().unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].sha(), "abc1234def");
        assert_eq!(commits[0].author_name(), "Ada");
        assert_eq!(commits[0].message(), "init");
        assert_eq!(commits[1].author_name(), "Grace");
    }

    #[test]
    fn test_minimal_payload_leaves_optionals_absent() {
        let repo = decode_repository(&json!({"id": 1, "name": "x", "fullName": "o/x"})).unwrap();
        assert_eq!(repo.description(), None);
        assert_eq!(repo.avatar_url(), None);
        assert_eq!(repo.html_url(), None);
        assert!(repo.commits().is_none());
    }

    #[test]
    fn test_extra_unknown_keys_are_ignored() {
        let repo = decode_repository(&json!({
            "id": 1, "name": "x", "fullName": "o/x", "stars": 99, "private": false
        }))
        .unwrap();
        assert_eq!(repo.id(), 1);
    }

    // ── Identifier coercion ───────────────────────────────────────────────────

    #[test]
    fn test_fractional_id_is_truncated_toward_zero() {
        let repo = decode_repository(&json!({"id": 41.9, "name": "x", "fullName": "o/x"})).unwrap();
        assert_eq!(repo.id(), 41);

        let negative =
            decode_repository(&json!({"id": -3.7, "name": "x", "fullName": "o/x"})).unwrap();
        assert_eq!(negative.id(), -3);
    }

    #[test]
    fn test_float_with_integral_value_is_accepted() {
        let repo = decode_repository(&json!({"id": 42.0, "name": "x", "fullName": "o/x"})).unwrap();
        assert_eq!(repo.id(), 42);
    }

    #[test]
    fn test_id_above_i64_range_is_out_of_range() {
        let result = decode_repository(&json!({"id": u64::MAX, "name": "x", "fullName": "o/x"}));
        assert!(matches!(
            result,
            Err(DecodeError::OutOfRange { field: "id", .. })
        ));
    }

    #[test]
    fn test_huge_float_id_is_out_of_range() {
        let result = decode_repository(&json!({"id": 1e300, "name": "x", "fullName": "o/x"}));
        assert!(matches!(result, Err(DecodeError::OutOfRange { .. })));
    }

    #[test]
    fn test_string_id_is_wrong_type() {
        let result = decode_repository(&json!({"id": "42", "name": "x", "fullName": "o/x"}));
        assert_eq!(
            result.unwrap_err(),
            DecodeError::WrongType {
                field: "id",
                expected: "a number",
                found: "a string",
            }
        );
    }

    #[test]
    fn test_missing_id_is_hard_failure() {
        let result = decode_repository(&json!({"name": "x", "fullName": "o/x"}));
        assert_eq!(result.unwrap_err(), DecodeError::MissingField { field: "id" });
    }

    // ── Required string fields ────────────────────────────────────────────────

    #[test]
    fn test_missing_full_name_is_hard_failure() {
        let result = decode_repository(&json!({"id": 1, "name": "x"}));
        assert_eq!(
            result.unwrap_err(),
            DecodeError::MissingField { field: "fullName" }
        );
    }

    #[test]
    fn test_missing_name_is_hard_failure() {
        let result = decode_repository(&json!({"id": 1, "fullName": "o/x"}));
        assert_eq!(result.unwrap_err().field(), Some("name"));
    }

    #[test]
    fn test_null_name_counts_as_missing() {
        let result = decode_repository(&json!({"id": 1, "name": null, "fullName": "o/x"}));
        assert_eq!(result.unwrap_err(), DecodeError::MissingField { field: "name" });
    }

    #[test]
    fn test_numeric_name_is_wrong_type() {
        let result = decode_repository(&json!({"id": 1, "name": 5, "fullName": "o/x"}));
        assert_eq!(
            result.unwrap_err(),
            DecodeError::WrongType {
                field: "name",
                expected: "a string",
                found: "a number",
            }
        );
    }

    #[test]
    fn test_array_full_name_is_wrong_type() {
        let result = decode_repository(&json!({"id": 1, "name": "x", "fullName": ["o", "x"]}));
        assert_eq!(result.unwrap_err().field(), Some("fullName"));
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        assert_eq!(
            decode_repository(&json!([1, 2, 3])).unwrap_err(),
            DecodeError::NotAnObject { found: "an array" }
        );
        assert_eq!(
            decode_repository(&Value::Null).unwrap_err(),
            DecodeError::NotAnObject { found: "null" }
        );
    }

    #[test]
    fn test_error_message_names_the_field() {
        let err = decode_repository(&json!({"id": 1, "name": "x"})).unwrap_err();
        assert_eq!(err.to_string(), "required field `fullName` is missing");
    }

    // ── Lenient optional fields ───────────────────────────────────────────────

    #[test]
    fn test_mistyped_optional_fields_become_absent() {
        // Arrange: every optional field has the wrong type
        let raw = json!({
            "id": 1, "name": "x", "fullName": "o/x",
            "description": 12,
            "avatarUrl": {"href": "nope"},
            "htmlUrl": false
        });

        // Act
        let repo = decode_repository(&raw).unwrap();

        // Assert: degraded to None rather than failing the decode
        assert_eq!(repo.description(), None);
        assert_eq!(repo.avatar_url(), None);
        assert_eq!(repo.html_url(), None);
    }

    // ── Commit list ───────────────────────────────────────────────────────────

    #[test]
    fn test_empty_commit_list_is_present_and_empty() {
        let repo =
            decode_repository(&json!({"id": 1, "name": "x", "fullName": "o/x", "commits": []}))
                .unwrap();
        assert_eq!(repo.commits().map(<[Commit]>::len), Some(0));
    }

    #[test]
    fn test_non_array_commits_is_treated_as_absent() {
        for bad in [json!("abc"), json!(3), json!({"sha": "a"}), Value::Null] {
            let repo =
                decode_repository(&json!({"id": 1, "name": "x", "fullName": "o/x", "commits": bad}))
                    .unwrap();
            assert!(repo.commits().is_none());
        }
    }

    #[test]
    fn test_malformed_commits_are_dropped_and_order_is_kept() {
        // Arrange: valid, missing sha, non-object, wrong-type message, valid
        let raw = json!({
            "id": 1, "name": "x", "fullName": "o/x",
            "commits": [
                {"sha": "a1", "authorName": "Ada", "message": "one"},
                {"authorName": "Bob", "message": "no sha"},
                "not an object",
                {"sha": "c3", "authorName": "Cy", "message": 7},
                {"sha": "e5", "authorName": "Eve", "message": "five"}
            ]
        });

        // Act
        let repo = decode_repository(&raw).unwrap();

        // Assert
        let shas: Vec<&str> = repo.commits().unwrap().iter().map(Commit::sha).collect();
        assert_eq!(shas, vec!["a1", "e5"]);
    }

    #[test]
    fn test_commit_with_empty_sha_is_dropped() {
        // Arrange: the empty-sha entry sits between two valid siblings
        let raw = json!({
            "id": 1, "name": "x", "fullName": "o/x",
            "commits": [
                {"sha": "a1", "authorName": "Ada", "message": "one"},
                {"sha": "", "authorName": "Ada", "message": "m"},
                {"sha": "c3", "authorName": "Cy", "message": "three"}
            ]
        });

        // Act
        let repo = decode_repository(&raw).unwrap();

        // Assert
        let shas: Vec<&str> = repo.commits().unwrap().iter().map(Commit::sha).collect();
        assert_eq!(shas, vec!["a1", "c3"]);
    }

    #[test]
    fn test_all_commits_malformed_yields_empty_not_absent() {
        let repo = decode_repository(&json!({
            "id": 1, "name": "x", "fullName": "o/x",
            "commits": [null, 1, {"sha": "a"}]
        }))
        .unwrap();
        assert_eq!(repo.commits().map(<[Commit]>::len), Some(0));
    }

    #[test]
    fn test_malformed_commits_do_not_hide_required_field_errors() {
        let result = decode_repository(&json!({
            "id": 1, "name": "x",
            "commits": [{"sha": "a", "authorName": "b", "message": "c"}]
        }));
        assert!(result.is_err());
    }
}
