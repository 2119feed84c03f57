use serde_json::Value;
use thiserror::Error;

use crate::{
    comments::requests::CommentPayload,
    models::comments::{CommentFields, Vote},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{0} must be a string")]
    NotText(&'static str),
    #[error("Invalid value for option: must be 'upvote' or 'downvote'")]
    InvalidOption,
}

fn present<'a>(
    payload: &'a CommentPayload,
    field: &'static str,
) -> Result<&'a Value, ValidationError> {
    payload
        .get(field)
        .filter(|value| !value.is_null() && value.as_str() != Some(""))
        .ok_or(ValidationError::Required(field))
}

fn vote(payload: &CommentPayload, field: &'static str) -> Result<Vote, ValidationError> {
    present(payload, field)?
        .as_str()
        .and_then(|option| option.parse().ok())
        .ok_or(ValidationError::InvalidOption)
}

fn text(payload: &CommentPayload, field: &'static str) -> Result<String, ValidationError> {
    present(payload, field)?
        .as_str()
        .map(str::to_owned)
        .ok_or(ValidationError::NotText(field))
}

/// Checks `option`, `nickname` and `comment` in that order and returns the
/// first failure. Any `time` sent by the client is ignored.
pub fn validate(payload: &CommentPayload) -> Result<CommentFields, ValidationError> {
    // Fields are evaluated in the order written, the first failure wins.
    Ok(CommentFields {
        option: vote(payload, "option")?,
        nickname: text(payload, "nickname")?,
        comment: text(payload, "comment")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> CommentPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn accepts_complete_payload() {
        let fields = validate(&payload(json!({
            "option": "upvote",
            "nickname": "a",
            "comment": "hi",
            "time": 1_700_000_000_000_i64,
        })))
        .unwrap();
        assert_eq!(fields.option, Vote::Upvote);
        assert_eq!(fields.nickname, "a");
        assert_eq!(fields.comment, "hi");
    }

    #[test]
    fn empty_payload_reports_option_first() {
        let err = validate(&payload(json!({}))).unwrap_err();
        assert_eq!(err, ValidationError::Required("option"));
        assert_eq!(err.to_string(), "option is required");
    }

    #[test]
    fn missing_nickname_is_reported_before_comment() {
        let err = validate(&payload(json!({ "option": "downvote" }))).unwrap_err();
        assert_eq!(err, ValidationError::Required("nickname"));
        assert_eq!(err.to_string(), "nickname is required");
    }

    #[test]
    fn empty_comment_is_required() {
        let err = validate(&payload(json!({
            "option": "upvote",
            "nickname": "a",
            "comment": "",
        })))
        .unwrap_err();
        assert_eq!(err, ValidationError::Required("comment"));
    }

    #[test]
    fn null_counts_as_missing() {
        let err = validate(&payload(json!({
            "option": "upvote",
            "nickname": null,
            "comment": "hi",
        })))
        .unwrap_err();
        assert_eq!(err, ValidationError::Required("nickname"));
    }

    #[test]
    fn unknown_option_is_invalid_even_when_other_fields_are_missing() {
        for option in [json!("sideways"), json!("UPVOTE"), json!(1), json!(true)] {
            let err = validate(&payload(json!({ "option": option }))).unwrap_err();
            assert_eq!(err, ValidationError::InvalidOption);
        }
    }

    #[test]
    fn non_string_text_fields_are_rejected() {
        let err = validate(&payload(json!({
            "option": "upvote",
            "nickname": 42,
            "comment": "hi",
        })))
        .unwrap_err();
        assert_eq!(err, ValidationError::NotText("nickname"));
        assert_eq!(err.to_string(), "nickname must be a string");
    }
}
