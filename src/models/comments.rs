use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::comments;

pub const VOTE_UPVOTE: &str = "upvote";
pub const VOTE_DOWNVOTE: &str = "downvote";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Upvote,
    Downvote,
}

impl Vote {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upvote => VOTE_UPVOTE,
            Self::Downvote => VOTE_DOWNVOTE,
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown vote option: {0}")]
pub struct UnknownVote(pub String);

impl FromStr for Vote {
    type Err = UnknownVote;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            VOTE_UPVOTE => Ok(Self::Upvote),
            VOTE_DOWNVOTE => Ok(Self::Downvote),
            _ => Err(UnknownVote(s.to_string())),
        }
    }
}

/// A stored comment as returned by every storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub option: Vote,
    pub nickname: String,
    pub comment: String,
    pub created: DateTime<Utc>,
}

/// The client-editable part of a comment, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentFields {
    pub option: Vote,
    pub nickname: String,
    pub comment: String,
}

impl Comment {
    pub fn new(id: String, fields: CommentFields, created: DateTime<Utc>) -> Self {
        let CommentFields {
            option,
            nickname,
            comment,
        } = fields;
        Self {
            id,
            option,
            nickname,
            comment,
            created,
        }
    }

    /// Replaces everything except `id` and `created`.
    pub fn apply(&mut self, fields: CommentFields) {
        self.option = fields.option;
        self.nickname = fields.nickname;
        self.comment = fields.comment;
    }
}

#[derive(Queryable)]
pub struct CommentRow {
    pub id: String,
    pub option: String,
    pub nickname: String,
    pub comment: String,
    pub created: i64,
}

#[derive(Insertable)]
#[diesel(table_name = comments)]
pub struct NewCommentRow<'a> {
    pub id: &'a str,
    pub option: &'a str,
    pub nickname: &'a str,
    pub comment: &'a str,
    pub created: i64,
}

#[derive(AsChangeset)]
#[diesel(table_name = comments)]
pub struct UpdateCommentRow<'a> {
    pub option: &'a str,
    pub nickname: &'a str,
    pub comment: &'a str,
}

impl<'a> From<&'a Comment> for NewCommentRow<'a> {
    fn from(comment: &'a Comment) -> Self {
        Self {
            id: &comment.id,
            option: comment.option.as_str(),
            nickname: &comment.nickname,
            comment: &comment.comment,
            created: crate::utils::to_millis(&comment.created),
        }
    }
}

impl<'a> From<&'a CommentFields> for UpdateCommentRow<'a> {
    fn from(fields: &'a CommentFields) -> Self {
        Self {
            option: fields.option.as_str(),
            nickname: &fields.nickname,
            comment: &fields.comment,
        }
    }
}

impl TryFrom<CommentRow> for Comment {
    type Error = anyhow::Error;

    fn try_from(row: CommentRow) -> anyhow::Result<Self> {
        let CommentRow {
            id,
            option,
            nickname,
            comment,
            created,
        } = row;
        Ok(Self {
            option: option.parse()?,
            created: crate::utils::from_millis(created)?,
            id,
            nickname,
            comment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_parses_only_lowercase_names() {
        assert_eq!("upvote".parse::<Vote>(), Ok(Vote::Upvote));
        assert_eq!("downvote".parse::<Vote>(), Ok(Vote::Downvote));
        assert!("Upvote".parse::<Vote>().is_err());
        assert!("".parse::<Vote>().is_err());
    }

    #[test]
    fn comment_serializes_option_in_lowercase() {
        let created = crate::utils::from_millis(1_700_000_000_000).unwrap();
        let comment = Comment::new(
            "abc".to_string(),
            CommentFields {
                option: Vote::Downvote,
                nickname: "a".to_string(),
                comment: "hi".to_string(),
            },
            created,
        );
        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(json["option"], "downvote");
        assert_eq!(json["id"], "abc");
        assert_eq!(json["created"], "2023-11-14T22:13:20Z");
    }

    #[test]
    fn row_with_unknown_option_is_rejected() {
        let row = CommentRow {
            id: "x".to_string(),
            option: "sideways".to_string(),
            nickname: "a".to_string(),
            comment: "b".to_string(),
            created: 0,
        };
        assert!(Comment::try_from(row).is_err());
    }
}
