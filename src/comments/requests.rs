use serde::Deserialize;
use serde_json::{Map, Value};

/// Body of `POST /api/comments` and `PUT /api/comments/{id}`.
///
/// Kept as a loose JSON object so that missing and mistyped fields reach the
/// validator instead of failing in the extractor.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct CommentPayload(Map<String, Value>);

impl CommentPayload {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}
