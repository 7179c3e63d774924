use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque story identifier as referenced from a commit.
///
/// No uniqueness is enforced; duplicates are processed independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    pub fn new(id: impl Into<String>) -> Self {
        StoryId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoryId {
    fn from(id: &str) -> Self {
        StoryId::new(id)
    }
}

impl From<String> for StoryId {
    fn from(id: String) -> Self {
        StoryId(id)
    }
}

/// Story metadata as returned by the tracker.
///
/// Only `labels` and `story_type` are interpreted; every other key is kept
/// verbatim so the detail can be serialized back out unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryDetail(Map<String, Value>);

impl StoryDetail {
    pub fn new(fields: Map<String, Value>) -> Self {
        StoryDetail(fields)
    }

    /// Label names in the order the tracker returned them.
    ///
    /// A missing `labels` key, or entries without a string `name`, yield
    /// nothing rather than an error.
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.0
            .get("labels")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|label| label.get("name").and_then(Value::as_str))
    }

    pub fn story_type(&self) -> Option<&str> {
        self.0.get("story_type").and_then(Value::as_str)
    }

    /// The tracker's `id` field, if present.
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl TryFrom<Value> for StoryDetail {
    type Error = Value;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(StoryDetail(fields)),
            other => Err(other),
        }
    }
}
