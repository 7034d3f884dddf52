use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an artifact as read from its opening tag.
///
/// Attributes missing from the tag are represented as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactData {
    pub id: String,
    pub title: String,
}

/// Kind of an action, taken from the `type` attribute of an action tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionType {
    /// Write `content` to `file_path`
    File,
    /// Run `content` as a shell command
    Shell,
    /// Any other value, kept verbatim (empty when the attribute is missing)
    Other(String),
}

impl ActionType {
    pub fn as_str(&self) -> &str {
        match self {
            ActionType::File => "file",
            ActionType::Shell => "shell",
            ActionType::Other(name) => name,
        }
    }
}

impl From<&str> for ActionType {
    fn from(value: &str) -> Self {
        match value {
            "file" => ActionType::File,
            "shell" => ActionType::Shell,
            other => ActionType::Other(other.to_string()),
        }
    }
}

impl From<String> for ActionType {
    fn from(value: String) -> Self {
        ActionType::from(value.as_str())
    }
}

impl From<ActionType> for String {
    fn from(value: ActionType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single operation inside an artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

impl Action {
    pub fn new(action_type: ActionType) -> Self {
        Self {
            action_type,
            content: String::new(),
            file_path: None,
        }
    }

    /// Trim the accumulated content. File contents end with exactly one newline.
    pub(crate) fn finalize_content(&mut self) {
        let mut content = self.content.trim().to_string();
        if self.action_type == ActionType::File {
            content.push('\n');
        }
        self.content = content;
    }
}

/// Payload for artifact open/close callbacks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactCallbackData {
    pub message_id: String,
    pub id: String,
    pub title: String,
}

/// Payload for action open/close callbacks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionCallbackData {
    pub message_id: String,
    pub artifact_id: String,
    pub action_id: String,
    pub action: Action,
}
