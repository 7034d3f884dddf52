use crate::types::{Action, ActionType, ArtifactData};

pub(crate) const ARTIFACT_TAG_OPEN: &str = "<jumboArtifact";
pub(crate) const ARTIFACT_TAG_CLOSE: &str = "</jumboArtifact>";
pub(crate) const ACTION_TAG_OPEN: &str = "<jumboAction";
pub(crate) const ACTION_TAG_CLOSE: &str = "</jumboAction>";

/// Fragments of tag names that are dropped from the output instead of
/// flashing up while a tag streams in
const SPECIAL_PARTIAL_TAGS: [&str; 4] = ["<b", "<bol", "<jumbo", "<jumboA"];

/// Extract the value of `name="..."` from a tag.
///
/// The attribute has to be preceded by a single space and its value has to
/// be double quoted. Escaped quotes are not supported.
pub(crate) fn extract_attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!(" {name}=\"");
    let value_start = tag.find(&needle)? + needle.len();
    let value_len = tag[value_start..].find('"')?;
    Some(&tag[value_start..value_start + value_len])
}

/// Read `id` and `title` from a complete artifact opening tag
pub(crate) fn parse_artifact_tag(tag: &str) -> ArtifactData {
    let title = extract_attribute(tag, "title").unwrap_or_default();
    let id = extract_attribute(tag, "id").unwrap_or_default();

    if title.is_empty() {
        tracing::warn!("Artifact title missing");
    }
    if id.is_empty() {
        tracing::warn!("Artifact id missing");
    }

    ArtifactData {
        id: id.to_string(),
        title: title.to_string(),
    }
}

/// Build an empty action from a complete action opening tag
pub(crate) fn parse_action_tag(tag: &str) -> Action {
    let action_type = ActionType::from(extract_attribute(tag, "type").unwrap_or_default());
    let mut action = Action::new(action_type);

    match &action.action_type {
        ActionType::File => {
            action.file_path = extract_attribute(tag, "filePath")
                .filter(|path| !path.is_empty())
                .map(str::to_string);
        }
        ActionType::Shell => {}
        ActionType::Other(name) => {
            tracing::warn!("Unknown action type: {name:?}");
        }
    }

    action
}

/// Length of a special partial tag starting `text`, if it is not followed
/// by an ASCII alphanumeric character
pub(crate) fn special_partial_tag_len(text: &str) -> Option<usize> {
    SPECIAL_PARTIAL_TAGS
        .iter()
        .find(|tag| {
            text.starts_with(**tag)
                && !text
                    .as_bytes()
                    .get(tag.len())
                    .is_some_and(|next| next.is_ascii_alphanumeric())
        })
        .map(|tag| tag.len())
}
