use serde::Serialize;

/// CSS class of the default artifact placeholder element
pub const ARTIFACT_ELEMENT_CLASS: &str = "__jumboArtifact__";

/// Properties handed to the artifact element factory
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactElementProps {
    pub message_id: String,
}

/// Produces the placeholder markup that replaces an artifact opening tag
pub type ArtifactElementFactory = dyn Fn(&ArtifactElementProps) -> String + Send + Sync;

/// Default placeholder: an empty `div` with the artifact class and one
/// `data-*` attribute per property, e.g.
/// `<div class="__jumboArtifact__" data-message-id="msg-1"></div>`
pub fn create_artifact_element(props: &ArtifactElementProps) -> String {
    let mut attributes = vec![format!("class=\"{ARTIFACT_ELEMENT_CLASS}\"")];

    if let Ok(serde_json::Value::Object(map)) = serde_json::to_value(props) {
        for (key, value) in map {
            attributes.push(format!("data-{}={}", camel_to_dash_case(&key), value));
        }
    }

    format!("<div {}></div>", attributes.join(" "))
}

/// `messageId` -> `message-id`
fn camel_to_dash_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len() + 4);
    let mut previous_lower = false;

    for c in input.chars() {
        if previous_lower && c.is_ascii_uppercase() {
            result.push('-');
        }
        previous_lower = c.is_ascii_lowercase();
        result.push(c.to_ascii_lowercase());
    }

    result
}
