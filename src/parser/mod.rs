//! Streaming parser for artifact and action markup in LLM responses
//!
//! The host calls [`StreamingMessageParser::parse`] every time more text
//! arrives for a message, always passing the whole text received so far.
//! The parser remembers how far it got for each message and returns only
//! the display text produced by the new input. Artifact and action
//! boundaries are reported through [`ParserCallbacks`] as soon as they can
//! be recognized.
//!
//! ```text
//! Idle ──<jumboArtifact …>──► InArtifact ──<jumboAction …>──► InAction
//!  ▲                            │    ▲                           │
//!  └────────</jumboArtifact>────┘    └──────</jumboAction>───────┘
//! ```

use crate::types::{Action, ActionCallbackData, ArtifactCallbackData, ArtifactData};
use std::collections::HashMap;
use std::sync::Arc;

mod element;
mod tags;

#[cfg(test)]
mod test_utils;

pub use element::{
    create_artifact_element, ArtifactElementFactory, ArtifactElementProps,
    ARTIFACT_ELEMENT_CLASS,
};

use tags::{
    parse_action_tag, parse_artifact_tag, special_partial_tag_len, ACTION_TAG_CLOSE,
    ACTION_TAG_OPEN, ARTIFACT_TAG_CLOSE, ARTIFACT_TAG_OPEN,
};

/// Receives artifact and action boundaries as they are recognized.
///
/// All methods default to doing nothing. They are called synchronously from
/// within [`StreamingMessageParser::parse`].
pub trait ParserCallbacks: Send + Sync {
    fn on_artifact_open(&self, _data: &ArtifactCallbackData) {}

    fn on_artifact_close(&self, _data: &ArtifactCallbackData) {}

    /// `data.action.content` is always empty here
    fn on_action_open(&self, _data: &ActionCallbackData) {}

    fn on_action_close(&self, _data: &ActionCallbackData) {}
}

#[derive(Default)]
pub struct StreamingMessageParserOptions {
    pub callbacks: Option<Arc<dyn ParserCallbacks>>,
    /// Falls back to [`create_artifact_element`]
    pub artifact_element: Option<Box<ArtifactElementFactory>>,
}

/// Where the scanner is in the markup of one message
#[derive(Debug, Clone, Default)]
enum ScanPhase {
    #[default]
    Idle,
    InArtifact {
        artifact: ArtifactData,
    },
    InAction {
        artifact: ArtifactData,
        action: Action,
        action_id: usize,
    },
}

/// Result of a single transition of the scanner
enum Step {
    /// Continue scanning at this byte offset
    Advance(usize),
    /// The text at the cursor can't be decided yet
    NeedMoreInput,
}

/// Parse progress of a single message
#[derive(Debug, Clone, Default)]
pub struct MessageState {
    position: usize,
    phase: ScanPhase,
    next_action_id: usize,
}

impl MessageState {
    /// Byte offset into the cumulative input up to which output was produced
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn inside_artifact(&self) -> bool {
        !matches!(self.phase, ScanPhase::Idle)
    }

    pub fn inside_action(&self) -> bool {
        matches!(self.phase, ScanPhase::InAction { .. })
    }

    pub fn current_artifact(&self) -> Option<&ArtifactData> {
        match &self.phase {
            ScanPhase::Idle => None,
            ScanPhase::InArtifact { artifact } | ScanPhase::InAction { artifact, .. } => {
                Some(artifact)
            }
        }
    }

    pub fn current_action(&self) -> Option<&Action> {
        match &self.phase {
            ScanPhase::InAction { action, .. } => Some(action),
            _ => None,
        }
    }

    /// Id the next opened action will receive
    pub fn next_action_id(&self) -> usize {
        self.next_action_id
    }
}

/// Incremental parser for `<jumboArtifact>` / `<jumboAction>` markup
pub struct StreamingMessageParser {
    messages: HashMap<String, MessageState>,
    callbacks: Option<Arc<dyn ParserCallbacks>>,
    artifact_element: Box<ArtifactElementFactory>,
}

impl Default for StreamingMessageParser {
    fn default() -> Self {
        Self::new(StreamingMessageParserOptions::default())
    }
}

impl StreamingMessageParser {
    pub fn new(options: StreamingMessageParserOptions) -> Self {
        Self {
            messages: HashMap::new(),
            callbacks: options.callbacks,
            artifact_element: options.artifact_element.unwrap_or_else(|| {
                Box::new(create_artifact_element) as Box<ArtifactElementFactory>
            }),
        }
    }

    /// Parse the text received so far for `message_id`.
    ///
    /// `input` must be the complete text of the message up to now, not just
    /// the latest chunk. Returns the display text that became available since
    /// the previous call for the same message.
    pub fn parse(&mut self, message_id: &str, input: &str) -> String {
        let state = self.messages.entry(message_id.to_string()).or_default();

        let mut scanner = Scanner {
            message_id,
            input,
            callbacks: self.callbacks.as_deref(),
            artifact_element: self.artifact_element.as_ref(),
            output: String::new(),
        };

        let mut cursor = state.position;

        while cursor < input.len() {
            if !input.is_char_boundary(cursor) {
                tracing::warn!(
                    "Input for message {message_id} does not extend the previously parsed text"
                );
                break;
            }

            let phase = std::mem::take(&mut state.phase);
            let (phase, step) = scanner.transition(phase, cursor, &mut state.next_action_id);
            state.phase = phase;

            match step {
                Step::Advance(next) => cursor = next,
                Step::NeedMoreInput => break,
            }
        }

        state.position = cursor;
        scanner.output
    }

    /// Forget all messages
    pub fn reset(&mut self) {
        self.messages.clear();
    }

    pub fn state(&self, message_id: &str) -> Option<&MessageState> {
        self.messages.get(message_id)
    }
}

/// Scans one `parse` call worth of input
struct Scanner<'a> {
    message_id: &'a str,
    input: &'a str,
    callbacks: Option<&'a dyn ParserCallbacks>,
    artifact_element: &'a ArtifactElementFactory,
    output: String,
}

impl Scanner<'_> {
    fn transition(
        &mut self,
        phase: ScanPhase,
        cursor: usize,
        next_action_id: &mut usize,
    ) -> (ScanPhase, Step) {
        match phase {
            ScanPhase::Idle => self.scan_text(cursor),
            ScanPhase::InArtifact { artifact } => {
                self.scan_artifact(artifact, cursor, next_action_id)
            }
            ScanPhase::InAction {
                artifact,
                action,
                action_id,
            } => self.scan_action(artifact, action, action_id, cursor),
        }
    }

    /// Outside of any artifact: pass text through and look for artifact tags
    fn scan_text(&mut self, cursor: usize) -> (ScanPhase, Step) {
        let rest = &self.input[cursor..];

        if rest.starts_with('<') && !rest[1..].starts_with('/') {
            return self.scan_artifact_open(cursor);
        }

        if let Some(len) = special_partial_tag_len(rest) {
            return (ScanPhase::Idle, Step::Advance(cursor + len));
        }

        match rest.chars().next() {
            Some(c) => {
                self.output.push(c);
                (ScanPhase::Idle, Step::Advance(cursor + c.len_utf8()))
            }
            None => (ScanPhase::Idle, Step::NeedMoreInput),
        }
    }

    /// At a `<` outside of an artifact
    fn scan_artifact_open(&mut self, cursor: usize) -> (ScanPhase, Step) {
        let rest = &self.input[cursor..];

        if !rest.starts_with(ARTIFACT_TAG_OPEN) {
            if ARTIFACT_TAG_OPEN.starts_with(rest) {
                return (ScanPhase::Idle, Step::NeedMoreInput);
            }
            self.output.push('<');
            return (ScanPhase::Idle, Step::Advance(cursor + 1));
        }

        let name_end = cursor + ARTIFACT_TAG_OPEN.len();
        match self.input.as_bytes().get(name_end) {
            None | Some(b'>') | Some(b' ') => {}
            Some(_) => {
                // A longer tag name such as `<jumboArtifacts`
                self.output.push_str(ARTIFACT_TAG_OPEN);
                return (ScanPhase::Idle, Step::Advance(name_end));
            }
        }

        let Some(tag_end) = self.input[name_end..].find('>').map(|i| name_end + i) else {
            return (ScanPhase::Idle, Step::NeedMoreInput);
        };

        let artifact = parse_artifact_tag(&self.input[cursor..=tag_end]);
        tracing::debug!(
            "Artifact opened in message {}: id={:?} title={:?}",
            self.message_id,
            artifact.id,
            artifact.title
        );

        if let Some(callbacks) = self.callbacks {
            callbacks.on_artifact_open(&self.artifact_data(&artifact));
        }

        let element = (self.artifact_element)(&ArtifactElementProps {
            message_id: self.message_id.to_string(),
        });
        self.output.push_str(&element);

        (
            ScanPhase::InArtifact { artifact },
            Step::Advance(tag_end + 1),
        )
    }

    /// Inside an artifact, between actions
    fn scan_artifact(
        &mut self,
        artifact: ArtifactData,
        cursor: usize,
        next_action_id: &mut usize,
    ) -> (ScanPhase, Step) {
        let rest = &self.input[cursor..];
        let action_open = rest.find(ACTION_TAG_OPEN).map(|i| cursor + i);
        let artifact_close = rest.find(ARTIFACT_TAG_CLOSE).map(|i| cursor + i);

        match (action_open, artifact_close) {
            (Some(open), close) if close.map_or(true, |close| open < close) => {
                let Some(tag_end) = self.input[open..].find('>').map(|i| open + i) else {
                    return (ScanPhase::InArtifact { artifact }, Step::NeedMoreInput);
                };

                let action = parse_action_tag(&self.input[open..=tag_end]);
                let action_id = *next_action_id;
                *next_action_id += 1;

                tracing::trace!(
                    "Action {action_id} ({}) opened in artifact {:?}",
                    action.action_type,
                    artifact.id
                );

                if let Some(callbacks) = self.callbacks {
                    callbacks.on_action_open(&self.action_data(&artifact, &action, action_id));
                }

                (
                    ScanPhase::InAction {
                        artifact,
                        action,
                        action_id,
                    },
                    Step::Advance(tag_end + 1),
                )
            }
            (_, Some(close)) => {
                tracing::debug!(
                    "Artifact closed in message {}: id={:?}",
                    self.message_id,
                    artifact.id
                );

                if let Some(callbacks) = self.callbacks {
                    callbacks.on_artifact_close(&self.artifact_data(&artifact));
                }

                (
                    ScanPhase::Idle,
                    Step::Advance(close + ARTIFACT_TAG_CLOSE.len()),
                )
            }
            _ => (ScanPhase::InArtifact { artifact }, Step::NeedMoreInput),
        }
    }

    /// Inside an action: everything up to the close tag is action content
    fn scan_action(
        &mut self,
        artifact: ArtifactData,
        mut action: Action,
        action_id: usize,
        cursor: usize,
    ) -> (ScanPhase, Step) {
        let Some(close) = self.input[cursor..]
            .find(ACTION_TAG_CLOSE)
            .map(|i| cursor + i)
        else {
            return (
                ScanPhase::InAction {
                    artifact,
                    action,
                    action_id,
                },
                Step::NeedMoreInput,
            );
        };

        action.content.push_str(&self.input[cursor..close]);
        action.finalize_content();

        tracing::trace!(
            "Action {action_id} closed with {} bytes of content",
            action.content.len()
        );

        if let Some(callbacks) = self.callbacks {
            callbacks.on_action_close(&self.action_data(&artifact, &action, action_id));
        }

        (
            ScanPhase::InArtifact { artifact },
            Step::Advance(close + ACTION_TAG_CLOSE.len()),
        )
    }

    fn artifact_data(&self, artifact: &ArtifactData) -> ArtifactCallbackData {
        ArtifactCallbackData {
            message_id: self.message_id.to_string(),
            id: artifact.id.clone(),
            title: artifact.title.clone(),
        }
    }

    fn action_data(
        &self,
        artifact: &ArtifactData,
        action: &Action,
        action_id: usize,
    ) -> ActionCallbackData {
        ActionCallbackData {
            message_id: self.message_id.to_string(),
            artifact_id: artifact.id.clone(),
            action_id: action_id.to_string(),
            action: action.clone(),
        }
    }
}
