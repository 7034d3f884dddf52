//! Callback sink that records parser callbacks as events

use crate::parser::ParserCallbacks;
use crate::types::{ActionCallbackData, ArtifactCallbackData};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// One parser callback invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ParserEvent {
    ArtifactOpen(ArtifactCallbackData),
    ArtifactClose(ArtifactCallbackData),
    ActionOpen(ActionCallbackData),
    ActionClose(ActionCallbackData),
}

impl ParserEvent {
    pub fn message_id(&self) -> &str {
        match self {
            ParserEvent::ArtifactOpen(data) | ParserEvent::ArtifactClose(data) => &data.message_id,
            ParserEvent::ActionOpen(data) | ParserEvent::ActionClose(data) => &data.message_id,
        }
    }
}

/// Collects events in the order the parser reports them.
///
/// Clones share the same event list, so one clone can be handed to the
/// parser while another one is used to read the events.
#[derive(Clone, Default)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<ParserEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ParserEvent> {
        self.lock().clone()
    }

    /// Remove and return all events collected so far
    pub fn drain(&self) -> Vec<ParserEvent> {
        std::mem::take(&mut *self.lock())
    }

    fn push(&self, event: ParserEvent) {
        self.lock().push(event);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ParserEvent>> {
        // A panic while holding the lock can't leave the list half-written
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ParserCallbacks for EventCollector {
    fn on_artifact_open(&self, data: &ArtifactCallbackData) {
        self.push(ParserEvent::ArtifactOpen(data.clone()));
    }

    fn on_artifact_close(&self, data: &ArtifactCallbackData) {
        self.push(ParserEvent::ArtifactClose(data.clone()));
    }

    fn on_action_open(&self, data: &ActionCallbackData) {
        self.push(ParserEvent::ActionOpen(data.clone()));
    }

    fn on_action_close(&self, data: &ActionCallbackData) {
        self.push(ParserEvent::ActionClose(data.clone()));
    }
}
