//! Recorded LLM response streams and their replay through the parser
//!
//! A recording file holds a JSON array of sessions. Each session is one
//! assistant message, stored as the text deltas in the order and at the time
//! they were received.

use crate::error::LoadError;
use crate::parser::StreamingMessageParser;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// One recorded assistant message
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecordingSession {
    pub message_id: String,
    /// Timestamp of when the recording was started
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub chunks: Vec<RecordedChunk>,
}

/// Single recorded chunk with timing info
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecordedChunk {
    /// Text delta
    pub data: String,
    /// Milliseconds since recording start
    pub timestamp_ms: u64,
}

impl RecordingSession {
    /// Split `text` into chunks of `chunk_size` characters, all at time zero
    pub fn from_text(message_id: impl Into<String>, text: &str, chunk_size: usize) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let chunks = chars
            .chunks(chunk_size.max(1))
            .map(|chunk| RecordedChunk {
                data: chunk.iter().collect(),
                timestamp_ms: 0,
            })
            .collect();

        Self {
            message_id: message_id.into(),
            timestamp: chrono::Utc::now(),
            chunks,
        }
    }

    /// The complete text of the message
    pub fn text(&self) -> String {
        self.chunks.iter().map(|chunk| chunk.data.as_str()).collect()
    }
}

/// Load all sessions from a recording file
pub fn load_recording<P: AsRef<Path>>(path: P) -> Result<Vec<RecordingSession>, LoadError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Output of one `parse` call during replay
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayStep {
    pub chunk_index: usize,
    pub output: String,
}

/// Feed a session to the parser like a streaming host would: accumulate the
/// deltas and pass the full text received so far on every call.
///
/// Unless `fast` is set, waits between chunks according to their timestamps.
/// `on_step` receives the output of every call; replay stops at its first error.
pub async fn replay_session<F>(
    parser: &mut StreamingMessageParser,
    session: &RecordingSession,
    fast: bool,
    mut on_step: F,
) -> std::io::Result<()>
where
    F: FnMut(ReplayStep) -> std::io::Result<()>,
{
    let mut received = String::new();
    let mut last_timestamp_ms = 0;

    tracing::debug!(
        "Replaying message {} ({} chunks)",
        session.message_id,
        session.chunks.len()
    );

    for (chunk_index, chunk) in session.chunks.iter().enumerate() {
        if !fast {
            let delay = chunk.timestamp_ms.saturating_sub(last_timestamp_ms);
            if delay > 0 {
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
        }
        last_timestamp_ms = chunk.timestamp_ms;

        received.push_str(&chunk.data);
        let output = parser.parse(&session.message_id, &received);
        on_step(ReplayStep {
            chunk_index,
            output,
        })?;
    }

    Ok(())
}
