//! Shared helpers for the parser tests
use super::{ArtifactElementProps, StreamingMessageParser, StreamingMessageParserOptions};
use crate::events::{EventCollector, ParserEvent};
use std::sync::Arc;

pub const MESSAGE_ID: &str = "msg-1";

/// Placeholder used by [`parser_with_collector`] instead of the default element
pub fn test_element(message_id: &str) -> String {
    format!("[artifact:{message_id}]")
}

pub fn parser_with_collector() -> (StreamingMessageParser, EventCollector) {
    let collector = EventCollector::new();
    let parser = StreamingMessageParser::new(StreamingMessageParserOptions {
        callbacks: Some(Arc::new(collector.clone())),
        artifact_element: Some(Box::new(|props: &ArtifactElementProps| {
            test_element(&props.message_id)
        })),
    });
    (parser, collector)
}

/// Helper function to split text into small chunks for testing tag handling
pub fn chunk_str(s: &str, chunk_size: usize) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut chunks = Vec::new();

    for chunk in chars.chunks(chunk_size) {
        chunks.push(chunk.iter().collect::<String>());
    }

    chunks
}

/// Feed `text` to a fresh parser in chunks, passing the cumulative text on
/// every call like a streaming host does. Returns the concatenated output,
/// the per-call outputs and all events.
pub fn parse_chunked(text: &str, chunk_size: usize) -> (String, Vec<String>, Vec<ParserEvent>) {
    let (mut parser, collector) = parser_with_collector();
    let mut received = String::new();
    let mut deltas = Vec::new();

    for chunk in chunk_str(text, chunk_size) {
        received.push_str(&chunk);
        deltas.push(parser.parse(MESSAGE_ID, &received));
    }

    (deltas.concat(), deltas, collector.events())
}

/// Parse `text` in a single call
pub fn parse_whole(text: &str) -> (String, Vec<ParserEvent>) {
    let (mut parser, collector) = parser_with_collector();
    let output = parser.parse(MESSAGE_ID, text);
    (output, collector.events())
}

/// Helper function to print events for debugging
#[allow(dead_code)]
pub fn print_events(events: &[ParserEvent]) {
    println!("Collected {} events:", events.len());
    for (i, event) in events.iter().enumerate() {
        match event {
            ParserEvent::ArtifactOpen(data) => {
                println!("  [{i}] ArtifactOpen: {} ({})", data.id, data.title)
            }
            ParserEvent::ArtifactClose(data) => println!("  [{i}] ArtifactClose: {}", data.id),
            ParserEvent::ActionOpen(data) => println!(
                "  [{i}] ActionOpen: {} {} in {}",
                data.action_id, data.action.action_type, data.artifact_id
            ),
            ParserEvent::ActionClose(data) => println!(
                "  [{i}] ActionClose: {} {:?}",
                data.action_id, data.action.content
            ),
        }
    }
}

/// Short description of an event for compact assertions, e.g. `"action-close 0"`
pub fn event_kind(event: &ParserEvent) -> String {
    match event {
        ParserEvent::ArtifactOpen(data) => format!("artifact-open {}", data.id),
        ParserEvent::ArtifactClose(data) => format!("artifact-close {}", data.id),
        ParserEvent::ActionOpen(data) => format!("action-open {}", data.action_id),
        ParserEvent::ActionClose(data) => format!("action-close {}", data.action_id),
    }
}

pub fn event_kinds(events: &[ParserEvent]) -> Vec<String> {
    events.iter().map(event_kind).collect()
}
