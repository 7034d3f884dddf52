//! Incremental parser for artifact and action markup in streamed LLM output
//!
//! ```
//! use message_parser::parser::StreamingMessageParser;
//!
//! let mut parser = StreamingMessageParser::default();
//! assert_eq!(parser.parse("msg-1", "Hello <jumboArti"), "Hello ");
//! let output = parser.parse("msg-1", "Hello <jumboArtifact id=\"a1\" title=\"Demo\">");
//! assert!(output.contains("data-message-id=\"msg-1\""));
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod parser;
pub mod recording;
pub mod types;

pub use events::{EventCollector, ParserEvent};
pub use parser::{ParserCallbacks, StreamingMessageParser, StreamingMessageParserOptions};
pub use types::{Action, ActionCallbackData, ActionType, ArtifactCallbackData, ArtifactData};
