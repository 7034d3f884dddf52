mod cli;
mod logging;

use anyhow::{Context, Result};
use cli::Args;
use message_parser::config::{OutputFormat, Settings};
use message_parser::recording::{load_recording, replay_session, RecordingSession};
use message_parser::{
    EventCollector, ParserEvent, StreamingMessageParser, StreamingMessageParserOptions,
};
use std::io::{self, Read, Write};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::setup_logging(args.verbose);

    let settings = Settings::load(args.settings.as_deref());
    let options = args.resolve(settings);

    let sessions = match &args.playback {
        Some(path) => load_recording(path)
            .with_context(|| format!("Failed to load recording {}", path.display()))?,
        None => {
            let text = read_input(&args)?;
            vec![RecordingSession::from_text(
                options.message_id.clone(),
                &text,
                options.chunk_size,
            )]
        }
    };

    let collector = EventCollector::new();
    let mut parser = StreamingMessageParser::new(StreamingMessageParserOptions {
        callbacks: Some(Arc::new(collector.clone())),
        artifact_element: None,
    });

    // Plain text input has no timing to honor
    let fast = args.fast_playback || args.playback.is_none();
    let mut stdout = io::stdout().lock();
    let mut summary = Summary::default();

    for session in &sessions {
        replay_session(&mut parser, session, fast, |step| {
            let events = collector.drain();
            summary.record(&events);
            write_step(&mut stdout, options.format, &step.output, &events)
        })
        .await
        .context("Failed to write output")?;
    }

    if options.format == OutputFormat::Text {
        writeln!(stdout)?;
    }

    tracing::info!(
        "Replayed {} message(s): {} artifact(s), {} action(s)",
        sessions.len(),
        summary.artifacts,
        summary.actions
    );

    Ok(())
}

fn read_input(args: &Args) -> Result<String> {
    match &args.input {
        Some(path) if !args.reads_stdin() => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

#[derive(Debug, Default, PartialEq)]
struct Summary {
    artifacts: usize,
    actions: usize,
}

impl Summary {
    fn record(&mut self, events: &[ParserEvent]) {
        for event in events {
            match event {
                ParserEvent::ArtifactOpen(_) => self.artifacts += 1,
                ParserEvent::ActionClose(_) => self.actions += 1,
                _ => {}
            }
        }
    }
}

/// Print the output of one parse call and the events it produced
fn write_step<W: Write>(
    out: &mut W,
    format: OutputFormat,
    output: &str,
    events: &[ParserEvent],
) -> io::Result<()> {
    match format {
        OutputFormat::Text => out.write_all(output.as_bytes())?,
        OutputFormat::Json => {
            if !output.is_empty() {
                let line = serde_json::json!({ "type": "output", "text": output });
                writeln!(out, "{line}")?;
            }
            for event in events {
                writeln!(out, "{}", serde_json::to_string(event)?)?;
            }
        }
    }
    out.flush()
}
