use std::io;

/// Install the global tracing subscriber.
///
/// Logs always go to stderr so stdout only carries parser output.
/// `RUST_LOG` overrides the verbosity level.
pub fn setup_logging(verbose_level: u8) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        tracing_subscriber::EnvFilter::new(filter_for_verbosity(verbose_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .with_writer(io::stderr)
        .init();
}

fn filter_for_verbosity(verbose_level: u8) -> &'static str {
    match verbose_level {
        0 => "warn,message_parser=info",
        1 => "info,message_parser=debug",
        _ => "debug,message_parser=trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_for_verbosity() {
        assert_eq!(filter_for_verbosity(0), "warn,message_parser=info");
        assert_eq!(filter_for_verbosity(1), "info,message_parser=debug");
        assert_eq!(filter_for_verbosity(5), "debug,message_parser=trace");
    }
}
