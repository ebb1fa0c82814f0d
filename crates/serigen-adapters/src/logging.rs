//! Tracing subscriber initialisation.
//!
//! Only the host process calls [`init_logging`]; `serigen-core` only *emits*
//! spans and events.
//!
//! `RUST_LOG` overrides the configured level if set.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::LoggingSettings;

/// Crates whose events the default filter lets through.
const TARGETS: [&str; 2] = ["serigen_core", "serigen_adapters"];

/// Initialise the global tracing subscriber.
///
/// Returns an error if a subscriber is already set.
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directives(&settings.level)))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(filter);
    let result = if settings.json {
        registry.with(fmt_layer.json()).try_init()
    } else {
        let use_ansi = std::io::stderr().is_terminal();
        registry.with(fmt_layer.with_ansi(use_ansi)).try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

/// Build `serigen_core=<level>,serigen_adapters=<level>`.
fn filter_directives(level: &str) -> String {
    let level = level.trim().to_ascii_lowercase();
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_both_crates() {
        assert_eq!(
            filter_directives("info"),
            "serigen_core=info,serigen_adapters=info"
        );
    }

    #[test]
    fn directives_normalise_level() {
        assert_eq!(
            filter_directives(" DEBUG "),
            "serigen_core=debug,serigen_adapters=debug"
        );
    }

    #[test]
    fn default_directives_parse() {
        let level = LoggingSettings::default().level;
        assert!(EnvFilter::try_new(filter_directives(&level)).is_ok());
    }

    // Only one subscriber per process: the second call must fail softly.
    #[test]
    fn second_init_is_an_error() {
        let settings = LoggingSettings::default();
        let _ = init_logging(&settings);
        assert!(init_logging(&settings).is_err());
    }
}
