//! Tracing setup for the CLI
//!
//! The subscriber is only installed when `NOSCOPE_LOG` (or `RUST_LOG`) is
//! set. Output always goes to stderr so generated listings and JSON
//! diagnostics on stdout stay clean.
//!
//! ```bash
//! NOSCOPE_LOG=debug noscope generate noscope.toml
//! NOSCOPE_LOG="noscope_checker=trace" NOSCOPE_LOG_FORMAT=json noscope check noscope.toml
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        match std::env::var("NOSCOPE_LOG_FORMAT")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// `NOSCOPE_LOG` wins over `RUST_LOG` when both are set
fn build_filter() -> EnvFilter {
    match std::env::var("NOSCOPE_LOG") {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install the global subscriber if logging was requested
pub fn init() {
    if std::env::var_os("NOSCOPE_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
