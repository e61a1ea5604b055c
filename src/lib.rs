//! Quill - lock-aware ANSI styling and leveled console output
//!
//! This library composes ANSI escape sequences into styled text and drives a
//! small leveled, timestamped print pipeline on top of them.
//!
//! ## Features
//!
//! - **Styles:** Truecolor, 256-colour and attribute codes as plain values that compose with [`Style::and`]
//! - **Locked regions:** Text wrapped with [`lock`] passes through every later styling pass untouched
//! - **Escape passthrough:** Existing escape sequences survive rendering byte for byte
//! - **Pipeline:** Level filtering, type labels or glyphs, thread names and timestamps
//! - **Atomic lines:** Concurrent emitters never interleave bytes within a line
//! - **Configuration:** TOML or JSON files mapped onto [`PipelineConfig`]
//!
//! ## Module Organization
//!
//! - [`style`] - Style values, palette and colour builders
//! - [`ansi`] - Lock markers, segment classification and rendering
//! - [`pipeline`] - The leveled pipeline, sinks, clocks and interruptible sleep
//! - [`models`] - Levels, severities and time modes
//! - [`config`] - Pipeline configuration, loading and time formats
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```
//! use quill::{lock, render, Style};
//!
//! let label = lock(&Style::BOLD.apply("fixed"));
//! let line = render(&format!("{label} and styled"), &[Style::RED]);
//! assert!(line.contains(&label));
//! ```
//!
//! ```no_run
//! use quill::{Level, Pipeline, TimeMode};
//!
//! # fn main() -> quill::Result<()> {
//! let pipeline = Pipeline::stdout();
//! pipeline.set_level(Level::Low);
//! pipeline.set_show_type(true);
//! pipeline.set_time_mode(TimeMode::Absolute);
//!
//! pipeline.info("Application started")?;
//! pipeline.warn("Potential issue detected")?;
//! pipeline.success("Task completed")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Diagnostics
//!
//! Quill reports its own problems (unreadable config files, rejected settings)
//! through `tracing`. [`init_diagnostics`] installs a stderr subscriber for
//! binaries that have none.

#[macro_use]
extern crate tracing;

pub mod ansi;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod style;

// Re-exports for core functionality
pub use ansi::{is_locked, lock, render, tokenize, unlock, Segment, LOCK_END, LOCK_START};
pub use config::loader::ConfigLoader;
pub use config::{PipelineConfig, TimeFormat};
pub use error::{Error, Result};
pub use models::{GlyphSet, Level, Severity, TimeMode};
pub use pipeline::{Interrupt, LockedStream, MemorySink, Pipeline, Sink};
pub use style::{close, open, Style};

use once_cell::sync::Lazy;
use std::env;

// Version information
/// The current version of Quill from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The crate name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

static GLOBAL: Lazy<Pipeline> = Lazy::new(|| {
    let config = ConfigLoader::load();
    let pipeline = Pipeline::stdout();
    if let Err(e) = pipeline.apply_config(&config) {
        warn!("Ignoring configuration for the global pipeline: {}", e);
    }
    pipeline
});

/// Process-wide pipeline writing to stdout, configured from the default
/// configuration locations on first use
pub fn global() -> &'static Pipeline {
    &GLOBAL
}

/// Install a compact `tracing` subscriber on stderr for Quill's own
/// diagnostics. `RUST_LOG` wins over the `debug` flag.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_diagnostics(debug: bool) -> Result<()> {
    let log_level = if debug { "debug" } else { "info" };
    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init()
        .map_err(|e| Error::Other(format!("Failed to install diagnostics subscriber: {}", e)))?;

    debug!("{} v{} diagnostics enabled", NAME, VERSION);
    Ok(())
}
