//! Core value types for Quill
//!
//! Severity levels, the closed set of message kinds the pipeline emits, and
//! the timestamp modes it can prefix them with.

pub mod level;
pub mod time_mode;

// Re-exports for convenience
pub use level::{GlyphSet, Level, Severity};
pub use time_mode::TimeMode;
