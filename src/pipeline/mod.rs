//! Leveled print pipeline
//!
//! A [`Pipeline`] filters messages by level, prefixes them with an optional
//! thread name, a type label or glyph and a timestamp, renders the line with the
//! severity's style and writes it to its sink in one piece.
//!
//! ```
//! use quill::{MemorySink, Pipeline, TimeMode};
//!
//! let sink = MemorySink::new();
//! let pipeline = Pipeline::new(sink.clone());
//! pipeline.set_time_mode(TimeMode::None);
//! pipeline.set_show_type(true);
//! pipeline.info("boot").unwrap();
//! assert!(sink.contents().contains("[INFO]    boot"));
//! ```
//!
//! Settings are independent atomics: a reader always sees a whole value, but a
//! burst of setter calls is not applied as one transaction.

pub mod clock;
pub mod sink;
pub mod sleep;

mod prefix;

use crate::ansi;
use crate::config::{PipelineConfig, TimeFormat};
use crate::error::{Error, Result};
use crate::models::{GlyphSet, Level, Severity, TimeMode};
use crate::style::Style;
use std::fmt;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

pub use clock::{Clock, StdThreadNames, SystemClock, ThreadNames};
pub use sink::{LockedStream, MemorySink, Sink};
pub use sleep::Interrupt;

use prefix::{build_prefix, format_timestamp, PrefixParts};

/// Leveled, timestamped console output
pub struct Pipeline {
    sink: Mutex<Box<dyn Sink>>,
    clock: Box<dyn Clock>,
    threads: Box<dyn ThreadNames>,

    level: AtomicU8,
    show_type: AtomicBool,
    show_thread: AtomicBool,
    time_mode: AtomicU8,
    glyphs: AtomicU8,
    time_format: RwLock<TimeFormat>,
}

impl Pipeline {
    /// Pipeline writing to `sink` with default settings; the elapsed-time
    /// baseline starts now
    pub fn new(sink: impl Sink + 'static) -> Self {
        let defaults = PipelineConfig::default();
        Self {
            sink: Mutex::new(Box::new(sink)),
            clock: Box::new(SystemClock::new()),
            threads: Box::new(StdThreadNames),
            level: AtomicU8::new(defaults.level.priority()),
            show_type: AtomicBool::new(defaults.show_type),
            show_thread: AtomicBool::new(defaults.show_thread),
            time_mode: AtomicU8::new(defaults.time_mode.to_u8()),
            glyphs: AtomicU8::new(defaults.glyphs.to_u8()),
            time_format: RwLock::new(TimeFormat::default()),
        }
    }

    /// Pipeline writing to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Replace the clock (and with it the elapsed-time baseline)
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the thread-name source
    pub fn with_thread_names(mut self, threads: impl ThreadNames + 'static) -> Self {
        self.threads = Box::new(threads);
        self
    }

    /// Apply `config` while building
    pub fn with_config(self, config: &PipelineConfig) -> Result<Self> {
        self.apply_config(config)?;
        Ok(self)
    }

    // ------------------ Configuration ------------------

    pub fn set_level(&self, level: Level) {
        self.level.store(level.priority(), Ordering::Relaxed);
    }

    pub fn level(&self) -> Level {
        Level::from_priority(self.level.load(Ordering::Relaxed))
    }

    pub fn set_show_type(&self, value: bool) {
        self.show_type.store(value, Ordering::Relaxed);
    }

    pub fn show_type(&self) -> bool {
        self.show_type.load(Ordering::Relaxed)
    }

    pub fn set_show_thread(&self, value: bool) {
        self.show_thread.store(value, Ordering::Relaxed);
    }

    pub fn show_thread(&self) -> bool {
        self.show_thread.load(Ordering::Relaxed)
    }

    pub fn set_time_mode(&self, mode: TimeMode) {
        self.time_mode.store(mode.to_u8(), Ordering::Relaxed);
    }

    pub fn time_mode(&self) -> TimeMode {
        TimeMode::from_u8(self.time_mode.load(Ordering::Relaxed))
    }

    pub fn set_glyphs(&self, glyphs: GlyphSet) {
        self.glyphs.store(glyphs.to_u8(), Ordering::Relaxed);
    }

    pub fn glyphs(&self) -> GlyphSet {
        GlyphSet::from_u8(self.glyphs.load(Ordering::Relaxed))
    }

    /// Set the absolute-time pattern. Blank patterns are ignored; patterns that
    /// do not compile are rejected and the current one is kept.
    pub fn set_time_format(&self, pattern: &str) -> Result<()> {
        if pattern.trim().is_empty() {
            return Ok(());
        }
        let format = TimeFormat::parse(pattern)?;
        *self
            .time_format
            .write()
            .unwrap_or_else(PoisonError::into_inner) = format;
        Ok(())
    }

    pub fn time_format(&self) -> String {
        self.time_format
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .pattern()
            .to_string()
    }

    /// Validate and apply every field of `config`
    pub fn apply_config(&self, config: &PipelineConfig) -> Result<()> {
        config.validate()?;
        let format = config.compiled_time_format()?;
        *self
            .time_format
            .write()
            .unwrap_or_else(PoisonError::into_inner) = format;
        self.set_level(config.level);
        self.set_show_type(config.show_type);
        self.set_show_thread(config.show_thread);
        self.set_time_mode(config.time_mode);
        self.set_glyphs(config.glyphs);
        debug!(
            "Pipeline configured: level={} time_mode={} format={}",
            config.level, config.time_mode, config.time_format
        );
        Ok(())
    }

    /// Snapshot of the current settings
    pub fn config(&self) -> PipelineConfig {
        PipelineConfig {
            level: self.level(),
            show_type: self.show_type(),
            show_thread: self.show_thread(),
            time_mode: self.time_mode(),
            time_format: self.time_format(),
            glyphs: self.glyphs(),
        }
    }

    // ------------------ Unified output ------------------

    /// Emit `message` at `severity`. `show_type` overrides the pipeline's
    /// label setting for this call only. Messages below the threshold are
    /// dropped without error.
    pub fn emit(&self, severity: Severity, message: &str, show_type: Option<bool>) -> Result<()> {
        if !severity.level().passes(self.level()) {
            return Ok(());
        }

        let show_type = show_type.unwrap_or_else(|| self.show_type());
        let thread_name = self.show_thread().then(|| self.threads.current());

        let mut sink = self.lock_sink();

        let timestamp = {
            let format = self
                .time_format
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            format_timestamp(
                self.time_mode(),
                || self.clock.now(),
                || self.clock.elapsed(),
                &format,
            )
        };

        let mut line = build_prefix(PrefixParts {
            severity,
            show_type,
            glyphs: self.glyphs(),
            thread_name: thread_name.as_deref(),
            timestamp: &timestamp,
        });
        line.push_str(message);

        let rendered = ansi::render(&line, &[severity.style()]);
        sink.write_line(&rendered)
            .and_then(|()| sink.flush())
            .map_err(|e| {
                warn!("Dropped {} line, sink write failed: {}", severity.label().trim_end(), e);
                Error::from(e)
            })
    }

    // ------------------ Level shortcuts ------------------

    pub fn info(&self, message: &str) -> Result<()> {
        self.emit(Severity::Info, message, None)
    }

    pub fn info_with(&self, message: &str, show_type: Option<bool>) -> Result<()> {
        self.emit(Severity::Info, message, show_type)
    }

    pub fn log(&self, message: &str) -> Result<()> {
        self.emit(Severity::Log, message, None)
    }

    pub fn log_with(&self, message: &str, show_type: Option<bool>) -> Result<()> {
        self.emit(Severity::Log, message, show_type)
    }

    pub fn warn(&self, message: &str) -> Result<()> {
        self.emit(Severity::Warn, message, None)
    }

    pub fn warn_with(&self, message: &str, show_type: Option<bool>) -> Result<()> {
        self.emit(Severity::Warn, message, show_type)
    }

    pub fn error(&self, message: &str) -> Result<()> {
        self.emit(Severity::Error, message, None)
    }

    pub fn error_with(&self, message: &str, show_type: Option<bool>) -> Result<()> {
        self.emit(Severity::Error, message, show_type)
    }

    pub fn success(&self, message: &str) -> Result<()> {
        self.emit(Severity::Success, message, None)
    }

    pub fn success_with(&self, message: &str, show_type: Option<bool>) -> Result<()> {
        self.emit(Severity::Success, message, show_type)
    }

    // ------------------ Raw styled output ------------------

    /// Render `message` with `styles` and write it without a newline.
    /// No filtering and no prefix.
    pub fn print(&self, message: &str, styles: &[Style]) -> Result<()> {
        let rendered = ansi::render(message, styles);
        let mut sink = self.lock_sink();
        sink.write_str(&rendered)?;
        sink.flush()?;
        Ok(())
    }

    /// Like [`Pipeline::print`] followed by a newline
    pub fn println(&self, message: &str, styles: &[Style]) -> Result<()> {
        let rendered = ansi::render(message, styles);
        let mut sink = self.lock_sink();
        sink.write_line(&rendered)?;
        sink.flush()?;
        Ok(())
    }

    // ------------------ Sleep ------------------

    /// Block for `duration`, then report it at info level
    pub fn sleep(&self, duration: Duration) -> Result<()> {
        std::thread::sleep(duration);
        self.report_sleep(duration)
    }

    /// Block for `duration` unless `interrupt` fires first. An interrupted wait
    /// returns [`crate::Error::InterruptedWait`] and logs nothing.
    pub fn sleep_interruptible(&self, duration: Duration, interrupt: &Interrupt) -> Result<()> {
        interrupt.sleep(duration)?;
        self.report_sleep(duration)
    }

    fn report_sleep(&self, duration: Duration) -> Result<()> {
        self.info(&format!("Slept for: {}s.", sleep::format_seconds(duration)))
    }

    /// Held for the whole build-and-write of a line; a panic in another
    /// writer does not wedge the sink
    fn lock_sink(&self) -> MutexGuard<'_, Box<dyn Sink>> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config())
            .finish_non_exhaustive()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::stdout()
    }
}
