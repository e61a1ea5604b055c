//! Unit tests for the leveled pipeline

use chrono::{DateTime, Local, TimeZone};
use quill::pipeline::{Clock, ThreadNames};
use quill::{lock, GlyphSet, Level, MemorySink, Pipeline, Severity, Sink, Style, TimeMode};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

struct StoppedClock;

impl Clock for StoppedClock {
    fn now(&self) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 12, 31, 23, 59, 58).unwrap()
    }

    fn elapsed(&self) -> Duration {
        Duration::from_millis(1_234)
    }
}

struct FixedName(&'static str);

impl ThreadNames for FixedName {
    fn current(&self) -> String {
        self.0.to_string()
    }
}

struct BrokenSink;

impl io::Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink that only counts calls
#[derive(Clone, Default)]
struct CountingSink {
    writes: Arc<AtomicUsize>,
    lines: Arc<AtomicUsize>,
    flushes: Arc<AtomicUsize>,
    fail_flush: bool,
}

impl Sink for CountingSink {
    fn write_str(&mut self, _text: &str) -> io::Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn write_line(&mut self, _text: &str) -> io::Result<()> {
        self.lines.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        if self.fail_flush {
            return Err(io::Error::other("flush refused"));
        }
        Ok(())
    }
}

fn pipeline() -> (Pipeline, MemorySink) {
    let sink = MemorySink::new();
    let pipeline = Pipeline::new(sink.clone())
        .with_clock(StoppedClock)
        .with_thread_names(FixedName("main"));
    (pipeline, sink)
}

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[test]
    fn test_boot_line_with_label() {
        let (pipeline, sink) = pipeline();
        pipeline.set_level(Level::Low);
        pipeline.set_show_type(true);
        pipeline.set_time_mode(TimeMode::None);

        pipeline.info("boot").unwrap();

        assert_eq!(
            sink.contents(),
            format!("{}[INFO]    boot{}\n", Style::INFO.code(), Style::RESET.code())
        );
    }

    #[test]
    fn test_high_threshold_drops_low_messages() {
        let (pipeline, sink) = pipeline();
        pipeline.set_level(Level::High);

        pipeline.info("quiet").unwrap();
        pipeline.log("quiet").unwrap();
        assert_eq!(sink.len(), 0);

        pipeline.warn("loud").unwrap();
        assert_eq!(sink.lines().len(), 1);
    }

    #[test]
    fn test_every_severity_uses_its_style_and_label() {
        let (pipeline, sink) = pipeline();
        pipeline.set_show_type(true);
        pipeline.set_time_mode(TimeMode::None);

        for severity in Severity::ALL {
            pipeline.emit(severity, "m", None).unwrap();
        }

        let expected: Vec<String> = Severity::ALL
            .iter()
            .map(|s| format!("{}{}m{}", s.style().code(), s.label(), Style::RESET.code()))
            .collect();
        assert_eq!(sink.lines(), expected);
    }

    #[test]
    fn test_ascii_and_unicode_glyphs() {
        let (pipeline, sink) = pipeline();
        pipeline.set_time_mode(TimeMode::None);

        pipeline.error("e").unwrap();
        pipeline.set_glyphs(GlyphSet::Unicode);
        pipeline.error("e").unwrap();

        let lines = sink.lines();
        assert!(lines[0].contains("x e"));
        assert!(lines[1].contains("✖ e"));
    }

    #[test]
    fn test_elapsed_and_absolute_timestamps() {
        let (pipeline, sink) = pipeline();

        pipeline.success("elapsed").unwrap();
        pipeline.set_time_mode(TimeMode::Absolute);
        pipeline.success("absolute").unwrap();
        pipeline.set_time_format("yyyy/MM/dd HH:mm").unwrap();
        pipeline.success("dated").unwrap();

        let lines = sink.lines();
        assert!(lines[0].contains("+ [00:01:234] elapsed"));
        assert!(lines[1].contains("+ [23:59:58] absolute"));
        assert!(lines[2].contains("+ [2025/12/31 23:59] dated"));
    }

    #[test]
    fn test_thread_name_is_locked_and_unstyled() {
        let (pipeline, sink) = pipeline();
        pipeline.set_show_thread(true);
        pipeline.set_time_mode(TimeMode::None);

        pipeline.warn("careful").unwrap();

        let amber_style = Style::WARNING;
        let amber = amber_style.code();
        let reset_style = Style::RESET;
        let reset = reset_style.code();
        assert_eq!(
            sink.contents(),
            format!("{}{amber}? careful{reset}\n", lock("[main] "))
        );
    }

    #[test]
    fn test_message_escapes_survive() {
        let (pipeline, sink) = pipeline();
        pipeline.set_time_mode(TimeMode::None);

        pipeline.log("a \x1b[1mbold\x1b[22m b").unwrap();

        let contents = sink.contents();
        assert!(contents.contains("\x1b[1m"));
        assert!(contents.contains("\x1b[22m"));
        assert_eq!(contents.matches('\n').count(), 1);
    }

    #[test]
    fn test_sink_failure_propagates() {
        let pipeline = Pipeline::new(BrokenSink);
        let err = pipeline.error("lost").unwrap_err();
        assert!(matches!(err, quill::Error::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn test_filtered_message_never_touches_sink() {
        let pipeline = Pipeline::new(BrokenSink);
        pipeline.set_level(Level::High);
        assert!(pipeline.info("dropped").is_ok());
    }

    #[test]
    fn test_every_write_is_flushed() {
        let sink = CountingSink::default();
        let pipeline = Pipeline::new(sink.clone());

        pipeline.info("x").unwrap();
        assert_eq!(sink.lines.load(Ordering::SeqCst), 1);
        assert_eq!(sink.flushes.load(Ordering::SeqCst), 1);

        pipeline.print("raw", &[]).unwrap();
        pipeline.println("raw", &[Style::BOLD]).unwrap();
        assert_eq!(sink.writes.load(Ordering::SeqCst), 1);
        assert_eq!(sink.lines.load(Ordering::SeqCst), 2);
        assert_eq!(sink.flushes.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_flush_failure_propagates() {
        let sink = CountingSink {
            fail_flush: true,
            ..CountingSink::default()
        };
        let pipeline = Pipeline::new(sink.clone());

        assert!(matches!(pipeline.warn("w"), Err(quill::Error::Io(_))));
        assert!(matches!(pipeline.print("p", &[]), Err(quill::Error::Io(_))));
    }
}
