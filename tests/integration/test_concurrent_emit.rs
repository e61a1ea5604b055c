//! Integration tests for concurrent emission
//!
//! Many threads share one pipeline; every line must arrive whole.

use quill::pipeline::ThreadNames;
use quill::{lock, render, Level, MemorySink, Pipeline, Style, TimeMode};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const PER_THREAD: usize = 200;

struct SpawnedName;

impl ThreadNames for SpawnedName {
    fn current(&self) -> String {
        thread::current().name().unwrap_or("unnamed").to_string()
    }
}

#[cfg(test)]
mod concurrent_emit_tests {
    use super::*;

    #[test]
    fn test_lines_never_interleave() {
        let sink = MemorySink::new();
        let pipeline = Arc::new(Pipeline::new(sink.clone()));
        pipeline.set_level(Level::Low);
        pipeline.set_show_type(true);
        pipeline.set_time_mode(TimeMode::None);

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let pipeline = Arc::clone(&pipeline);
                thread::spawn(move || {
                    for i in 0..PER_THREAD {
                        pipeline.info(&format!("worker {t} message {i}")).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let lines = sink.lines();
        assert_eq!(lines.len(), THREADS * PER_THREAD);

        let info_style = Style::INFO;
        let info = info_style.code();
        let reset_style = Style::RESET;
        let reset = reset_style.code();
        for line in &lines {
            assert!(line.starts_with(&format!("{info}[INFO]    worker ")), "{line:?}");
            assert!(line.ends_with(reset), "{line:?}");
        }

        // Each worker's lines appear in its own emission order
        for t in 0..THREADS {
            let tag = format!("worker {t} message ");
            let seen: Vec<usize> = lines
                .iter()
                .filter_map(|l| {
                    let rest = l.split_once(&tag)?.1;
                    rest.trim_end_matches(reset).parse().ok()
                })
                .collect();
            assert_eq!(seen, (0..PER_THREAD).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_elapsed_timestamps_are_ordered() {
        let sink = MemorySink::new();
        let pipeline = Arc::new(Pipeline::new(sink.clone()));
        pipeline.set_time_mode(TimeMode::Elapsed);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pipeline = Arc::clone(&pipeline);
                thread::spawn(move || {
                    for _ in 0..50 {
                        pipeline.success("tick").unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // `[mm:ss:SSS] ` sorts lexically within the first hour
        let stamps: Vec<String> = sink
            .lines()
            .iter()
            .map(|l| {
                let start = l.find("+ [").unwrap() + 2;
                l[start..start + 11].to_string()
            })
            .collect();
        assert_eq!(stamps.len(), 200);
        let mut sorted = stamps.clone();
        sorted.sort();
        assert_eq!(stamps, sorted);
    }

    #[test]
    fn test_thread_names_follow_their_lines() {
        let sink = MemorySink::new();
        let pipeline = Arc::new(Pipeline::new(sink.clone()).with_thread_names(SpawnedName));
        pipeline.set_show_thread(true);
        pipeline.set_time_mode(TimeMode::None);

        let handles: Vec<_> = ["alpha", "beta", "gamma"]
            .into_iter()
            .map(|name| {
                let pipeline = Arc::clone(&pipeline);
                thread::Builder::new()
                    .name(name.to_string())
                    .spawn(move || {
                        for _ in 0..20 {
                            pipeline.warn(name).unwrap();
                        }
                    })
                    .unwrap()
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = sink.lines();
        assert_eq!(lines.len(), 60);
        for line in lines {
            let name = ["alpha", "beta", "gamma"]
                .into_iter()
                .find(|n| line.starts_with(&lock(&format!("[{n}] "))))
                .expect("line starts with a locked thread name");
            assert!(line.ends_with(&render(&format!("? {name}"), &[Style::WARNING])));
        }
    }

    #[test]
    fn test_raw_print_and_emit_share_the_sink() {
        let sink = MemorySink::new();
        let pipeline = Arc::new(Pipeline::new(sink.clone()));
        pipeline.set_time_mode(TimeMode::None);

        let emitter = {
            let pipeline = Arc::clone(&pipeline);
            thread::spawn(move || {
                for _ in 0..100 {
                    pipeline.log("emitted").unwrap();
                }
            })
        };
        let printer = {
            let pipeline = Arc::clone(&pipeline);
            thread::spawn(move || {
                for _ in 0..100 {
                    pipeline.println("printed", &[Style::BOLD]).unwrap();
                }
            })
        };
        emitter.join().unwrap();
        printer.join().unwrap();

        let lines = sink.lines();
        let emitted = render("* emitted", &[Style::LOG]);
        let printed = render("printed", &[Style::BOLD]);
        assert_eq!(lines.len(), 200);
        assert!(lines.iter().all(|l| *l == emitted || *l == printed));
    }
}
