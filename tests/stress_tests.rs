//! Stress tests for concurrent logging and live reconfiguration
//!
//! These tests verify:
//! - No record is lost or torn under concurrent high-volume logging
//! - Filter swaps are observed atomically per call
//! - Context swaps are observed atomically per call
//! - Registry handles are shared safely across threads

use cloudwatch_logging::prelude::*;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const PER_THREAD: usize = 500;

#[test]
fn test_concurrent_file_logging_loses_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("stress.log");

    let logger = Logger::builder("stress")
        .transform(AppenderConfig::new().with_field("service", "stress"))
        .sink(StreamSink::file(&log_file).expect("Failed to open sink"))
        .build();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger
                        .info_with_context(
                            format!("thread {} message {}", t, i),
                            LogContext::new().with_field("worker", t as i64).with_field("seq", i as i64),
                        )
                        .expect("log call failed");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    logger.flush().expect("Failed to flush");

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let mut count = 0;
    for line in content.lines() {
        let record: serde_json::Value = serde_json::from_str(line).expect("torn line");
        assert_eq!(record["service"], "stress");
        count += 1;
    }
    assert_eq!(count, THREADS * PER_THREAD);
    assert_eq!(logger.metrics().total_logged(), (THREADS * PER_THREAD) as u64);
}

#[test]
fn test_filter_swap_is_atomic_per_call() {
    let sink = MemorySink::new();
    let logger = Logger::builder("filter_swap")
        .transform(AppenderConfig::new().with_field("a_key", 1).with_field("b_key", 2))
        .transform(FilterConfig::new())
        .sink(sink.clone())
        .build();

    let done = Arc::new(AtomicBool::new(false));
    let swapper = {
        let logger = logger.clone();
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut suppress = false;
            while !done.load(Ordering::Relaxed) {
                let config = if suppress {
                    FilterConfig::new().with_key("a_key").with_key("b_key")
                } else {
                    FilterConfig::new()
                };
                logger.update_filter(config).expect("update failed");
                suppress = !suppress;
            }
        })
    };

    let writers: Vec<_> = (0..4)
        .map(|_| {
            let logger = logger.clone();
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    logger.info("tick").expect("log call failed");
                }
            })
        })
        .collect();

    for handle in writers {
        handle.join().expect("Thread panicked");
    }
    done.store(true, Ordering::Relaxed);
    swapper.join().expect("Swapper panicked");

    for record in sink.records().unwrap() {
        assert_eq!(
            record.get("a_key").is_some(),
            record.get("b_key").is_some(),
            "mixed filter configuration observed: {}",
            record
        );
    }
}

#[test]
fn test_context_swap_is_atomic_per_call() {
    let sink = MemorySink::new();
    let logger = Logger::builder("context_swap")
        .lambda(&json!({"function_name": "fn-0", "aws_request_id": "req-0"}))
        .sink(sink.clone())
        .build();

    let updater = {
        let logger = logger.clone();
        thread::spawn(move || {
            for i in 1..=PER_THREAD {
                let ctx = json!({
                    "function_name": format!("fn-{}", i),
                    "aws_request_id": format!("req-{}", i),
                });
                logger.update_context(&ctx).expect("update failed");
            }
        })
    };

    let writers: Vec<_> = (0..4)
        .map(|_| {
            let logger = logger.clone();
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    logger.info("invocation").expect("log call failed");
                }
            })
        })
        .collect();

    for handle in writers {
        handle.join().expect("Thread panicked");
    }
    updater.join().expect("Updater panicked");

    for record in sink.records().unwrap() {
        let function = record["function_name"].as_str().unwrap_or_default();
        let request = record["aws_request_id"].as_str().unwrap_or_default();
        assert_eq!(
            function.trim_start_matches("fn-"),
            request.trim_start_matches("req-"),
            "mixed context snapshot observed"
        );
    }
}

#[test]
fn test_registry_shared_across_threads() {
    let root = MemorySink::new();
    let registry = Arc::new(LoggerRegistry::with_root_sink(root.clone()));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let logger = registry.logger("shared");
                for _ in 0..100 {
                    logger.info("via root").expect("log call failed");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(registry.len(), 1);
    assert_eq!(root.len(), THREADS * 100);
}
