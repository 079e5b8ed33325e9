//! Stress tests for concurrent producers
//!
//! These tests verify:
//! - Per-producer ordering under contention on a small queue
//! - No entry lost or duplicated with many producers
//! - Every submit that returned Ok is written even when stop races producers

use async_line_logger::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

fn parse(line: &str) -> (usize, usize) {
    // Message layout: "p{producer}-{seq}"
    let message = line.rsplit("] ").next().expect("message");
    let (producer, seq) = message
        .trim_start_matches('p')
        .split_once('-')
        .expect("p<producer>-<seq>");
    (producer.parse().unwrap(), seq.parse().unwrap())
}

#[test]
fn test_many_producers_small_queue() {
    const PRODUCERS: usize = 8;
    const PER_PRODUCER: usize = 500;

    let sink = MemorySink::new();
    let logger = AsyncLogger::new(16, sink.clone()).unwrap();

    thread::scope(|s| {
        for producer in 0..PRODUCERS {
            let logger = &logger;
            s.spawn(move || {
                for seq in 0..PER_PRODUCER {
                    logger.info(format!("p{}-{}", producer, seq)).unwrap();
                }
            });
        }
    });
    logger.stop().unwrap();

    let lines = sink.lines();
    assert_eq!(lines.len(), PRODUCERS * PER_PRODUCER);

    let mut next_expected: HashMap<usize, usize> = HashMap::new();
    for line in &lines {
        let (producer, seq) = parse(line);
        let expected = next_expected.entry(producer).or_insert(0);
        assert_eq!(
            seq, *expected,
            "producer {} out of order: got {}, expected {}",
            producer, seq, expected
        );
        *expected += 1;
    }
    assert!(next_expected.values().all(|&n| n == PER_PRODUCER));

    let metrics = logger.metrics();
    assert_eq!(metrics.submitted(), (PRODUCERS * PER_PRODUCER) as u64);
    assert_eq!(metrics.written(), (PRODUCERS * PER_PRODUCER) as u64);
}

#[test]
fn test_stop_racing_producers_loses_nothing_accepted() {
    const PRODUCERS: usize = 6;

    let sink = MemorySink::new();
    let logger = AsyncLogger::new(4, sink.clone()).unwrap();
    let accepted = AtomicUsize::new(0);

    thread::scope(|s| {
        for producer in 0..PRODUCERS {
            let logger = &logger;
            let accepted = &accepted;
            s.spawn(move || {
                let mut seq = 0;
                loop {
                    match logger.info(format!("p{}-{}", producer, seq)) {
                        Ok(()) => {
                            accepted.fetch_add(1, Ordering::Relaxed);
                            seq += 1;
                        }
                        Err(LoggerError::LoggerClosed) => break,
                        Err(e) => panic!("unexpected error: {}", e),
                    }
                }
            });
        }

        thread::sleep(Duration::from_millis(50));
        logger.stop().unwrap();
    });

    let lines = sink.lines();
    assert_eq!(lines.len(), accepted.load(Ordering::Relaxed));

    let mut last_seen: HashMap<usize, usize> = HashMap::new();
    for line in &lines {
        let (producer, seq) = parse(line);
        if let Some(prev) = last_seen.insert(producer, seq) {
            assert_eq!(seq, prev + 1, "gap or duplicate for producer {}", producer);
        } else {
            assert_eq!(seq, 0);
        }
    }
}

#[test]
fn test_sink_failures_under_load_never_reach_producers() {
    struct EveryThirdFails {
        writes: usize,
    }

    impl Sink for EveryThirdFails {
        fn write_line(&mut self, _line: &str) -> async_line_logger::Result<()> {
            self.writes += 1;
            if self.writes % 3 == 0 {
                Err(LoggerError::writer("flaky"))
            } else {
                Ok(())
            }
        }

        fn flush(&mut self) -> async_line_logger::Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "flaky"
        }
    }

    let observed = std::sync::Arc::new(AtomicUsize::new(0));
    let observed_clone = std::sync::Arc::clone(&observed);
    let logger = AsyncLogger::builder()
        .capacity(8)
        .sink(EveryThirdFails { writes: 0 })
        .on_error(move |error, entry| {
            assert!(error.is_recoverable());
            assert!(entry.is_some());
            observed_clone.fetch_add(1, Ordering::Relaxed);
        })
        .build()
        .unwrap();

    thread::scope(|s| {
        for producer in 0..4 {
            let logger = &logger;
            s.spawn(move || {
                for seq in 0..300 {
                    logger.warning(format!("p{}-{}", producer, seq)).unwrap();
                }
            });
        }
    });
    logger.stop().unwrap();

    assert_eq!(observed.load(Ordering::Relaxed), 400);
    assert_eq!(logger.metrics().write_failures(), 400);
    assert_eq!(logger.metrics().written(), 800);
    assert!(logger.is_worker_alive());
}
