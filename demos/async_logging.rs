//! Async logging demo
//!
//! Several producer threads share one logger; the worker writes their
//! entries to the console in admission order.
//!
//! Run with: cargo run --example async_logging

use async_line_logger::prelude::*;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Async Line Logger - Async Logging Demo ===\n");

    let logger = AsyncLogger::builder()
        .capacity(DEFAULT_CAPACITY)
        .sink(ConsoleSink::new())
        .colored(true)
        .build()?;

    println!("1. Single producer:");
    for i in 0..5 {
        logger.info(format!("Message #{}", i))?;
    }

    println!("\n2. Multi-threaded producers:");
    thread::scope(|s| -> Result<()> {
        let handles: Vec<_> = (0..3)
            .map(|thread_id| {
                let logger = &logger;
                s.spawn(move || -> Result<()> {
                    for i in 0..5 {
                        logger.info(format!("Thread {} - Message {}", thread_id, i))?;
                        thread::sleep(Duration::from_millis(10));
                    }
                    logger.warning(format!("Thread {} done", thread_id))
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("producer thread panicked")?;
        }
        Ok(())
    })?;

    // Waits until everything above has been written
    logger.stop()?;

    if let Err(e) = logger.error("submitted after stop") {
        println!("\n3. Late submit rejected: {}", e);
    }

    let metrics = logger.metrics();
    println!(
        "\nWritten: {}, blocked submits: {}",
        metrics.written(),
        metrics.blocked_submits()
    );
    println!("\n=== Demo completed successfully! ===");

    Ok(())
}
