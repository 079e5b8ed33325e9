//! File logging demo
//!
//! Writes JSON lines to a file and stops with a bounded wait.
//!
//! Run with: cargo run --example file_logging

use async_line_logger::prelude::*;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Async Line Logger - File Logging Demo ===\n");

    let logger = AsyncLogger::builder()
        .sink(FileSink::new("application.log")?)
        .line_format(LineFormat::Json)
        .on_error(|error, entry| match entry {
            Some(entry) => eprintln!("dropped '{}': {}", entry.message(), error),
            None => eprintln!("{}", error),
        })
        .build()?;

    logger.info("Application started")?;
    logger.info("Configuration loaded successfully")?;
    logger.warning("Using default settings for some options")?;
    for i in 1..=5 {
        logger.info(format!("Processing item {}/5", i))?;
    }
    logger.error("Failed to load optional plugin")?;
    logger.info("All operations completed")?;

    match logger.stop_timeout(Duration::from_secs(2))? {
        StopStatus::Drained => println!("All entries written"),
        StopStatus::TimedOut { remaining } => println!("{} entries still pending", remaining),
    }

    println!("\n=== Demo completed successfully! ===");
    println!("Check 'application.log' for the full log output");

    Ok(())
}
