mod config;
mod input;
mod square;
mod telemetry;

use boundpool::WorkerPool;
use clap::Parser;
use config::{AppConfig, CliArgs};
use square::Squarer;
use std::io;
use telemetry::init_telemetry;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = AppConfig::try_from(args)?;

    init_telemetry()?;

    tracing::info!(
        "Starting {} workers (queue capacity {}, {:?} per item)",
        config.pool.num_threads,
        config.pool.capacity,
        config.work_delay
    );

    let squarer = Squarer::new(config.work_delay, io::stdout());
    let pool = WorkerPool::new(config.pool, move |num: i64, worker_id: usize| {
        squarer.compute(num, worker_id);
    })?;

    println!("Type a number and enter:");
    println!("(0 to exit)");

    let submitted = input::feed(io::stdin().lock(), &pool)?;

    println!("Exit...");
    tracing::info!(
        "Waiting for {} queued numbers to finish",
        pool.queued()?
    );
    pool.shutdown()?;

    let stats = pool.stats();
    tracing::info!(
        "Squared {} of {submitted} numbers ({} failed)",
        stats.completed,
        stats.panicked
    );

    Ok(())
}
