use anyhow::bail;
use boundpool::{DEFAULT_CAPACITY, PoolConfig};
use clap::Parser;
use core::time::Duration;

/// Runtime configuration for the `boundpool-squares` binary.
///
/// Values come from CLI arguments, falling back to environment variables
/// (a `.env` file is loaded first).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "boundpool-squares",
    version,
    about = "Squares integers typed on stdin using a bounded worker pool"
)]
pub struct CliArgs {
    /// Number of worker threads squaring numbers concurrently.
    ///
    /// Environment variable: `NUM_WORKERS`
    #[arg(long, env = "NUM_WORKERS", default_value_t = 4)]
    pub num_workers: usize,

    /// How many numbers may wait for a worker before input is throttled.
    ///
    /// Once this many numbers are queued, reading the next one blocks until a
    /// worker frees a slot.
    ///
    /// Environment variable: `QUEUE_CAPACITY`
    #[arg(long, env = "QUEUE_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    pub queue_capacity: usize,

    /// Simulated time each square takes, in milliseconds.
    ///
    /// Environment variable: `WORK_DELAY_MS`
    #[arg(long, env = "WORK_DELAY_MS", default_value_t = 2000)]
    pub work_delay_ms: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub pool: PoolConfig,
    pub work_delay: Duration,
}

impl TryFrom<CliArgs> for AppConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.num_workers == 0 {
            bail!("NUM_WORKERS must be greater than 0");
        }

        if args.queue_capacity == 0 {
            bail!("QUEUE_CAPACITY must be greater than 0");
        }

        Ok(Self {
            pool: PoolConfig::new(args.num_workers)
                .with_capacity(args.queue_capacity)
                .with_thread_name("squares"),
            work_delay: Duration::from_millis(args.work_delay_ms),
        })
    }
}
