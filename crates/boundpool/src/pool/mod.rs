//! Fixed-size worker-thread pool fed by a [`BoundedQueue`].
//!
//! [`WorkerPool`] spawns `num_threads` OS threads at construction. Each one
//! loops on [`BoundedQueue::dequeue`] and hands every item to the pool's
//! [`TaskBody`]. Submissions block while the queue is at capacity, which
//! throttles producers to the speed of the workers.
//!
//! Shutdown closes the queue, lets the workers drain everything that was
//! already accepted, and joins every thread before returning. It runs
//! automatically when the pool is dropped.

mod config;
mod state;
mod task;
mod worker;

pub use config::*;
pub use state::PoolState;
pub use state::PoolStats;
pub use task::*;

use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    BoundedQueue, Error, Result,
    mutex::{self, Mutex},
};
use state::{Counters, StateCell};
use worker::Worker;

/// A fixed set of worker threads consuming a bounded queue of `T`.
///
/// The pool is `Sync`: any number of threads may [`submit`] through a shared
/// reference, and any of them may call [`shutdown`].
///
/// # Example
/// ```
/// use boundpool::WorkerPool;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU64, Ordering};
///
/// let total = Arc::new(AtomicU64::new(0));
/// let sink = Arc::clone(&total);
///
/// let pool = WorkerPool::with_threads(2, move |n: u64, _worker_id: usize| {
///     sink.fetch_add(n * n, Ordering::Relaxed);
/// })
/// .unwrap();
///
/// for n in 1..=5 {
///     pool.submit(n).unwrap();
/// }
/// pool.shutdown().unwrap();
///
/// assert_eq!(total.load(Ordering::Relaxed), 55);
/// assert_eq!(pool.stats().completed, 5);
/// ```
///
/// [`submit`]: WorkerPool::submit
/// [`shutdown`]: WorkerPool::shutdown
pub struct WorkerPool<T: Send + 'static> {
    queue: Arc<BoundedQueue<T>>,
    workers: Mutex<Vec<Worker>>,
    state: StateCell,
    counters: Arc<Counters>,
    num_threads: usize,
}

impl<T: Send + 'static> WorkerPool<T> {
    /// Builds a pool from `config` and starts its worker threads.
    ///
    /// Worker ids are assigned in creation order starting at 1.
    ///
    /// # Errors
    /// - [`Error::InvalidConfiguration`] if the config fails
    ///   [`PoolConfig::validate`]. No thread is started.
    /// - [`Error::Spawn`] if the OS refuses a thread. Workers started before
    ///   the failure are shut down and joined before this returns.
    pub fn new<B>(config: PoolConfig, body: B) -> Result<Self>
    where
        B: TaskBody<T>,
    {
        config.validate()?;

        let queue = Arc::new(BoundedQueue::new(config.capacity)?);
        let body = Arc::new(body);
        let counters = Arc::new(Counters::default());
        let mut workers = Vec::new();

        for id in 1..=config.num_threads {
            match Worker::spawn(
                id,
                &config.thread_name,
                Arc::clone(&queue),
                Arc::clone(&body),
                Arc::clone(&counters),
            ) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!("Aborting pool start after {} workers: {e}", workers.len());
                    queue.close()?;
                    join_all(workers);
                    return Err(e);
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Started {} workers (capacity {})",
            config.num_threads,
            config.capacity
        );

        Ok(Self {
            queue,
            workers: Mutex::new(workers),
            state: StateCell::new(),
            counters,
            num_threads: config.num_threads,
        })
    }

    /// Builds a pool of `num_threads` workers with the default queue capacity
    /// of [`DEFAULT_CAPACITY`].
    ///
    /// # Errors
    /// See [`WorkerPool::new`].
    pub fn with_threads<B>(num_threads: usize, body: B) -> Result<Self>
    where
        B: TaskBody<T>,
    {
        Self::new(PoolConfig::new(num_threads), body)
    }

    /// Queues `item` for the next free worker, blocking while the queue is
    /// full.
    ///
    /// # Errors
    /// - [`Error::ShutdownInProgress`] if shutdown has begun, including when
    ///   it begins while this call is blocked on a full queue. The item is not
    ///   delivered.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
    pub fn submit(&self, item: T) -> Result<()> {
        // Fast path only. `enqueue` re-checks `closed` under the queue lock,
        // and that check decides acceptance.
        if self.state.load() != PoolState::Running {
            return Err(Error::ShutdownInProgress);
        }
        self.queue.enqueue(item)
    }

    /// Stops the pool and waits for every worker to exit.
    ///
    /// Items that were accepted before the queue closed are still delivered
    /// to a worker; only submissions that have not yet been accepted are
    /// turned away. Calling this more than once is harmless, and a call that
    /// races with an in-progress shutdown returns once that shutdown has
    /// joined all workers.
    ///
    /// # Errors
    /// - [`Error::LockPoisoned`] if a lock was poisoned (`std` locks only).
    ///
    /// [`Error::LockPoisoned`]: crate::Error
    pub fn shutdown(&self) -> Result<()> {
        // Held across the transition and the join, so a concurrent caller
        // blocks here until the workers are gone.
        let mut workers = mutex::lock(&self.workers)?;
        if !self.state.transition(PoolState::Running, PoolState::Stopping) {
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        tracing::info!(
            "Shutting down {} workers ({} items still queued)",
            workers.len(),
            self.queue.len()?
        );

        self.queue.close()?;
        join_all(workers.drain(..));

        let _moved = self.state.transition(PoolState::Stopping, PoolState::Stopped);
        debug_assert!(_moved);

        #[cfg(feature = "tracing")]
        tracing::info!("Worker pool shutdown complete");

        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PoolState {
        self.state.load()
    }

    /// Completed and panicked task counts so far.
    pub fn stats(&self) -> PoolStats {
        self.counters.snapshot()
    }

    pub const fn num_threads(&self) -> usize {
        self.num_threads
    }

    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    /// Number of accepted items not yet taken by a worker.
    pub fn queued(&self) -> Result<usize> {
        self.queue.len()
    }
}

impl<T: Send + 'static> core::fmt::Debug for WorkerPool<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("num_threads", &self.num_threads)
            .field("capacity", &self.queue.capacity())
            .field("state", &self.state())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

/// Shuts the pool down when it goes out of scope.
impl<T: Send + 'static> Drop for WorkerPool<T> {
    fn drop(&mut self) {
        if let Err(_e) = self.shutdown() {
            #[cfg(feature = "tracing")]
            tracing::error!("Error during worker pool shutdown: {_e}");
        }
    }
}

fn join_all(workers: impl IntoIterator<Item = Worker>) {
    for worker in workers {
        let _id = worker.id;
        if worker.thread.join().is_err() {
            #[cfg(feature = "tracing")]
            tracing::error!("Worker {_id} exited abnormally");
        } else {
            #[cfg(feature = "tracing")]
            tracing::trace!("Worker {_id} joined");
        }
    }
}
