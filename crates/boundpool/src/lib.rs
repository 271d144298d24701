//! # boundpool
//!
//! A fixed-size worker-thread pool fed by a bounded FIFO queue.
//!
//! - [`BoundedQueue`] is the hand-off point: producers block while it is
//!   full, consumers block while it is empty, and closing it wakes both.
//! - [`WorkerPool`] owns the worker threads and the shutdown protocol: it
//!   closes the queue, drains every accepted item and joins every thread.
//!
//! ## Feature flags
//!
//! - `parking-lot`: use `parking_lot` locks (no poisoning) instead of
//!   `std::sync`.
//! - `cache-padded`: keep the queue lock on its own cache line.
//! - `tracing`: emit worker and shutdown events through `tracing`.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod mutex;
mod pool;
mod queue;

pub use crate::error::*;
pub use crate::pool::*;
pub use crate::queue::*;
