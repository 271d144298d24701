//! Error types for the bounded queue and the worker pool.
//!
//! ## Error Cases
//! - `InvalidConfiguration`: a pool or queue was asked for zero threads or
//!   zero capacity.
//! - `ShutdownInProgress`: an item was submitted after shutdown began.
//! - `Spawn`: the operating system refused to start a worker thread.
//! - `LockPoisoned`: a `std` lock was poisoned (not available with
//!   `parking-lot`).

/// A result type defaulting to [`enum@Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `boundpool` can produce.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The pool or queue configuration was rejected before anything started.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// The queue has been closed; the submitted item was not accepted.
    ///
    /// Returned both for submissions made after shutdown started and for
    /// producers that were blocked on a full queue when it closed.
    #[error("Pool is shutting down")]
    ShutdownInProgress,

    /// A worker thread could not be spawned.
    #[error("Failed to spawn worker {worker_id}: {source}")]
    Spawn {
        worker_id: usize,
        #[source]
        source: std::io::Error,
    },

    /// The operation failed because a lock was **poisoned**.
    ///
    /// When the `parking-lot` feature is enabled, mutexes do **not** poison,
    /// so this variant is not available.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("Lock poisoned")]
    LockPoisoned,
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

#[cfg(not(feature = "parking-lot"))]
use crate::mutex::PoisonError;
#[cfg(not(feature = "parking-lot"))]
// Collapse every poisoned guard into `LockPoisoned`
impl<G> From<PoisonError<G>> for Error {
    fn from(_: PoisonError<G>) -> Self {
        Self::LockPoisoned
    }
}
