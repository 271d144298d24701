use crate::{Error, Result};

/// Queue capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 4;

/// Thread name prefix used when none is configured.
pub const DEFAULT_THREAD_NAME: &str = "boundpool-worker";

/// Construction parameters for a [`WorkerPool`].
///
/// # Example
/// ```
/// use boundpool::PoolConfig;
///
/// let config = PoolConfig::new(2).with_capacity(8).with_thread_name("squares");
/// assert_eq!(config.num_threads, 2);
/// assert_eq!(config.capacity, 8);
/// assert!(config.validate().is_ok());
/// ```
///
/// [`WorkerPool`]: crate::WorkerPool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of worker threads. Must be at least 1.
    pub num_threads: usize,
    /// Maximum number of queued, not yet dequeued items. Must be at least 1.
    pub capacity: usize,
    /// Prefix for worker thread names; worker `n` is named `<prefix>-<n>`.
    pub thread_name: String,
}

impl PoolConfig {
    pub fn new(num_threads: usize) -> Self {
        Self {
            num_threads,
            capacity: DEFAULT_CAPACITY,
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
        }
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = thread_name.into();
        self
    }

    /// Checks the configuration without starting anything.
    ///
    /// # Errors
    /// - [`Error::InvalidConfiguration`] if `num_threads` or `capacity` is
    ///   zero, or if `thread_name` contains a null byte.
    pub fn validate(&self) -> Result<()> {
        if self.num_threads == 0 {
            return Err(Error::invalid("num_threads must be greater than 0"));
        }
        if self.capacity == 0 {
            return Err(Error::invalid("capacity must be greater than 0"));
        }
        if self.thread_name.as_bytes().contains(&0) {
            return Err(Error::invalid("thread_name must not contain null bytes"));
        }
        Ok(())
    }
}
