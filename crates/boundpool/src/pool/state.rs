use portable_atomic::{AtomicU8, AtomicUsize, Ordering};

/// Lifecycle of a [`WorkerPool`].
///
/// - [`PoolState::Running`]: accepting submissions.
/// - [`PoolState::Stopping`]: the queue is closed; workers are draining what
///   was already accepted and are being joined.
/// - [`PoolState::Stopped`]: every worker thread has been joined.
///
/// Each transition happens exactly once and the state never moves backwards.
///
/// [`WorkerPool`]: crate::WorkerPool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PoolState {
    Running = 0,
    Stopping = 1,
    Stopped = 2,
}

impl PoolState {
    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Running,
            1 => Self::Stopping,
            _ => Self::Stopped,
        }
    }
}

/// An atomic cell holding a [`PoolState`].
///
/// It sits outside the queue mutex and only lets `submit` fail fast. Whether
/// an item is accepted is decided by the queue's `closed` flag, which is read
/// and written under that mutex.
#[derive(Debug)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub(crate) const fn new() -> Self {
        Self(AtomicU8::new(PoolState::Running as u8))
    }

    pub(crate) fn load(&self) -> PoolState {
        PoolState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Moves `from` to `to`, returning `false` if another thread got there
    /// first.
    pub(crate) fn transition(&self, from: PoolState, to: PoolState) -> bool {
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// A point-in-time snapshot of how many items the workers have handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Items whose task body returned normally.
    pub completed: usize,
    /// Items whose task body panicked. The worker that ran it kept serving.
    pub panicked: usize,
}

impl PoolStats {
    /// Total number of items taken off the queue and run.
    pub const fn processed(&self) -> usize {
        self.completed + self.panicked
    }
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    completed: AtomicUsize,
    panicked: AtomicUsize,
}

impl Counters {
    pub(crate) fn record_completed(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_panicked(&self) {
        self.panicked.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> PoolStats {
        PoolStats {
            completed: self.completed.load(Ordering::Relaxed),
            panicked: self.panicked.load(Ordering::Relaxed),
        }
    }
}
