use std::collections::VecDeque;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, Result,
    mutex::{self, Condvar, Mutex},
};

/// State guarded by the queue's single lock.
///
/// `closed` doubles as the owning pool's stopping flag: it only ever goes from
/// `false` to `true`.
#[derive(Debug)]
struct Slots<T> {
    items: VecDeque<T>,
    closed: bool,
}

/// A thread-safe FIFO with a hard upper bound on occupancy.
///
/// Producers block in [`enqueue`] while the queue is full and consumers block
/// in [`dequeue`] while it is empty. [`close`] wakes everybody: blocked
/// producers are turned away, consumers keep draining until the queue is
/// empty and then see `None`.
///
/// Producers and consumers wait on separate condition variables, so a
/// wake-one notification always reaches a thread that can make progress.
///
/// ## Features
/// - ✅ Blocking hand-off with backpressure
/// - ✅ Drains after close, never drops accepted items
/// - ✅ `parking-lot` and `cache-padded` aware
///
/// # Example
/// ```
/// use boundpool::BoundedQueue;
///
/// let queue = BoundedQueue::new(2).unwrap();
/// queue.enqueue(1).unwrap();
/// queue.enqueue(2).unwrap();
/// queue.close().unwrap();
///
/// assert_eq!(queue.dequeue().unwrap(), Some(1));
/// assert_eq!(queue.dequeue().unwrap(), Some(2));
/// assert_eq!(queue.dequeue().unwrap(), None);
/// ```
///
/// [`enqueue`]: BoundedQueue::enqueue
/// [`dequeue`]: BoundedQueue::dequeue
/// [`close`]: BoundedQueue::close
#[derive(Debug)]
pub struct BoundedQueue<T> {
    #[cfg(feature = "cache-padded")]
    slots: crossbeam_utils::CachePadded<Mutex<Slots<T>>>,
    #[cfg(not(feature = "cache-padded"))]
    slots: Mutex<Slots<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

/// Upper limit on the slots reserved up front by [`BoundedQueue::new`].
const PREALLOCATED_SLOTS: usize = 1024;

impl<T> BoundedQueue<T> {
    /// Creates an empty, open queue holding at most `capacity` items.
    ///
    /// # Errors
    /// - [`Error::InvalidConfiguration`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::invalid("queue capacity must be greater than 0"));
        }

        // The bound is enforced in `enqueue`; reserve only a small prefix.
        let slots = Mutex::new(Slots {
            items: VecDeque::with_capacity(capacity.min(PREALLOCATED_SLOTS)),
            closed: false,
        });

        Ok(Self {
            #[cfg(feature = "cache-padded")]
            slots: crossbeam_utils::CachePadded::new(slots),
            #[cfg(not(feature = "cache-padded"))]
            slots,
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
        })
    }

    /// Appends `item` at the tail, blocking while the queue is full.
    ///
    /// Wakes one blocked consumer once the item is in place.
    ///
    /// # Errors
    /// - [`Error::ShutdownInProgress`] if the queue is closed, including when
    ///   it closes while this call is waiting for room. The item is dropped.
    /// - [`Error::LockPoisoned`] if the lock was poisoned (`std` locks only).
    ///
    /// [`Error::LockPoisoned`]: crate::Error
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
    pub fn enqueue(&self, item: T) -> Result<()> {
        let capacity = self.capacity;
        let guard = mutex::lock(self.slots())?;
        let mut guard = mutex::wait_while(&self.not_full, guard, |slots| {
            !slots.closed && slots.items.len() >= capacity
        })?;

        if guard.closed {
            return Err(Error::ShutdownInProgress);
        }

        guard.items.push_back(item);
        debug_assert!(guard.items.len() <= capacity);
        drop(guard);

        self.not_empty.notify_one();
        Ok(())
    }

    /// Removes the head item, blocking while the queue is empty and open.
    ///
    /// Returns `Ok(None)` only once the queue is both closed and empty, which
    /// is the consumer's signal to stop. Wakes one blocked producer after
    /// taking an item.
    ///
    /// # Errors
    /// - [`Error::LockPoisoned`] if the lock was poisoned (`std` locks only).
    ///
    /// [`Error::LockPoisoned`]: crate::Error
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
    pub fn dequeue(&self) -> Result<Option<T>> {
        let guard = mutex::lock(self.slots())?;
        let mut guard = mutex::wait_while(&self.not_empty, guard, |slots| {
            !slots.closed && slots.items.is_empty()
        })?;

        let item = guard.items.pop_front();
        drop(guard);

        if item.is_some() {
            self.not_full.notify_one();
        }
        Ok(item)
    }

    /// Marks the queue closed and wakes every blocked producer and consumer.
    ///
    /// Returns `true` if this call closed the queue, `false` if it was
    /// already closed.
    pub fn close(&self) -> Result<bool> {
        let mut guard = mutex::lock(self.slots())?;
        if guard.closed {
            return Ok(false);
        }
        guard.closed = true;
        drop(guard);

        self.not_full.notify_all();
        self.not_empty.notify_all();
        Ok(true)
    }

    #[inline]
    fn slots(&self) -> &Mutex<Slots<T>> {
        &self.slots
    }

    /// The fixed maximum occupancy.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of items currently waiting to be dequeued.
    pub fn len(&self) -> Result<usize> {
        Ok(mutex::lock(self.slots())?.items.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(mutex::lock(self.slots())?.items.is_empty())
    }

    pub fn is_closed(&self) -> Result<bool> {
        Ok(mutex::lock(self.slots())?.closed)
    }
}
