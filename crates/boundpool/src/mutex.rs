//! Lock primitives used by the queue and the pool.
//!
//! With the `parking-lot` feature the crate uses [`parking_lot`]'s mutex and
//! condition variable, which never poison. Otherwise it falls back to
//! [`std::sync`], and a poisoned lock surfaces as [`Error::LockPoisoned`].
//!
//! [`Error::LockPoisoned`]: crate::Error

#[cfg(feature = "parking-lot")]
pub(crate) use parking_lot::{Condvar, Mutex, MutexGuard};
#[cfg(not(feature = "parking-lot"))]
pub(crate) use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::Result;

/// Acquires `mutex`, mapping poisoning into the crate error.
#[inline]
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    #[cfg(feature = "parking-lot")]
    {
        Ok(mutex.lock())
    }
    #[cfg(not(feature = "parking-lot"))]
    {
        Ok(mutex.lock()?)
    }
}

/// Blocks on `condvar` for as long as `condition` holds.
///
/// The predicate is re-evaluated under the lock after every wakeup, so
/// spurious wakeups and notifications meant for a condition that no longer
/// holds are absorbed here rather than by the caller.
#[inline]
pub(crate) fn wait_while<'a, T, F>(
    condvar: &Condvar,
    guard: MutexGuard<'a, T>,
    condition: F,
) -> Result<MutexGuard<'a, T>>
where
    F: FnMut(&mut T) -> bool,
{
    #[cfg(feature = "parking-lot")]
    {
        let mut guard = guard;
        condvar.wait_while(&mut guard, condition);
        Ok(guard)
    }
    #[cfg(not(feature = "parking-lot"))]
    {
        Ok(condvar.wait_while(guard, condition)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};

    fn panic_while_holding(mutex: &Mutex<u32>) {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = lock(mutex).unwrap();
            panic!("held across a panic");
        }));
        assert!(result.is_err());
    }

    #[cfg(not(feature = "parking-lot"))]
    #[test]
    fn poisoned_lock_maps_to_lock_poisoned() {
        let mutex = Mutex::new(0);
        panic_while_holding(&mutex);

        assert!(matches!(lock(&mutex), Err(crate::Error::LockPoisoned)));
    }

    #[cfg(feature = "parking-lot")]
    #[test]
    fn lock_survives_a_panicking_holder() {
        let mutex = Mutex::new(7);
        panic_while_holding(&mutex);

        assert_eq!(*lock(&mutex).unwrap(), 7);
    }
}
