use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::{
    BoundedQueue, Error, Result,
    pool::{TaskBody, state::Counters},
};

/// A single pool thread and the id it reports to the task body.
#[derive(Debug)]
pub(crate) struct Worker {
    pub(crate) id: usize,
    pub(crate) thread: JoinHandle<()>,
}

impl Worker {
    /// Spawns worker `id` as a named OS thread running [`worker_loop`].
    pub(crate) fn spawn<T, B>(
        id: usize,
        thread_name: &str,
        queue: Arc<BoundedQueue<T>>,
        body: Arc<B>,
        counters: Arc<Counters>,
    ) -> Result<Self>
    where
        T: Send + 'static,
        B: TaskBody<T>,
    {
        let thread = thread::Builder::new()
            .name(format!("{thread_name}-{id}"))
            .spawn(move || worker_loop(id, &queue, &*body, &counters))
            .map_err(|source| Error::Spawn {
                worker_id: id,
                source,
            })?;

        Ok(Self { id, thread })
    }
}

/// Takes items off `queue` and runs `body` on each until the queue reports
/// closed and empty.
///
/// The queue lock is released before `body` runs. A panicking body is caught
/// here so the worker keeps serving and the pool keeps its full width.
fn worker_loop<T, B>(worker_id: usize, queue: &BoundedQueue<T>, body: &B, counters: &Counters)
where
    B: TaskBody<T>,
{
    #[cfg(feature = "tracing")]
    tracing::trace!("Worker {worker_id} started");

    loop {
        let item = match queue.dequeue() {
            Ok(Some(item)) => item,
            Ok(None) => break,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::error!("Worker {worker_id} lost access to the queue: {_e}");
                break;
            }
        };

        match panic::catch_unwind(AssertUnwindSafe(|| body.run(item, worker_id))) {
            Ok(()) => counters.record_completed(),
            Err(_payload) => {
                counters.record_panicked();
                #[cfg(feature = "tracing")]
                tracing::error!(
                    "Worker {worker_id} task panicked: {}",
                    panic_message(&*_payload)
                );
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!("Worker {worker_id} stopped");
}

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "<non-string panic payload>"
    }
}
