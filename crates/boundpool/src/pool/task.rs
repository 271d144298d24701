/// The work every pool worker runs on each item it dequeues.
///
/// A single task body is fixed when the pool is built and shared by all
/// workers, so it is called concurrently from up to `num_threads` threads.
/// Any state it touches is its own to synchronize. It never runs while the
/// pool holds a lock.
///
/// Closures of the form `Fn(T, usize)` implement this trait.
///
/// # Example
/// ```
/// use boundpool::TaskBody;
///
/// fn run_one<B: TaskBody<u64>>(body: &B) {
///     body.run(3, 1);
/// }
///
/// run_one(&|n: u64, worker_id: usize| println!("worker {worker_id}: {}", n * n));
/// ```
pub trait TaskBody<T>: Send + Sync + 'static {
    /// Processes `item` on the worker identified by `worker_id` (in `1..=N`).
    fn run(&self, item: T, worker_id: usize);
}

impl<T, F> TaskBody<T> for F
where
    F: Fn(T, usize) + Send + Sync + 'static,
{
    #[inline]
    fn run(&self, item: T, worker_id: usize) {
        self(item, worker_id);
    }
}
