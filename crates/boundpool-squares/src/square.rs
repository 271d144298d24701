use core::time::Duration;
use std::io::Write;
use std::sync::Mutex;
use std::thread;

/// Task body that squares a number after a simulated delay and writes one
/// line per result.
pub struct Squarer<W> {
    delay: Duration,
    out: Mutex<W>,
}

impl<W: Write + Send + 'static> Squarer<W> {
    pub fn new(delay: Duration, out: W) -> Self {
        Self {
            delay,
            out: Mutex::new(out),
        }
    }

    pub fn compute(&self, num: i64, worker_id: usize) {
        tracing::debug!("Working from worker {worker_id}...");
        thread::sleep(self.delay);

        let line = match num.checked_mul(num) {
            Some(square) => format!("Square of {num} is {square} (worker {worker_id})"),
            None => format!("Square of {num} overflows i64 (worker {worker_id})"),
        };

        // A poisoned writer only means an earlier write panicked mid-line.
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            tracing::warn!("Failed to write result for {num}: {e}");
        }
    }
}
