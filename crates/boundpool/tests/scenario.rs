use boundpool::{PoolConfig, PoolState, WorkerPool};
use std::collections::HashSet;
use std::sync::{Arc, Condvar, Mutex, mpsc};
use std::thread;
use std::time::Duration;

/// Holds workers inside their task body until opened.
#[derive(Default)]
struct Gate {
    open: Mutex<bool>,
    cv: Condvar,
}

impl Gate {
    fn wait(&self) {
        let open = self.open.lock().unwrap();
        let _open = self.cv.wait_while(open, |open| !*open).unwrap();
    }

    fn open(&self) {
        *self.open.lock().unwrap() = true;
        self.cv.notify_all();
    }
}

// Items 1..=5 are real work; 0 is a placeholder each worker holds on to while
// the gate is closed so the queue itself is observable.
const PARKED: u32 = 0;

#[test]
fn capacity_four_two_workers_five_items() {
    let gate = Arc::new(Gate::default());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let (parked_tx, parked_rx) = mpsc::channel();

    let pool = {
        let gate = Arc::clone(&gate);
        let seen = Arc::clone(&seen);
        let parked_tx = Mutex::new(parked_tx);
        WorkerPool::new(
            PoolConfig::new(2).with_capacity(4),
            move |item: u32, _worker_id: usize| {
                if item == PARKED {
                    parked_tx.lock().unwrap().send(()).unwrap();
                    gate.wait();
                } else {
                    seen.lock().unwrap().push(item);
                }
            },
        )
        .unwrap()
    };
    let pool = Arc::new(pool);

    pool.submit(PARKED).unwrap();
    pool.submit(PARKED).unwrap();
    for _ in 0..2 {
        parked_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    }
    assert_eq!(pool.queued().unwrap(), 0);

    // Room for four: none of these block.
    for item in 1..=4 {
        pool.submit(item).unwrap();
    }
    assert_eq!(pool.queued().unwrap(), 4);

    let (done_tx, done_rx) = mpsc::channel();
    let producer = {
        let pool = Arc::clone(&pool);
        thread::spawn(move || {
            pool.submit(5).unwrap();
            done_tx.send(()).unwrap();
        })
    };

    assert!(
        done_rx.recv_timeout(Duration::from_millis(150)).is_err(),
        "fifth submission should block on a full queue"
    );
    assert_eq!(pool.queued().unwrap(), 4);

    gate.open();
    done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    producer.join().unwrap();

    pool.shutdown().unwrap();
    assert_eq!(pool.state(), PoolState::Stopped);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 5);
    let distinct: HashSet<_> = seen.iter().copied().collect();
    assert_eq!(distinct, (1..=5).collect());
    assert_eq!(pool.stats().completed, 7);
}
