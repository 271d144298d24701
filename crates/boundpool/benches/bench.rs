use boundpool::{BoundedQueue, PoolConfig, WorkerPool};
use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::thread::scope;
use std::time::Instant;

// Number of items pushed through per benchmark iteration.
const TOTAL_ITEMS: usize = 4096;

/// Single producer, single consumer hand-off through the raw queue.
fn bench_queue_handoff(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue/handoff");
    group.throughput(Throughput::Elements(TOTAL_ITEMS as u64));

    for capacity in [1, 4, 64] {
        group.bench_function(format!("capacity/{capacity}"), |b| {
            b.iter_custom(|iters| {
                let start = Instant::now();
                for _ in 0..iters {
                    let queue = BoundedQueue::new(capacity).unwrap();
                    scope(|s| {
                        s.spawn(|| {
                            while let Some(item) = queue.dequeue().unwrap() {
                                black_box(item);
                            }
                        });
                        for i in 0..TOTAL_ITEMS {
                            queue.enqueue(i).unwrap();
                        }
                        queue.close().unwrap();
                    });
                }
                start.elapsed()
            });
        });
    }

    group.finish();
}

/// End-to-end pool throughput: submit, run a trivial body, drain and join.
fn bench_pool_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool/throughput");
    group.throughput(Throughput::Elements(TOTAL_ITEMS as u64));

    let max_threads = num_cpus::get().max(1);
    let mut thread_counts = vec![1, 2, 4, max_threads];
    thread_counts.sort_unstable();
    thread_counts.dedup();

    for threads in thread_counts {
        group.bench_function(format!("threads/{threads}"), |b| {
            b.iter_custom(|iters| {
                let start = Instant::now();
                for _ in 0..iters {
                    let config = PoolConfig::new(threads).with_capacity(64);
                    let pool = WorkerPool::new(config, |item: usize, worker_id: usize| {
                        black_box(item.wrapping_mul(item) ^ worker_id);
                    })
                    .unwrap();
                    for i in 0..TOTAL_ITEMS {
                        pool.submit(i).unwrap();
                    }
                    pool.shutdown().unwrap();
                }
                start.elapsed()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_queue_handoff, bench_pool_throughput);
criterion_main!(benches);
