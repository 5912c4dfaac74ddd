use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn sequential_pool_runs_every_index_in_order() {
    let pool = SequentialPool;
    let seen = std::sync::Mutex::new(Vec::new());
    pool.run_indexed(5, &|k| seen.lock().unwrap().push(k));
    assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn std_thread_pool_runs_every_index() {
    let pool = StdThreadPool;
    let counter = AtomicUsize::new(0);
    pool.run_indexed(8, &|_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(counter.load(Ordering::SeqCst), 8);
}

#[test]
fn std_thread_pool_handles_zero_and_one() {
    let pool = StdThreadPool;
    pool.run_indexed(0, &|_| panic!("should not run"));
    let counter = AtomicUsize::new(0);
    pool.run_indexed(1, &|k| {
        assert_eq!(k, 0);
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn null_context_never_cancels() {
    let ctx = NullContext::new();
    assert!(!ctx.is_cancelled());
    ctx.report_progress(0.5);
}
