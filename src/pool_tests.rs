use super::*;

#[test]
fn acquire_returns_zeroed_buffer_of_requested_length() {
    let pool: ArrayPool<i32> = ArrayPool::new(2);
    let buf = pool.acquire(5);
    assert_eq!(buf.len(), 5);
    for i in 0..5 {
        assert_eq!(buf.get(i), 0);
    }
}

#[test]
fn dropped_buffer_returns_to_free_list() {
    let pool: ArrayPool<i32> = ArrayPool::new(2);
    assert_eq!(pool.free_count(), 0);
    {
        let _buf = pool.acquire(4);
        assert_eq!(pool.free_count(), 0);
    }
    assert_eq!(pool.free_count(), 1);
}

#[test]
fn free_list_is_capped_at_capacity() {
    let pool: ArrayPool<i32> = ArrayPool::new(1);
    {
        let _a = pool.acquire(4);
        let _b = pool.acquire(4);
    }
    assert_eq!(pool.free_count(), 1);
}

#[test]
fn mutated_buffer_is_reusable_after_release() {
    let pool: ArrayPool<i32> = ArrayPool::new(1);
    {
        let mut buf = pool.acquire(3);
        buf.set(0, 42);
    }
    let buf = pool.acquire(3);
    // Reused buffers are not re-zeroed; callers that need a clean buffer
    // are responsible for writing every element before reading it back,
    // exactly as the Minkowski Planner's chained passes do.
    assert_eq!(buf.get(0), 42);
}

#[test]
fn different_length_request_does_not_reuse_mismatched_buffer() {
    let pool: ArrayPool<i32> = ArrayPool::new(2);
    {
        let _buf = pool.acquire(3);
    }
    assert_eq!(pool.free_count(), 1);
    let buf = pool.acquire(7);
    assert_eq!(buf.len(), 7);
    // The length-3 buffer is still sitting idle; a length-7 request had to
    // allocate fresh rather than reuse it.
    assert_eq!(pool.free_count(), 1);
}
