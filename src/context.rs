//! The Context collaborator (`spec.md` §6): progress reporting, subtask
//! scoping, parallelism hints, cancellation, and a thread pool handle.
//!
//! The core never spawns or joins threads on its own — it only asks the
//! context for a recommended range/task count and hands the context a
//! range-indexed closure to run. That keeps the scheduling policy (and the
//! actual pool implementation) entirely outside the algorithmic core, per
//! `spec.md` §1's list of external collaborators.

/// A bounded pool capable of running `count` independent range indices,
/// sequentially or concurrently, and returning only once all of them have
/// completed. This is the minimal contract the Elementary Pass Kernel (C3)
/// needs from "the thread pool" of `spec.md` §5/§6.
pub trait TaskPool: Send + Sync {
    /// Runs `body(k)` for every `k` in `0..count`, observing `body`'s
    /// effects as complete before returning. Implementations are free to
    /// run these concurrently as long as the happens-before-on-return
    /// guarantee holds.
    fn run_indexed(&self, count: usize, body: &(dyn Fn(usize) + Sync));
}

/// Runs every index on the calling thread, in order. Suitable for small
/// matrices, single-threaded hosts, and as the context's default.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialPool;

impl TaskPool for SequentialPool {
    fn run_indexed(&self, count: usize, body: &(dyn Fn(usize) + Sync)) {
        for k in 0..count {
            body(k);
        }
    }
}

/// Spawns one scoped OS thread per range and joins them before returning.
/// A reference implementation of "the thread pool" for tests and
/// benchmarks; production embedders are expected to supply their own
/// (e.g. backed by a persistent worker pool) via the `Context` trait.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdThreadPool;

impl TaskPool for StdThreadPool {
    fn run_indexed(&self, count: usize, body: &(dyn Fn(usize) + Sync)) {
        if count <= 1 {
            if count == 1 {
                body(0);
            }
            return;
        }
        std::thread::scope(|scope| {
            for k in 0..count {
                scope.spawn(move || body(k));
            }
        });
    }
}

/// Progress reporting, subtask scoping, parallelism hints, and
/// cancellation, as specified by `spec.md` §5/§6.
pub trait Context: Send + Sync {
    /// Reports fractional progress (`0.0..=1.0`) of the current operation.
    fn report_progress(&self, _fraction: f64) {}

    /// Returns a context scoped to the sub-range `[from, to)` of the
    /// current operation's overall progress range, used when a planner
    /// delegates to a recursive sub-dilation/erosion.
    fn part(&self, _from: f64, _to: f64) -> Box<dyn Context> {
        Box::new(NullContext::new())
    }

    /// Recommended number of parallel ranges for a pass over `length`
    /// elements. The Top Planner (C8) clamps this against
    /// `MorphologyConfig::max_ranges_per_pass`.
    fn recommended_range_count(&self, length: u64) -> usize {
        let cpus = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        if length < 4096 {
            1
        } else {
            cpus
        }
    }

    /// Recommended number of concurrent tasks, independent of range count
    /// (a context may want fewer live tasks than ranges, batching several
    /// ranges per task).
    fn recommended_task_count(&self, length: u64) -> usize {
        self.recommended_range_count(length)
    }

    /// Polled between passes; once set, the current call unwinds with
    /// `MorphologyError::Cancelled`.
    fn is_cancelled(&self) -> bool {
        false
    }

    /// The thread pool this context makes available to the core.
    fn task_pool(&self) -> &dyn TaskPool;
}

/// A `Context` that reports nothing, never cancels, and runs everything on
/// the calling thread. The default for callers that don't need any of
/// this machinery.
pub struct NullContext {
    pool: SequentialPool,
}

impl NullContext {
    pub fn new() -> Self {
        NullContext {
            pool: SequentialPool,
        }
    }
}

impl Default for NullContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Context for NullContext {
    fn task_pool(&self) -> &dyn TaskPool {
        &self.pool
    }
}

/// A `Context` backed by `StdThreadPool`, for tests and benchmarks that
/// want to exercise the parallel range-decomposition path.
pub struct ThreadedContext {
    pool: StdThreadPool,
}

impl ThreadedContext {
    pub fn new() -> Self {
        ThreadedContext {
            pool: StdThreadPool,
        }
    }
}

impl Default for ThreadedContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Context for ThreadedContext {
    fn task_pool(&self) -> &dyn TaskPool {
        &self.pool
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
