//! Planner-wide tunables.
//!
//! Grouped into one record rather than module-level constants so a caller
//! embedding this engine can tune the small-pattern threshold or the
//! parallelism caps without forking the crate.

/// Tunable thresholds consulted by the Top Planner (C8) and Memory Budget
/// (C7). Defaults match the reference system's compile-time constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphologyConfig {
    /// Patterns with at most this many points never attempt decomposition;
    /// the naive single-pass branch is used directly.
    pub min_points_to_decompose: usize,
    /// Hard cap on the number of parallel ranges an elementary pass will be
    /// split into, regardless of what the context recommends.
    pub max_ranges_per_pass: usize,
    /// Hard cap on the number of concurrent tasks a single pass may spawn.
    pub max_tasks: usize,
    /// Below this decomposition length, the fast in-RAM memory model is
    /// preferred even if the byte budget is tight, since the bookkeeping
    /// overhead of the out-of-core model would dominate.
    pub min_decomposition_length_for_fast_memory: usize,
    /// Ceiling, in bytes, used by the Memory Budget (C7) when the caller
    /// does not supply one explicitly.
    pub default_temp_memory_bytes: u64,
}

impl MorphologyConfig {
    /// `max_ranges_per_pass` and `max_tasks` must individually and jointly
    /// fit the 31-bit budget the Top Planner (C8) imposes on range/task
    /// accounting.
    pub fn validate(&self) -> bool {
        let ranges_ok = self.max_ranges_per_pass > 0 && self.max_ranges_per_pass <= (1 << 20);
        let tasks_ok = self.max_tasks > 0 && self.max_tasks <= (1 << 18);
        let sum_ok = (self.max_ranges_per_pass as u64 + self.max_tasks as u64) < (1 << 31);
        ranges_ok && tasks_ok && sum_ok
    }
}

impl Default for MorphologyConfig {
    fn default() -> Self {
        MorphologyConfig {
            min_points_to_decompose: 4,
            max_ranges_per_pass: 1 << 20,
            max_tasks: 1 << 18,
            min_decomposition_length_for_fast_memory: 4,
            default_temp_memory_bytes: default_temp_memory_bytes(),
        }
    }
}

/// Picks a default temp-memory ceiling from the platform's available
/// physical memory where that can cheaply be determined, otherwise falls
/// back to a conservative fixed default.
fn default_temp_memory_bytes() -> u64 {
    const FALLBACK: u64 = 256 * 1024 * 1024;
    std::thread::available_parallelism()
        .map(|n| (n.get() as u64) * 64 * 1024 * 1024)
        .unwrap_or(FALLBACK)
        .max(FALLBACK)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
