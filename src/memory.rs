//! C7 — Memory Budget.
//!
//! Chooses between the in-RAM "fast" model and a caller-supplied
//! out-of-core model based on an explicit byte ceiling, the source
//! matrix's footprint, and the number of work buffers a plan needs.

/// Which storage strategy the Top Planner (C8) should request work
/// buffers from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryModel {
    /// Plain in-RAM allocation (`VecArray`).
    Fast,
    /// The caller-supplied, possibly disk-backed, context model.
    Context,
}

/// Chooses a memory model for a plan needing `work_buffers` temporaries of
/// `element_footprint_bytes * length` bytes each, plus `buffer_bytes` of
/// kernel scratch (the in-place pass's tail/lead snapshots), against a
/// `temp_memory_ceiling_bytes` budget.
///
/// Returns [`MemoryModel::Context`] if the footprint computation would
/// overflow, rather than risk silently picking a model that can't back
/// the allocation it promised (`SPEC_FULL.md` §4.7's overflow guard).
pub fn choose_memory_model(
    work_buffers: u64,
    element_footprint_bytes: u64,
    length: u64,
    buffer_bytes: u64,
    temp_memory_ceiling_bytes: u64,
) -> MemoryModel {
    let per_buffer = match element_footprint_bytes.checked_mul(length) {
        Some(v) => v,
        None => return MemoryModel::Context,
    };
    let total_buffers = match per_buffer.checked_mul(work_buffers) {
        Some(v) => v,
        None => return MemoryModel::Context,
    };
    let total = match total_buffers.checked_add(buffer_bytes) {
        Some(v) => v,
        None => return MemoryModel::Context,
    };
    if total <= temp_memory_ceiling_bytes {
        MemoryModel::Fast
    } else {
        MemoryModel::Context
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
