//! C2 — Minkowski Shift Optimizer.
//!
//! Takes the per-summand shift lists C1 produced for a Minkowski
//! decomposition and normalizes them: singleton summands are folded
//! directly into a running corrective shift instead of paying for their
//! own elementary pass, and multi-point summands are re-centered so their
//! smallest shift is zero, shrinking the in-place kernel's tail buffer
//! (`pass.rs`) to the summand's own span rather than its absolute
//! position in the array.

use crate::shift::Shift;

/// The result of compacting a Minkowski decomposition's shift lists:
/// every multi-point summand, re-centered, followed — if nonzero — by a
/// single corrective shift gathering every singleton summand and every
/// multi-point summand's subtracted origin.
#[derive(Debug, Clone, PartialEq)]
pub struct CompactedShifts {
    /// One compacted, re-centered shift list per surviving multi-point
    /// summand, in the original summand order.
    pub summands: Vec<Vec<Shift>>,
    /// The accumulated correction, if any of its offset or increment is
    /// nonzero. The Minkowski Planner (C4) applies this as the final
    /// out-of-place pass.
    pub correction: Option<Shift>,
}

fn add_offset(total: i64, delta: i64, length: u64) -> i64 {
    let length = length.max(1) as i64;
    (total + delta).rem_euclid(length)
}

/// Compacts one Minkowski summand's shift list and folds it into
/// `correction` if it has fewer than two points; returns `Some` with the
/// re-centered list otherwise.
fn compact_one(mut shifts: Vec<Shift>, length: u64, correction_offset: &mut i64, correction_increment: &mut f64) -> Option<Vec<Shift>> {
    if shifts.is_empty() {
        return None;
    }
    if shifts.len() == 1 {
        let s = shifts[0];
        *correction_offset = add_offset(*correction_offset, s.offset, length);
        *correction_increment += s.increment;
        return None;
    }
    shifts.sort_by_key(|s| s.offset);
    let origin = shifts[0].offset;
    if origin != 0 {
        *correction_offset = add_offset(*correction_offset, origin, length);
        for s in shifts.iter_mut() {
            s.offset = add_offset(s.offset, -origin, length);
        }
    }
    Some(shifts)
}

/// Compacts every Minkowski summand's shift list against an array of
/// length `length`.
pub fn optimize(summand_shifts: Vec<Vec<Shift>>, length: u64) -> CompactedShifts {
    let mut correction_offset = 0i64;
    let mut correction_increment = 0.0f64;
    let mut summands = Vec::with_capacity(summand_shifts.len());
    for shifts in summand_shifts {
        if let Some(compacted) = compact_one(shifts, length, &mut correction_offset, &mut correction_increment) {
            summands.push(compacted);
        }
    }
    let correction = if correction_offset != 0 || correction_increment != 0.0 {
        Some(Shift {
            offset: correction_offset,
            increment: correction_increment,
        })
    } else {
        None
    };
    CompactedShifts {
        summands,
        correction,
    }
}

#[cfg(test)]
#[path = "minkowski_opt_tests.rs"]
mod tests;
