//! C1 — Shift-Index Computer.
//!
//! Converts a pattern's N-dimensional points into the 1-D cyclic index
//! shifts the Elementary Pass Kernel (C3) actually walks, given the
//! row-major strides of the array being processed. This is the one place
//! in the crate where an N-dimensional point turns into a linear offset,
//! so every other component works purely in terms of `Shift`.

use crate::error::{MorphologyError, Result};
use crate::pattern::Point;

/// A single elementary shift: the linear index delta `offset` (taken
/// modulo the array length, cyclically) a pass applies to reduce one
/// array position against a neighboring one, plus the additive height
/// `increment` for non-flat (grayscale) structuring elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shift {
    pub offset: i64,
    pub increment: f64,
}

/// Computes the cyclic linear index shift of an N-dimensional point
/// relative to the origin, given the row-major strides of the array.
///
/// `strides[d]` is the number of elements spanned by one step along axis
/// `d`; `dims[d]` is the array's extent along axis `d`. The result is
/// taken modulo the array's total length so a shift that would walk off
/// one edge instead wraps to the start of the next row — the same
/// "cyclic" indexing the in-place elementary pass kernel depends on to
/// treat the whole array as one flat ring.
pub fn cyclic_to_linear(point: &[i64], dims: &[u64], strides: &[u64]) -> Result<i64> {
    if point.len() != dims.len() || point.len() != strides.len() {
        return Err(MorphologyError::DimensionMismatch {
            pattern_dims: point.len(),
            expected_a: dims.len(),
            expected_b: strides.len(),
        });
    }
    let total: i64 = dims.iter().product::<u64>() as i64;
    let mut offset: i64 = 0;
    for ((&coord, &dim), &stride) in point.iter().zip(dims.iter()).zip(strides.iter()) {
        let dim = dim as i64;
        let stride = stride as i64;
        // Reduce into [0, dim) first so a negative coordinate wraps
        // backwards through the axis rather than producing a negative
        // linear offset that `rem_euclid` on the *total* length would
        // otherwise have to untangle on its own.
        let wrapped = coord.rem_euclid(dim);
        offset += wrapped * stride;
    }
    Ok(offset.rem_euclid(total.max(1)))
}

/// Row-major strides for an array of the given per-axis extents: the
/// last axis varies fastest.
pub fn row_major_strides(dims: &[u64]) -> Vec<u64> {
    let mut strides = vec![1u64; dims.len()];
    for d in (0..dims.len().saturating_sub(1)).rev() {
        strides[d] = strides[d + 1] * dims[d + 1];
    }
    strides
}

/// Computes one `Shift` per pattern point, against an array of shape
/// `dims`. Dilation and erosion reduce in the same direction —
/// `reduce(src[(i + s_j) mod L])` — over the same shift set; only the
/// reduce op (`max` vs `min`) and, for non-flat elements, the sign of the
/// additive height differ. When `symmetric` is set (the erosion path),
/// each point's increment is negated; the offset itself is untouched
/// (expanding the duality property for a reflected pattern `P' = {-p :
/// p ∈ P}` against a negated `cyclicShift` cancels the reflection out,
/// leaving the same offset `cyclicToLinear(p, dims)` the dilation path
/// already computes).
///
/// Returns an error if any point's dimensionality disagrees with `dims`.
pub fn compute_shifts(points: &[Point], dims: &[u64], symmetric: bool) -> Result<Vec<Shift>> {
    let strides = row_major_strides(dims);
    let mut shifts = Vec::with_capacity(points.len());
    for p in points {
        if p.coords.len() != dims.len() {
            return Err(MorphologyError::DimensionMismatch {
                pattern_dims: p.coords.len(),
                expected_a: dims.len(),
                expected_b: dims.len(),
            });
        }
        let offset = cyclic_to_linear(&p.coords, dims, &strides)?;
        let increment = match p.increment {
            Some(inc) if symmetric => -inc,
            Some(inc) => inc,
            None => 0.0,
        };
        shifts.push(Shift { offset, increment });
    }
    Ok(shifts)
}

#[cfg(test)]
#[path = "shift_tests.rs"]
mod tests;
