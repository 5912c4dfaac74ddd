//! C3 — Elementary Pass Kernel.
//!
//! Given an ordered list of leftward cyclic shifts, reduces a source array
//! by `max` (dilation) or `min` (erosion) of its shifted copies into a
//! destination. Out-of-place passes are embarrassingly parallel; in-place
//! passes use a "right-edge gap" discipline so that concurrent range tasks
//! never read a neighbor's already-overwritten output (`SPEC_FULL.md`
//! §4.3).

use crate::context::TaskPool;
use crate::element::Element;
use crate::error::{MorphologyError, Result};
use crate::shift::Shift;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    Max,
    Min,
}

impl ReduceOp {
    #[inline]
    pub(crate) fn combine<E: Element>(self, acc: E, v: E) -> E {
        match self {
            ReduceOp::Max => acc.reduce_max(v),
            ReduceOp::Min => acc.reduce_min(v),
        }
    }

    #[inline]
    pub(crate) fn identity<E: Element>(self) -> E {
        match self {
            ReduceOp::Max => E::min_value(),
            ReduceOp::Min => E::max_value(),
        }
    }
}

fn validate_shifts(shifts: &[Shift], len: usize) -> Result<usize> {
    let mut max_offset = 0i64;
    for s in shifts {
        if s.offset < 0 || s.offset as u64 >= len as u64 {
            return Err(MorphologyError::invariant(
                "pass",
                format!("shift {} outside [0, {})", s.offset, len),
            ));
        }
        max_offset = max_offset.max(s.offset);
    }
    Ok(max_offset as usize)
}

/// Splits `total` into `range_count` nearly-equal contiguous bounds
/// `[0 = b_0, b_1, ..., b_{range_count} = total]`.
fn split_bounds(total: usize, range_count: usize) -> Vec<usize> {
    let range_count = range_count.max(1);
    let chunk = (total + range_count - 1) / range_count;
    let mut bounds = Vec::with_capacity(range_count + 1);
    let mut at = 0;
    bounds.push(0);
    while at < total {
        at = (at + chunk).min(total);
        bounds.push(at);
    }
    while bounds.len() < 2 {
        bounds.push(total);
    }
    bounds
}

/// A disjoint sub-range of a mutable slice, handed to exactly one
/// `TaskPool` range index.
///
/// # Safety invariant
/// `bounds` (built by [`split_bounds`]) partitions `[0, slice.len())` into
/// non-overlapping contiguous ranges; each `RawChunk` below is constructed
/// from one such range and is dereferenced by exactly one task index, so
/// no two chunks alias even though `run_indexed` hands every task only a
/// shared `&dyn Fn`.
struct RawChunk<E> {
    ptr: *mut E,
    len: usize,
}

unsafe impl<E: Send> Send for RawChunk<E> {}
unsafe impl<E: Send> Sync for RawChunk<E> {}

impl<E> RawChunk<E> {
    /// # Safety
    /// The caller must ensure this is called at most once concurrently per
    /// chunk and that the backing slice outlives the returned reference.
    unsafe fn as_mut_slice(&self) -> &mut [E] {
        std::slice::from_raw_parts_mut(self.ptr, self.len)
    }
}

/// Runs `f(range_index, range_slice)` once per range of `slice`, as
/// partitioned by `bounds`, through `pool`.
fn parallel_for_ranges<E, F>(slice: &mut [E], bounds: &[usize], pool: &dyn TaskPool, f: F)
where
    E: Element,
    F: Fn(usize, &mut [E]) + Sync,
{
    let base = slice.as_mut_ptr();
    let range_count = bounds.len() - 1;
    let chunks: Vec<RawChunk<E>> = (0..range_count)
        .map(|k| RawChunk {
            // SAFETY: see `RawChunk`'s invariant; `bounds` is monotonic and
            // bounded by `slice.len()`.
            ptr: unsafe { base.add(bounds[k]) },
            len: bounds[k + 1] - bounds[k],
        })
        .collect();
    let body = move |k: usize| {
        // SAFETY: index `k` is used by exactly this one call.
        let chunk = unsafe { chunks[k].as_mut_slice() };
        f(k, chunk);
    };
    pool.run_indexed(range_count, &body);
}

#[inline]
fn reduce_at<E: Element>(src: &[E], i: usize, len: usize, shifts: &[Shift], reduce: ReduceOp) -> E {
    let mut acc = reduce.identity::<E>();
    for s in shifts {
        let idx = (i + s.offset as usize) % len;
        let v = src[idx].add_increment(s.increment);
        acc = reduce.combine(acc, v);
    }
    acc
}

/// Out-of-place pass: `dest[i] = reduce(src[(i + s_j) mod L])`.
///
/// `dest` and `src` must have equal length; `range_count` ranges of `dest`
/// are computed concurrently through `pool`.
pub fn pass_out_of_place<E: Element>(
    src: &[E],
    dest: &mut [E],
    shifts: &[Shift],
    reduce: ReduceOp,
    pool: &dyn TaskPool,
    range_count: usize,
) -> Result<()> {
    let len = src.len();
    if dest.len() != len {
        return Err(MorphologyError::invariant(
            "pass",
            format!("dest length {} does not match src length {}", dest.len(), len),
        ));
    }
    validate_shifts(shifts, len)?;
    if len == 0 {
        return Ok(());
    }
    // Smaller-magnitude shifts first: for `bit` elements this shortens the
    // average chain of reads before a reduce saturates (all-true/all-false).
    let mut ordered = shifts.to_vec();
    ordered.sort_by_key(|s| (s.offset as u64).min(len as u64 - s.offset as u64));

    let bounds = split_bounds(len, range_count);
    parallel_for_ranges(dest, &bounds, pool, |k, chunk| {
        let lo = bounds[k];
        for (j, slot) in chunk.iter_mut().enumerate() {
            *slot = reduce_at(src, lo + j, len, &ordered, reduce);
        }
    });
    Ok(())
}

/// In-place pass: `buf[i]` becomes `reduce(buf_before[(i + s_j) mod L])`
/// for every `i`, computed without an auxiliary full-length copy.
///
/// `range_count` ranges are processed concurrently, each reserving a
/// "lead" snapshot of its own first `max(shifts)` elements so the
/// preceding range's trailing edge zone can read pre-pass values instead
/// of racing a neighbor's writer; the true wrap-around zone is resolved
/// afterward using a single `max(shifts)`-sized tail snapshot.
pub fn pass_in_place<E: Element>(
    buf: &mut [E],
    shifts: &[Shift],
    reduce: ReduceOp,
    pool: &dyn TaskPool,
    range_count: usize,
) -> Result<()> {
    let len = buf.len();
    let m = validate_shifts(shifts, len)?;
    if len == 0 {
        return Ok(());
    }
    let main_len = len - m;
    let bounds = split_bounds(main_len, range_count.min(main_len.max(1)));
    let ranges = bounds.len() - 1;

    // Snapshot the global wrap-around source: buf[0, m) (phase 3) and each
    // non-first range's own first `m` elements ("lead" buffers, read by the
    // preceding range's edge zone). Total auxiliary storage is `ranges * m`.
    let tail: Vec<E> = buf[0..m].to_vec();
    let mut leads: Vec<Vec<E>> = vec![Vec::new(); ranges];
    for k in 1..ranges {
        leads[k] = buf[bounds[k]..bounds[k] + m].to_vec();
    }

    let (main, wrap) = buf.split_at_mut(main_len);
    let wrap_shared: &[E] = wrap;

    parallel_for_ranges(main, &bounds, pool, |k, range| {
        let range_len = range.len();
        let body_len = range_len.saturating_sub(m);

        // Main body: every read target stays inside this range and ahead
        // of (or at) the position being written, so it is always the
        // pre-pass value.
        for j in 0..body_len {
            let mut acc = reduce.identity::<E>();
            for s in shifts {
                let target = j + s.offset as usize;
                let v = range[target].add_increment(s.increment);
                acc = reduce.combine(acc, v);
            }
            range[j] = acc;
        }

        // Edge zone: the last `m` positions of this range, whose reads may
        // reach into the next range (or, for the final range, into the
        // untouched wrap zone).
        for j in body_len..range_len {
            let mut acc = reduce.identity::<E>();
            for s in shifts {
                let local_target = j + s.offset as usize;
                let v = if local_target < range_len {
                    range[local_target]
                } else {
                    let overflow = local_target - range_len;
                    if k + 1 == ranges {
                        wrap_shared[overflow]
                    } else {
                        leads[k + 1][overflow]
                    }
                }
                .add_increment(s.increment);
                acc = reduce.combine(acc, v);
            }
            range[j] = acc;
        }
    });

    // Phase 3: the true wrap-around zone buf[main_len, len). Sequential;
    // ascending reads within this zone see pre-pass values, reads that
    // wrap past `len` come from the `tail` snapshot.
    for j in 0..m {
        let mut acc = reduce.identity::<E>();
        for s in shifts {
            let local_target = j + s.offset as usize;
            let v = if local_target < m {
                wrap[local_target]
            } else {
                tail[local_target - m]
            }
            .add_increment(s.increment);
            acc = reduce.combine(acc, v);
        }
        wrap[j] = acc;
    }
    Ok(())
}

#[cfg(test)]
#[path = "pass_tests.rs"]
mod tests;
