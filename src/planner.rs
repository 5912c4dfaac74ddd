//! C8 — Top Planner, C4 — Minkowski Planner, and C6 — Union-Decomposition
//! Planner.
//!
//! These three components are mutually recursive in the reference system
//! (the Minkowski Planner folds "complex" summands by calling back into
//! the Top Planner; the Union Planner calls back into the Top Planner for
//! every segment group's base dilation/erosion). Design Notes §9 suggests
//! an explicit work-stack to bound recursion depth; this crate instead
//! keeps plain recursive calls; Chapter "Decisions" in `DESIGN.md` records
//! why that trade is acceptable here.

use crate::config::MorphologyConfig;
use crate::context::Context;
use crate::element::Element;
use crate::error::{MorphologyError, Result};
use crate::memory;
use crate::minkowski_opt;
use crate::pass::{self, ReduceOp};
use crate::pattern::Pattern;
use crate::pool::ArrayPool;
use crate::shift::{self, Shift};
use crate::union_compactor;

fn validate(dims: &[u64], pattern: &Pattern) -> Result<()> {
    let ndim = dims.len();
    let pdim = pattern.dim_count();
    if pdim != ndim && pdim != ndim + 1 {
        return Err(MorphologyError::DimensionMismatch {
            pattern_dims: pdim,
            expected_a: ndim,
            expected_b: ndim + 1,
        });
    }
    Ok(())
}

const MAX_LEN: u64 = (1u64 << 62) - 1;

fn total_len(dims: &[u64]) -> Result<u64> {
    let mut total: u128 = 1;
    for &d in dims {
        total = total
            .checked_mul(d as u128)
            .ok_or(MorphologyError::TooLargeArray {
                length: total,
                max: MAX_LEN,
            })?;
    }
    if total > MAX_LEN as u128 {
        return Err(MorphologyError::TooLargeArray {
            length: total,
            max: MAX_LEN,
        });
    }
    Ok(total as u64)
}

/// Dilates `src` (shape `dims`) by `pattern`, allocating a fresh
/// destination.
pub fn dilation<E: Element>(
    src: &[E],
    dims: &[u64],
    pattern: &Pattern,
    ctx: &dyn Context,
    config: &MorphologyConfig,
) -> Result<Vec<E>> {
    run_to_owned(ReduceOp::Max, src, dims, pattern, ctx, config)
}

/// Erodes `src` (shape `dims`) by `pattern`, allocating a fresh
/// destination.
pub fn erosion<E: Element>(
    src: &[E],
    dims: &[u64],
    pattern: &Pattern,
    ctx: &dyn Context,
    config: &MorphologyConfig,
) -> Result<Vec<E>> {
    run_to_owned(ReduceOp::Min, src, dims, pattern, ctx, config)
}

/// Dilates `src` into a caller-supplied `dest` of matching shape.
pub fn dilation_into<E: Element>(
    dest: &mut [E],
    src: &[E],
    dims: &[u64],
    pattern: &Pattern,
    ctx: &dyn Context,
    config: &MorphologyConfig,
) -> Result<()> {
    run_into(ReduceOp::Max, dest, src, dims, pattern, ctx, config)
}

/// Erodes `src` into a caller-supplied `dest` of matching shape.
pub fn erosion_into<E: Element>(
    dest: &mut [E],
    src: &[E],
    dims: &[u64],
    pattern: &Pattern,
    ctx: &dyn Context,
    config: &MorphologyConfig,
) -> Result<()> {
    run_into(ReduceOp::Min, dest, src, dims, pattern, ctx, config)
}

fn run_to_owned<E: Element>(
    op: ReduceOp,
    src: &[E],
    dims: &[u64],
    pattern: &Pattern,
    ctx: &dyn Context,
    config: &MorphologyConfig,
) -> Result<Vec<E>> {
    validate(dims, pattern)?;
    let len = total_len(dims)?;
    if src.len() as u64 != len {
        return Err(MorphologyError::invariant(
            "planner",
            format!("src length {} does not match shape product {}", src.len(), len),
        ));
    }
    log_memory_model::<E>(len, config);
    let mut dest = vec![E::zero(); len as usize];
    let pool = ArrayPool::new(TOP_LEVEL_POOL_CAPACITY);
    execute(op, src, &mut dest, dims, pattern, ctx, config, &pool)?;
    Ok(dest)
}

fn run_into<E: Element>(
    op: ReduceOp,
    dest: &mut [E],
    src: &[E],
    dims: &[u64],
    pattern: &Pattern,
    ctx: &dyn Context,
    config: &MorphologyConfig,
) -> Result<()> {
    validate(dims, pattern)?;
    let len = total_len(dims)?;
    if src.len() as u64 != len {
        return Err(MorphologyError::invariant(
            "planner",
            format!("src length {} does not match shape product {}", src.len(), len),
        ));
    }
    if dest.len() != src.len() {
        return Err(MorphologyError::SizeMismatch {
            src_shape: dims.to_vec(),
            dest_shape: vec![dest.len() as u64],
        });
    }
    log_memory_model::<E>(len, config);
    let pool = ArrayPool::new(TOP_LEVEL_POOL_CAPACITY);
    execute(op, src, dest, dims, pattern, ctx, config, &pool)
}

/// Logs C7's memory-model recommendation for a plan over `len` elements.
/// This crate's `Context` (`context.rs`) carries no out-of-core array
/// collaborator to switch into, so the choice is diagnostic only here;
/// `DESIGN.md` records that reduction.
fn log_memory_model<E>(len: u64, config: &MorphologyConfig) {
    let model = memory::choose_memory_model(
        TOP_LEVEL_POOL_CAPACITY as u64,
        std::mem::size_of::<E>() as u64,
        len,
        0,
        config.default_temp_memory_bytes,
    );
    log::debug!("memory model for length {}: {:?}", len, model);
}

/// Up to 3 pooled work buffers of length `L`: one for the Minkowski
/// Planner's complex-summand fold, one or two more for the
/// Union-Decomposition Planner's running "temp-for-morph" (`SPEC_FULL.md`
/// §4.7/§4.8).
const TOP_LEVEL_POOL_CAPACITY: usize = 3;

/// C8: decides among the naive, Minkowski-only, and union-of-Minkowski
/// branches and dispatches; also the re-entry point C4 and C6 recurse
/// into for complex summands and per-group base dilations.
fn execute<E: Element>(
    op: ReduceOp,
    src: &[E],
    dest: &mut [E],
    dims: &[u64],
    pattern: &Pattern,
    ctx: &dyn Context,
    config: &MorphologyConfig,
    pool: &ArrayPool<E>,
) -> Result<()> {
    if dest.is_empty() {
        return Ok(());
    }
    if ctx.is_cancelled() {
        return Err(MorphologyError::Cancelled);
    }

    let threshold = config.min_points_to_decompose;
    if pattern.point_count() <= threshold || !pattern.is_surely_integer() {
        log::trace!(
            "naive branch: {} points (threshold {}), integer={}",
            pattern.point_count(),
            threshold,
            pattern.is_surely_integer()
        );
        return run_naive(op, src, dest, dims, pattern, ctx, config);
    }

    let mink = pattern.minkowski_decomposition(threshold);
    if mink.len() >= 2 {
        log::debug!("minkowski branch: {} summands", mink.len());
        return run_minkowski(op, src, dest, dims, &mink, ctx, config, pool);
    }

    let unions = pattern.all_union_decompositions(threshold);
    if let Some(chosen) = unions.into_iter().find(|u| u.len() >= 2) {
        log::debug!("union branch: {} groups", chosen.len());
        return run_union(op, src, dest, dims, &chosen, ctx, config, pool);
    }

    // Neither decomposition helped: the always-valid single-summand
    // fallback (`spec.md` §3's invariant).
    log::trace!("naive fallback: no decomposition found");
    run_naive(op, src, dest, dims, pattern, ctx, config)
}

fn range_count_for<E>(dest: &[E], ctx: &dyn Context, config: &MorphologyConfig) -> usize {
    ctx.recommended_range_count(dest.len() as u64)
        .min(config.max_ranges_per_pass)
        .max(1)
}

fn run_naive<E: Element>(
    op: ReduceOp,
    src: &[E],
    dest: &mut [E],
    dims: &[u64],
    pattern: &Pattern,
    ctx: &dyn Context,
    config: &MorphologyConfig,
) -> Result<()> {
    let symmetric = matches!(op, ReduceOp::Min);
    let shifts = shift::compute_shifts(pattern.points(), dims, symmetric)?;
    let range_count = range_count_for(dest, ctx, config);
    pass::pass_out_of_place(src, dest, &shifts, op, ctx.task_pool(), range_count)
}

/// C4: partitions `summands` into "good" (chain of elementary passes) and
/// "complex" (themselves admit a further union decomposition) groups,
/// executes the good group as one chained sequence, then folds each
/// complex summand by recursing back into [`execute`].
fn run_minkowski<E: Element>(
    op: ReduceOp,
    src: &[E],
    dest: &mut [E],
    dims: &[u64],
    summands: &[Pattern],
    ctx: &dyn Context,
    config: &MorphologyConfig,
    pool: &ArrayPool<E>,
) -> Result<()> {
    let threshold = config.min_points_to_decompose;
    let mut good = Vec::new();
    let mut complex = Vec::new();
    for p in summands {
        let admits_union =
            p.point_count() > threshold && p.all_union_decompositions(threshold).iter().any(|u| u.len() >= 2);
        if admits_union {
            complex.push(p.clone());
        } else {
            good.push(p.clone());
        }
    }

    if !good.is_empty() {
        run_good_group(op, src, dest, dims, &good, ctx, config)?;
    } else {
        dest.copy_from_slice(src);
    }

    for p in &complex {
        if ctx.is_cancelled() {
            return Err(MorphologyError::Cancelled);
        }
        let len = dest.len() as u64;
        let mut scratch = pool.acquire(len);
        execute(op, dest, scratch.as_mut_slice(), dims, p, ctx, config, pool)?;
        dest.copy_from_slice(scratch.as_slice());
    }
    Ok(())
}

/// The "good" group's chained-pass execution: the corrective shift (or,
/// absent one, the last compacted summand) runs first, out-of-place from
/// `src`; every remaining compacted summand then runs in-place, in order
/// (Minkowski sum is commutative, so any order of the remaining summands
/// is valid).
fn run_good_group<E: Element>(
    op: ReduceOp,
    src: &[E],
    dest: &mut [E],
    dims: &[u64],
    good: &[Pattern],
    ctx: &dyn Context,
    config: &MorphologyConfig,
) -> Result<()> {
    let symmetric = matches!(op, ReduceOp::Min);
    let len = dest.len() as u64;
    let mut shift_lists = Vec::with_capacity(good.len());
    for p in good {
        shift_lists.push(shift::compute_shifts(p.points(), dims, symmetric)?);
    }
    let compacted = minkowski_opt::optimize(shift_lists, len);
    let range_count = range_count_for(dest, ctx, config);
    let task_pool = ctx.task_pool();

    let mut remaining = compacted.summands;
    let first_list = match compacted.correction {
        Some(correction) => vec![correction],
        None => remaining.pop().unwrap_or_else(|| {
            vec![Shift {
                offset: 0,
                increment: 0.0,
            }]
        }),
    };
    pass::pass_out_of_place(src, dest, &first_list, op, task_pool, range_count)?;

    for list in remaining {
        if ctx.is_cancelled() {
            return Err(MorphologyError::Cancelled);
        }
        pass::pass_in_place(dest, &list, op, task_pool, range_count)?;
    }
    Ok(())
}

/// C6: walks the Union Compactor's `MinkowskiPair`s, maintaining a running
/// "temp-for-morph" (the dilation/erosion of `src` by the current
/// segment group) that is either extended via a small Minkowski increment
/// or recomputed from scratch, folding each group's translated copies
/// into `dest` via max/min.
fn run_union<E: Element>(
    op: ReduceOp,
    src: &[E],
    dest: &mut [E],
    dims: &[u64],
    union_list: &[Pattern],
    ctx: &dyn Context,
    config: &MorphologyConfig,
    pool: &ArrayPool<E>,
) -> Result<()> {
    let pairs = union_compactor::compact(union_list);
    let len = dest.len() as u64;
    let mut temp_for_morph = None;
    let mut first = true;

    for pair in &pairs {
        if ctx.is_cancelled() {
            return Err(MorphologyError::Cancelled);
        }
        if let Some(increments) = &pair.increment_from_previous {
            let tfm = temp_for_morph
                .as_mut()
                .expect("increment_from_previous implies an existing temp-for-morph");
            for inc_pattern in increments {
                let mut scratch = pool.acquire(len);
                execute(op, tfm.as_slice(), scratch.as_mut_slice(), dims, inc_pattern, ctx, config, pool)?;
                tfm.as_mut_slice().copy_from_slice(scratch.as_slice());
            }
        } else {
            let mut scratch = pool.acquire(len);
            execute(op, src, scratch.as_mut_slice(), dims, &pair.main, ctx, config, pool)?;
            temp_for_morph = Some(scratch);
        }

        let tfm = temp_for_morph
            .as_ref()
            .expect("set by either branch above before first use");
        fold_shifted_into_accumulator(dest, tfm.as_slice(), &pair.shifts, dims, op, first)?;
        first = false;
    }

    if pairs.is_empty() {
        dest.copy_from_slice(src);
    }
    Ok(())
}

/// Folds translated copies of `source` (by each vector in `translations`)
/// into `accumulator` via `op`. The first call for a given `accumulator`
/// must pass `overwrite = true` (there is no prior contribution to merge
/// with yet).
fn fold_shifted_into_accumulator<E: Element>(
    accumulator: &mut [E],
    source: &[E],
    translations: &[Vec<i64>],
    dims: &[u64],
    op: ReduceOp,
    overwrite: bool,
) -> Result<()> {
    let strides = shift::row_major_strides(dims);
    let len = accumulator.len();
    let mut offsets = Vec::with_capacity(translations.len());
    for t in translations {
        offsets.push(shift::cyclic_to_linear(t, dims, &strides)? as usize);
    }
    for i in 0..len {
        let mut acc = if overwrite {
            op.identity::<E>()
        } else {
            accumulator[i]
        };
        for &off in &offsets {
            let idx = (i + off) % len.max(1);
            acc = op.combine(acc, source[idx]);
        }
        accumulator[i] = acc;
    }
    Ok(())
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
