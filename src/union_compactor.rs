//! C5 — Union Compactor.
//!
//! Groups a union decomposition's axis-aligned segments by axis and
//! length, producing `MinkowskiPair`s the Union-Decomposition Planner
//! (C6) can fold one at a time, reusing work across consecutive
//! same-length-family segments via small Minkowski increments instead of
//! recomputing each segment's dilation/erosion from scratch.

use std::cmp::Ordering;

use crate::pattern::{Pattern, Point};

/// A group of equal-length, equal-axis translated segments (or a single
/// isolated non-segment pattern), as produced by the Union Compactor.
#[derive(Debug, Clone, PartialEq)]
pub struct MinkowskiPair {
    /// The normalized segment (or untouched isolated pattern) this
    /// group's translations apply to.
    pub main: Pattern,
    /// Translations of `main` whose union recovers this group's
    /// contribution; `{origin}` for an isolated pattern.
    pub shifts: Vec<Vec<i64>>,
    /// A Minkowski decomposition of the length difference between this
    /// group's segment and the next longer segment of the same axis.
    pub increment_to_next: Option<Vec<Pattern>>,
    /// Mirror of the previous group's `increment_to_next`.
    pub increment_from_previous: Option<Vec<Pattern>>,
}

#[derive(Clone)]
enum Item {
    Segment { axis: usize, len: u64, pattern: Pattern },
    Other(Pattern),
}

fn classify(p: &Pattern) -> Item {
    match p.as_axis_segment() {
        Some((axis, _start, len)) => Item::Segment {
            axis,
            len,
            pattern: p.clone(),
        },
        None => Item::Other(p.clone()),
    }
}

fn item_order(a: &Item, b: &Item) -> Ordering {
    match (a, b) {
        (Item::Segment { axis: a1, len: l1, .. }, Item::Segment { axis: a2, len: l2, .. }) => {
            a1.cmp(a2).then(l1.cmp(l2))
        }
        (Item::Segment { .. }, Item::Other(_)) => Ordering::Less,
        (Item::Other(_), Item::Segment { .. }) => Ordering::Greater,
        (Item::Other(_), Item::Other(_)) => Ordering::Equal,
    }
}

/// A Minkowski decomposition `[Δ_0, ...]` with `smaller ⊕ (⊕ Δ_i) ==
/// larger`, valid only when both are normalized segments along the same
/// axis.
///
/// Builds the chain by repeatedly extending `smaller`'s span by the
/// largest increment that keeps every intermediate union contiguous
/// (`min(current_span, remaining_deficit)`), which both proves each step
/// valid by construction and yields `O(log d)` summands, `d = |larger| -
/// |smaller|`.
pub fn minkowski_subtract_segment(larger: &Pattern, smaller: &Pattern) -> Vec<Pattern> {
    let (axis, _, smaller_len) = smaller
        .as_axis_segment()
        .expect("minkowski_subtract_segment requires a segment");
    let (_, _, larger_len) = larger
        .as_axis_segment()
        .expect("minkowski_subtract_segment requires a segment");
    let ndim = larger.dim_count();
    let mut deltas = Vec::new();
    let mut current = smaller_len;
    let mut remaining = larger_len.saturating_sub(smaller_len);
    while remaining > 0 {
        let h = remaining.min(current);
        let mut coords = vec![0i64; ndim];
        coords[axis] = h as i64;
        deltas.push(Pattern::new(vec![
            Point::spatial(vec![0; ndim]),
            Point::spatial(coords),
        ]));
        current += h;
        remaining -= h;
    }
    deltas
}

/// Compacts a union decomposition's patterns into `MinkowskiPair` groups.
pub fn compact(union_list: &[Pattern]) -> Vec<MinkowskiPair> {
    let mut items: Vec<Item> = union_list.iter().map(classify).collect();
    items.sort_by(item_order);

    let mut pairs: Vec<MinkowskiPair> = Vec::new();
    let mut last_normalized: Option<Pattern> = None;
    let mut shifts_of_equal: Vec<Vec<i64>> = Vec::new();

    for item in items {
        match item {
            Item::Segment { pattern, .. } => {
                let (normalized, translation) = pattern
                    .normalize_segment()
                    .expect("classified as Segment by as_axis_segment");
                match last_normalized.take() {
                    Some(prev) if prev == normalized => {
                        shifts_of_equal.push(translation);
                        last_normalized = Some(prev);
                    }
                    Some(prev) => {
                        let increment_to_next = minkowski_subtract_segment(&normalized, &prev);
                        pairs.push(MinkowskiPair {
                            main: prev,
                            shifts: std::mem::take(&mut shifts_of_equal),
                            increment_to_next: Some(increment_to_next),
                            increment_from_previous: None,
                        });
                        shifts_of_equal.push(translation);
                        last_normalized = Some(normalized);
                    }
                    None => {
                        shifts_of_equal.push(translation);
                        last_normalized = Some(normalized);
                    }
                }
            }
            Item::Other(pattern) => {
                if let Some(prev) = last_normalized.take() {
                    pairs.push(MinkowskiPair {
                        main: prev,
                        shifts: std::mem::take(&mut shifts_of_equal),
                        increment_to_next: None,
                        increment_from_previous: None,
                    });
                }
                let ndim = pattern.dim_count();
                pairs.push(MinkowskiPair {
                    main: pattern,
                    shifts: vec![vec![0i64; ndim]],
                    increment_to_next: None,
                    increment_from_previous: None,
                });
            }
        }
    }
    if let Some(prev) = last_normalized.take() {
        pairs.push(MinkowskiPair {
            main: prev,
            shifts: std::mem::take(&mut shifts_of_equal),
            increment_to_next: None,
            increment_from_previous: None,
        });
    }

    for i in 1..pairs.len() {
        pairs[i].increment_from_previous = pairs[i - 1].increment_to_next.clone();
    }

    // Shift-folding: an isolated pair (no increment either side) with a
    // single non-origin translation absorbs that translation into `main`,
    // so C6 doesn't need to special-case a one-element shift set.
    for pair in pairs.iter_mut() {
        if pair.increment_to_next.is_none()
            && pair.increment_from_previous.is_none()
            && pair.shifts.len() == 1
            && pair.shifts[0].iter().any(|&c| c != 0)
        {
            let delta = pair.shifts[0].clone();
            pair.main = pair.main.shift(&delta);
            pair.shifts = vec![vec![0i64; delta.len()]];
        }
    }

    pairs
}

#[cfg(test)]
#[path = "union_compactor_tests.rs"]
mod tests;
