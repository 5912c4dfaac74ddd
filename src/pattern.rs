//! A reference `Pattern` (structuring element) implementation.
//!
//! `spec.md` §1/§3/§6 treats the `Pattern` algebra as an out-of-scope,
//! opaque oracle: the planner only ever calls `minkowski_decomposition`,
//! `all_union_decompositions`, and the handful of geometric queries below,
//! never inspects a pattern's internals. `Pattern` here is a minimal,
//! concrete stand-in good enough to drive and test that oracle contract —
//! it is not an attempt at the full decomposition-search subsystem the
//! real system would ship separately.

use std::cmp::Ordering;

/// A single point of a pattern, in `N` or `N + 1` dimensions.
///
/// When a pattern carries `N + 1` dimensions relative to the matrix it
/// will be applied to, the trailing coordinate is not spatial: it is the
/// decimal height offset of a non-flat (grayscale) structuring element
/// (`SPEC_FULL.md` §3). `coords` always holds only the spatial part;
/// `increment` holds that optional extra coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub coords: Vec<i64>,
    pub increment: Option<f64>,
}

impl Point {
    pub fn spatial(coords: Vec<i64>) -> Self {
        Point {
            coords,
            increment: None,
        }
    }

    pub fn with_increment(coords: Vec<i64>, increment: f64) -> Self {
        Point {
            coords,
            increment: Some(increment),
        }
    }

    /// Dimension count as the oracle reports it: spatial dims, plus one if
    /// an increment coordinate is present.
    pub fn dim_count(&self) -> usize {
        self.coords.len() + if self.increment.is_some() { 1 } else { 0 }
    }

    fn shifted(&self, delta: &[i64]) -> Point {
        let coords = self
            .coords
            .iter()
            .zip(delta.iter())
            .map(|(c, d)| c + d)
            .collect();
        Point {
            coords,
            increment: self.increment,
        }
    }
}

/// A finite set of points serving as a structuring element.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    points: Vec<Point>,
    /// Test-only override for `is_surely_integer`; `SimplePattern`'s
    /// points are always integer, but the naive-fallback branch (C8) must
    /// be exercisable for rational patterns too.
    force_non_integer: bool,
}

impl Pattern {
    pub fn new(points: Vec<Point>) -> Self {
        Pattern {
            points,
            force_non_integer: false,
        }
    }

    pub fn single_origin(ndim: usize) -> Self {
        Pattern::new(vec![Point::spatial(vec![0; ndim])])
    }

    /// An axis-aligned segment of `len` consecutive unit steps along
    /// `axis`, starting at the origin: `{0, 1, ..., len-1} * e_axis`.
    pub fn segment(ndim: usize, axis: usize, len: u64) -> Self {
        assert!(axis < ndim);
        assert!(len >= 1);
        let points = (0..len as i64)
            .map(|k| {
                let mut coords = vec![0i64; ndim];
                coords[axis] = k;
                Point::spatial(coords)
            })
            .collect();
        Pattern::new(points)
    }

    /// The full product of `[0, dims[i])` along every axis (a rectangle /
    /// box structuring element), centered on the origin when `centered`.
    pub fn rectangle(dims: &[u64], centered: bool) -> Self {
        let mut points = Vec::new();
        let mut counters = vec![0u64; dims.len()];
        loop {
            let coords = counters
                .iter()
                .zip(dims.iter())
                .map(|(&c, &d)| {
                    let v = c as i64;
                    if centered {
                        v - (d as i64) / 2
                    } else {
                        v
                    }
                })
                .collect();
            points.push(Point::spatial(coords));

            let mut axis = dims.len();
            loop {
                if axis == 0 {
                    return Pattern::new(points);
                }
                axis -= 1;
                counters[axis] += 1;
                if counters[axis] < dims[axis] {
                    break;
                }
                counters[axis] = 0;
            }
        }
    }

    /// A discrete Euclidean disk of the given integer radius, centered on
    /// the origin, in 2 dimensions.
    pub fn disk(radius: i64) -> Self {
        let mut points = Vec::new();
        let r2 = (radius * radius) as f64;
        for y in -radius..=radius {
            for x in -radius..=radius {
                if (x * x + y * y) as f64 <= r2 {
                    points.push(Point::spatial(vec![x, y]));
                }
            }
        }
        Pattern::new(points)
    }

    /// The `2*ndim + 1`-point axis cross `{0} ∪ {±e_i}`.
    pub fn cross(ndim: usize) -> Self {
        let mut points = vec![Point::spatial(vec![0; ndim])];
        for axis in 0..ndim {
            for &delta in &[1i64, -1i64] {
                let mut coords = vec![0i64; ndim];
                coords[axis] = delta;
                points.push(Point::spatial(coords));
            }
        }
        Pattern::new(points)
    }

    pub fn with_forced_non_integer(mut self) -> Self {
        self.force_non_integer = true;
        self
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn dim_count(&self) -> usize {
        self.points
            .first()
            .map(|p| p.dim_count())
            .unwrap_or(0)
    }

    pub fn is_surely_integer(&self) -> bool {
        !self.force_non_integer
    }

    pub fn coord_min(&self) -> Vec<i64> {
        reduce_coords(&self.points, i64::min)
    }

    pub fn coord_max(&self) -> Vec<i64> {
        reduce_coords(&self.points, i64::max)
    }

    pub fn rounded_coord_range(&self, axis: usize) -> (i64, i64) {
        let mut lo = i64::MAX;
        let mut hi = i64::MIN;
        for p in &self.points {
            let c = p.coords[axis];
            lo = lo.min(c);
            hi = hi.max(c);
        }
        (lo, hi)
    }

    /// The maximum coordinate over all points, along `axis` (used by the
    /// Memory Budget / buffer-sizing paths that need an upper bound on a
    /// pattern's extent without a full decomposition).
    pub fn max_bound(&self, axis: usize) -> i64 {
        self.rounded_coord_range(axis).1
    }

    pub fn shift(&self, delta: &[i64]) -> Pattern {
        Pattern {
            points: self.points.iter().map(|p| p.shifted(delta)).collect(),
            force_non_integer: self.force_non_integer,
        }
    }

    /// Projects every point onto the hyperplane `axis = 0`, deduplicating.
    pub fn projection_along_axis(&self, axis: usize) -> Pattern {
        let mut seen: Vec<Point> = Vec::new();
        for p in &self.points {
            let mut coords = p.coords.clone();
            coords[axis] = 0;
            let candidate = Point {
                coords,
                increment: p.increment,
            };
            if !seen.contains(&candidate) {
                seen.push(candidate);
            }
        }
        Pattern {
            points: seen,
            force_non_integer: self.force_non_integer,
        }
    }

    /// True if this pattern's points are exactly the integer product of a
    /// per-axis contiguous range (no holes), i.e. a true box.
    pub fn is_actually_rectangular(&self) -> bool {
        let ndim = self.dim_count();
        if ndim == 0 {
            return false;
        }
        let ranges: Vec<(i64, i64)> = (0..ndim).map(|a| self.rounded_coord_range(a)).collect();
        let expected: u64 = ranges
            .iter()
            .map(|&(lo, hi)| (hi - lo + 1) as u64)
            .product();
        if expected as usize != self.points.len() {
            return false;
        }
        let mut set: Vec<&Point> = self.points.iter().collect();
        set.sort_by(cmp_points);
        set.dedup_by(|a, b| a.coords == b.coords);
        set.len() == self.points.len()
    }

    /// If this pattern is a single axis-aligned run of unit-spaced points
    /// (a "segment" in the Union Compactor's sense), returns
    /// `(axis, start, len)`.
    pub fn as_axis_segment(&self) -> Option<(usize, i64, u64)> {
        if self.points.is_empty() {
            return None;
        }
        let ndim = self.dim_count();
        let mut varying_axis = None;
        for axis in 0..ndim {
            let (lo, hi) = self.rounded_coord_range(axis);
            if lo != hi {
                if varying_axis.is_some() {
                    return None;
                }
                varying_axis = Some(axis);
            }
        }
        let axis = varying_axis?;
        let (lo, hi) = self.rounded_coord_range(axis);
        let len = (hi - lo + 1) as u64;
        if len as usize != self.points.len() {
            return None;
        }
        let mut values: Vec<i64> = self.points.iter().map(|p| p.coords[axis]).collect();
        values.sort_unstable();
        for (k, v) in values.iter().enumerate() {
            if *v != lo + k as i64 {
                return None;
            }
        }
        Some((axis, lo, len))
    }

    /// Normalizes a segment so its lower endpoint sits at the origin,
    /// returning the normalized pattern and the translation that was
    /// removed (Union Compactor, `spec.md` §4.5).
    pub fn normalize_segment(&self) -> Option<(Pattern, Vec<i64>)> {
        let (axis, lo, len) = self.as_axis_segment()?;
        let ndim = self.dim_count();
        let mut delta = vec![0i64; ndim];
        delta[axis] = -lo;
        Some((self.shift(&delta), {
            let mut translation = vec![0i64; ndim];
            translation[axis] = lo;
            translation
        }))
    }

    /// A Minkowski decomposition `[P_0, ..., P_{k-1}]` with
    /// `self == P_0 ⊕ ... ⊕ P_{k-1}`, each summand with at least
    /// `min_points` points where the pattern's structure allows it.
    ///
    /// Only the rectangle constructor recognizes a non-trivial
    /// decomposition (into its per-axis edge segments, the textbook
    /// Minkowski factorization of a box); everything else falls back to
    /// the single-summand identity, which `spec.md` §3 calls out as always
    /// a valid decomposition.
    pub fn minkowski_decomposition(&self, min_points: usize) -> Vec<Pattern> {
        if self.is_actually_rectangular() && self.dim_count() >= 1 {
            let ndim = self.dim_count();
            let mins = self.coord_min();
            let maxs = self.coord_max();
            let mut summands = Vec::new();
            for axis in 0..ndim {
                let len = (maxs[axis] - mins[axis] + 1) as u64;
                if len > 1 {
                    let seg = Pattern::segment(ndim, axis, len).shift(&{
                        let mut d = vec![0i64; ndim];
                        d[axis] = mins[axis];
                        d
                    });
                    summands.push(seg);
                }
            }
            if summands.len() >= 2
                && summands.iter().all(|s| s.point_count() >= min_points.min(2))
            {
                return summands;
            }
        }
        vec![self.clone()]
    }

    pub fn has_minkowski_decomposition(&self, min_points: usize) -> bool {
        self.minkowski_decomposition(min_points).len() >= 2
    }

    /// One or more alternative union decompositions, each a list of
    /// patterns whose set-union recovers `self`.
    ///
    /// Only the disk constructor's shape is recognized here (as parallel
    /// scanline segments of increasing-then-decreasing length, the
    /// classic decomposition this engine is built to exploit); everything
    /// else falls back to the trivial single-pattern union.
    pub fn all_union_decompositions(&self, min_points: usize) -> Vec<Vec<Pattern>> {
        if let Some(rows) = self.as_disk_rows() {
            if rows.len() >= min_points.min(2) {
                return vec![rows];
            }
        }
        vec![vec![self.clone()]]
    }

    /// Recognizes a pattern shaped like a disk (symmetric per-row runs,
    /// non-decreasing then non-increasing half-widths) and returns its
    /// decomposition into one horizontal segment per row.
    fn as_disk_rows(&self) -> Option<Vec<Pattern>> {
        if self.dim_count() != 2 {
            return None;
        }
        let (y_lo, y_hi) = self.rounded_coord_range(1);
        let mut rows: Vec<Pattern> = Vec::new();
        for y in y_lo..=y_hi {
            let mut xs: Vec<i64> = self
                .points
                .iter()
                .filter(|p| p.coords[1] == y)
                .map(|p| p.coords[0])
                .collect();
            if xs.is_empty() {
                return None;
            }
            xs.sort_unstable();
            let lo = xs[0];
            let hi = *xs.last().unwrap();
            if (hi - lo + 1) as usize != xs.len() {
                return None; // not a contiguous run: not disk-shaped
            }
            let len = (hi - lo + 1) as u64;
            let seg = Pattern::segment(2, 0, len).shift(&[lo, y]);
            rows.push(seg);
        }
        if rows.len() * rows[0].point_count().max(1) < 4 {
            return None; // too small to be worth recognizing as a disk
        }
        Some(rows)
    }
}

fn reduce_coords(points: &[Point], f: fn(i64, i64) -> i64) -> Vec<i64> {
    let ndim = points.first().map(|p| p.coords.len()).unwrap_or(0);
    let mut acc = vec![None::<i64>; ndim];
    for p in points {
        for (a, c) in acc.iter_mut().zip(p.coords.iter()) {
            *a = Some(match *a {
                Some(existing) => f(existing, *c),
                None => *c,
            });
        }
    }
    acc.into_iter().map(|v| v.unwrap_or(0)).collect()
}

fn cmp_points(a: &&Point, b: &&Point) -> Ordering {
    a.coords.cmp(&b.coords)
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
