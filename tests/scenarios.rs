//! End-to-end scenarios against the public `dilation`/`erosion` facade:
//! the concrete worked examples plus a randomized check against a naive
//! reference implementation, exercising naive, Minkowski, and
//! union-decomposition branches through the same public entry point a
//! caller actually uses.

use morphopack::{dilation, erosion, MorphologyConfig, NullContext, Pattern, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn naive_reference(src: &[i32], dims: &[u64], points: &[Point], erosion: bool) -> Vec<i32> {
    let ndim = dims.len();
    let len = dims.iter().product::<u64>() as usize;
    let mut strides = vec![1u64; ndim];
    for d in (0..ndim.saturating_sub(1)).rev() {
        strides[d] = strides[d + 1] * dims[d + 1];
    }
    let mut out = vec![0i32; len];
    for i in 0..len {
        let mut coord = vec![0i64; ndim];
        let mut rem = i as u64;
        for d in 0..ndim {
            coord[d] = (rem / strides[d]) as i64;
            rem %= strides[d];
        }
        let mut acc: Option<i32> = None;
        for p in points {
            // Dilation and erosion both walk the pattern's own offsets
            // forward; only the reduce op (max/min) differs.
            let mut idx = 0u64;
            for d in 0..ndim {
                let c = (coord[d] + p.coords[d]).rem_euclid(dims[d] as i64) as u64;
                idx += c * strides[d];
            }
            let v = src[idx as usize];
            acc = Some(match acc {
                None => v,
                Some(a) => {
                    if erosion {
                        a.min(v)
                    } else {
                        a.max(v)
                    }
                }
            });
        }
        out[i] = acc.unwrap_or(0);
    }
    out
}

// S1 (`SPEC_FULL.md` §8): a 1-D cyclic two-point dilation.
#[test]
fn s1_one_dimensional_cyclic_dilation() {
    let src = vec![1i32, 3, 2, 5, 0, 4];
    let dims = vec![6u64];
    let pattern = Pattern::new(vec![Point::spatial(vec![0]), Point::spatial(vec![1])]);
    let ctx = NullContext::new();
    let got = dilation(&src, &dims, &pattern, &ctx, &MorphologyConfig::default()).unwrap();
    assert_eq!(got, vec![3, 3, 5, 5, 4, 4]);
}

// S2 (`SPEC_FULL.md` §8): the literal three-point erosion, pattern
// {0, 1, 2} — asymmetric under negation, so it actually exercises the
// direction dilation/erosion share rather than masking a sign bug.
#[test]
fn s2_one_dimensional_cyclic_erosion() {
    let src = vec![1i32, 3, 2, 5, 0, 4];
    let dims = vec![6u64];
    let pattern = Pattern::new(vec![
        Point::spatial(vec![0]),
        Point::spatial(vec![1]),
        Point::spatial(vec![2]),
    ]);
    let ctx = NullContext::new();
    let got = erosion(&src, &dims, &pattern, &ctx, &MorphologyConfig::default()).unwrap();
    assert_eq!(got, vec![1, 2, 0, 0, 0, 1]);
}

// S3: a 2-D rectangle dilation, exercised through the Minkowski branch.
#[test]
fn s3_two_dimensional_rectangle_dilation() {
    let dims = vec![5u64, 5u64];
    let src: Vec<i32> = (0..25).map(|i| (i % 7) as i32).collect();
    let pattern = Pattern::rectangle(&[3, 3], true);
    let ctx = NullContext::new();
    let got = dilation(&src, &dims, &pattern, &ctx, &MorphologyConfig::default()).unwrap();
    let want = naive_reference(&src, &dims, pattern.points(), false);
    assert_eq!(got, want);
}

// S4: a disk dilation, exercised through the union-decomposition branch.
#[test]
fn s4_disk_dilation_via_union_decomposition() {
    let dims = vec![20u64, 20u64];
    let src: Vec<i32> = (0..400).map(|i| ((i * 37) % 53) as i32).collect();
    let pattern = Pattern::disk(5);
    let ctx = NullContext::new();
    let got = dilation(&src, &dims, &pattern, &ctx, &MorphologyConfig::default()).unwrap();
    let want = naive_reference(&src, &dims, pattern.points(), false);
    assert_eq!(got, want);
}

// S5: a non-flat (grayscale) ramp pattern, small enough to force the naive
// branch, checked against the same reference with increments applied.
#[test]
fn s5_non_flat_ramp_dilation() {
    let dims = vec![8u64];
    let src: Vec<i32> = vec![2, 4, 1, 9, 3, 7, 0, 5];
    let pattern = Pattern::new(vec![
        Point::spatial(vec![0]),
        Point::with_increment(vec![1], 1.0),
        Point::with_increment(vec![2], 2.0),
    ]);
    let ctx = NullContext::new();
    let got = dilation(&src, &dims, &pattern, &ctx, &MorphologyConfig::default()).unwrap();
    let expected: Vec<i32> = (0..8)
        .map(|i| {
            let a = src[i];
            let b = src[(i + 1) % 8] + 1;
            let c = src[(i + 2) % 8] + 2;
            a.max(b).max(c)
        })
        .collect();
    assert_eq!(got, expected);
}

// S6: cross-pattern erosion on a 3-D array.
#[test]
fn s6_three_dimensional_cross_erosion() {
    let dims = vec![4u64, 4u64, 4u64];
    let src: Vec<i32> = (0..64).map(|i| ((i * 5) % 11) as i32).collect();
    let pattern = Pattern::cross(3);
    let ctx = NullContext::new();
    let got = erosion(&src, &dims, &pattern, &ctx, &MorphologyConfig::default()).unwrap();
    let want = naive_reference(&src, &dims, pattern.points(), true);
    assert_eq!(got, want);
}

#[test]
fn randomized_dilation_and_erosion_match_naive_reference() {
    let mut rng = StdRng::seed_from_u64(20260727);
    for trial in 0..25 {
        let h = rng.gen_range(3..12);
        let w = rng.gen_range(3..12);
        let dims = vec![h as u64, w as u64];
        let len = h * w;
        let src: Vec<i32> = (0..len).map(|_| rng.gen_range(-50..50)).collect();

        let pattern = match trial % 3 {
            0 => Pattern::rectangle(&[rng.gen_range(1..4), rng.gen_range(1..4)], rng.gen_bool(0.5)),
            1 => Pattern::disk(rng.gen_range(1..5)),
            _ => Pattern::cross(2),
        };

        let ctx = NullContext::new();
        let cfg = MorphologyConfig::default();
        let got_dilate = dilation(&src, &dims, &pattern, &ctx, &cfg).unwrap();
        let want_dilate = naive_reference(&src, &dims, pattern.points(), false);
        assert_eq!(got_dilate, want_dilate, "dilation mismatch on trial {trial}");

        let got_erode = erosion(&src, &dims, &pattern, &ctx, &cfg).unwrap();
        let want_erode = naive_reference(&src, &dims, pattern.points(), true);
        assert_eq!(got_erode, want_erode, "erosion mismatch on trial {trial}");
    }
}
