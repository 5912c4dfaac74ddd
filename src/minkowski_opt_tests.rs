use super::*;

fn shift(offset: i64, increment: f64) -> Shift {
    Shift { offset, increment }
}

#[test]
fn singleton_summand_folds_into_correction() {
    let result = optimize(vec![vec![shift(5, 0.0)]], 20);
    assert!(result.summands.is_empty());
    let correction = result.correction.unwrap();
    assert_eq!(correction.offset, 5);
}

#[test]
fn multi_point_summand_recenters_to_zero() {
    let result = optimize(vec![vec![shift(3, 0.0), shift(7, 0.0), shift(5, 0.0)]], 20);
    assert_eq!(result.summands.len(), 1);
    let recentered = &result.summands[0];
    assert_eq!(recentered[0].offset, 0);
    assert_eq!(recentered.iter().map(|s| s.offset).max().unwrap(), 4);
    assert_eq!(result.correction.unwrap().offset, 3);
}

#[test]
fn multiple_singletons_accumulate_additively() {
    let result = optimize(vec![vec![shift(3, 1.0)], vec![shift(4, 2.0)]], 20);
    assert!(result.summands.is_empty());
    let correction = result.correction.unwrap();
    assert_eq!(correction.offset, 7);
    assert_eq!(correction.increment, 3.0);
}

#[test]
fn already_centered_summand_has_no_correction() {
    let result = optimize(vec![vec![shift(0, 0.0), shift(2, 0.0)]], 20);
    assert_eq!(result.summands.len(), 1);
    assert!(result.correction.is_none());
}

#[test]
fn correction_wraps_modulo_length() {
    let result = optimize(vec![vec![shift(15, 0.0)], vec![shift(10, 0.0)]], 20);
    let correction = result.correction.unwrap();
    assert_eq!(correction.offset, 5); // (15 + 10) mod 20
}

#[test]
fn empty_summand_is_dropped_silently() {
    let result = optimize(vec![vec![]], 20);
    assert!(result.summands.is_empty());
    assert!(result.correction.is_none());
}

#[test]
fn zero_offset_but_nonzero_increment_still_yields_correction() {
    let result = optimize(vec![vec![shift(0, 2.5)]], 20);
    let correction = result.correction.unwrap();
    assert_eq!(correction.offset, 0);
    assert_eq!(correction.increment, 2.5);
}
