use super::*;

#[test]
fn reduce_max_min_integers() {
    assert_eq!(3i32.reduce_max(5i32), 5);
    assert_eq!(3i32.reduce_min(5i32), 3);
    assert_eq!((-1i8).reduce_max(2i8), 2);
}

#[test]
fn reduce_max_min_floats() {
    assert_eq!(1.5f64.reduce_max(2.5f64), 2.5);
    assert_eq!(1.5f64.reduce_min(2.5f64), 1.5);
}

#[test]
fn bit_reduce_is_boolean() {
    assert_eq!(Bit(true).reduce_max(Bit(false)), Bit(true));
    assert_eq!(Bit(true).reduce_min(Bit(false)), Bit(false));
}

#[test]
fn add_increment_is_noop_for_zero() {
    assert_eq!(10u8.add_increment(0.0), 10);
    assert_eq!(Bit(true).add_increment(5.0), Bit(true));
}

#[test]
fn add_increment_saturates_unsigned() {
    assert_eq!(250u8.add_increment(10.0), 255);
    assert_eq!(5u8.add_increment(-10.0), 0);
}

#[test]
fn add_increment_on_float_is_exact() {
    assert_eq!(1.0f32.add_increment(0.5), 1.5);
}
