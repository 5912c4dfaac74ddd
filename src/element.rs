//! Polymorphic array element type.
//!
//! The reference system hand-writes the elementary pass for each of nine
//! nearly-identical element kinds. Here a single generic kernel is
//! parameterized by this trait instead; monomorphization gives each
//! primitive its own specialized code path without the source duplication.
//! `Bit` keeps a dedicated implementation since its "shifted" view is a
//! bitwise rotation rather than a plain array copy.

use num_traits::{Bounded, NumCast, ToPrimitive, Zero};

/// An array element usable by the dilation/erosion kernel.
///
/// `reduce_max`/`reduce_min` implement the grayscale max/min fold; the
/// default bodies are correct for every ordered numeric type, so only the
/// bit type below needs to override them (boolean OR/AND rather than a
/// numeric comparison).
pub trait Element: Copy + PartialOrd + Zero + Bounded + NumCast + Send + Sync + 'static {
    fn reduce_max(self, other: Self) -> Self {
        if self >= other {
            self
        } else {
            other
        }
    }

    fn reduce_min(self, other: Self) -> Self {
        if self <= other {
            self
        } else {
            other
        }
    }

    /// Applies a non-flat structuring element's additive height offset
    /// before the reduce step (see `SPEC_FULL.md` §3, the (N+1)-dimensional
    /// pattern supplement). A zero increment is a no-op for every type.
    fn add_increment(self, increment: f64) -> Self {
        if increment == 0.0 {
            return self;
        }
        let widened = self.to_f64().unwrap_or(0.0) + increment;
        NumCast::from(widened).unwrap_or(if widened > 0.0 {
            Self::max_value()
        } else {
            Self::min_value()
        })
    }
}

macro_rules! impl_element_numeric {
    ($($t:ty),+ $(,)?) => {
        $(impl Element for $t {})+
    };
}

impl_element_numeric!(u8, u16, i8, i16, i32, i64, f32, f64);

/// One-bit element, the "bit" kind of `spec.md` §3's element-type list.
///
/// Backed by `bool` rather than a packed bitset: the packing (and the
/// rotation-based shifted view it enables) is a storage-layer concern of
/// the out-of-scope `Array` collaborator, not of this kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Bit(pub bool);

impl Zero for Bit {
    fn zero() -> Self {
        Bit(false)
    }
    fn is_zero(&self) -> bool {
        !self.0
    }
}

impl std::ops::Add for Bit {
    type Output = Bit;
    fn add(self, rhs: Bit) -> Bit {
        Bit(self.0 || rhs.0)
    }
}

impl Bounded for Bit {
    fn min_value() -> Self {
        Bit(false)
    }
    fn max_value() -> Self {
        Bit(true)
    }
}

impl ToPrimitive for Bit {
    fn to_i64(&self) -> Option<i64> {
        Some(self.0 as i64)
    }
    fn to_u64(&self) -> Option<u64> {
        Some(self.0 as u64)
    }
    fn to_f64(&self) -> Option<f64> {
        Some(if self.0 { 1.0 } else { 0.0 })
    }
}

impl NumCast for Bit {
    fn from<T: ToPrimitive>(n: T) -> Option<Self> {
        n.to_i64().map(|v| Bit(v != 0))
    }
}

impl Element for Bit {
    fn reduce_max(self, other: Self) -> Self {
        Bit(self.0 || other.0)
    }
    fn reduce_min(self, other: Self) -> Self {
        Bit(self.0 && other.0)
    }
    fn add_increment(self, _increment: f64) -> Self {
        // Non-flat structuring elements are meaningless for binary images
        // (explicit Non-goal in spec.md §1); the height offset is ignored.
        self
    }
}

#[cfg(test)]
#[path = "element_tests.rs"]
mod tests;
