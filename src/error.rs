//! Error taxonomy for the pattern-decomposition engine.
//!
//! Every variant carries enough context to identify the pattern and the
//! offending dimension, per the "user-visible failure" requirement: any
//! non-`Cancelled` error should let a caller point at what went wrong
//! without re-deriving it from the planner's internals.

use thiserror::Error;

/// Errors produced by the dilation/erosion core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MorphologyError {
    /// The pattern's dimension count matched neither the source's dimension
    /// count nor `source dims + 1`.
    #[error(
        "pattern has {pattern_dims} dimensions, expected {expected_a} or {expected_b} to match a {expected_a}-d array"
    )]
    DimensionMismatch {
        pattern_dims: usize,
        expected_a: usize,
        expected_b: usize,
    },

    /// The destination matrix's shape did not match the source's shape.
    #[error("destination shape {dest_shape:?} does not match source shape {src_shape:?}")]
    SizeMismatch {
        src_shape: Vec<u64>,
        dest_shape: Vec<u64>,
    },

    /// The linearized array length exceeds what cyclic-shift arithmetic can
    /// address with one bit of headroom (`2^62 - 1`).
    #[error("array length {length} exceeds the maximum addressable length {max}")]
    TooLargeArray { length: u128, max: u64 },

    /// A bug in the planner: an out-of-range shift, an undersized tail
    /// buffer, or some other condition that should be structurally
    /// impossible. Never retried.
    #[error("internal invariant violated in {component}: {detail}")]
    InternalInvariant {
        component: &'static str,
        detail: String,
    },

    /// The caller-supplied context signaled cancellation between passes.
    /// Any partial destination contents are undefined.
    #[error("operation cancelled")]
    Cancelled,
}

impl MorphologyError {
    pub(crate) fn invariant(component: &'static str, detail: impl Into<String>) -> Self {
        MorphologyError::InternalInvariant {
            component,
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MorphologyError>;
