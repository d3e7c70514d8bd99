//! Hyperslab range specifications and the multi-slab algorithm.
//!
//! A [`RangeSpec`] is one user request for a strided index range on a named dimension, e.g. `time,8,2` or `lon,0,,2`.
//! All range specifications that target one dimension (or one coordinate of a dimension) are held in a [`RangeSet`].
//! [`RangeSet::merge`] normalizes them, splits wrapped ranges, orders them, and computes the output length.
//! The merged set is exposed as an [`IterationPlan`] of [`SlabRun`]s.

mod iteration_plan;
mod range_distribution;
mod range_set;
mod range_spec;

pub use iteration_plan::{IterationPlan, SlabRun};
pub use range_set::{RangeSet, Slab};
pub use range_spec::RangeSpec;

use serde::Deserialize;
use thiserror::Error;

/// How multiple range specifications on a record (unlimited) dimension are treated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSlabPolicy {
    /// Merge every range specification, as for any other dimension.
    #[default]
    MergeAll,
    /// Honor only the first range specification.
    ///
    /// Record concatenation across multiple files applies later ranges to later files, so they must not be merged.
    FirstOnly,
}

/// A slab error.
#[derive(Debug, Error)]
pub enum SlabError {
    /// A range specification string could not be parsed.
    #[error("invalid range specification {0}: {1}")]
    InvalidRange(String, String),
    /// A zero stride.
    #[error("range on {0} has a zero stride")]
    InvalidStride(String),
    /// A range on a dimension of size zero.
    #[error("range on {0} targets a dimension of size zero")]
    EmptyDimension(String),
    /// A zero index under the Fortran (1-based) index convention.
    #[error("range on {0} has index 0 which is invalid with 1-based indices")]
    InvalidIndex(String),
    /// A range specification naming no dimension or coordinate.
    #[error("range on {0} matches no dimension or coordinate")]
    UnknownName(String),
    /// A path that is not a variable in the catalog.
    #[error("no variable at path {0}")]
    UnknownVariable(String),
}
