//! Group and variable selection.
//!
//! Users name what to extract with two independent lists of [`Selector`] strings, one for groups and one for variables:
//! - a bare name (`lon`) matches anywhere as a whole path component,
//! - a leading `/` anchors the match at the root,
//! - a trailing `/` on a group selector disables recursive matching into subgroups,
//! - any of `.*^$\[]()<>+?|{}` makes the selector a regular expression (with the `regex` feature).
//!
//! [`Catalog::select`] evaluates both lists and combines them by union or intersection into the extraction flag of each entry.
//! Further passes adjust the extraction set: [`Catalog::exclude`], [`Catalog::add_all_coordinates`], [`Catalog::add_associated_coordinates`], [`Catalog::add_attribute_coordinates`], and [`Catalog::mark_extracted_groups`].
//! [`Catalog::output_paths`] maps the extracted variables through an optional [`GroupPathEdit`] and rejects naming collisions.

mod associated_coordinates;
mod group_path_edit;
mod selection_flags;
mod selector;
mod selector_engine;

pub use group_path_edit::GroupPathEdit;
pub use selection_flags::SelectionFlags;
pub use selector::{Selector, SelectorKind};

use thiserror::Error;

use crate::node::{NodeNameError, NodePath};

/// A selection error.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// An empty selector string.
    #[error("empty {0} selector")]
    EmptySelector(SelectorKind),
    /// A selector that matches nothing in the catalog.
    #[error("{0} selector {1} matches nothing")]
    NoMatch(SelectorKind, String),
    /// An invalid regular expression.
    #[error("invalid pattern {0}: {1}")]
    InvalidPattern(String, String),
    /// Regular expression selectors were used without the `regex` feature.
    #[error("selector {0} is a pattern but pattern support is not enabled")]
    PatternsUnsupported(String),
    /// A variable selector with a trailing path separator.
    #[error("variable selector {0} ends with a path separator")]
    TrailingSeparator(String),
    /// An invalid group path edit.
    #[error("invalid group path edit {0}")]
    InvalidGroupPathEdit(String),
    /// Two extracted variables map to the same output path.
    #[error("variables {first} and {second} are both written to {output}")]
    NamingCollision {
        /// The output path.
        output: NodePath,
        /// The first variable written to the output path.
        first: NodePath,
        /// The second variable written to the output path.
        second: NodePath,
    },
    /// An invalid node name.
    #[error(transparent)]
    NodeNameError(#[from] NodeNameError),
}
