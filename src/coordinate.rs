//! Coordinate variable resolution.
//!
//! A coordinate variable shares the name of a dimension and labels its indices.
//! Datasets may hold several variables with a dimension's name at different depths (e.g. `/lon` and `/g1/lon`), so each is judged against a scope rule:
//! a variable is in scope of a dimension if it is the dimension itself, or if its name is a whole component of the dimension path and the variable lies deeper than the dimension, unless another dimension is defined at exactly the variable's path.
//!
//! Every in-scope variable becomes a [`CoordinateBinding`] of its [`DimensionEntry`].
//! Each variable dimension is then bound to exactly one coordinate with [`choose_binding`], or left without a coordinate.

mod coordinate_resolver;

use std::cmp::Ordering;

use crate::{
    catalog::{Catalog, CatalogEntry, DimensionEntry},
    node::{component_matches, NodePath},
    provider::{DataType, DimensionId},
    slab::RangeSet,
};

/// A coordinate variable in scope of a dimension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoordinateBinding {
    pub(crate) coordinate_path: NodePath,
    pub(crate) coordinate_group_path: NodePath,
    pub(crate) depth: usize,
    pub(crate) data_type: Option<DataType>,
    pub(crate) dimension_id: DimensionId,
    pub(crate) dimension_path: NodePath,
    pub(crate) size: u64,
    pub(crate) is_record: bool,
    pub(crate) ranges: RangeSet,
}

impl CoordinateBinding {
    pub(crate) fn new(variable: &CatalogEntry, dimension: &DimensionEntry) -> Self {
        Self {
            coordinate_path: variable.path().clone(),
            coordinate_group_path: variable.group_path().clone(),
            depth: variable.depth(),
            data_type: variable.data_type(),
            dimension_id: dimension.id(),
            dimension_path: dimension.path().clone(),
            size: dimension.size(),
            is_record: dimension.is_record(),
            ranges: RangeSet::new(dimension.size()),
        }
    }

    /// The name of the coordinate variable and its dimension.
    #[must_use]
    pub fn name(&self) -> &str {
        self.coordinate_path.name()
    }

    /// The path of the coordinate variable.
    #[must_use]
    pub const fn coordinate_path(&self) -> &NodePath {
        &self.coordinate_path
    }

    /// The path of the group holding the coordinate variable.
    #[must_use]
    pub const fn coordinate_group_path(&self) -> &NodePath {
        &self.coordinate_group_path
    }

    /// The depth of the group holding the coordinate variable.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// The element type of the coordinate variable.
    #[must_use]
    pub const fn data_type(&self) -> Option<DataType> {
        self.data_type
    }

    /// The dimension identifier.
    #[must_use]
    pub const fn dimension_id(&self) -> DimensionId {
        self.dimension_id
    }

    /// The dimension path.
    #[must_use]
    pub const fn dimension_path(&self) -> &NodePath {
        &self.dimension_path
    }

    /// The dimension size.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Indicates if the dimension is a record dimension.
    #[must_use]
    pub const fn is_record(&self) -> bool {
        self.is_record
    }

    /// The ranges on the coordinate.
    #[must_use]
    pub const fn ranges(&self) -> &RangeSet {
        &self.ranges
    }
}

impl Catalog {
    /// Indicates if `variable` is in scope of `dimension`.
    ///
    /// - A variable at the dimension path is in scope.
    /// - Otherwise the variable name must occur as a whole path component of the dimension path.
    ///   A variable with a shorter path than the dimension is out of scope.
    ///   A variable with a longer path is in scope unless a dimension is defined at the variable path.
    #[must_use]
    pub fn in_scope(&self, variable: &CatalogEntry, dimension: &DimensionEntry) -> bool {
        if variable.path() == dimension.path() {
            return true;
        }
        let dimension_path = dimension.path().as_str();
        if !component_matches(dimension_path, variable.name()).any(|m| m.is_bounded()) {
            return false;
        }
        match variable.path().as_str().len().cmp(&dimension_path.len()) {
            Ordering::Greater => self
                .dimension_by_path(variable.path().as_str())
                .is_none(),
            Ordering::Equal | Ordering::Less => false,
        }
    }
}

/// Choose the coordinate of `dimension` for a dimension of `variable`.
///
/// Bindings are visited deepest group first and the first one that is the variable itself, lies in the variable's group, or lies in a shallower group is chosen.
/// Returns the index of the chosen binding in [`DimensionEntry::coordinates`], or [`None`] if no binding is in scope.
#[must_use]
pub fn choose_binding(variable: &CatalogEntry, dimension: &DimensionEntry) -> Option<usize> {
    dimension.coordinates().iter().position(|binding| {
        binding.coordinate_path() == variable.path()
            || binding.coordinate_group_path() == variable.group_path()
            || binding.depth() < variable.depth()
    })
}
