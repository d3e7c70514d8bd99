use crate::{coordinate::CoordinateBinding, node::NodePath, provider::DimensionId, slab::RangeSet};

/// A unique dimension in a [`Catalog`](crate::catalog::Catalog).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DimensionEntry {
    pub(crate) id: DimensionId,
    pub(crate) path: NodePath,
    pub(crate) group_path: NodePath,
    pub(crate) size: u64,
    pub(crate) is_record: bool,
    pub(crate) has_scope: bool,
    pub(crate) coordinates: Vec<CoordinateBinding>,
    pub(crate) ranges: RangeSet,
}

impl DimensionEntry {
    pub(crate) fn new(
        id: DimensionId,
        path: NodePath,
        group_path: NodePath,
        size: u64,
        is_record: bool,
    ) -> Self {
        Self {
            id,
            path,
            group_path,
            size,
            is_record,
            has_scope: false,
            coordinates: Vec::new(),
            ranges: RangeSet::new(size),
        }
    }

    /// The dimension identifier.
    #[must_use]
    pub const fn id(&self) -> DimensionId {
        self.id
    }

    /// The relative name of the dimension.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.name()
    }

    /// The full path of the dimension.
    #[must_use]
    pub const fn path(&self) -> &NodePath {
        &self.path
    }

    /// The path of the group defining the dimension.
    #[must_use]
    pub const fn group_path(&self) -> &NodePath {
        &self.group_path
    }

    /// The dimension size.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Indicates if the dimension is a record (unlimited) dimension.
    #[must_use]
    pub const fn is_record(&self) -> bool {
        self.is_record
    }

    /// Indicates if at least one variable is an in-scope coordinate of the dimension.
    #[must_use]
    pub const fn has_scope(&self) -> bool {
        self.has_scope
    }

    /// The in-scope coordinate variables of the dimension, deepest group first.
    #[must_use]
    pub fn coordinates(&self) -> &[CoordinateBinding] {
        &self.coordinates
    }

    /// The ranges on the dimension.
    ///
    /// Only used if the dimension has no coordinate variable, otherwise ranges are held by each [`CoordinateBinding`].
    #[must_use]
    pub const fn ranges(&self) -> &RangeSet {
        &self.ranges
    }
}
