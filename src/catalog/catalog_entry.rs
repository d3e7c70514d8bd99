use derive_more::Display;

use crate::{
    node::NodePath,
    provider::{AttributeMap, DataType, DimensionId},
    selection::SelectionFlags,
};

/// The kind of a catalog entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display)]
pub enum ObjectKind {
    /// A group.
    #[display("group")]
    Group,
    /// A variable with an atomic element type.
    #[display("variable")]
    Variable,
    /// A variable with a user-defined element type.
    ///
    /// Unsupported variables are catalogued for reporting but never selected.
    #[display("unsupported variable")]
    UnsupportedVariable,
}

impl ObjectKind {
    /// Indicates if the kind is a variable, supported or not.
    #[must_use]
    pub const fn is_variable(&self) -> bool {
        matches!(self, Self::Variable | Self::UnsupportedVariable)
    }
}

/// Child and attribute counts of a catalog entry.
///
/// Group entries count their direct subgroups, variables, dimensions, and record dimensions.
/// Variable entries count only their dimensions and attributes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryCounts {
    /// The number of direct subgroups.
    pub groups: usize,
    /// The number of variables.
    pub variables: usize,
    /// The number of dimensions.
    pub dimensions: usize,
    /// The number of record dimensions.
    pub record_dimensions: usize,
    /// The number of attributes.
    pub attributes: usize,
}

/// How a variable dimension relates to coordinate variables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DimensionBinding {
    /// The dimension has no coordinate variable.
    #[default]
    NonCoordinate,
    /// The dimension has coordinate variables but none is in scope of the variable.
    OutOfScope,
    /// The dimension is bound to a coordinate variable.
    Coordinate {
        /// The index of the binding in [`DimensionEntry::coordinates`](crate::catalog::DimensionEntry::coordinates).
        index: usize,
        /// The coordinate variable path.
        path: NodePath,
    },
}

/// A dimension of a variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DimensionRef {
    pub(crate) id: DimensionId,
    pub(crate) name: Option<String>,
    pub(crate) path: Option<NodePath>,
    pub(crate) group_path: Option<NodePath>,
    pub(crate) binding: DimensionBinding,
}

impl DimensionRef {
    pub(crate) fn new(id: DimensionId, name: Option<String>) -> Self {
        Self {
            id,
            name,
            path: None,
            group_path: None,
            binding: DimensionBinding::default(),
        }
    }

    /// The dimension identifier.
    #[must_use]
    pub const fn id(&self) -> DimensionId {
        self.id
    }

    /// The dimension name.
    ///
    /// This is [`None`] only if the dimension is not visible from the variable's group and the catalog has not been bound.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The full path of the dimension, once bound.
    #[must_use]
    pub const fn path(&self) -> Option<&NodePath> {
        self.path.as_ref()
    }

    /// The path of the group defining the dimension, once bound.
    #[must_use]
    pub const fn group_path(&self) -> Option<&NodePath> {
        self.group_path.as_ref()
    }

    /// The coordinate binding of the dimension.
    #[must_use]
    pub const fn binding(&self) -> &DimensionBinding {
        &self.binding
    }

    /// Indicates if the dimension is bound to a coordinate variable.
    #[must_use]
    pub const fn is_coordinate(&self) -> bool {
        matches!(self.binding, DimensionBinding::Coordinate { .. })
    }
}

/// A group or variable in a [`Catalog`](crate::catalog::Catalog).
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogEntry {
    pub(crate) kind: ObjectKind,
    pub(crate) path: NodePath,
    pub(crate) group_path: NodePath,
    pub(crate) depth: usize,
    pub(crate) counts: EntryCounts,
    pub(crate) attributes: AttributeMap,
    pub(crate) data_type: Option<DataType>,
    pub(crate) dimensions: Vec<DimensionRef>,
    pub(crate) is_coordinate: bool,
    pub(crate) is_record: bool,
    pub(crate) flags: SelectionFlags,
}

impl CatalogEntry {
    pub(crate) fn new_group(path: NodePath, counts: EntryCounts, attributes: AttributeMap) -> Self {
        Self {
            kind: ObjectKind::Group,
            group_path: path.clone(),
            depth: path.depth(),
            path,
            counts,
            attributes,
            data_type: None,
            dimensions: Vec::new(),
            is_coordinate: false,
            is_record: false,
            flags: SelectionFlags::default(),
        }
    }

    pub(crate) fn new_variable(
        path: NodePath,
        group_path: NodePath,
        data_type: DataType,
        dimensions: Vec<DimensionRef>,
        attributes: AttributeMap,
    ) -> Self {
        let kind = if data_type.is_atomic() {
            ObjectKind::Variable
        } else {
            ObjectKind::UnsupportedVariable
        };
        let counts = EntryCounts {
            dimensions: dimensions.len(),
            attributes: attributes.len(),
            ..EntryCounts::default()
        };
        Self {
            kind,
            depth: group_path.depth(),
            path,
            group_path,
            counts,
            attributes,
            data_type: Some(data_type),
            dimensions,
            is_coordinate: false,
            is_record: false,
            flags: SelectionFlags::default(),
        }
    }

    /// The kind of the entry.
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Indicates if the entry is a group.
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.kind == ObjectKind::Group
    }

    /// Indicates if the entry is a supported variable.
    #[must_use]
    pub fn is_variable(&self) -> bool {
        self.kind == ObjectKind::Variable
    }

    /// The relative name of the entry, or the empty string for the root group.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.name()
    }

    /// The full path of the entry.
    #[must_use]
    pub const fn path(&self) -> &NodePath {
        &self.path
    }

    /// The path of the owning group. A group owns itself.
    #[must_use]
    pub const fn group_path(&self) -> &NodePath {
        &self.group_path
    }

    /// The depth of the owning group, where the root is at depth 0.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// The child and attribute counts.
    #[must_use]
    pub const fn counts(&self) -> &EntryCounts {
        &self.counts
    }

    /// The attributes.
    #[must_use]
    pub const fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    /// The element type of a variable.
    #[must_use]
    pub const fn data_type(&self) -> Option<DataType> {
        self.data_type
    }

    /// The dimensions of a variable, outermost first.
    #[must_use]
    pub fn dimensions(&self) -> &[DimensionRef] {
        &self.dimensions
    }

    /// Indicates if the variable is a coordinate variable of at least one dimension.
    #[must_use]
    pub const fn is_coordinate(&self) -> bool {
        self.is_coordinate
    }

    /// Indicates if the variable is the coordinate variable of a record dimension.
    #[must_use]
    pub const fn is_record(&self) -> bool {
        self.is_record
    }

    /// The selection flags.
    #[must_use]
    pub const fn flags(&self) -> &SelectionFlags {
        &self.flags
    }

    /// Indicates if the entry is selected for extraction.
    #[must_use]
    pub const fn is_extracted(&self) -> bool {
        self.flags.extract
    }
}
