//! Catalog providers.
//!
//! A catalog provider exposes the structure of a hierarchical dataset: the groups, variables, dimensions, and attributes below a group.
//! A provider only answers structural inquiries, it never reads array data.
//!
//! Providers implement [`CatalogProviderTraits`].
//! This crate includes the in-memory [`MemoryProvider`], which can be assembled programmatically or loaded from a JSON hierarchy document.

mod data_type;
mod hierarchy_document;
mod memory_provider;

pub use data_type::DataType;
pub use hierarchy_document::{DimensionDocument, GroupDocument, VariableDocument};
pub use memory_provider::MemoryProvider;

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::{NodeNameError, NodePath, NodePathError};

/// Attributes of a group or variable.
pub type AttributeMap = serde_json::Map<String, serde_json::Value>;

/// An opaque handle to a group held by a provider.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, From)]
#[display("{}", _0)]
pub struct GroupHandle(u64);

impl GroupHandle {
    /// Create a new group handle.
    #[must_use]
    pub const fn new(handle: u64) -> Self {
        Self(handle)
    }

    /// Returns the raw handle value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// A dimension identifier.
///
/// Dimension identifiers are unique across a whole dataset, not per group.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
#[display("{}", _0)]
pub struct DimensionId(u64);

impl DimensionId {
    /// Create a new dimension identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// A variable as reported by a provider.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableInfo {
    /// The variable name.
    pub name: String,
    /// The element type.
    pub data_type: DataType,
    /// The dimensions of the variable, outermost first.
    pub dimension_ids: Vec<DimensionId>,
    /// The variable attributes.
    pub attributes: AttributeMap,
}

/// A dimension as reported by a provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DimensionInfo {
    /// The dimension identifier.
    pub id: DimensionId,
    /// The dimension name.
    pub name: String,
    /// The current dimension size.
    pub size: u64,
}

/// A catalog provider error.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An unknown group handle.
    #[error("unknown group handle {0}")]
    UnknownGroup(GroupHandle),
    /// No group exists at the path.
    #[error("no group at path {0}")]
    UnknownPath(NodePath),
    /// An unknown dimension.
    #[error("unknown dimension {0}")]
    UnknownDimension(String),
    /// Two siblings share a name.
    #[error("duplicate name {1} in group {0}")]
    DuplicateName(GroupHandle, String),
    /// An invalid hierarchy document.
    #[error("invalid hierarchy document: {0}")]
    InvalidDocument(String),
    /// An invalid node name.
    #[error(transparent)]
    NodeNameError(#[from] NodeNameError),
    /// An invalid node path.
    #[error(transparent)]
    NodePathError(#[from] NodePathError),
    /// An error serialising or deserialising JSON.
    #[error(transparent)]
    InvalidJSON(#[from] serde_json::Error),
    /// An IO error.
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

/// Catalog provider traits.
///
/// All inquiries are synchronous and side-effect free.
pub trait CatalogProviderTraits {
    /// Returns the handle of the root group.
    fn root(&self) -> GroupHandle;

    /// Returns the name of `group`, or the empty string for the root group.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] if `group` is unknown.
    fn group_name(&self, group: GroupHandle) -> Result<String, ProviderError>;

    /// Returns the attributes of `group`.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] if `group` is unknown.
    fn group_attributes(&self, group: GroupHandle) -> Result<AttributeMap, ProviderError>;

    /// Returns the direct child groups of `group`.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] if `group` is unknown.
    fn list_child_groups(&self, group: GroupHandle) -> Result<Vec<GroupHandle>, ProviderError>;

    /// Returns the variables defined in `group`.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] if `group` is unknown.
    fn list_variables(&self, group: GroupHandle) -> Result<Vec<VariableInfo>, ProviderError>;

    /// Returns the dimensions defined in `group`, and in its ancestors if `include_parents` is true.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] if `group` is unknown.
    fn list_dimensions(
        &self,
        group: GroupHandle,
        include_parents: bool,
    ) -> Result<Vec<DimensionInfo>, ProviderError>;

    /// Returns the identifiers of the unlimited (record) dimensions defined in `group`.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] if `group` is unknown.
    fn list_unlimited_dimensions(
        &self,
        group: GroupHandle,
    ) -> Result<Vec<DimensionId>, ProviderError>;

    /// Returns the handle of the group at `path`.
    ///
    /// # Errors
    /// Returns [`ProviderError::UnknownPath`] if there is no group at `path`.
    fn resolve_group_by_path(&self, path: &NodePath) -> Result<GroupHandle, ProviderError>;
}
