//! The dataset catalog.
//!
//! A [`Catalog`] is the in-memory model of a hierarchical dataset: one [`CatalogEntry`] per group and variable, and one [`DimensionEntry`] per unique dimension.
//! Entries are held in traversal order and addressed by index, so cross references (dimension identifier to dimension, path to entry) never dangle.
//!
//! [`Catalog::new_with_provider`] walks a [`CatalogProviderTraits`] hierarchy, binds each variable dimension to its unique dimension, and resolves coordinate variables.
//! The selection ([`crate::selection`]) and slab ([`crate::slab`]) passes then update the catalog in place.

mod catalog_builder;
mod catalog_entry;
mod catalog_report;
mod dimension_binder;
mod dimension_entry;

pub use catalog_entry::{CatalogEntry, DimensionBinding, DimensionRef, EntryCounts, ObjectKind};
pub use dimension_entry::DimensionEntry;

use std::collections::HashMap;

use thiserror::Error;

use crate::{
    node::{NodeNameError, NodePath, NodePathError},
    provider::{CatalogProviderTraits, DimensionId, ProviderError},
};

/// A catalog error.
///
/// These indicate an inconsistent dataset rather than a usage error.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// One dimension identifier is defined at two paths.
    #[error("dimension id {id} is defined at both {first} and {second}")]
    DuplicateDimensionId {
        /// The dimension identifier.
        id: DimensionId,
        /// The path first seen.
        first: NodePath,
        /// The conflicting path.
        second: NodePath,
    },
    /// One dimension path has two identifiers.
    #[error("dimension {path} has ids {first} and {second}")]
    DuplicateDimensionPath {
        /// The dimension path.
        path: NodePath,
        /// The identifier first seen.
        first: DimensionId,
        /// The conflicting identifier.
        second: DimensionId,
    },
    /// Two objects share a path.
    #[error("duplicate object path {0}")]
    DuplicatePath(NodePath),
    /// A variable references a dimension identifier that is not defined anywhere.
    #[error("variable {variable} references unknown dimension id {id}")]
    UnknownDimensionId {
        /// The variable path.
        variable: NodePath,
        /// The dimension identifier.
        id: DimensionId,
    },
    /// A variable records a different name for a dimension than the dimension itself.
    #[error("variable {variable} names dimension id {id} {local} but the dimension is {global}")]
    DimensionNameMismatch {
        /// The variable path.
        variable: NodePath,
        /// The dimension identifier.
        id: DimensionId,
        /// The name seen from the variable.
        local: String,
        /// The path of the dimension.
        global: NodePath,
    },
    /// A provider error.
    #[error(transparent)]
    ProviderError(#[from] ProviderError),
    /// An invalid node path.
    #[error(transparent)]
    NodePathError(#[from] NodePathError),
    /// An invalid node name.
    #[error(transparent)]
    NodeNameError(#[from] NodeNameError),
}

/// A catalog of a hierarchical dataset.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub(crate) entries: Vec<CatalogEntry>,
    pub(crate) dimensions: Vec<DimensionEntry>,
    entry_index: HashMap<NodePath, usize>,
    dimension_index: HashMap<DimensionId, usize>,
    dimension_path_index: HashMap<NodePath, usize>,
}

impl Catalog {
    /// Build the catalog of the group at `root_path` of `provider` and everything below it.
    ///
    /// This walks the hierarchy, binds variable dimensions to unique dimensions, and resolves coordinate variables.
    ///
    /// # Errors
    /// Returns a [`CatalogError`] if `root_path` is invalid, the provider fails, or the dataset has inconsistent dimension identifiers.
    pub fn new_with_provider<TProvider: CatalogProviderTraits + ?Sized>(
        provider: &TProvider,
        root_path: &str,
    ) -> Result<Self, CatalogError> {
        let root_path = NodePath::new(root_path)?;
        let root = provider.resolve_group_by_path(&root_path)?;
        let mut catalog = Self::default();
        catalog.visit_ancestor_dimensions(provider, &root_path)?;
        catalog.visit_group(provider, root, root_path)?;
        catalog.bind_dimensions()?;
        catalog.resolve_coordinates();
        tracing::info!(
            "catalogued {} groups, {} variables, and {} dimensions",
            catalog.groups().count(),
            catalog.variables().count(),
            catalog.dimensions.len()
        );
        Ok(catalog)
    }

    pub(crate) fn push_entry(&mut self, entry: CatalogEntry) -> Result<usize, CatalogError> {
        let index = self.entries.len();
        if self.entry_index.insert(entry.path.clone(), index).is_some() {
            return Err(CatalogError::DuplicatePath(entry.path));
        }
        self.entries.push(entry);
        Ok(index)
    }

    pub(crate) fn push_dimension(&mut self, dimension: DimensionEntry) -> Result<(), CatalogError> {
        if let Some(existing) = self.dimension(dimension.id) {
            return Err(CatalogError::DuplicateDimensionId {
                id: dimension.id,
                first: existing.path.clone(),
                second: dimension.path,
            });
        }
        if let Some(existing) = self.dimension_by_path(dimension.path.as_str()) {
            return Err(CatalogError::DuplicateDimensionPath {
                path: dimension.path,
                first: existing.id,
                second: dimension.id,
            });
        }
        let index = self.dimensions.len();
        self.dimension_index.insert(dimension.id, index);
        self.dimension_path_index
            .insert(dimension.path.clone(), index);
        self.dimensions.push(dimension);
        Ok(())
    }

    /// Returns all entries in traversal order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Returns the entry at `path`.
    #[must_use]
    pub fn entry(&self, path: &str) -> Option<&CatalogEntry> {
        self.entry_position(path).map(|index| &self.entries[index])
    }

    /// Returns the index of the entry at `path`.
    #[must_use]
    pub fn entry_position(&self, path: &str) -> Option<usize> {
        NodePath::new(path)
            .ok()
            .and_then(|path| self.entry_index.get(&path).copied())
    }

    /// Returns an iterator over the group entries.
    pub fn groups(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(|entry| entry.is_group())
    }

    /// Returns an iterator over the variable entries, including unsupported variables.
    pub fn variables(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(|entry| entry.kind.is_variable())
    }

    /// Returns all unique dimensions in traversal order.
    #[must_use]
    pub fn dimensions(&self) -> &[DimensionEntry] {
        &self.dimensions
    }

    /// Returns the dimension with identifier `id`.
    #[must_use]
    pub fn dimension(&self, id: DimensionId) -> Option<&DimensionEntry> {
        self.dimension_index
            .get(&id)
            .map(|index| &self.dimensions[*index])
    }

    pub(crate) fn dimension_position(&self, id: DimensionId) -> Option<usize> {
        self.dimension_index.get(&id).copied()
    }

    /// Returns the dimension at `path`.
    #[must_use]
    pub fn dimension_by_path(&self, path: &str) -> Option<&DimensionEntry> {
        NodePath::new(path)
            .ok()
            .and_then(|path| self.dimension_path_index.get(&path))
            .map(|index| &self.dimensions[*index])
    }

    /// Returns the `(path, kind, extract)` triple of every entry in traversal order.
    #[must_use]
    pub fn extraction_list(&self) -> Vec<(NodePath, ObjectKind, bool)> {
        self.entries
            .iter()
            .map(|entry| (entry.path.clone(), entry.kind, entry.flags.extract))
            .collect()
    }

    /// Returns the paths of the extracted variables in traversal order.
    #[must_use]
    pub fn extracted_variables(&self) -> Vec<&NodePath> {
        self.entries
            .iter()
            .filter(|entry| entry.is_variable() && entry.flags.extract)
            .map(CatalogEntry::path)
            .collect()
    }
}
