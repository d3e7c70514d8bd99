//! An in-memory catalog provider.

use std::{collections::HashMap, path::Path};

use crate::node::{NodeName, NodePath};

use super::{
    AttributeMap, CatalogProviderTraits, DataType, DimensionId, DimensionInfo, GroupDocument,
    GroupHandle, ProviderError, VariableInfo,
};

#[derive(Debug, Default)]
struct MemoryGroup {
    name: String,
    parent: Option<GroupHandle>,
    children: Vec<GroupHandle>,
    attributes: AttributeMap,
    variables: Vec<VariableInfo>,
    dimensions: Vec<DimensionInfo>,
    unlimited: Vec<DimensionId>,
}

/// An in-memory catalog provider.
///
/// A new provider holds an empty root group.
/// Groups, dimensions, and variables are added with the `add_*` methods, or a whole hierarchy is loaded from a [`GroupDocument`].
#[derive(Debug)]
pub struct MemoryProvider {
    groups: Vec<MemoryGroup>,
    next_dimension_id: u64,
}

impl MemoryProvider {
    /// Create a new memory provider with an empty root group.
    #[must_use]
    pub fn new() -> Self {
        Self {
            groups: vec![MemoryGroup::default()],
            next_dimension_id: 0,
        }
    }

    /// Create a new memory provider from a hierarchy document.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] if the document has invalid or duplicate names, or a variable references an unknown dimension.
    pub fn from_document(document: &GroupDocument) -> Result<Self, ProviderError> {
        let mut provider = Self::new();
        let mut dimension_paths = HashMap::new();
        provider.load_group(
            provider.root(),
            &NodePath::root(),
            document,
            &mut dimension_paths,
        )?;
        Ok(provider)
    }

    /// Create a new memory provider from a JSON hierarchy document.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] if the JSON is invalid or [`from_document`](MemoryProvider::from_document) fails.
    pub fn from_json(json: &str) -> Result<Self, ProviderError> {
        let document: GroupDocument = serde_json::from_str(json)?;
        Self::from_document(&document)
    }

    /// Create a new memory provider from a JSON hierarchy document file at `path`.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] if the file cannot be read or [`from_json`](MemoryProvider::from_json) fails.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ProviderError> {
        let document: GroupDocument = serde_json::from_slice(&std::fs::read(path)?)?;
        Self::from_document(&document)
    }

    fn group(&self, group: GroupHandle) -> Result<&MemoryGroup, ProviderError> {
        usize::try_from(group.get())
            .ok()
            .and_then(|index| self.groups.get(index))
            .ok_or(ProviderError::UnknownGroup(group))
    }

    fn group_mut(&mut self, group: GroupHandle) -> Result<&mut MemoryGroup, ProviderError> {
        usize::try_from(group.get())
            .ok()
            .and_then(|index| self.groups.get_mut(index))
            .ok_or(ProviderError::UnknownGroup(group))
    }

    fn validate_member_name(group: GroupHandle, name: &str) -> Result<NodeName, ProviderError> {
        let name = NodeName::new(name)?;
        if name.is_root() {
            Err(ProviderError::InvalidDocument(format!(
                "empty name in group {group}"
            )))
        } else {
            Ok(name)
        }
    }

    /// Add a child group `name` to `parent`.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] if `parent` is unknown, `name` is invalid, or `parent` already has a child group `name`.
    pub fn add_group(
        &mut self,
        parent: GroupHandle,
        name: &str,
    ) -> Result<GroupHandle, ProviderError> {
        let name = Self::validate_member_name(parent, name)?;
        let siblings = &self.group(parent)?.children;
        for sibling in siblings {
            if self.group(*sibling)?.name == name.as_str() {
                return Err(ProviderError::DuplicateName(parent, name.to_string()));
            }
        }
        let handle = GroupHandle::new(self.groups.len() as u64);
        self.groups.push(MemoryGroup {
            name: name.to_string(),
            parent: Some(parent),
            ..MemoryGroup::default()
        });
        self.group_mut(parent)?.children.push(handle);
        Ok(handle)
    }

    /// Set the attributes of `group`.
    ///
    /// # Errors
    /// Returns [`ProviderError::UnknownGroup`] if `group` is unknown.
    pub fn set_group_attributes(
        &mut self,
        group: GroupHandle,
        attributes: AttributeMap,
    ) -> Result<(), ProviderError> {
        self.group_mut(group)?.attributes = attributes;
        Ok(())
    }

    /// Add a dimension `name` of `size` to `group` and return its newly assigned identifier.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] if `group` is unknown, `name` is invalid, or `group` already has a dimension `name`.
    pub fn add_dimension(
        &mut self,
        group: GroupHandle,
        name: &str,
        size: u64,
        unlimited: bool,
    ) -> Result<DimensionId, ProviderError> {
        let id = DimensionId::new(self.next_dimension_id);
        self.add_dimension_with_id(group, id, name, size, unlimited)?;
        Ok(id)
    }

    /// Add a dimension `name` of `size` to `group` with an explicit identifier.
    ///
    /// The identifier is not checked for uniqueness across the hierarchy.
    /// This can be used to reproduce a dataset with inconsistent dimension identifiers.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] if `group` is unknown, `name` is invalid, or `group` already has a dimension `name`.
    pub fn add_dimension_with_id(
        &mut self,
        group: GroupHandle,
        id: DimensionId,
        name: &str,
        size: u64,
        unlimited: bool,
    ) -> Result<(), ProviderError> {
        let name = Self::validate_member_name(group, name)?;
        let memory_group = self.group_mut(group)?;
        if memory_group
            .dimensions
            .iter()
            .any(|dimension| dimension.name == name.as_str())
        {
            return Err(ProviderError::DuplicateName(group, name.to_string()));
        }
        memory_group.dimensions.push(DimensionInfo {
            id,
            name: name.to_string(),
            size,
        });
        if unlimited {
            memory_group.unlimited.push(id);
        }
        self.next_dimension_id = self.next_dimension_id.max(id.get().saturating_add(1));
        Ok(())
    }

    /// Add a variable `name` to `group`.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] if `group` is unknown, `name` is invalid, or `group` already has a variable `name`.
    pub fn add_variable(
        &mut self,
        group: GroupHandle,
        name: &str,
        data_type: DataType,
        dimension_ids: &[DimensionId],
        attributes: AttributeMap,
    ) -> Result<(), ProviderError> {
        let name = Self::validate_member_name(group, name)?;
        let memory_group = self.group_mut(group)?;
        if memory_group
            .variables
            .iter()
            .any(|variable| variable.name == name.as_str())
        {
            return Err(ProviderError::DuplicateName(group, name.to_string()));
        }
        memory_group.variables.push(VariableInfo {
            name: name.to_string(),
            data_type,
            dimension_ids: dimension_ids.to_vec(),
            attributes,
        });
        Ok(())
    }

    fn load_group(
        &mut self,
        group: GroupHandle,
        path: &NodePath,
        document: &GroupDocument,
        dimension_paths: &mut HashMap<NodePath, DimensionId>,
    ) -> Result<(), ProviderError> {
        self.set_group_attributes(group, document.attributes.clone())?;
        for dimension in &document.dimensions {
            let id = self.add_dimension(group, &dimension.name, dimension.size, dimension.unlimited)?;
            dimension_paths.insert(path.child(&NodeName::new(&dimension.name)?), id);
        }
        for variable in &document.variables {
            let dimension_ids = variable
                .dimensions
                .iter()
                .map(|reference| Self::resolve_dimension(path, reference, dimension_paths))
                .collect::<Result<Vec<_>, _>>()?;
            self.add_variable(
                group,
                &variable.name,
                variable.data_type,
                &dimension_ids,
                variable.attributes.clone(),
            )?;
        }
        for child in &document.groups {
            let child_handle = self.add_group(group, &child.name)?;
            let child_path = path.child(&NodeName::new(&child.name)?);
            self.load_group(child_handle, &child_path, child, dimension_paths)?;
        }
        Ok(())
    }

    fn resolve_dimension(
        path: &NodePath,
        reference: &str,
        dimension_paths: &HashMap<NodePath, DimensionId>,
    ) -> Result<DimensionId, ProviderError> {
        let unknown = || ProviderError::UnknownDimension(reference.to_string());
        if reference.starts_with('/') {
            return dimension_paths
                .get(&NodePath::new(reference)?)
                .copied()
                .ok_or_else(unknown);
        }
        let name = NodeName::new(reference)?;
        std::iter::once(path.clone())
            .chain(path.ancestors())
            .find_map(|group_path| dimension_paths.get(&group_path.child(&name)).copied())
            .ok_or_else(unknown)
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogProviderTraits for MemoryProvider {
    fn root(&self) -> GroupHandle {
        GroupHandle::new(0)
    }

    fn group_name(&self, group: GroupHandle) -> Result<String, ProviderError> {
        Ok(self.group(group)?.name.clone())
    }

    fn group_attributes(&self, group: GroupHandle) -> Result<AttributeMap, ProviderError> {
        Ok(self.group(group)?.attributes.clone())
    }

    fn list_child_groups(&self, group: GroupHandle) -> Result<Vec<GroupHandle>, ProviderError> {
        Ok(self.group(group)?.children.clone())
    }

    fn list_variables(&self, group: GroupHandle) -> Result<Vec<VariableInfo>, ProviderError> {
        Ok(self.group(group)?.variables.clone())
    }

    fn list_dimensions(
        &self,
        group: GroupHandle,
        include_parents: bool,
    ) -> Result<Vec<DimensionInfo>, ProviderError> {
        let mut memory_group = self.group(group)?;
        let mut dimensions = memory_group.dimensions.clone();
        if include_parents {
            while let Some(parent) = memory_group.parent {
                memory_group = self.group(parent)?;
                dimensions.extend(memory_group.dimensions.iter().cloned());
            }
        }
        Ok(dimensions)
    }

    fn list_unlimited_dimensions(
        &self,
        group: GroupHandle,
    ) -> Result<Vec<DimensionId>, ProviderError> {
        Ok(self.group(group)?.unlimited.clone())
    }

    fn resolve_group_by_path(&self, path: &NodePath) -> Result<GroupHandle, ProviderError> {
        let mut group = self.root();
        if path.is_root() {
            return Ok(group);
        }
        for component in path.as_str()[1..].split('/') {
            let mut found = None;
            for child in &self.group(group)?.children {
                if self.group(*child)?.name == component {
                    found = Some(*child);
                    break;
                }
            }
            group = found.ok_or_else(|| ProviderError::UnknownPath(path.clone()))?;
        }
        Ok(group)
    }
}
