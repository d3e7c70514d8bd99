use super::{Catalog, CatalogError};

impl Catalog {
    /// Bind every variable dimension to its unique dimension, filling in the dimension path and defining group.
    ///
    /// A variable dimension whose name differs from the unique dimension with the same identifier indicates duplicate identifiers in the dataset.
    pub(crate) fn bind_dimensions(&mut self) -> Result<(), CatalogError> {
        let Self {
            entries,
            dimensions,
            dimension_index,
            ..
        } = self;
        for entry in entries.iter_mut().filter(|entry| entry.kind.is_variable()) {
            for dimension_ref in &mut entry.dimensions {
                let dimension = dimension_index
                    .get(&dimension_ref.id)
                    .map(|index| &dimensions[*index])
                    .ok_or_else(|| CatalogError::UnknownDimensionId {
                        variable: entry.path.clone(),
                        id: dimension_ref.id,
                    })?;
                if let Some(local) = &dimension_ref.name {
                    if local != dimension.name() {
                        return Err(CatalogError::DimensionNameMismatch {
                            variable: entry.path.clone(),
                            id: dimension_ref.id,
                            local: local.clone(),
                            global: dimension.path.clone(),
                        });
                    }
                } else {
                    dimension_ref.name = Some(dimension.name().to_string());
                }
                dimension_ref.path = Some(dimension.path.clone());
                dimension_ref.group_path = Some(dimension.group_path.clone());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        catalog::{Catalog, CatalogError},
        node::NodePath,
        provider::{
            AttributeMap, CatalogProviderTraits, DataType, DimensionId, DimensionInfo,
            GroupHandle, MemoryProvider, ProviderError, VariableInfo,
        },
    };

    /// Reports a different name for dimensions seen from descendant groups.
    struct RenamingProvider(MemoryProvider);

    impl CatalogProviderTraits for RenamingProvider {
        fn root(&self) -> GroupHandle {
            self.0.root()
        }

        fn group_name(&self, group: GroupHandle) -> Result<String, ProviderError> {
            self.0.group_name(group)
        }

        fn group_attributes(&self, group: GroupHandle) -> Result<AttributeMap, ProviderError> {
            self.0.group_attributes(group)
        }

        fn list_child_groups(&self, group: GroupHandle) -> Result<Vec<GroupHandle>, ProviderError> {
            self.0.list_child_groups(group)
        }

        fn list_variables(&self, group: GroupHandle) -> Result<Vec<VariableInfo>, ProviderError> {
            self.0.list_variables(group)
        }

        fn list_dimensions(
            &self,
            group: GroupHandle,
            include_parents: bool,
        ) -> Result<Vec<DimensionInfo>, ProviderError> {
            let mut dimensions = self.0.list_dimensions(group, include_parents)?;
            if include_parents {
                for dimension in &mut dimensions {
                    dimension.name.push_str("_renamed");
                }
            }
            Ok(dimensions)
        }

        fn list_unlimited_dimensions(
            &self,
            group: GroupHandle,
        ) -> Result<Vec<DimensionId>, ProviderError> {
            self.0.list_unlimited_dimensions(group)
        }

        fn resolve_group_by_path(&self, path: &NodePath) -> Result<GroupHandle, ProviderError> {
            self.0.resolve_group_by_path(path)
        }
    }

    /// Reports the first dimension of each group a second time under a fresh identifier.
    struct DuplicatingProvider(MemoryProvider);

    impl CatalogProviderTraits for DuplicatingProvider {
        fn root(&self) -> GroupHandle {
            self.0.root()
        }

        fn group_name(&self, group: GroupHandle) -> Result<String, ProviderError> {
            self.0.group_name(group)
        }

        fn group_attributes(&self, group: GroupHandle) -> Result<AttributeMap, ProviderError> {
            self.0.group_attributes(group)
        }

        fn list_child_groups(&self, group: GroupHandle) -> Result<Vec<GroupHandle>, ProviderError> {
            self.0.list_child_groups(group)
        }

        fn list_variables(&self, group: GroupHandle) -> Result<Vec<VariableInfo>, ProviderError> {
            self.0.list_variables(group)
        }

        fn list_dimensions(
            &self,
            group: GroupHandle,
            include_parents: bool,
        ) -> Result<Vec<DimensionInfo>, ProviderError> {
            let mut dimensions = self.0.list_dimensions(group, include_parents)?;
            if let Some(first) = dimensions.first() {
                let duplicate = DimensionInfo {
                    id: DimensionId::new(first.id.get() + 100),
                    name: first.name.clone(),
                    size: first.size,
                };
                dimensions.push(duplicate);
            }
            Ok(dimensions)
        }

        fn list_unlimited_dimensions(
            &self,
            group: GroupHandle,
        ) -> Result<Vec<DimensionId>, ProviderError> {
            self.0.list_unlimited_dimensions(group)
        }

        fn resolve_group_by_path(&self, path: &NodePath) -> Result<GroupHandle, ProviderError> {
            self.0.resolve_group_by_path(path)
        }
    }

    #[test]
    fn dimension_binder_paths() {
        let mut provider = MemoryProvider::new();
        let root = provider.root();
        let lat = provider.add_dimension(root, "lat", 2, false).unwrap();
        let g1 = provider.add_group(root, "g1").unwrap();
        provider
            .add_variable(g1, "v", DataType::Float, &[lat], AttributeMap::new())
            .unwrap();
        let catalog = Catalog::new_with_provider(&provider, "/").unwrap();
        let dimension = &catalog.entry("/g1/v").unwrap().dimensions()[0];
        assert_eq!(dimension.path().map(NodePath::as_str), Some("/lat"));
        assert_eq!(dimension.group_path().map(NodePath::as_str), Some("/"));
    }

    #[test]
    fn dimension_binder_invisible_dimension() {
        // A variable may reference a dimension defined in a sibling group.
        let mut provider = MemoryProvider::new();
        let root = provider.root();
        let g1 = provider.add_group(root, "g1").unwrap();
        let g2 = provider.add_group(root, "g2").unwrap();
        provider
            .add_variable(g1, "v", DataType::Float, &[DimensionId::new(0)], AttributeMap::new())
            .unwrap();
        provider.add_dimension(g2, "x", 2, false).unwrap();
        let catalog = Catalog::new_with_provider(&provider, "/").unwrap();
        let dimension = &catalog.entry("/g1/v").unwrap().dimensions()[0];
        assert_eq!(dimension.name(), Some("x"));
        assert_eq!(dimension.path().map(NodePath::as_str), Some("/g2/x"));
    }

    #[test]
    fn dimension_binder_unknown_id() {
        let mut provider = MemoryProvider::new();
        let root = provider.root();
        provider
            .add_variable(root, "v", DataType::Float, &[DimensionId::new(9)], AttributeMap::new())
            .unwrap();
        assert!(matches!(
            Catalog::new_with_provider(&provider, "/"),
            Err(CatalogError::UnknownDimensionId { .. })
        ));
    }

    #[test]
    fn dimension_binder_name_mismatch() {
        let mut provider = MemoryProvider::new();
        let root = provider.root();
        let lat = provider.add_dimension(root, "lat", 2, false).unwrap();
        provider
            .add_variable(root, "v", DataType::Float, &[lat], AttributeMap::new())
            .unwrap();
        assert!(matches!(
            Catalog::new_with_provider(&RenamingProvider(provider), "/"),
            Err(CatalogError::DimensionNameMismatch { .. })
        ));
    }

    #[test]
    fn dimension_binder_duplicate_path() {
        let mut provider = MemoryProvider::new();
        let root = provider.root();
        let lat = provider.add_dimension(root, "lat", 2, false).unwrap();
        provider
            .add_variable(root, "v", DataType::Float, &[lat], AttributeMap::new())
            .unwrap();
        match Catalog::new_with_provider(&DuplicatingProvider(provider), "/") {
            Err(CatalogError::DuplicateDimensionPath {
                path,
                first,
                second,
            }) => {
                assert_eq!(path.as_str(), "/lat");
                assert_eq!(first, lat);
                assert_eq!(second, DimensionId::new(lat.get() + 100));
            }
            result => panic!("unexpected result {result:?}"),
        }
    }
}
