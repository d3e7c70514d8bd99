use crate::{
    node::{NodeName, NodePath},
    provider::{CatalogProviderTraits, DimensionId, DimensionInfo, GroupHandle},
};

use super::{Catalog, CatalogEntry, CatalogError, DimensionEntry, DimensionRef, EntryCounts};

impl Catalog {
    /// Catalog `group` at `path` and then its subgroups, depth first.
    ///
    /// The group entry is followed by its variables. The dimensions defined in the group are recorded before descending.
    pub(crate) fn visit_group<TProvider: CatalogProviderTraits + ?Sized>(
        &mut self,
        provider: &TProvider,
        group: GroupHandle,
        path: NodePath,
    ) -> Result<(), CatalogError> {
        let children = provider.list_child_groups(group)?;
        let variables = provider.list_variables(group)?;
        let dimensions = provider.list_dimensions(group, false)?;
        let visible_dimensions = provider.list_dimensions(group, true)?;
        let unlimited = provider.list_unlimited_dimensions(group)?;
        let attributes = provider.group_attributes(group)?;

        let counts = EntryCounts {
            groups: children.len(),
            variables: variables.len(),
            dimensions: dimensions.len(),
            record_dimensions: dimensions
                .iter()
                .filter(|dimension| unlimited.contains(&dimension.id))
                .count(),
            attributes: attributes.len(),
        };
        self.push_entry(CatalogEntry::new_group(path.clone(), counts, attributes))?;

        for variable in variables {
            let variable_path = path.child(&NodeName::new(&variable.name)?);
            let dimension_refs = variable
                .dimension_ids
                .iter()
                .map(|id| {
                    let name = visible_dimensions
                        .iter()
                        .find(|dimension| dimension.id == *id)
                        .map(|dimension| dimension.name.clone());
                    DimensionRef::new(*id, name)
                })
                .collect();
            let entry = CatalogEntry::new_variable(
                variable_path,
                path.clone(),
                variable.data_type,
                dimension_refs,
                variable.attributes,
            );
            if !entry.is_variable() {
                tracing::warn!(
                    "variable {} has unsupported type {} and will not be selected",
                    entry.path,
                    variable.data_type
                );
            }
            self.push_entry(entry)?;
        }

        self.push_group_dimensions(dimensions, &unlimited, &path)?;

        for child in children {
            let name = NodeName::new(&provider.group_name(child)?)?;
            self.visit_group(provider, child, path.child(&name))?;
        }
        Ok(())
    }

    /// Catalog the dimensions defined in the ancestor groups of `path`, outermost first.
    ///
    /// Variables below a subtree root may use these dimensions.
    pub(crate) fn visit_ancestor_dimensions<TProvider: CatalogProviderTraits + ?Sized>(
        &mut self,
        provider: &TProvider,
        path: &NodePath,
    ) -> Result<(), CatalogError> {
        for ancestor in path.ancestors().into_iter().rev() {
            let group = provider.resolve_group_by_path(&ancestor)?;
            let dimensions = provider.list_dimensions(group, false)?;
            let unlimited = provider.list_unlimited_dimensions(group)?;
            self.push_group_dimensions(dimensions, &unlimited, &ancestor)?;
        }
        Ok(())
    }

    fn push_group_dimensions(
        &mut self,
        dimensions: Vec<DimensionInfo>,
        unlimited: &[DimensionId],
        path: &NodePath,
    ) -> Result<(), CatalogError> {
        for dimension in dimensions {
            let dimension_path = path.child(&NodeName::new(&dimension.name)?);
            let is_record = unlimited.contains(&dimension.id);
            self.push_dimension(DimensionEntry::new(
                dimension.id,
                dimension_path,
                path.clone(),
                dimension.size,
                is_record,
            ))?;
        }
        Ok(())
    }
}
