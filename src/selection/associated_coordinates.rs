use serde_json::Value;

use crate::{
    catalog::Catalog,
    node::{NodeName, NodePath, PATH_SEPARATOR},
};

impl Catalog {
    /// Select the coordinate variables associated with every extracted variable.
    ///
    /// For each dimension of an extracted variable, the variable named like the dimension in the variable's group or any ancestor group is selected if present.
    pub fn add_associated_coordinates(&mut self) {
        let mut associated = Vec::new();
        for entry in self.entries.iter().filter(|entry| entry.is_variable() && entry.flags.extract) {
            for dimension in &entry.dimensions {
                let Some(Ok(name)) = dimension.name().map(NodeName::new) else {
                    continue;
                };
                for group_path in Self::search_groups(&entry.group_path) {
                    if let Some(index) = self.variable_position(&group_path.child(&name)) {
                        associated.push(index);
                    }
                }
            }
        }
        self.mark_associated(associated);
    }

    /// Select the variables named in the `attribute` attribute of every extracted variable.
    ///
    /// The attribute value is a whitespace separated list of variable names.
    /// A name starting with `/` is a full path, other names are resolved against the variable's group and then each ancestor group.
    /// Non-string attribute values and names matching no variable are logged and skipped.
    pub fn add_attribute_coordinates(&mut self, attribute: &str) {
        let mut associated = Vec::new();
        for entry in self.entries.iter().filter(|entry| entry.is_variable() && entry.flags.extract) {
            let Some(value) = entry.attributes.get(attribute) else {
                continue;
            };
            let Value::String(names) = value else {
                tracing::warn!(
                    "attribute {attribute} of {} is not a string: {value}",
                    entry.path()
                );
                continue;
            };
            for name in names.split_whitespace() {
                let candidates: Vec<NodePath> = if name.starts_with(PATH_SEPARATOR) {
                    NodePath::new(name).into_iter().collect()
                } else {
                    Self::search_groups(&entry.group_path)
                        .into_iter()
                        .filter_map(|group_path| {
                            let path = if group_path.is_root() {
                                format!("/{name}")
                            } else {
                                format!("{group_path}/{name}")
                            };
                            NodePath::new(&path).ok()
                        })
                        .collect()
                };
                let found: Vec<usize> = candidates
                    .iter()
                    .filter_map(|path| self.variable_position(path))
                    .collect();
                if found.is_empty() {
                    tracing::warn!(
                        "{name} in attribute {attribute} of {} is not a variable",
                        entry.path()
                    );
                }
                associated.extend(found);
            }
        }
        self.mark_associated(associated);
    }

    /// Recompute the extraction flags of groups.
    ///
    /// The root group is always extracted. Any other group is extracted if it holds an extracted variable at any depth.
    pub fn mark_extracted_groups(&mut self) {
        let extracted: Vec<NodePath> = self
            .extracted_variables()
            .into_iter()
            .cloned()
            .collect();
        for entry in &mut self.entries {
            if entry.is_group() {
                entry.flags.extract = entry.path.is_root()
                    || extracted
                        .iter()
                        .any(|variable| entry.path.is_ancestor_of(variable));
            }
        }
    }

    /// The group at `group_path` followed by its ancestors.
    fn search_groups(group_path: &NodePath) -> Vec<NodePath> {
        std::iter::once(group_path.clone())
            .chain(group_path.ancestors())
            .collect()
    }

    fn variable_position(&self, path: &NodePath) -> Option<usize> {
        self.entry_position(path.as_str())
            .filter(|index| self.entries[*index].is_variable())
    }

    fn mark_associated(&mut self, indices: Vec<usize>) {
        for index in indices {
            let entry = &mut self.entries[index];
            if !entry.flags.extract {
                tracing::debug!("adding associated variable {}", entry.path());
                entry.flags.extract = true;
                entry.flags.associated = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{catalog::Catalog, config::Config, provider::MemoryProvider};

    const ASSOCIATED: &str = r#"{
        "dimensions": [{"name": "time", "size": 3, "unlimited": true}, {"name": "nv", "size": 2}],
        "variables": [
            {"name": "time", "type": "double", "dimensions": ["time"], "attributes": {"bounds": "time_bnds"}},
            {"name": "time_bnds", "type": "double", "dimensions": ["time", "nv"]},
            {"name": "lat", "type": "float"}
        ],
        "groups": [
            {
                "name": "g1",
                "dimensions": [{"name": "lon", "size": 4}],
                "variables": [
                    {"name": "lon", "type": "float", "dimensions": ["lon"]},
                    {
                        "name": "t",
                        "type": "float",
                        "dimensions": ["time", "lon"],
                        "attributes": {"coordinates": "lat  g2/lon /g2/missing", "bounds": 1}
                    }
                ],
                "groups": [{"name": "g1g1", "variables": [{"name": "x", "type": "int"}]}]
            },
            {"name": "g2", "variables": [{"name": "lon", "type": "float"}]}
        ]
    }"#;

    fn catalog() -> Catalog {
        Catalog::new_with_provider(&MemoryProvider::from_json(ASSOCIATED).unwrap(), "/").unwrap()
    }

    fn extracted(catalog: &Catalog) -> Vec<String> {
        catalog
            .extracted_variables()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    const NONE: &[&str] = &[];

    #[test]
    fn associated_dimension_coordinates() {
        let mut catalog = catalog();
        catalog.select(NONE, &["/g1/t"], &Config::default()).unwrap();
        catalog.add_associated_coordinates();
        assert_eq!(extracted(&catalog), vec!["/time", "/g1/lon", "/g1/t"]);
        assert!(catalog.entry("/time").unwrap().flags().associated);
        assert!(!catalog.entry("/g1/t").unwrap().flags().associated);
        // /g2/lon is not in an ancestor group of /g1/t
        assert!(!catalog.entry("/g2/lon").unwrap().is_extracted());
    }

    #[test]
    fn associated_attribute_coordinates() {
        let mut catalog = catalog();
        catalog.select(NONE, &["/g1/t"], &Config::default()).unwrap();
        catalog.add_attribute_coordinates("coordinates");
        assert_eq!(extracted(&catalog), vec!["/lat", "/g1/t", "/g2/lon"]);
        // a non-string value is skipped
        catalog.add_attribute_coordinates("bounds");
        assert_eq!(extracted(&catalog), vec!["/lat", "/g1/t", "/g2/lon"]);

        catalog.select(NONE, &["/time"], &Config::default()).unwrap();
        catalog.add_attribute_coordinates("bounds");
        assert_eq!(extracted(&catalog), vec!["/time", "/time_bnds"]);
    }

    #[test]
    fn associated_extracted_groups() {
        let mut catalog = catalog();
        catalog.select(NONE, &["x"], &Config::default()).unwrap();
        catalog.mark_extracted_groups();
        let groups: Vec<String> = catalog
            .groups()
            .filter(|group| group.is_extracted())
            .map(|group| group.path().to_string())
            .collect();
        assert_eq!(groups, vec!["/", "/g1", "/g1/g1g1"]);

        catalog.select(NONE, &["/lat"], &Config::default()).unwrap();
        catalog.mark_extracted_groups();
        assert_eq!(catalog.groups().filter(|group| group.is_extracted()).count(), 1);
    }
}
