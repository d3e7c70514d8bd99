use itertools::Itertools;

use super::{Catalog, CatalogEntry, DimensionBinding, ObjectKind};

impl Catalog {
    /// Returns a string representation of the hierarchy.
    ///
    /// Each group and variable is on its own line, indented by depth below the catalog root.
    /// Variables show their type and dimensions and are annotated as coordinate, record, or unsupported variables.
    #[must_use]
    pub fn hierarchy_tree(&self) -> String {
        let root_depth = self
            .entries
            .first()
            .map_or(0, |root| root.path.depth());
        let mut string = String::default();
        for (index, entry) in self.entries.iter().enumerate() {
            let level = if entry.is_group() {
                entry.depth - root_depth
            } else {
                entry.depth - root_depth + 1
            };
            string.push_str(&" ".repeat(level * 2));
            if index == 0 {
                string.push_str(entry.path.as_str());
            } else {
                string.push_str(entry.name());
            }
            if entry.kind.is_variable() {
                string.push_str(&format!(" {}", describe_variable(entry)));
            }
            string.push('\n');
        }
        string
    }

    /// Returns a report of every group, variable, and dimension of the catalog.
    #[must_use]
    pub fn report(&self) -> String {
        let mut string = String::default();
        for entry in &self.entries {
            let counts = entry.counts();
            if entry.is_group() {
                string.push_str(&format!(
                    "{}: {} subgroups, {} dimensions ({} record), {} attributes, {} variables\n",
                    entry.path,
                    counts.groups,
                    counts.dimensions,
                    counts.record_dimensions,
                    counts.attributes,
                    counts.variables
                ));
            } else {
                string.push_str(&format!(
                    "{}: {}, {} attributes\n",
                    entry.path,
                    describe_variable(entry),
                    counts.attributes
                ));
                for dimension in &entry.dimensions {
                    let path = dimension
                        .path()
                        .map_or_else(|| dimension.id().to_string(), ToString::to_string);
                    let binding = match dimension.binding() {
                        DimensionBinding::NonCoordinate => "no coordinate".to_string(),
                        DimensionBinding::OutOfScope => "no coordinate in scope".to_string(),
                        DimensionBinding::Coordinate { path, .. } => format!("coordinate {path}"),
                    };
                    string.push_str(&format!("  {path}: {binding}\n"));
                }
            }
        }
        for dimension in &self.dimensions {
            string.push_str(&format!(
                "{}: size {}{}, coordinates [{}]\n",
                dimension.path,
                dimension.size,
                if dimension.is_record { ", record" } else { "" },
                dimension
                    .coordinates
                    .iter()
                    .map(|binding| {
                        let ranges = binding.ranges();
                        if ranges.is_basic() {
                            binding.coordinate_path().to_string()
                        } else {
                            format!(
                                "{} ({})",
                                binding.coordinate_path(),
                                ranges.specs().iter().join(" ")
                            )
                        }
                    })
                    .join(", ")
            ));
            if !dimension.ranges.is_basic() {
                string.push_str(&format!(
                    "  ranges {} -> {} indices\n",
                    dimension.ranges.specs().iter().join(" "),
                    dimension.ranges.count()
                ));
            }
        }
        string
    }
}

fn describe_variable(entry: &CatalogEntry) -> String {
    let data_type = entry
        .data_type
        .map_or_else(String::new, |data_type| data_type.to_string());
    let dimensions = entry
        .dimensions
        .iter()
        .map(|dimension| dimension.name().unwrap_or("?"))
        .join(", ");
    let mut description = format!("{data_type} [{dimensions}]");
    if entry.kind == ObjectKind::UnsupportedVariable {
        description.push_str(" (unsupported)");
    }
    if entry.is_coordinate {
        description.push_str(" (coordinate)");
    }
    if entry.is_record {
        description.push_str(" (record)");
    }
    description
}
