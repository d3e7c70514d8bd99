use std::cmp::Reverse;

use crate::catalog::{Catalog, DimensionBinding};

use super::{choose_binding, CoordinateBinding};

impl Catalog {
    /// Find the in-scope coordinate variables of every dimension, then bind every variable dimension to one of them.
    pub(crate) fn resolve_coordinates(&mut self) {
        self.find_coordinates();
        self.bind_coordinates();
    }

    fn find_coordinates(&mut self) {
        let mut candidates = Vec::new();
        for (dimension_index, dimension) in self.dimensions.iter().enumerate() {
            for (entry_index, entry) in self.entries.iter().enumerate() {
                if entry.is_variable()
                    && entry.name() == dimension.name()
                    && self.in_scope(entry, dimension)
                {
                    tracing::debug!("{} is a coordinate of {}", entry.path(), dimension.path());
                    candidates.push((
                        dimension_index,
                        entry_index,
                        CoordinateBinding::new(entry, dimension),
                    ));
                }
            }
        }

        for (dimension_index, entry_index, binding) in candidates {
            let entry = &mut self.entries[entry_index];
            entry.is_coordinate = true;
            entry.is_record |= binding.is_record;
            let dimension = &mut self.dimensions[dimension_index];
            dimension.has_scope = true;
            dimension.coordinates.push(binding);
        }
        for dimension in &mut self.dimensions {
            dimension
                .coordinates
                .sort_by_key(|binding| Reverse(binding.depth));
        }
    }

    fn bind_coordinates(&mut self) {
        let mut bindings = Vec::new();
        for (entry_index, entry) in self.entries.iter().enumerate() {
            if !entry.is_variable() {
                continue;
            }
            for (position, dimension_ref) in entry.dimensions.iter().enumerate() {
                let Some(dimension) = self.dimension(dimension_ref.id) else {
                    continue;
                };
                let binding = if dimension.coordinates.is_empty() {
                    DimensionBinding::NonCoordinate
                } else if let Some(index) = choose_binding(entry, dimension) {
                    DimensionBinding::Coordinate {
                        index,
                        path: dimension.coordinates[index].coordinate_path.clone(),
                    }
                } else {
                    tracing::debug!(
                        "no coordinate of {} is in scope of {}",
                        dimension.path(),
                        entry.path()
                    );
                    DimensionBinding::OutOfScope
                };
                bindings.push((entry_index, position, binding));
            }
        }
        for (entry_index, position, binding) in bindings {
            self.entries[entry_index].dimensions[position].binding = binding;
        }
    }
}
