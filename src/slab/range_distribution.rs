use std::collections::BTreeSet;

use crate::{
    catalog::{Catalog, DimensionBinding},
    config::Config,
};

use super::{IterationPlan, RangeSet, RangeSpec, SlabError};

impl Catalog {
    /// Attach range specifications to dimensions and coordinates, then merge those used by extracted variables.
    ///
    /// A specification is attached by name to every coordinate binding of that name.
    /// A dimension without coordinate bindings receives the specifications of its own name instead.
    /// Only the ranges reached from an extracted variable, through its dimensions or their chosen coordinates, are merged.
    /// Ranges from a previous call are discarded.
    ///
    /// # Errors
    /// Returns [`SlabError::UnknownName`] if a specification names no dimension or coordinate in the catalog, or another [`SlabError`] if a merge fails.
    pub fn apply_ranges(&mut self, specs: &[RangeSpec], config: &Config) -> Result<(), SlabError> {
        for dimension in &mut self.dimensions {
            dimension.ranges = RangeSet::new(dimension.size);
            for binding in &mut dimension.coordinates {
                binding.ranges = RangeSet::new(binding.size);
            }
        }

        for spec in specs {
            let mut attached = 0_usize;
            for dimension in &mut self.dimensions {
                if dimension.coordinates.is_empty() {
                    if dimension.name() == spec.name() {
                        dimension.ranges.push(spec.clone());
                        attached += 1;
                    }
                } else {
                    for binding in &mut dimension.coordinates {
                        if binding.name() == spec.name() {
                            binding.ranges.push(spec.clone());
                            attached += 1;
                        }
                    }
                }
            }
            if attached == 0 {
                return Err(SlabError::UnknownName(spec.name().to_string()));
            }
            tracing::debug!("range {spec} attached to {attached} dimensions and coordinates");
        }

        let reachable: BTreeSet<(usize, Option<usize>)> = self
            .variables()
            .filter(|entry| entry.is_extracted())
            .flat_map(|entry| entry.dimensions())
            .filter_map(|dimension_ref| {
                let position = self.dimension_position(dimension_ref.id())?;
                Some(match dimension_ref.binding() {
                    DimensionBinding::Coordinate { index, .. } => (position, Some(*index)),
                    DimensionBinding::NonCoordinate | DimensionBinding::OutOfScope => {
                        (position, None)
                    }
                })
            })
            .collect();

        for (position, coordinate) in reachable {
            let dimension = &mut self.dimensions[position];
            let (ranges, is_record) = match coordinate {
                Some(index) => match dimension.coordinates.get_mut(index) {
                    Some(binding) => (&mut binding.ranges, binding.is_record),
                    None => continue,
                },
                None => (&mut dimension.ranges, dimension.is_record),
            };
            if !ranges.specs().is_empty() {
                ranges.merge(is_record, config)?;
            }
        }
        Ok(())
    }

    /// Returns the iteration plan of every dimension of the variable at `path`, outermost first.
    ///
    /// A dimension bound to a coordinate uses the ranges of that coordinate, any other dimension uses its own ranges.
    ///
    /// # Errors
    /// Returns [`SlabError::UnknownVariable`] if there is no variable at `path`.
    pub fn variable_plans(&self, path: &str) -> Result<Vec<IterationPlan>, SlabError> {
        let entry = self
            .entry(path)
            .filter(|entry| entry.kind().is_variable())
            .ok_or_else(|| SlabError::UnknownVariable(path.to_string()))?;
        Ok(entry
            .dimensions()
            .iter()
            .filter_map(|dimension_ref| {
                let dimension = self.dimension(dimension_ref.id())?;
                let ranges = match dimension_ref.binding() {
                    DimensionBinding::Coordinate { index, .. } => dimension
                        .coordinates()
                        .get(*index)
                        .map_or(dimension.ranges(), |binding| binding.ranges()),
                    DimensionBinding::NonCoordinate | DimensionBinding::OutOfScope => {
                        dimension.ranges()
                    }
                };
                Some(ranges.plan())
            })
            .collect())
    }
}
