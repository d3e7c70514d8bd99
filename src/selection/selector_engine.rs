use crate::{
    catalog::Catalog,
    config::Config,
    node::NodePath,
};

use super::{SelectionError, SelectionFlags, Selector, SelectorKind};

impl Catalog {
    /// Select entries for extraction with group and variable selectors.
    ///
    /// All selection flags are reset first, so selecting twice with the same arguments gives the same result.
    /// If both lists are empty, every group and supported variable is selected unless [`Config::extract_all_coordinates`] is set.
    /// The lists are combined by union if [`Config::union_selection`] is set or either list is empty, and by intersection otherwise.
    /// Under intersection a variable matched by a short selector is dropped unless its group is also matched.
    ///
    /// # Errors
    /// Returns a [`SelectionError`] if a selector is invalid or matches nothing.
    pub fn select<S: AsRef<str>>(
        &mut self,
        groups: &[S],
        variables: &[S],
        config: &Config,
    ) -> Result<(), SelectionError> {
        let group_selectors = groups
            .iter()
            .map(|text| Selector::parse(text.as_ref(), SelectorKind::Group))
            .collect::<Result<Vec<_>, _>>()?;
        let variable_selectors = variables
            .iter()
            .map(|text| Selector::parse(text.as_ref(), SelectorKind::Variable))
            .collect::<Result<Vec<_>, _>>()?;

        for entry in &mut self.entries {
            entry.flags = SelectionFlags {
                intersection: true,
                ..SelectionFlags::default()
            };
        }

        if group_selectors.is_empty()
            && variable_selectors.is_empty()
            && !config.extract_all_coordinates()
        {
            for entry in &mut self.entries {
                if entry.is_group() || entry.is_variable() {
                    entry.flags.default_all = true;
                }
            }
        }

        for selector in group_selectors.iter().chain(&variable_selectors) {
            self.apply_selector(selector)?;
        }

        let effective_union =
            config.union_selection() || group_selectors.is_empty() || variable_selectors.is_empty();
        if !effective_union {
            self.apply_intersection();
        }

        for entry in &mut self.entries {
            let flags = &mut entry.flags;
            flags.extract = (effective_union
                && (flags.matched || flags.selected_via_group || flags.contains_selected_variable))
                || flags.default_all
                || (!effective_union && flags.matched && flags.intersection);
        }

        tracing::info!(
            "selected {} of {} variables with {} group and {} variable selectors ({})",
            self.extracted_variables().len(),
            self.entries.iter().filter(|entry| entry.is_variable()).count(),
            group_selectors.len(),
            variable_selectors.len(),
            if effective_union { "union" } else { "intersection" }
        );
        Ok(())
    }

    /// Flag the entries matched by `selector` and propagate to related entries.
    fn apply_selector(&mut self, selector: &Selector) -> Result<(), SelectionError> {
        let matched_groups: Vec<NodePath> = self
            .entries
            .iter_mut()
            .filter(|entry| selector.matches(entry))
            .map(|entry| {
                entry.flags.matched = true;
                match selector.kind() {
                    SelectorKind::Group => entry.flags.recursive = selector.is_recursive(),
                    SelectorKind::Variable => entry.flags.full_path |= selector.is_full_path(),
                }
                entry.group_path.clone()
            })
            .collect();
        if matched_groups.is_empty() {
            return Err(SelectionError::NoMatch(
                selector.kind(),
                selector.text().to_string(),
            ));
        }
        tracing::debug!(
            "{} selector {} matched {} entries",
            selector.kind(),
            selector.text(),
            matched_groups.len()
        );

        for group_path in &matched_groups {
            for entry in &mut self.entries {
                match selector.kind() {
                    SelectorKind::Group => {
                        if entry.is_variable() && &entry.group_path == group_path {
                            entry.flags.selected_via_group = true;
                        }
                    }
                    SelectorKind::Variable => {
                        if entry.is_group() && &entry.path == group_path {
                            entry.flags.contains_selected_variable = true;
                        }
                    }
                }
                if entry.is_group() && group_path.as_str().contains(entry.path.as_str()) {
                    entry.flags.ancestor = true;
                }
            }
        }
        Ok(())
    }

    /// Drop variables matched by a short selector whose group is not matched.
    fn apply_intersection(&mut self) {
        let dropped: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                entry.is_variable() && entry.flags.matched && !entry.flags.full_path
            })
            .filter(|(_, entry)| {
                !self
                    .entry(entry.group_path.as_str())
                    .is_some_and(|group| group.flags.matched)
            })
            .map(|(index, _)| index)
            .collect();
        for index in dropped {
            tracing::debug!(
                "{} is not in a selected group",
                self.entries[index].path()
            );
            self.entries[index].flags.intersection = false;
        }
    }

    /// Invert the extraction flag of every supported variable.
    ///
    /// Groups are unaffected, see [`Catalog::mark_extracted_groups`].
    pub fn exclude(&mut self) {
        for entry in &mut self.entries {
            if entry.is_variable() {
                entry.flags.extract = !entry.flags.extract;
            }
        }
    }

    /// Select every coordinate variable for extraction.
    pub fn add_all_coordinates(&mut self) {
        for entry in &mut self.entries {
            if entry.is_variable() && entry.is_coordinate {
                entry.flags.extract = true;
            }
        }
    }
}
