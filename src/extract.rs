//! The extraction pipeline.
//!
//! An [`Extraction`] runs every pass over a dataset in order:
//! 1. build the [`Catalog`] below the requested root group,
//! 2. [select](Catalog::select) groups and variables,
//! 3. [exclude](Catalog::exclude) if configured,
//! 4. add [all coordinates](Catalog::add_all_coordinates) if configured,
//! 5. add [associated coordinates](Catalog::add_associated_coordinates) and [attribute coordinates](Catalog::add_attribute_coordinates) if configured,
//! 6. [mark the groups](Catalog::mark_extracted_groups) holding extracted variables,
//! 7. [distribute and merge ranges](Catalog::apply_ranges),
//! 8. compute [output paths](Catalog::output_paths) and per-variable [iteration plans](Catalog::variable_plans).
//!
//! The result is an [`ExtractionPlan`] for an external copy loop to follow.

use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError, ObjectKind},
    config::Config,
    node::NodePath,
    provider::{CatalogProviderTraits, ProviderError},
    selection::{GroupPathEdit, SelectionError},
    slab::{IterationPlan, RangeSpec, SlabError},
};

/// An extraction error.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// A catalog error.
    #[error(transparent)]
    CatalogError(#[from] CatalogError),
    /// A selection error.
    #[error(transparent)]
    SelectionError(#[from] SelectionError),
    /// A slab error.
    #[error(transparent)]
    SlabError(#[from] SlabError),
    /// A provider error.
    #[error(transparent)]
    ProviderError(#[from] ProviderError),
}

/// What to extract from a dataset.
///
/// Everything is optional. An empty request extracts the whole dataset.
#[derive(Clone, Debug)]
pub struct ExtractionRequest {
    root_path: String,
    group_selectors: Vec<String>,
    variable_selectors: Vec<String>,
    ranges: Vec<String>,
    group_path_edit: Option<String>,
}

impl Default for ExtractionRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionRequest {
    /// Create a new request for the whole dataset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root_path: "/".to_string(),
            group_selectors: Vec::new(),
            variable_selectors: Vec::new(),
            ranges: Vec::new(),
            group_path_edit: None,
        }
    }

    /// Set the path of the group to catalog.
    ///
    /// If left unmodified, the whole dataset is catalogued.
    pub fn root_path(&mut self, root_path: &str) -> &mut Self {
        self.root_path = root_path.to_string();
        self
    }

    /// Set the group selectors.
    pub fn group_selectors<I, S>(&mut self, group_selectors: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_selectors = group_selectors.into_iter().map(Into::into).collect();
        self
    }

    /// Set the variable selectors.
    pub fn variable_selectors<I, S>(&mut self, variable_selectors: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variable_selectors = variable_selectors.into_iter().map(Into::into).collect();
        self
    }

    /// Set the range specifications, each parsed by [`RangeSpec::parse`].
    pub fn ranges<I, S>(&mut self, ranges: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ranges = ranges.into_iter().map(Into::into).collect();
        self
    }

    /// Set the group path edit, parsed by [`GroupPathEdit::parse`].
    ///
    /// If left unmodified, variables keep their group paths.
    pub fn group_path_edit(&mut self, group_path_edit: Option<&str>) -> &mut Self {
        self.group_path_edit = group_path_edit.map(ToString::to_string);
        self
    }
}

/// The outcome of an extraction.
#[derive(Clone, Debug)]
pub struct ExtractionPlan {
    catalog: Catalog,
    objects: Vec<(NodePath, ObjectKind, bool)>,
    output_paths: Vec<(NodePath, NodePath)>,
    variable_plans: Vec<(NodePath, Vec<IterationPlan>)>,
}

impl ExtractionPlan {
    /// The finished catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Consume the plan and return the finished catalog.
    #[must_use]
    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// The `(path, kind, extract)` triple of every catalogued object in traversal order.
    #[must_use]
    pub fn objects(&self) -> &[(NodePath, ObjectKind, bool)] {
        &self.objects
    }

    /// The `(variable path, output path)` of every extracted variable in traversal order.
    #[must_use]
    pub fn output_paths(&self) -> &[(NodePath, NodePath)] {
        &self.output_paths
    }

    /// The output path of the extracted variable at `path`.
    #[must_use]
    pub fn output_path(&self, path: &str) -> Option<&NodePath> {
        self.output_paths
            .iter()
            .find(|(variable, _)| variable.as_str() == path)
            .map(|(_, output)| output)
    }

    /// The iteration plans of every extracted variable in traversal order.
    #[must_use]
    pub fn variable_plans(&self) -> &[(NodePath, Vec<IterationPlan>)] {
        &self.variable_plans
    }

    /// The iteration plans of the extracted variable at `path`, one per dimension.
    #[must_use]
    pub fn variable_plan(&self, path: &str) -> Option<&[IterationPlan]> {
        self.variable_plans
            .iter()
            .find(|(variable, _)| variable.as_str() == path)
            .map(|(_, plans)| plans.as_slice())
    }
}

/// An extraction run with a fixed [`Config`].
#[derive(Clone, Debug, Default)]
pub struct Extraction {
    config: Config,
}

impl Extraction {
    /// Create a new extraction with `config`.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Run every pass of the extraction over `provider`.
    ///
    /// # Errors
    /// Returns an [`ExtractionError`] if the dataset is inconsistent, or a selector, range, or group path edit in `request` is invalid.
    pub fn run<TProvider: CatalogProviderTraits + ?Sized>(
        &self,
        provider: &TProvider,
        request: &ExtractionRequest,
    ) -> Result<ExtractionPlan, ExtractionError> {
        let config = &self.config;
        let specs = request
            .ranges
            .iter()
            .map(|range| RangeSpec::parse(range))
            .collect::<Result<Vec<_>, _>>()?;
        let group_path_edit = request
            .group_path_edit
            .as_deref()
            .map(GroupPathEdit::parse)
            .transpose()?;

        let mut catalog = Catalog::new_with_provider(provider, &request.root_path)?;
        catalog.select(
            &request.group_selectors,
            &request.variable_selectors,
            config,
        )?;
        if config.exclude() {
            catalog.exclude();
        }
        if config.extract_all_coordinates() {
            catalog.add_all_coordinates();
        }
        if config.extract_associated_coordinates() {
            catalog.add_associated_coordinates();
            for attribute in config.associated_attributes() {
                catalog.add_attribute_coordinates(attribute);
            }
        }
        catalog.mark_extracted_groups();
        catalog.apply_ranges(&specs, config)?;

        let output_paths = catalog.output_paths(group_path_edit.as_ref())?;
        let variable_plans = output_paths
            .iter()
            .map(|(path, _)| {
                catalog
                    .variable_plans(path.as_str())
                    .map(|plans| (path.clone(), plans))
            })
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(
            "extracting {} variables below {}",
            output_paths.len(),
            request.root_path
        );

        Ok(ExtractionPlan {
            objects: catalog.extraction_list(),
            catalog,
            output_paths,
            variable_plans,
        })
    }
}
