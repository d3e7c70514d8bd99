//! Selection and slab planning configuration options.

use serde::Deserialize;

use crate::slab::RecordSlabPolicy;

/// Configuration options for a catalog selection and slab planning run.
///
/// A [`Config`] is passed explicitly to every pass that needs it; there is no global configuration.
/// It can be built with [`Config::default`] and the setters, or deserialized from JSON where missing fields take their defaults.
///
/// # Selection Configuration Options
///
/// ## Union Selection
/// > default: [`false`]
///
/// If enabled, an object is extracted if it is matched by either the group selectors or the variable selectors.
/// Otherwise, when both group and variable selectors are supplied, a variable must be matched by name and also lie in a matched group (or be named by a full path).
///
/// ## Extract All Coordinates
/// > default: [`false`]
///
/// If enabled, every coordinate variable in the catalog is extracted.
///
/// ## Extract Associated Coordinates
/// > default: [`true`]
///
/// If enabled, the in-scope coordinate variables of each extracted variable's dimensions are extracted, along with any variables named in the [associated attributes](#associated-attributes).
///
/// ## Associated Attributes
/// > default: `["coordinates", "bounds"]`
///
/// Attributes holding whitespace-delimited lists of auxiliary variable names.
///
/// ## Exclude
/// > default: [`false`]
///
/// If enabled, the variable extraction flags are inverted after selection, so the selectors name what to leave out.
///
/// # Slab Configuration Options
///
/// ## Preserve User Order
/// > default: [`false`]
///
/// If enabled, multiple non-wrapped ranges on one dimension are iterated in the order supplied rather than sorted by start index.
///
/// ## Record Slab Policy
/// > default: [`RecordSlabPolicy::MergeAll`]
///
/// How multiple ranges on a record (unlimited) dimension are treated.
/// [`RecordSlabPolicy::FirstOnly`] honors only the first range, as required when concatenating records across files.
///
/// ## Fortran Index Convention
/// > default: [`false`]
///
/// If enabled, range start and end indices are 1-based.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    union_selection: bool,
    extract_all_coordinates: bool,
    extract_associated_coordinates: bool,
    associated_attributes: Vec<String>,
    exclude: bool,
    preserve_user_order: bool,
    record_slab_policy: RecordSlabPolicy,
    fortran_index_convention: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            union_selection: false,
            extract_all_coordinates: false,
            extract_associated_coordinates: true,
            associated_attributes: vec!["coordinates".to_string(), "bounds".to_string()],
            exclude: false,
            preserve_user_order: false,
            record_slab_policy: RecordSlabPolicy::MergeAll,
            fortran_index_convention: false,
        }
    }
}

impl Config {
    /// Get the [union selection](#union-selection) configuration.
    #[must_use]
    pub fn union_selection(&self) -> bool {
        self.union_selection
    }

    /// Set the [union selection](#union-selection) configuration.
    pub fn set_union_selection(&mut self, union_selection: bool) -> &mut Self {
        self.union_selection = union_selection;
        self
    }

    /// Get the [extract all coordinates](#extract-all-coordinates) configuration.
    #[must_use]
    pub fn extract_all_coordinates(&self) -> bool {
        self.extract_all_coordinates
    }

    /// Set the [extract all coordinates](#extract-all-coordinates) configuration.
    pub fn set_extract_all_coordinates(&mut self, extract_all_coordinates: bool) -> &mut Self {
        self.extract_all_coordinates = extract_all_coordinates;
        self
    }

    /// Get the [extract associated coordinates](#extract-associated-coordinates) configuration.
    #[must_use]
    pub fn extract_associated_coordinates(&self) -> bool {
        self.extract_associated_coordinates
    }

    /// Set the [extract associated coordinates](#extract-associated-coordinates) configuration.
    pub fn set_extract_associated_coordinates(
        &mut self,
        extract_associated_coordinates: bool,
    ) -> &mut Self {
        self.extract_associated_coordinates = extract_associated_coordinates;
        self
    }

    /// Get the [associated attributes](#associated-attributes) configuration.
    #[must_use]
    pub fn associated_attributes(&self) -> &[String] {
        &self.associated_attributes
    }

    /// Set the [associated attributes](#associated-attributes) configuration.
    pub fn set_associated_attributes(&mut self, associated_attributes: Vec<String>) -> &mut Self {
        self.associated_attributes = associated_attributes;
        self
    }

    /// Get the [exclude](#exclude) configuration.
    #[must_use]
    pub fn exclude(&self) -> bool {
        self.exclude
    }

    /// Set the [exclude](#exclude) configuration.
    pub fn set_exclude(&mut self, exclude: bool) -> &mut Self {
        self.exclude = exclude;
        self
    }

    /// Get the [preserve user order](#preserve-user-order) configuration.
    #[must_use]
    pub fn preserve_user_order(&self) -> bool {
        self.preserve_user_order
    }

    /// Set the [preserve user order](#preserve-user-order) configuration.
    pub fn set_preserve_user_order(&mut self, preserve_user_order: bool) -> &mut Self {
        self.preserve_user_order = preserve_user_order;
        self
    }

    /// Get the [record slab policy](#record-slab-policy) configuration.
    #[must_use]
    pub fn record_slab_policy(&self) -> RecordSlabPolicy {
        self.record_slab_policy
    }

    /// Set the [record slab policy](#record-slab-policy) configuration.
    pub fn set_record_slab_policy(&mut self, record_slab_policy: RecordSlabPolicy) -> &mut Self {
        self.record_slab_policy = record_slab_policy;
        self
    }

    /// Get the [fortran index convention](#fortran-index-convention) configuration.
    #[must_use]
    pub fn fortran_index_convention(&self) -> bool {
        self.fortran_index_convention
    }

    /// Set the [fortran index convention](#fortran-index-convention) configuration.
    pub fn set_fortran_index_convention(&mut self, fortran_index_convention: bool) -> &mut Self {
        self.fortran_index_convention = fortran_index_convention;
        self
    }
}
