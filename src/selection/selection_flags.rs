/// Selection state of a catalog entry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct SelectionFlags {
    /// Matched by a user selector.
    pub matched: bool,
    /// A matched group selector may match subgroups recursively.
    pub recursive: bool,
    /// Matched by a variable selector given as a full path.
    pub full_path: bool,
    /// A variable in a matched group.
    pub selected_via_group: bool,
    /// A group containing a matched variable.
    pub contains_selected_variable: bool,
    /// A group on the path of a matched object.
    pub ancestor: bool,
    /// No selectors were given, so everything is selected.
    pub default_all: bool,
    /// Passes the intersection test.
    pub intersection: bool,
    /// Selected for extraction.
    pub extract: bool,
    /// Added as an associated coordinate or auxiliary variable.
    pub associated: bool,
}
