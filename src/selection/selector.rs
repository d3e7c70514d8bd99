use derive_more::Display;

use crate::{
    catalog::CatalogEntry,
    node::{component_matches, PATH_SEPARATOR},
};

use super::SelectionError;

/// Characters that make a selector a regular expression.
const PATTERN_CHARACTERS: &[char] = &[
    '.', '*', '^', '$', '\\', '[', ']', '(', ')', '<', '>', '+', '?', '|', '{', '}',
];

/// The kind of object a selector names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display)]
pub enum SelectorKind {
    /// A group selector.
    #[display("group")]
    Group,
    /// A variable selector.
    #[display("variable")]
    Variable,
}

/// A parsed user selector.
#[derive(Clone, Debug)]
pub struct Selector {
    text: String,
    kind: SelectorKind,
    anchored: bool,
    recursive: bool,
    #[cfg(feature = "regex")]
    pattern: Option<regex::Regex>,
}

impl Selector {
    /// Parse a selector of `kind` from `text`.
    ///
    /// # Errors
    /// Returns a [`SelectionError`] if `text` is empty, a variable selector ends with a path separator, or a pattern is invalid or unsupported.
    pub fn parse(text: &str, kind: SelectorKind) -> Result<Self, SelectionError> {
        if text.is_empty() {
            return Err(SelectionError::EmptySelector(kind));
        }
        let mut recursive = true;
        let mut text = text;
        if text.len() > 1 && text.ends_with(PATH_SEPARATOR) {
            match kind {
                SelectorKind::Group => {
                    recursive = false;
                    text = &text[..text.len() - 1];
                }
                SelectorKind::Variable => {
                    return Err(SelectionError::TrailingSeparator(text.to_string()))
                }
            }
        }
        let anchored = text.starts_with(PATH_SEPARATOR);

        #[cfg(feature = "regex")]
        let pattern = if text.contains(PATTERN_CHARACTERS) {
            Some(
                regex::Regex::new(&format!("^(?:{text})$"))
                    .map_err(|err| SelectionError::InvalidPattern(text.to_string(), err.to_string()))?,
            )
        } else {
            None
        };
        #[cfg(not(feature = "regex"))]
        if text.contains(PATTERN_CHARACTERS) {
            return Err(SelectionError::PatternsUnsupported(text.to_string()));
        }

        Ok(Self {
            text: text.to_string(),
            kind,
            anchored,
            recursive,
            #[cfg(feature = "regex")]
            pattern,
        })
    }

    /// The selector text, without any trailing separator.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The kind of object the selector names.
    #[must_use]
    pub const fn kind(&self) -> SelectorKind {
        self.kind
    }

    /// Indicates if the selector is anchored at the root.
    #[must_use]
    pub const fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// Indicates if a group selector matches subgroups recursively.
    #[must_use]
    pub const fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Indicates if a variable selector names a full path.
    #[must_use]
    pub fn is_full_path(&self) -> bool {
        self.kind == SelectorKind::Variable
            && (self.anchored || self.text.starts_with("^/"))
    }

    /// Indicates if the selector is a regular expression.
    #[must_use]
    pub fn is_pattern(&self) -> bool {
        #[cfg(feature = "regex")]
        {
            self.pattern.is_some()
        }
        #[cfg(not(feature = "regex"))]
        {
            false
        }
    }

    /// Indicates if the selector matches `entry`.
    ///
    /// Group selectors only match groups, variable selectors only match supported variables.
    #[must_use]
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        let kind_matches = match self.kind {
            SelectorKind::Group => entry.is_group(),
            SelectorKind::Variable => entry.is_variable(),
        };
        if !kind_matches {
            return false;
        }

        #[cfg(feature = "regex")]
        if let Some(pattern) = &self.pattern {
            let target = if self.text.contains(PATH_SEPARATOR) {
                entry.path().as_str()
            } else {
                entry.name()
            };
            return pattern.is_match(target);
        }

        let path = entry.path().as_str();
        if self.kind == SelectorKind::Variable {
            let name = entry.name();
            let ends_with_name = self
                .text
                .strip_suffix(name)
                .is_some_and(|rest| rest.is_empty() || rest.ends_with(PATH_SEPARATOR));
            if !ends_with_name {
                return false;
            }
        }
        component_matches(path, &self.text).any(|m| {
            m.is_bounded()
                && (!self.anchored || m.start == 0)
                && (self.recursive || m.reaches_end(path))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::Catalog, provider::MemoryProvider};

    fn catalog() -> Catalog {
        let provider = MemoryProvider::from_json(
            r#"{
                "variables": [{"name": "lat_lon", "type": "float"}],
                "groups": [
                    {
                        "name": "g1",
                        "variables": [{"name": "lon", "type": "float"}],
                        "groups": [{"name": "g1g1", "variables": [{"name": "lon", "type": "float"}]}]
                    },
                    {"name": "g10", "variables": [{"name": "v", "type": "vlen"}]}
                ]
            }"#,
        )
        .unwrap();
        Catalog::new_with_provider(&provider, "/").unwrap()
    }

    fn matching(catalog: &Catalog, text: &str, kind: SelectorKind) -> Vec<String> {
        let selector = Selector::parse(text, kind).unwrap();
        catalog
            .entries()
            .iter()
            .filter(|entry| selector.matches(entry))
            .map(|entry| entry.path().to_string())
            .collect()
    }

    #[test]
    fn selector_parse() {
        let selector = Selector::parse("g1/", SelectorKind::Group).unwrap();
        assert_eq!(selector.text(), "g1");
        assert!(!selector.is_recursive());
        let selector = Selector::parse("/", SelectorKind::Group).unwrap();
        assert_eq!(selector.text(), "/");
        assert!(selector.is_recursive());
        assert!(selector.is_anchored());
        assert!(Selector::parse("/g1/lon", SelectorKind::Variable)
            .unwrap()
            .is_full_path());
        assert!(matches!(
            Selector::parse("", SelectorKind::Group),
            Err(SelectionError::EmptySelector(_))
        ));
        assert!(matches!(
            Selector::parse("lon/", SelectorKind::Variable),
            Err(SelectionError::TrailingSeparator(_))
        ));
    }

    #[test]
    fn selector_variable_boundaries() {
        let catalog = catalog();
        assert_eq!(
            matching(&catalog, "lon", SelectorKind::Variable),
            vec!["/g1/lon", "/g1/g1g1/lon"]
        );
        assert_eq!(
            matching(&catalog, "g1g1/lon", SelectorKind::Variable),
            vec!["/g1/g1g1/lon"]
        );
        assert_eq!(
            matching(&catalog, "/g1/lon", SelectorKind::Variable),
            vec!["/g1/lon"]
        );
        assert!(matching(&catalog, "g1", SelectorKind::Variable).is_empty());
        // unsupported variables are never matched
        assert!(matching(&catalog, "v", SelectorKind::Variable).is_empty());
    }

    #[test]
    fn selector_group_recursion() {
        let catalog = catalog();
        assert_eq!(
            matching(&catalog, "g1", SelectorKind::Group),
            vec!["/g1", "/g1/g1g1"]
        );
        assert_eq!(matching(&catalog, "g1/", SelectorKind::Group), vec!["/g1"]);
        assert_eq!(
            matching(&catalog, "/g1g1", SelectorKind::Group),
            Vec::<String>::new()
        );
        assert_eq!(matching(&catalog, "/", SelectorKind::Group).len(), 4);
    }

    #[cfg(feature = "regex")]
    #[test]
    fn selector_pattern() {
        let catalog = catalog();
        assert_eq!(
            matching(&catalog, "g1.+", SelectorKind::Group),
            vec!["/g1/g1g1", "/g10"]
        );
        assert_eq!(
            matching(&catalog, "/g1/.*", SelectorKind::Variable),
            vec!["/g1/lon", "/g1/g1g1/lon"]
        );
        assert!(matches!(
            Selector::parse("lon(", SelectorKind::Variable),
            Err(SelectionError::InvalidPattern(..))
        ));
    }

    #[cfg(not(feature = "regex"))]
    #[test]
    fn selector_pattern_unsupported() {
        assert!(matches!(
            Selector::parse("g1.+", SelectorKind::Group),
            Err(SelectionError::PatternsUnsupported(_))
        ));
    }
}
