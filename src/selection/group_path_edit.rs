use std::{collections::HashMap, fmt, str::FromStr};

use crate::{
    catalog::Catalog,
    node::{NodeName, NodePath, PATH_SEPARATOR},
};

use super::SelectionError;

/// A transformation of the group path of extracted variables.
///
/// Parsed from:
/// - `name`: prepend `/name` to every group path,
/// - `:n`: delete the `n` leading levels of every group path,
/// - `name:n`: delete the `n` leading levels, then prepend `/name`,
/// - `/`: place every variable in the root group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GroupPathEdit {
    /// Prepend a path.
    Prepend(NodePath),
    /// Delete leading levels.
    DeleteLevels(usize),
    /// Delete leading levels and prepend a path.
    Replace(NodePath, usize),
    /// Move everything to the root group.
    Flatten,
}

impl GroupPathEdit {
    /// Parse a group path edit.
    ///
    /// # Errors
    /// Returns [`SelectionError::InvalidGroupPathEdit`] if `edit` is empty, the level count is not an integer, or the name is not a valid path.
    pub fn parse(edit: &str) -> Result<Self, SelectionError> {
        let invalid = || SelectionError::InvalidGroupPathEdit(edit.to_string());
        if edit == "/" {
            return Ok(Self::Flatten);
        }
        let prefix = |name: &str| {
            let name = name.trim_start_matches(PATH_SEPARATOR);
            if name.is_empty() {
                Err(invalid())
            } else {
                NodePath::new(&format!("/{name}")).map_err(|_| invalid())
            }
        };
        match edit.rsplit_once(':') {
            Some((name, levels)) => {
                let levels = levels.parse::<usize>().map_err(|_| invalid())?;
                if name.is_empty() {
                    Ok(Self::DeleteLevels(levels))
                } else {
                    Ok(Self::Replace(prefix(name)?, levels))
                }
            }
            None => Ok(Self::Prepend(prefix(edit)?)),
        }
    }

    /// Apply the edit to `group_path`.
    #[must_use]
    pub fn apply(&self, group_path: &NodePath) -> NodePath {
        match self {
            Self::Prepend(prefix) => join(prefix, group_path),
            Self::DeleteLevels(levels) => delete_levels(group_path, *levels),
            Self::Replace(prefix, levels) => join(prefix, &delete_levels(group_path, *levels)),
            Self::Flatten => NodePath::root(),
        }
    }
}

impl fmt::Display for GroupPathEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let relative = |path: &NodePath| path.as_str().trim_start_matches(PATH_SEPARATOR).to_string();
        match self {
            Self::Prepend(prefix) => write!(f, "{}", relative(prefix)),
            Self::DeleteLevels(levels) => write!(f, ":{levels}"),
            Self::Replace(prefix, levels) => write!(f, "{}:{levels}", relative(prefix)),
            Self::Flatten => write!(f, "/"),
        }
    }
}

impl FromStr for GroupPathEdit {
    type Err = SelectionError;

    fn from_str(edit: &str) -> Result<Self, Self::Err> {
        Self::parse(edit)
    }
}

fn join(prefix: &NodePath, path: &NodePath) -> NodePath {
    if path.is_root() {
        prefix.clone()
    } else if prefix.is_root() {
        path.clone()
    } else {
        NodePath::new(&format!("{prefix}{path}")).unwrap_or_else(|_| prefix.clone())
    }
}

fn delete_levels(path: &NodePath, levels: usize) -> NodePath {
    let rest = path
        .as_str()
        .split(PATH_SEPARATOR)
        .filter(|component| !component.is_empty())
        .skip(levels)
        .collect::<Vec<_>>();
    if rest.is_empty() {
        NodePath::root()
    } else {
        NodePath::new(&format!("/{}", rest.join("/"))).unwrap_or_else(|_| NodePath::root())
    }
}

impl Catalog {
    /// Returns the `(variable path, output path)` of every extracted variable in traversal order.
    ///
    /// The output path is the variable's group path after `edit`, followed by the variable name.
    ///
    /// # Errors
    /// Returns [`SelectionError::NamingCollision`] if two variables have the same output path.
    pub fn output_paths(
        &self,
        edit: Option<&GroupPathEdit>,
    ) -> Result<Vec<(NodePath, NodePath)>, SelectionError> {
        let mut sources: HashMap<NodePath, NodePath> = HashMap::new();
        let mut output_paths = Vec::new();
        for entry in self
            .entries
            .iter()
            .filter(|entry| entry.is_variable() && entry.flags.extract)
        {
            let group_path = edit.map_or_else(
                || entry.group_path.clone(),
                |edit| edit.apply(&entry.group_path),
            );
            let output = group_path.child(&NodeName::new(entry.name())?);
            if let Some(first) = sources.insert(output.clone(), entry.path.clone()) {
                return Err(SelectionError::NamingCollision {
                    output,
                    first,
                    second: entry.path.clone(),
                });
            }
            output_paths.push((entry.path.clone(), output));
        }
        Ok(output_paths)
    }
}
