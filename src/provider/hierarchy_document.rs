use serde::{Deserialize, Serialize};

use super::{AttributeMap, DataType};

/// A JSON hierarchy document describing one group and everything below it.
///
/// For example:
/// ```json
/// {
///   "dimensions": [{ "name": "time", "size": 4, "unlimited": true }],
///   "variables": [{ "name": "time", "type": "double", "dimensions": ["time"] }],
///   "groups": [
///     {
///       "name": "g1",
///       "dimensions": [{ "name": "lon", "size": 3 }],
///       "variables": [{ "name": "v1", "type": "float", "dimensions": ["time", "lon"] }]
///     }
///   ]
/// }
/// ```
///
/// A variable names its dimensions either by relative name, resolved in the variable's group and then in each ancestor group, or by the absolute path of the dimension.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupDocument {
    /// The group name. Ignored for the root group.
    #[serde(default)]
    pub name: String,
    /// The group attributes.
    #[serde(default)]
    pub attributes: AttributeMap,
    /// The dimensions defined in the group.
    #[serde(default)]
    pub dimensions: Vec<DimensionDocument>,
    /// The variables defined in the group.
    #[serde(default)]
    pub variables: Vec<VariableDocument>,
    /// The child groups.
    #[serde(default)]
    pub groups: Vec<GroupDocument>,
}

/// A dimension in a [`GroupDocument`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimensionDocument {
    /// The dimension name.
    pub name: String,
    /// The dimension size.
    pub size: u64,
    /// Whether the dimension is unlimited.
    #[serde(default)]
    pub unlimited: bool,
}

/// A variable in a [`GroupDocument`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableDocument {
    /// The variable name.
    pub name: String,
    /// The element type.
    #[serde(rename = "type")]
    pub data_type: DataType,
    /// Dimension names or absolute dimension paths, outermost first.
    #[serde(default)]
    pub dimensions: Vec<String>,
    /// The variable attributes.
    #[serde(default)]
    pub attributes: AttributeMap,
}
