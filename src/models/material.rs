use serde::{Deserialize, Serialize};

/// A material (part number) from the reference snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Material {
    /// Part number, the external material identifier
    pub material: String,
    pub description: String,
    #[serde(default)]
    pub product_line: Option<String>,
}

/// A material as shown in a result table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MaterialRow {
    pub material: String,
    pub description: String,
}
