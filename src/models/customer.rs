use serde::{Deserialize, Serialize};

/// A customer (sold-to party) from the reference snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    /// Sold-to number, the external customer identifier
    pub soldto: String,
    /// Display name
    pub name: String,
    pub country: String,
    /// Sales organisations the customer exists in, absent when unassigned
    #[serde(default)]
    pub sales_orgs: Option<Vec<String>>,
    /// Customers flagged for deletion are kept for display lookups only
    #[serde(default)]
    pub deleted: bool,
}

impl Customer {
    /// Whether the customer can be picked as a query input
    pub fn is_selectable(&self) -> bool {
        !self.deleted && self.sales_orgs.is_some()
    }
}

/// A customer as shown in a result table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CustomerRow {
    pub soldto: String,
    pub name: String,
    pub country: String,
}
