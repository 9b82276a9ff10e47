use serde::{Deserialize, Serialize};

pub mod customer;
pub mod material;
pub mod ranking;

pub use customer::{Customer, CustomerRow};
pub use material::{Material, MaterialRow};
pub use ranking::{ResultKind, Scored, TableRow};

/// Number of rows a view returns when the request does not say
pub const DEFAULT_COUNT: usize = 20;

fn default_count() -> usize {
    DEFAULT_COUNT
}

fn default_true() -> bool {
    true
}

// ============================================================================
// View requests
// ============================================================================

/// Request for product recommendations for one existing customer
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommendProductsRequest {
    /// Sold-to number; absent or empty means nothing was selected
    #[serde(default)]
    pub customer: Option<String>,
    pub sales_org: String,
    #[serde(default = "default_count")]
    pub count: usize,
    /// Drop materials the customer ordered in this year or later
    #[serde(default)]
    pub order_year: Option<i32>,
    /// Keep only materials in these product lines, empty means all
    #[serde(default)]
    pub product_lines: Vec<String>,
}

/// Request for materials similar to a selection of materials
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimilarMaterialsRequest {
    pub sales_org: String,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default = "default_count")]
    pub count: usize,
}

/// Request for an initial order suggestion for a new customer, built from
/// existing customers the user considers similar
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewCustomerRequest {
    pub sales_org: String,
    /// When given, every selected customer must belong to this country
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub customers: Vec<String>,
    /// Remove materials the selected customers already purchased
    #[serde(default = "default_true")]
    pub exclude_purchased: bool,
    #[serde(default = "default_count")]
    pub count: usize,
}

/// Request for the customers most likely to buy a selection of materials
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetCustomersRequest {
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default = "default_count")]
    pub count: usize,
}

/// Query string for the product line options of a customer
#[derive(Debug, Clone, Deserialize)]
pub struct ProductLineQuery {
    pub sales_org: String,
    #[serde(default)]
    pub order_year: Option<i32>,
}

// ============================================================================
// View responses
// ============================================================================

/// Similar customers and recommended products for one customer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRecommendations {
    pub similar_customers: Vec<CustomerRow>,
    pub products: Vec<MaterialRow>,
}

/// A ranked table of rows, best first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedRows<R> {
    pub rows: Vec<R>,
}
