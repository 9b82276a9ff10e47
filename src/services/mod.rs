pub mod aggregate;
pub mod export;
pub mod filter;
pub mod recommender;
pub mod views;

pub use aggregate::aggregate;
pub use export::{Export, EXCEL_MIME};
pub use filter::{EligibleItems, ItemFilter, YearCutoff};
pub use recommender::{FactorRecommender, Recommender};
pub use views::Dashboard;
