pub mod catalog;
pub mod fixtures;
pub mod index;
pub mod loader;
pub mod matrix;
pub mod store;

pub use catalog::{Catalog, CatalogError, CatalogSummary};
pub use index::{CustomerIx, DenseIndex, IdIndex, MaterialIx};
pub use loader::{load_snapshot, RawSnapshot, Snapshot};
pub use matrix::{SparseMatrix, Triplets};
pub use store::LookupStore;
