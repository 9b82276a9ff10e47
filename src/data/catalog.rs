use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use super::index::{CustomerIx, IdIndex, MaterialIx};
use super::matrix::SparseMatrix;
use super::store::LookupStore;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{matrix} matrix is {found:?}, expected {expected:?} from the id indexes")]
    ShapeMismatch {
        matrix: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },
}

/// Everything the views read: reference tables, id indexes and the
/// customer x material matrices. Built once at startup and never mutated.
#[derive(Debug)]
pub struct Catalog {
    pub store: LookupStore,
    pub customers: IdIndex<CustomerIx>,
    pub materials: IdIndex<MaterialIx>,
    interactions: SparseMatrix<f32>,
    buyers: SparseMatrix<f32>,
    order_years: SparseMatrix<i32>,
    loaded_at: DateTime<Utc>,
}

/// Sizes of the loaded snapshot, reported by the health endpoint
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CatalogSummary {
    pub customers: usize,
    pub materials: usize,
    pub indexed_customers: usize,
    pub indexed_materials: usize,
    pub interactions: usize,
    pub sales_orgs: usize,
    pub loaded_at: DateTime<Utc>,
}

impl Catalog {
    pub fn new(
        store: LookupStore,
        customers: IdIndex<CustomerIx>,
        materials: IdIndex<MaterialIx>,
        interactions: SparseMatrix<f32>,
        order_years: SparseMatrix<i32>,
    ) -> Result<Self, CatalogError> {
        let expected = (customers.len(), materials.len());
        for (matrix, found) in [
            ("interaction", interactions.shape()),
            ("order year", order_years.shape()),
        ] {
            if found != expected {
                return Err(CatalogError::ShapeMismatch {
                    matrix,
                    expected,
                    found,
                });
            }
        }

        let buyers = interactions.transpose();
        Ok(Self {
            store,
            customers,
            materials,
            interactions,
            buyers,
            order_years,
            loaded_at: Utc::now(),
        })
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            customers: self.store.customer_count(),
            materials: self.store.material_count(),
            indexed_customers: self.customers.len(),
            indexed_materials: self.materials.len(),
            interactions: self.interactions.nnz(),
            sales_orgs: self.store.sales_orgs().len(),
            loaded_at: self.loaded_at,
        }
    }

    /// Materials the customer has any recorded interaction with
    pub fn customer_history(&self, customer: CustomerIx) -> Vec<MaterialIx> {
        self.interactions
            .row(customer.0)
            .indices
            .iter()
            .map(|&c| MaterialIx(c))
            .collect()
    }

    /// Customers with any recorded interaction with the material
    pub fn material_buyers(&self, material: MaterialIx) -> Vec<CustomerIx> {
        self.buyers
            .row(material.0)
            .indices
            .iter()
            .map(|&r| CustomerIx(r))
            .collect()
    }

    /// Distinct years the customer last ordered something in, ascending
    pub fn order_years_of(&self, customer: CustomerIx) -> Vec<i32> {
        self.order_years
            .row(customer.0)
            .values
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Ids of the materials the customer last ordered in `year` or later
    pub fn materials_ordered_since(&self, customer: CustomerIx, year: i32) -> BTreeSet<&str> {
        self.order_years
            .row(customer.0)
            .iter()
            .filter(|&(_, last_ordered)| last_ordered >= year)
            .filter_map(|(col, _)| self.materials.id(MaterialIx(col)))
            .collect()
    }
}
