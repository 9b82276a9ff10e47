//! Small deterministic snapshot for tests and local demos.
//!
//! 30 customers (`1000`..`1029`) and 40 materials (`M000`..`M039`) across
//! sales organisations `A` and `B`, plus a few records that exercise the
//! edge cases: a material and a customer that exist in the reference tables
//! but not in the trained indexes, a material without a description, an
//! unselectable and a deleted customer.

use std::collections::BTreeMap;

use super::{loader::RawSnapshot, Catalog, Triplets};
use crate::models::{Customer, Material};
use crate::services::recommender::{factor::FactorFile, FactorRecommender};

/// Available in sales org `A`, described, but not part of the model
pub const UNINDEXED_MATERIAL: &str = "M900";
/// Selectable customer that is not part of the model
pub const UNINDEXED_CUSTOMER: &str = "9999";
/// Indexed material with no row in the material table
pub const UNDESCRIBED_MATERIAL: &str = "M038";
/// Indexed customer without sales organisations
pub const UNASSIGNED_CUSTOMER: &str = "1028";
/// Indexed customer flagged for deletion
pub const DELETED_CUSTOMER: &str = "1029";

const CUSTOMERS: usize = 30;
const MATERIALS: usize = 40;
const PURCHASES_PER_CUSTOMER: usize = 5;
const PRODUCT_LINES: [&str; 3] = ["PUMP", "VALVE", "SEAL"];

fn soldto(i: usize) -> String {
    format!("{}", 1000 + i)
}

fn part_number(j: usize) -> String {
    format!("M{j:03}")
}

fn purchases(i: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..PURCHASES_PER_CUSTOMER).map(move |k| (k, (i * 7 + k * 3) % MATERIALS))
}

pub fn raw_snapshot() -> RawSnapshot {
    let mut customers: Vec<Customer> = (0..CUSTOMERS)
        .map(|i| Customer {
            soldto: soldto(i),
            name: format!("Customer {}", soldto(i)),
            country: if i % 2 == 0 { "DE" } else { "FR" }.to_string(),
            sales_orgs: match i {
                28 => None,
                20..=27 => Some(vec!["A".to_string(), "B".to_string()]),
                _ => Some(vec!["A".to_string()]),
            },
            deleted: i == 29,
        })
        .collect();
    customers.push(Customer {
        soldto: UNINDEXED_CUSTOMER.to_string(),
        name: "Prospect GmbH".to_string(),
        country: "DE".to_string(),
        sales_orgs: Some(vec!["A".to_string()]),
        deleted: false,
    });

    let mut materials: Vec<Material> = (0..MATERIALS)
        .filter(|&j| part_number(j) != UNDESCRIBED_MATERIAL)
        .map(|j| Material {
            material: part_number(j),
            description: format!("Material {}", part_number(j)),
            product_line: Some(PRODUCT_LINES[j % PRODUCT_LINES.len()].to_string()),
        })
        .collect();
    materials.push(Material {
        material: UNINDEXED_MATERIAL.to_string(),
        description: "Discontinued pump".to_string(),
        product_line: Some("PUMP".to_string()),
    });

    let mut availability = BTreeMap::new();
    let mut in_a: Vec<String> = (0..30).map(part_number).collect();
    in_a.push(UNDESCRIBED_MATERIAL.to_string());
    in_a.push(UNINDEXED_MATERIAL.to_string());
    availability.insert("A".to_string(), in_a);
    availability.insert("B".to_string(), (20..MATERIALS).map(part_number).collect());

    let mut interactions = Vec::new();
    let mut order_years = Vec::new();
    for i in 0..CUSTOMERS {
        for (k, j) in purchases(i) {
            interactions.push((i, j, (k + 1) as f32));
            order_years.push((i, j, 2018 + ((i + k) % 6) as i32));
        }
    }

    let customer_factors = (0..CUSTOMERS)
        .map(|i| {
            let t = i as f32;
            vec![t.cos(), t.sin(), 0.5 + (i % 5) as f32 * 0.1]
        })
        .collect();
    let material_factors = (0..MATERIALS)
        .map(|j| {
            let t = j as f32 * 0.7;
            vec![t.cos(), t.sin(), 0.3 + (j % 4) as f32 * 0.2]
        })
        .collect();

    RawSnapshot {
        customers,
        materials,
        availability,
        customer_index: (0..CUSTOMERS).map(soldto).collect(),
        material_index: (0..MATERIALS).map(part_number).collect(),
        interactions: Triplets {
            rows: CUSTOMERS,
            cols: MATERIALS,
            entries: interactions,
        },
        order_years: Triplets {
            rows: CUSTOMERS,
            cols: MATERIALS,
            entries: order_years,
        },
        model: FactorFile {
            customer_factors,
            material_factors,
        },
    }
}

/// The fixture files, validated and built
pub fn snapshot() -> (Catalog, FactorRecommender) {
    match raw_snapshot().build() {
        Ok(snapshot) => (snapshot.catalog, snapshot.recommender),
        Err(error) => panic!("fixture snapshot is invalid: {error:#}"),
    }
}

pub fn catalog() -> Catalog {
    snapshot().0
}
