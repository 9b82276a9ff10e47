use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{top_n, Recommender};
use crate::{
    data::{CustomerIx, MaterialIx},
    models::Scored,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("{side} factor row {row} has {found} values, expected {expected}")]
    RaggedFactors {
        side: &'static str,
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("model has {found} {side} factor rows, the index has {expected}")]
    SizeMismatch {
        side: &'static str,
        found: usize,
        expected: usize,
    },
}

/// Latent factors of a trained implicit-feedback model, as stored in `model.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorFile {
    pub customer_factors: Vec<Vec<f32>>,
    pub material_factors: Vec<Vec<f32>>,
}

/// Matrix-factorisation backend.
///
/// Scores a customer/material pair by the dot product of their factor
/// vectors and compares two customers (or two materials) by cosine
/// similarity.
#[derive(Debug, Clone)]
pub struct FactorRecommender {
    customer_factors: Vec<Vec<f32>>,
    material_factors: Vec<Vec<f32>>,
    customer_norms: Vec<f32>,
    material_norms: Vec<f32>,
}

impl FactorRecommender {
    pub fn new(
        customer_factors: Vec<Vec<f32>>,
        material_factors: Vec<Vec<f32>>,
    ) -> Result<Self, ModelError> {
        let rank = customer_factors
            .first()
            .or(material_factors.first())
            .map_or(0, Vec::len);
        check_rank("customer", &customer_factors, rank)?;
        check_rank("material", &material_factors, rank)?;

        let customer_norms = customer_factors.iter().map(|f| norm(f)).collect();
        let material_norms = material_factors.iter().map(|f| norm(f)).collect();
        Ok(Self {
            customer_factors,
            material_factors,
            customer_norms,
            material_norms,
        })
    }

    pub fn from_file(file: FactorFile) -> Result<Self, ModelError> {
        Self::new(file.customer_factors, file.material_factors)
    }

    /// Checks the model covers exactly the indexed customers and materials
    pub fn check_dimensions(&self, customers: usize, materials: usize) -> Result<(), ModelError> {
        for (side, found, expected) in [
            ("customer", self.customer_factors.len(), customers),
            ("material", self.material_factors.len(), materials),
        ] {
            if found != expected {
                return Err(ModelError::SizeMismatch {
                    side,
                    found,
                    expected,
                });
            }
        }
        Ok(())
    }

    pub fn rank(&self) -> usize {
        self.customer_factors.first().map_or(0, Vec::len)
    }

    fn customer_similarity(&self, a: CustomerIx, b: CustomerIx) -> f32 {
        cosine(
            &self.customer_factors[a.0],
            self.customer_norms[a.0],
            &self.customer_factors[b.0],
            self.customer_norms[b.0],
        )
    }

    fn material_similarity(&self, a: MaterialIx, b: MaterialIx) -> f32 {
        cosine(
            &self.material_factors[a.0],
            self.material_norms[a.0],
            &self.material_factors[b.0],
            self.material_norms[b.0],
        )
    }

    fn affinity(&self, customer: CustomerIx, material: MaterialIx) -> f32 {
        dot(
            &self.customer_factors[customer.0],
            &self.material_factors[material.0],
        )
    }

    fn all_materials(&self) -> Vec<MaterialIx> {
        (0..self.material_factors.len()).map(MaterialIx).collect()
    }
}

impl Recommender for FactorRecommender {
    fn similar_customers(&self, customer: CustomerIx, n: usize) -> Vec<Scored<CustomerIx>> {
        let others = (0..self.customer_factors.len())
            .map(CustomerIx)
            .filter(|&other| other != customer)
            .map(|other| Scored::new(other, self.customer_similarity(customer, other)))
            .collect();
        query_first(customer, others, n)
    }

    fn similar_materials<'a>(
        &self,
        material: MaterialIx,
        n: usize,
        restrict_to: Option<&'a [MaterialIx]>,
    ) -> Vec<Scored<MaterialIx>> {
        let pool = restrict_to.map_or_else(|| self.all_materials(), <[MaterialIx]>::to_vec);
        let in_pool = pool.contains(&material);
        let others = pool
            .into_iter()
            .filter(|&other| other != material)
            .map(|other| Scored::new(other, self.material_similarity(material, other)))
            .collect();
        if in_pool {
            query_first(material, others, n)
        } else {
            top_n(others, n)
        }
    }

    fn recommend<'a>(
        &self,
        customer: CustomerIx,
        history: &[MaterialIx],
        n: usize,
        filter_already_liked: bool,
        restrict_to: Option<&'a [MaterialIx]>,
    ) -> Vec<Scored<MaterialIx>> {
        let liked: HashSet<MaterialIx> = if filter_already_liked {
            history.iter().copied().collect()
        } else {
            HashSet::new()
        };
        let pool = restrict_to.map_or_else(|| self.all_materials(), <[MaterialIx]>::to_vec);
        let candidates = pool
            .into_iter()
            .filter(|m| !liked.contains(m))
            .map(|m| Scored::new(m, self.affinity(customer, m)))
            .collect();
        top_n(candidates, n)
    }

    fn recommend_customers(
        &self,
        material: MaterialIx,
        history: &[CustomerIx],
        n: usize,
        filter_already_liked: bool,
    ) -> Vec<Scored<CustomerIx>> {
        let bought: HashSet<CustomerIx> = if filter_already_liked {
            history.iter().copied().collect()
        } else {
            HashSet::new()
        };
        let candidates = (0..self.customer_factors.len())
            .map(CustomerIx)
            .filter(|c| !bought.contains(c))
            .map(|c| Scored::new(c, self.affinity(c, material)))
            .collect();
        top_n(candidates, n)
    }

    fn name(&self) -> &'static str {
        "factor"
    }
}

fn check_rank(side: &'static str, factors: &[Vec<f32>], rank: usize) -> Result<(), ModelError> {
    match factors.iter().position(|row| row.len() != rank) {
        Some(row) => Err(ModelError::RaggedFactors {
            side,
            row,
            found: factors[row].len(),
            expected: rank,
        }),
        None => Ok(()),
    }
}

/// The query at 1.0, then the `n - 1` best of the others
fn query_first<I: Ord + Copy>(query: I, others: Vec<Scored<I>>, n: usize) -> Vec<Scored<I>> {
    if n == 0 {
        return Vec::new();
    }
    let mut ranked = Vec::with_capacity(n);
    ranked.push(Scored::new(query, 1.0));
    ranked.extend(top_n(others, n - 1));
    ranked
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn norm(a: &[f32]) -> f32 {
    dot(a, a).sqrt()
}

// Zero vectors are dissimilar to everything.
fn cosine(a: &[f32], a_norm: f32, b: &[f32], b_norm: f32) -> f32 {
    if a_norm == 0.0 || b_norm == 0.0 {
        return 0.0;
    }
    dot(a, b) / (a_norm * b_norm)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Customers 0 and 1 point the same way, 2 is orthogonal, 3 is zero.
    fn model() -> FactorRecommender {
        FactorRecommender::new(
            vec![
                vec![1.0, 0.0],
                vec![2.0, 0.1],
                vec![0.0, 1.0],
                vec![0.0, 0.0],
            ],
            vec![
                vec![1.0, 0.0],
                vec![0.5, 0.0],
                vec![0.0, 2.0],
                vec![0.9, 0.1],
            ],
        )
        .unwrap()
    }

    fn items<I: Copy>(scored: &[Scored<I>]) -> Vec<I> {
        scored.iter().map(|s| s.item).collect()
    }

    #[test]
    fn test_similar_customers_starts_with_query() {
        let similar = model().similar_customers(CustomerIx(0), 3);
        assert_eq!(items(&similar), vec![CustomerIx(0), CustomerIx(1), CustomerIx(2)]);
        assert_eq!(similar[0].score, 1.0);
    }

    #[test]
    fn test_zero_vector_customer_still_ranks_itself_first() {
        let similar = model().similar_customers(CustomerIx(3), 2);
        assert_eq!(similar[0].item, CustomerIx(3));
        assert_eq!(similar[0].score, 1.0);
        assert_eq!(similar[1].score, 0.0);
    }

    #[test]
    fn test_query_precedes_parallel_neighbours() {
        let model = FactorRecommender::new(
            vec![vec![1.0, 0.0], vec![2.0, 0.0], vec![0.0, 1.0]],
            vec![vec![1.0, 0.0], vec![3.0, 0.0], vec![0.0, 1.0]],
        )
        .unwrap();

        let customers = model.similar_customers(CustomerIx(1), 3);
        assert_eq!(items(&customers), vec![CustomerIx(1), CustomerIx(0), CustomerIx(2)]);
        assert_eq!(customers[0].score, 1.0);

        let materials = model.similar_materials(MaterialIx(1), 2, None);
        assert_eq!(items(&materials), vec![MaterialIx(1), MaterialIx(0)]);

        assert!(model.similar_customers(CustomerIx(1), 0).is_empty());
    }

    #[test]
    fn test_similar_materials_respects_restriction() {
        let model = model();
        let restriction = [MaterialIx(2), MaterialIx(3)];
        let similar = model.similar_materials(MaterialIx(0), 10, Some(&restriction));
        assert_eq!(items(&similar), vec![MaterialIx(3), MaterialIx(2)]);

        let unrestricted = model.similar_materials(MaterialIx(0), 2, None);
        assert_eq!(items(&unrestricted), vec![MaterialIx(0), MaterialIx(1)]);
    }

    #[test]
    fn test_empty_restriction_yields_nothing() {
        let model = model();
        assert!(model.similar_materials(MaterialIx(0), 10, Some(&[])).is_empty());
        assert!(model
            .recommend(CustomerIx(0), &[], 10, false, Some(&[]))
            .is_empty());
    }

    #[test]
    fn test_recommend_scores_by_dot_product() {
        let recs = model().recommend(CustomerIx(0), &[], 4, false, None);
        assert_eq!(
            items(&recs),
            vec![MaterialIx(0), MaterialIx(3), MaterialIx(1), MaterialIx(2)]
        );
    }

    #[test]
    fn test_recommend_filters_history_only_when_asked() {
        let model = model();
        let history = [MaterialIx(0)];
        let kept = model.recommend(CustomerIx(0), &history, 1, false, None);
        assert_eq!(items(&kept), vec![MaterialIx(0)]);
        let filtered = model.recommend(CustomerIx(0), &history, 1, true, None);
        assert_eq!(items(&filtered), vec![MaterialIx(3)]);
    }

    #[test]
    fn test_recommend_customers_excludes_buyers() {
        let model = model();
        let all = model.recommend_customers(MaterialIx(2), &[], 2, true);
        assert_eq!(items(&all), vec![CustomerIx(2), CustomerIx(1)]);
        let new_only = model.recommend_customers(MaterialIx(2), &[CustomerIx(2)], 1, true);
        assert_eq!(items(&new_only), vec![CustomerIx(1)]);
    }

    #[test]
    fn test_ragged_factors_rejected() {
        let result = FactorRecommender::new(vec![vec![1.0, 0.0]], vec![vec![1.0]]);
        assert_eq!(
            result.unwrap_err(),
            ModelError::RaggedFactors {
                side: "material",
                row: 0,
                found: 1,
                expected: 2,
            }
        );
    }

    #[test]
    fn test_check_dimensions() {
        let model = model();
        assert_eq!(model.rank(), 2);
        assert!(model.check_dimensions(4, 4).is_ok());
        assert_eq!(
            model.check_dimensions(5, 4).unwrap_err(),
            ModelError::SizeMismatch {
                side: "customer",
                found: 4,
                expected: 5,
            }
        );
    }
}
