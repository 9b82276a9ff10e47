//! Pluggable scoring backend for the recommendation views
//!
//! A backend answers nearest-neighbour and ranking queries over the
//! customer x material interaction matrix. Views fan out over multiple
//! inputs themselves and merge the per-input lists, so every operation here
//! takes a single customer or material.

use std::cmp::Ordering;

use crate::{
    data::{CustomerIx, MaterialIx},
    models::Scored,
};

pub mod factor;

pub use factor::{FactorRecommender, ModelError};

/// Trait for recommendation backends
///
/// Indices passed in always come from the catalog's id indexes. An index the
/// backend was not trained on is a programming error, not a runtime condition.
#[cfg_attr(test, mockall::automock)]
pub trait Recommender: Send + Sync {
    /// Customers most similar to `customer`, best first.
    ///
    /// The query customer itself is always part of the result, ranked first
    /// with a score of 1.0.
    fn similar_customers(&self, customer: CustomerIx, n: usize) -> Vec<Scored<CustomerIx>>;

    /// Materials most similar to `material`, confined to `restrict_to` when given.
    ///
    /// When the query is part of the candidate pool it is ranked first with a
    /// score of 1.0.
    fn similar_materials<'a>(
        &self,
        material: MaterialIx,
        n: usize,
        restrict_to: Option<&'a [MaterialIx]>,
    ) -> Vec<Scored<MaterialIx>>;

    /// Ranked materials for a customer.
    ///
    /// `history` holds the materials the customer interacted with; they are
    /// left out when `filter_already_liked` is set.
    fn recommend<'a>(
        &self,
        customer: CustomerIx,
        history: &[MaterialIx],
        n: usize,
        filter_already_liked: bool,
        restrict_to: Option<&'a [MaterialIx]>,
    ) -> Vec<Scored<MaterialIx>>;

    /// Ranked customers for a material, `history` being its existing buyers
    fn recommend_customers(
        &self,
        material: MaterialIx,
        history: &[CustomerIx],
        n: usize,
        filter_already_liked: bool,
    ) -> Vec<Scored<CustomerIx>>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Keeps the `n` best candidates, ordered by score descending and then by
/// ascending index
pub(crate) fn top_n<I: Ord + Copy>(mut candidates: Vec<Scored<I>>, n: usize) -> Vec<Scored<I>> {
    let by_rank = |a: &Scored<I>, b: &Scored<I>| -> Ordering {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.item.cmp(&b.item))
    };

    let take = n.min(candidates.len());
    if take == 0 {
        return Vec::new();
    }
    candidates.select_nth_unstable_by(take - 1, by_rank);
    candidates.truncate(take);
    candidates.sort_unstable_by(by_rank);
    candidates
}
