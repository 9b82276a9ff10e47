use std::collections::BTreeSet;

use crate::data::{Catalog, CustomerIx, MaterialIx};

/// Drop materials a customer ordered in `year` or later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCutoff {
    pub customer: CustomerIx,
    pub year: i32,
}

/// Narrows the material universe a view may recommend from.
///
/// Materials must be available in the sales organisation, must not have
/// been ordered by the cutoff customer at or after the cutoff year, must
/// belong to one of the product lines when any are given, and must be
/// present in the trained material index.
#[derive(Debug, Clone)]
pub struct ItemFilter<'a> {
    sales_org: &'a str,
    cutoff: Option<YearCutoff>,
    product_lines: &'a [String],
}

/// Material indices a view may pass to the backend, ascending
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibleItems {
    materials: Vec<MaterialIx>,
}

impl EligibleItems {
    pub fn as_slice(&self) -> &[MaterialIx] {
        &self.materials
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl<'a> ItemFilter<'a> {
    pub fn new(sales_org: &'a str) -> Self {
        Self {
            sales_org,
            cutoff: None,
            product_lines: &[],
        }
    }

    pub fn with_cutoff(mut self, cutoff: Option<YearCutoff>) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_product_lines(mut self, product_lines: &'a [String]) -> Self {
        self.product_lines = product_lines;
        self
    }

    /// Materials available in the sales organisation minus those ordered
    /// since the cutoff. Product lines are not applied.
    fn available<'c>(&self, catalog: &'c Catalog) -> BTreeSet<&'c str> {
        let mut materials = catalog.store.materials_available_in(self.sales_org);
        if let Some(cutoff) = self.cutoff {
            let recent = catalog.materials_ordered_since(cutoff.customer, cutoff.year);
            materials.retain(|m| !recent.contains(m));
        }
        materials
    }

    /// Product lines the user can still narrow down to
    pub fn product_line_options(&self, catalog: &Catalog) -> Vec<String> {
        catalog.store.product_lines_of(self.available(catalog))
    }

    pub fn apply(&self, catalog: &Catalog) -> EligibleItems {
        let mut materials = self.available(catalog);
        if !self.product_lines.is_empty() {
            let in_lines = catalog.store.materials_in_lines(self.product_lines);
            materials.retain(|m| in_lines.contains(m));
        }

        let mut indices: Vec<MaterialIx> = materials
            .into_iter()
            .filter_map(|m| catalog.materials.get(m))
            .collect();
        indices.sort_unstable();

        tracing::debug!(
            sales_org = %self.sales_org,
            cutoff_year = ?self.cutoff.map(|c| c.year),
            product_lines = self.product_lines.len(),
            eligible = indices.len(),
            "Computed eligible materials"
        );

        EligibleItems { materials: indices }
    }
}
