use std::collections::HashSet;
use std::ops::RangeInclusive;

use crate::{
    data::{Catalog, CustomerIx, MaterialIx},
    error::{AppError, AppResult},
    models::{
        CustomerRow, MaterialRow, NewCustomerRequest, ProductLineQuery, ProductRecommendations,
        RankedRows, RecommendProductsRequest, Scored, SimilarMaterialsRequest,
        TargetCustomersRequest,
    },
    services::{
        aggregate::aggregate,
        filter::{ItemFilter, YearCutoff},
        recommender::Recommender,
    },
};

/// Similar customers listed next to a customer's recommendations
pub const SIMILAR_CUSTOMERS: usize = 20;
/// Accepted row counts for the material views
pub const PRODUCT_COUNT: RangeInclusive<usize> = 10..=100;
/// Accepted row counts for the target customer view
pub const TARGET_CUSTOMER_COUNT: RangeInclusive<usize> = 10..=50;

/// Computes the dashboard views over one catalog and scoring backend.
///
/// Every view returns `Ok(None)` when the request selects nothing, which the
/// API turns into an empty response rather than an error.
pub struct Dashboard<'a> {
    catalog: &'a Catalog,
    recommender: &'a dyn Recommender,
}

impl<'a> Dashboard<'a> {
    pub fn new(catalog: &'a Catalog, recommender: &'a dyn Recommender) -> Self {
        Self {
            catalog,
            recommender,
        }
    }

    /// Similar customers and product recommendations for one customer
    pub fn recommend_products(
        &self,
        request: &RecommendProductsRequest,
    ) -> AppResult<Option<ProductRecommendations>> {
        let Some(soldto) = request.customer.as_deref().filter(|c| !c.is_empty()) else {
            return Ok(None);
        };
        check_count(request.count, PRODUCT_COUNT)?;
        let customer = self.customer_ix(soldto)?;

        let eligible = ItemFilter::new(&request.sales_org)
            .with_cutoff(request.order_year.map(|year| YearCutoff { customer, year }))
            .with_product_lines(&request.product_lines)
            .apply(self.catalog);

        let similar_customers = self.similar_customers(customer)?;

        let history = self.catalog.customer_history(customer);
        let hits = self.recommender.recommend(
            customer,
            &history,
            request.count,
            false,
            Some(eligible.as_slice()),
        );
        let ranked = aggregate([self.material_rows(hits)?], |_| false, request.count);

        tracing::info!(
            customer = %soldto,
            sales_org = %request.sales_org,
            order_year = ?request.order_year,
            product_lines = request.product_lines.len(),
            eligible = eligible.len(),
            recommended = ranked.len(),
            backend = self.recommender.name(),
            "Recommended products"
        );

        Ok(Some(ProductRecommendations {
            similar_customers,
            products: into_rows(ranked),
        }))
    }

    /// Materials similar to the selected ones, excluding the selection itself
    pub fn similar_materials(
        &self,
        request: &SimilarMaterialsRequest,
    ) -> AppResult<Option<RankedRows<MaterialRow>>> {
        if request.materials.is_empty() {
            return Ok(None);
        }
        check_count(request.count, PRODUCT_COUNT)?;
        let selected = self.material_ixs(&request.materials)?;
        let eligible = ItemFilter::new(&request.sales_org).apply(self.catalog);

        // Ask for extra neighbours so dropping the selection still leaves enough.
        let per_material = request.count + selected.len();
        let lists = selected
            .iter()
            .map(|&m| {
                self.material_rows(self.recommender.similar_materials(
                    m,
                    per_material,
                    Some(eligible.as_slice()),
                ))
            })
            .collect::<AppResult<Vec<_>>>()?;

        let chosen: HashSet<&str> = request.materials.iter().map(String::as_str).collect();
        let ranked = aggregate(
            lists,
            |row: &MaterialRow| chosen.contains(row.material.as_str()),
            request.count,
        );

        tracing::info!(
            sales_org = %request.sales_org,
            selected = selected.len(),
            eligible = eligible.len(),
            recommended = ranked.len(),
            backend = self.recommender.name(),
            "Found similar materials"
        );

        Ok(Some(RankedRows {
            rows: into_rows(ranked),
        }))
    }

    /// Initial order suggestion for a new customer, averaged over the
    /// existing customers it was compared to
    pub fn new_customer(
        &self,
        request: &NewCustomerRequest,
    ) -> AppResult<Option<RankedRows<MaterialRow>>> {
        if request.customers.is_empty() {
            return Ok(None);
        }
        check_count(request.count, PRODUCT_COUNT)?;
        if let Some(country) = request.country.as_deref() {
            self.check_country(country, &request.customers)?;
        }
        let customers = self.customer_ixs(&request.customers)?;
        let eligible = ItemFilter::new(&request.sales_org).apply(self.catalog);

        let lists = customers
            .iter()
            .map(|&c| {
                let history = self.catalog.customer_history(c);
                self.material_rows(self.recommender.recommend(
                    c,
                    &history,
                    request.count,
                    request.exclude_purchased,
                    Some(eligible.as_slice()),
                ))
            })
            .collect::<AppResult<Vec<_>>>()?;
        let ranked = aggregate(lists, |_| false, request.count);

        tracing::info!(
            sales_org = %request.sales_org,
            similar_customers = customers.len(),
            exclude_purchased = request.exclude_purchased,
            eligible = eligible.len(),
            recommended = ranked.len(),
            backend = self.recommender.name(),
            "Suggested new customer order"
        );

        Ok(Some(RankedRows {
            rows: into_rows(ranked),
        }))
    }

    /// Customers most likely to buy the selected materials, excluding
    /// customers that already bought them
    pub fn target_customers(
        &self,
        request: &TargetCustomersRequest,
    ) -> AppResult<Option<RankedRows<CustomerRow>>> {
        if request.materials.is_empty() {
            return Ok(None);
        }
        check_count(request.count, TARGET_CUSTOMER_COUNT)?;
        let materials = self.material_ixs(&request.materials)?;

        let lists = materials
            .iter()
            .map(|&m| {
                let buyers = self.catalog.material_buyers(m);
                self.customer_rows(
                    self.recommender
                        .recommend_customers(m, &buyers, request.count, true),
                )
            })
            .collect::<AppResult<Vec<_>>>()?;
        let ranked = aggregate(lists, |_| false, request.count);

        tracing::info!(
            materials = materials.len(),
            targets = ranked.len(),
            backend = self.recommender.name(),
            "Identified target customers"
        );

        Ok(Some(RankedRows {
            rows: into_rows(ranked),
        }))
    }

    /// Years the customer last ordered something in, for the cutoff picker
    pub fn order_years(&self, soldto: &str) -> AppResult<Vec<i32>> {
        let customer = self.customer_ix(soldto)?;
        Ok(self.catalog.order_years_of(customer))
    }

    /// Product lines left to choose from after the sales org and cutoff
    pub fn product_line_options(
        &self,
        soldto: &str,
        query: &ProductLineQuery,
    ) -> AppResult<Vec<String>> {
        let customer = self.customer_ix(soldto)?;
        let options = ItemFilter::new(&query.sales_org)
            .with_cutoff(query.order_year.map(|year| YearCutoff { customer, year }))
            .product_line_options(self.catalog);
        Ok(options)
    }

    /// Every material available in a sales organisation, with descriptions
    pub fn materials_in_sales_org(&self, sales_org: &str) -> Vec<MaterialRow> {
        let ids: Vec<&str> = self
            .catalog
            .store
            .materials_available_in(sales_org)
            .into_iter()
            .collect();
        let descriptions = self.catalog.store.descriptions_of(&ids);
        ids.into_iter()
            .zip(descriptions)
            .map(|(material, description)| MaterialRow {
                material: material.to_string(),
                description,
            })
            .collect()
    }

    fn similar_customers(&self, customer: CustomerIx) -> AppResult<Vec<CustomerRow>> {
        // The backend ranks the query customer first; one extra slot makes room for it.
        let hits: Vec<Scored<CustomerIx>> = self
            .recommender
            .similar_customers(customer, SIMILAR_CUSTOMERS + 1)
            .into_iter()
            .filter(|hit| hit.item != customer)
            .take(SIMILAR_CUSTOMERS)
            .collect();
        Ok(into_rows(self.customer_rows(hits)?))
    }

    fn check_country(&self, country: &str, customers: &[String]) -> AppResult<()> {
        let selectable = self.catalog.store.customers_in_country(country);
        let foreign: Vec<&str> = customers
            .iter()
            .map(String::as_str)
            .filter(|c| !selectable.contains_key(*c))
            .collect();
        if foreign.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidInput(format!(
                "customers not selectable in {country}: {}",
                foreign.join(", ")
            )))
        }
    }

    fn customer_ix(&self, soldto: &str) -> AppResult<CustomerIx> {
        self.catalog.customers.get(soldto).ok_or_else(|| {
            AppError::NotFound(format!("customer {soldto} is not part of the trained model"))
        })
    }

    fn customer_ixs(&self, soldtos: &[String]) -> AppResult<Vec<CustomerIx>> {
        self.catalog.customers.resolve_all(soldtos).map_err(|missing| {
            AppError::NotFound(format!(
                "customers not part of the trained model: {}",
                missing.join(", ")
            ))
        })
    }

    fn material_ixs(&self, materials: &[String]) -> AppResult<Vec<MaterialIx>> {
        self.catalog.materials.resolve_all(materials).map_err(|missing| {
            AppError::NotFound(format!(
                "materials not part of the trained model: {}",
                missing.join(", ")
            ))
        })
    }

    fn material_rows(&self, hits: Vec<Scored<MaterialIx>>) -> AppResult<Vec<Scored<MaterialRow>>> {
        let ids = hits
            .iter()
            .map(|hit| {
                self.catalog.materials.id(hit.item).ok_or_else(|| {
                    self.unknown_index("material", hit.item.0)
                })
            })
            .collect::<AppResult<Vec<&str>>>()?;
        let descriptions = self.catalog.store.descriptions_of(&ids);

        Ok(hits
            .into_iter()
            .zip(ids)
            .zip(descriptions)
            .map(|((hit, material), description)| {
                hit.map(|_| MaterialRow {
                    material: material.to_string(),
                    description,
                })
            })
            .collect())
    }

    fn customer_rows(&self, hits: Vec<Scored<CustomerIx>>) -> AppResult<Vec<Scored<CustomerRow>>> {
        let ids = hits
            .iter()
            .map(|hit| {
                self.catalog.customers.id(hit.item).ok_or_else(|| {
                    self.unknown_index("customer", hit.item.0)
                })
            })
            .collect::<AppResult<Vec<&str>>>()?;
        let names = self.catalog.store.names_of(&ids);
        let countries = self.catalog.store.countries_of(&ids);

        Ok(hits
            .into_iter()
            .zip(ids)
            .zip(names.into_iter().zip(countries))
            .map(|((hit, soldto), (name, country))| {
                hit.map(|_| CustomerRow {
                    soldto: soldto.to_string(),
                    name,
                    country,
                })
            })
            .collect())
    }

    fn unknown_index(&self, axis: &str, position: usize) -> AppError {
        AppError::Internal(format!(
            "{} backend returned {axis} index {position} outside the catalog",
            self.recommender.name()
        ))
    }
}

fn check_count(count: usize, accepted: RangeInclusive<usize>) -> AppResult<()> {
    if accepted.contains(&count) {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "count must be between {} and {}, got {count}",
            accepted.start(),
            accepted.end()
        )))
    }
}

fn into_rows<R>(ranked: Vec<Scored<R>>) -> Vec<R> {
    ranked.into_iter().map(|scored| scored.item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use crate::services::recommender::MockRecommender;

    fn scored<I>(items: impl IntoIterator<Item = (I, f32)>) -> Vec<Scored<I>> {
        items
            .into_iter()
            .map(|(item, score)| Scored::new(item, score))
            .collect()
    }

    fn recommend_request(customer: &str, count: usize) -> RecommendProductsRequest {
        RecommendProductsRequest {
            customer: Some(customer.to_string()),
            sales_org: "A".to_string(),
            count,
            order_year: None,
            product_lines: Vec::new(),
        }
    }

    /// 21 similar customers with the query first, as the backend contract promises
    fn expect_similar_customers(mock: &mut MockRecommender, query: CustomerIx) {
        mock.expect_similar_customers()
            .withf(move |c, n| *c == query && *n == SIMILAR_CUSTOMERS + 1)
            .times(1)
            .returning(move |c, n| {
                let others = (0..30).map(CustomerIx).filter(|o| *o != c);
                let mut hits = vec![Scored::new(c, 1.0)];
                hits.extend(
                    others
                        .take(n - 1)
                        .enumerate()
                        .map(|(i, o)| Scored::new(o, 0.9 - i as f32 * 0.01)),
                );
                hits
            });
    }

    #[test]
    fn test_recommend_products_end_to_end() {
        let catalog = fixtures::catalog();
        let customer = catalog.customers.get("1000").unwrap();
        let expected = ItemFilter::new("A").apply(&catalog);

        let mut mock = MockRecommender::new();
        expect_similar_customers(&mut mock, customer);
        let restriction = expected.as_slice().to_vec();
        mock.expect_recommend()
            .withf(move |c, _, n, filter, restrict| {
                *c == customer && *n == 10 && !*filter && *restrict == Some(restriction.as_slice())
            })
            .times(1)
            .returning(|_, _, n, _, restrict| {
                // Deliberately unsorted scores.
                let pool = restrict.unwrap_or_default();
                pool.iter()
                    .take(n)
                    .enumerate()
                    .map(|(i, &m)| Scored::new(m, ((i * 7) % 10) as f32 / 10.0))
                    .collect()
            });
        mock.expect_name().return_const("mock");

        let result = Dashboard::new(&catalog, &mock)
            .recommend_products(&recommend_request("1000", 10))
            .unwrap()
            .unwrap();

        assert_eq!(result.products.len(), 10);
        assert_eq!(result.similar_customers.len(), SIMILAR_CUSTOMERS);
        assert!(result.similar_customers.iter().all(|c| c.soldto != "1000"));

        // Score of the i-th eligible material is (7i mod 10)/10, so index 7 (0.9) leads.
        let best = catalog.materials.id(expected.as_slice()[7]).unwrap();
        assert_eq!(result.products[0].material, best);
        let worst = catalog.materials.id(expected.as_slice()[0]).unwrap();
        assert_eq!(result.products[9].material, worst);
    }

    #[test]
    fn test_recommend_products_applies_filters() {
        let catalog = fixtures::catalog();
        let customer = catalog.customers.get("1000").unwrap();
        let lines = vec!["VALVE".to_string()];
        let expected = ItemFilter::new("A")
            .with_cutoff(Some(YearCutoff {
                customer,
                year: 2020,
            }))
            .with_product_lines(&lines)
            .apply(&catalog);

        let mut mock = MockRecommender::new();
        expect_similar_customers(&mut mock, customer);
        let restriction = expected.as_slice().to_vec();
        mock.expect_recommend()
            .withf(move |_, _, _, _, restrict| *restrict == Some(restriction.as_slice()))
            .times(1)
            .returning(|_, _, _, _, _| Vec::new());
        mock.expect_name().return_const("mock");

        let mut request = recommend_request("1000", 20);
        request.order_year = Some(2020);
        request.product_lines = lines;
        let result = Dashboard::new(&catalog, &mock)
            .recommend_products(&request)
            .unwrap()
            .unwrap();
        assert!(result.products.is_empty());
    }

    #[test]
    fn test_empty_eligible_set_still_queries_backend() {
        let catalog = fixtures::catalog();
        let customer = catalog.customers.get("1000").unwrap();

        let mut mock = MockRecommender::new();
        expect_similar_customers(&mut mock, customer);
        mock.expect_recommend()
            .withf(|_, _, _, _, restrict| *restrict == Some(&[][..]))
            .times(1)
            .returning(|_, _, _, _, _| Vec::new());
        mock.expect_name().return_const("mock");

        let mut request = recommend_request("1000", 20);
        request.sales_org = "NOWHERE".to_string();
        let result = Dashboard::new(&catalog, &mock)
            .recommend_products(&request)
            .unwrap()
            .unwrap();
        assert!(result.products.is_empty());
    }

    #[test]
    fn test_nothing_selected_is_a_no_op() {
        let catalog = fixtures::catalog();
        let mock = MockRecommender::new();
        let dashboard = Dashboard::new(&catalog, &mock);

        let mut request = recommend_request("", 20);
        assert!(dashboard.recommend_products(&request).unwrap().is_none());
        request.customer = None;
        assert!(dashboard.recommend_products(&request).unwrap().is_none());

        let similar = SimilarMaterialsRequest {
            sales_org: "A".to_string(),
            materials: Vec::new(),
            count: 20,
        };
        assert!(dashboard.similar_materials(&similar).unwrap().is_none());

        let targets = TargetCustomersRequest {
            materials: Vec::new(),
            count: 20,
        };
        assert!(dashboard.target_customers(&targets).unwrap().is_none());
    }

    #[test]
    fn test_unknown_customer_is_rejected_before_backend() {
        let catalog = fixtures::catalog();
        let mock = MockRecommender::new();
        let result = Dashboard::new(&catalog, &mock)
            .recommend_products(&recommend_request(fixtures::UNINDEXED_CUSTOMER, 20));
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_count_out_of_bounds() {
        let catalog = fixtures::catalog();
        let mock = MockRecommender::new();
        let dashboard = Dashboard::new(&catalog, &mock);
        for count in [0, 9, 101] {
            let result = dashboard.recommend_products(&recommend_request("1000", count));
            assert!(matches!(result, Err(AppError::InvalidInput(_))));
        }
        let targets = TargetCustomersRequest {
            materials: vec!["M001".to_string()],
            count: 51,
        };
        assert!(matches!(
            dashboard.target_customers(&targets),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_similar_materials_excludes_selection() {
        let catalog = fixtures::catalog();
        let m1 = catalog.materials.get("M001").unwrap();
        let m2 = catalog.materials.get("M002").unwrap();
        let m5 = catalog.materials.get("M005").unwrap();
        let m6 = catalog.materials.get("M006").unwrap();

        let mut mock = MockRecommender::new();
        mock.expect_similar_materials()
            .withf(|_, n, restrict| *n == 12 && restrict.is_some())
            .times(2)
            .returning(move |m, _, _| {
                if m == m1 {
                    scored([(m1, 1.0), (m2, 0.95), (m5, 0.8)])
                } else {
                    scored([(m2, 1.0), (m1, 0.9), (m5, 0.4), (m6, 0.5)])
                }
            });
        mock.expect_name().return_const("mock");

        let request = SimilarMaterialsRequest {
            sales_org: "A".to_string(),
            materials: vec!["M001".to_string(), "M002".to_string()],
            count: 10,
        };
        let result = Dashboard::new(&catalog, &mock)
            .similar_materials(&request)
            .unwrap()
            .unwrap();

        let ids: Vec<&str> = result.rows.iter().map(|r| r.material.as_str()).collect();
        // M005 averages (0.8 + 0.4) / 2 = 0.6, ahead of M006 at 0.5.
        assert_eq!(ids, vec!["M005", "M006"]);
        assert_eq!(result.rows[0].description, "Material M005");
    }

    #[test]
    fn test_similar_materials_unknown_material() {
        let catalog = fixtures::catalog();
        let mock = MockRecommender::new();
        let request = SimilarMaterialsRequest {
            sales_org: "A".to_string(),
            materials: vec!["M001".to_string(), fixtures::UNINDEXED_MATERIAL.to_string()],
            count: 10,
        };
        match Dashboard::new(&catalog, &mock).similar_materials(&request) {
            Err(AppError::NotFound(message)) => {
                assert!(message.contains(fixtures::UNINDEXED_MATERIAL))
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_new_customer_averages_across_customers() {
        let catalog = fixtures::catalog();
        let c0 = catalog.customers.get("1000").unwrap();
        let history = catalog.customer_history(c0);
        let m3 = catalog.materials.get("M003").unwrap();
        let m4 = catalog.materials.get("M004").unwrap();

        let mut mock = MockRecommender::new();
        mock.expect_recommend()
            .withf(move |c, h, n, filter, _| {
                *n == 10 && *filter && (*c != c0 || h == history.as_slice())
            })
            .times(2)
            .returning(move |c, _, _, _, _| {
                if c == c0 {
                    scored([(m3, 0.8), (m4, 0.7)])
                } else {
                    scored([(m3, 0.4)])
                }
            });
        mock.expect_name().return_const("mock");

        let request = NewCustomerRequest {
            sales_org: "A".to_string(),
            country: None,
            customers: vec!["1000".to_string(), "1001".to_string()],
            exclude_purchased: true,
            count: 10,
        };
        let result = Dashboard::new(&catalog, &mock)
            .new_customer(&request)
            .unwrap()
            .unwrap();
        let ids: Vec<&str> = result.rows.iter().map(|r| r.material.as_str()).collect();
        assert_eq!(ids, vec!["M004", "M003"]);
    }

    #[test]
    fn test_new_customer_checks_country() {
        let catalog = fixtures::catalog();
        let mock = MockRecommender::new();
        let request = NewCustomerRequest {
            sales_org: "A".to_string(),
            country: Some("DE".to_string()),
            customers: vec!["1000".to_string(), "1001".to_string()],
            exclude_purchased: true,
            count: 10,
        };
        match Dashboard::new(&catalog, &mock).new_customer(&request) {
            Err(AppError::InvalidInput(message)) => assert!(message.contains("1001")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_target_customers_passes_buyers() {
        let catalog = fixtures::catalog();
        let m0 = catalog.materials.get("M000").unwrap();
        let buyers = catalog.material_buyers(m0);
        assert!(!buyers.is_empty());
        let c5 = catalog.customers.get("1005").unwrap();

        let mut mock = MockRecommender::new();
        mock.expect_recommend_customers()
            .withf(move |m, h, n, filter| {
                *m == m0 && h == buyers.as_slice() && *n == 10 && *filter
            })
            .times(1)
            .returning(move |_, _, _, _| scored([(c5, 0.7)]));
        mock.expect_name().return_const("mock");

        let request = TargetCustomersRequest {
            materials: vec!["M000".to_string()],
            count: 10,
        };
        let result = Dashboard::new(&catalog, &mock)
            .target_customers(&request)
            .unwrap()
            .unwrap();
        assert_eq!(
            result.rows,
            vec![CustomerRow {
                soldto: "1005".to_string(),
                name: "Customer 1005".to_string(),
                country: "FR".to_string(),
            }]
        );
    }

    #[test]
    fn test_backend_index_outside_catalog_is_internal_error() {
        let catalog = fixtures::catalog();
        let mut mock = MockRecommender::new();
        mock.expect_similar_materials()
            .returning(|_, _, _| scored([(MaterialIx(10_000), 0.5)]));
        mock.expect_name().return_const("mock");

        let request = SimilarMaterialsRequest {
            sales_org: "A".to_string(),
            materials: vec!["M001".to_string()],
            count: 10,
        };
        let result = Dashboard::new(&catalog, &mock).similar_materials(&request);
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn test_missing_description_falls_back_to_id() {
        let catalog = fixtures::catalog();
        let mock = MockRecommender::new();
        let rows = Dashboard::new(&catalog, &mock).materials_in_sales_org("A");
        let undescribed = rows
            .iter()
            .find(|r| r.material == fixtures::UNDESCRIBED_MATERIAL)
            .unwrap();
        assert_eq!(undescribed.description, fixtures::UNDESCRIBED_MATERIAL);
    }

    #[test]
    fn test_order_year_and_product_line_options() {
        let catalog = fixtures::catalog();
        let mock = MockRecommender::new();
        let dashboard = Dashboard::new(&catalog, &mock);

        assert_eq!(
            dashboard.order_years("1000").unwrap(),
            vec![2018, 2019, 2020, 2021, 2022]
        );
        let query = ProductLineQuery {
            sales_org: "B".to_string(),
            order_year: None,
        };
        assert_eq!(
            dashboard.product_line_options("1000", &query).unwrap(),
            vec!["PUMP", "SEAL", "VALVE"]
        );
        assert!(matches!(
            dashboard.order_years(fixtures::UNINDEXED_CUSTOMER),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_with_factor_backend() {
        let (catalog, recommender) = fixtures::snapshot();
        let dashboard = Dashboard::new(&catalog, &recommender);
        let result = dashboard
            .recommend_products(&recommend_request("1000", 10))
            .unwrap()
            .unwrap();

        assert_eq!(result.products.len(), 10);
        assert_eq!(result.similar_customers.len(), SIMILAR_CUSTOMERS);
        let available = catalog.store.materials_available_in("A");
        assert!(result
            .products
            .iter()
            .all(|p| available.contains(p.material.as_str())));
    }
}
