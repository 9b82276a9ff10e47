use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::{Customer, Material};

/// Read-only reference tables for customers, materials and availability.
///
/// Lookups never fail: an id that is missing from a table degrades to the
/// raw id as its display value, or to an empty set.
#[derive(Debug, Clone, Default)]
pub struct LookupStore {
    customers: HashMap<String, Customer>,
    materials: HashMap<String, Material>,
    availability: BTreeMap<String, BTreeSet<String>>,
}

impl LookupStore {
    pub fn new(
        customers: Vec<Customer>,
        materials: Vec<Material>,
        availability: BTreeMap<String, BTreeSet<String>>,
    ) -> Self {
        Self {
            customers: customers
                .into_iter()
                .map(|c| (c.soldto.clone(), c))
                .collect(),
            materials: materials
                .into_iter()
                .map(|m| (m.material.clone(), m))
                .collect(),
            availability,
        }
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn customer(&self, soldto: &str) -> Option<&Customer> {
        self.customers.get(soldto)
    }

    /// Distinct customer countries, sorted
    pub fn countries(&self) -> Vec<String> {
        self.customers
            .values()
            .map(|c| c.country.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every sales organisation in the availability table, sorted
    pub fn sales_orgs(&self) -> Vec<String> {
        self.availability.keys().cloned().collect()
    }

    /// Selectable customers of a country as soldto -> name, ordered by soldto
    pub fn customers_in_country(&self, country: &str) -> BTreeMap<String, String> {
        self.customers
            .values()
            .filter(|c| c.country == country && c.is_selectable())
            .map(|c| (c.soldto.clone(), c.name.clone()))
            .collect()
    }

    pub fn sales_orgs_of(&self, soldto: &str) -> &[String] {
        self.customers
            .get(soldto)
            .and_then(|c| c.sales_orgs.as_deref())
            .unwrap_or(&[])
    }

    pub fn materials_available_in(&self, sales_org: &str) -> BTreeSet<&str> {
        self.availability
            .get(sales_org)
            .map(|materials| materials.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Distinct product lines of the given materials, sorted
    pub fn product_lines_of<'a, I>(&self, materials: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        materials
            .into_iter()
            .filter_map(|m| self.materials.get(m))
            .filter_map(|m| m.product_line.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn materials_in_lines<S: AsRef<str>>(&self, lines: &[S]) -> BTreeSet<&str> {
        let lines: BTreeSet<&str> = lines.iter().map(AsRef::as_ref).collect();
        self.materials
            .values()
            .filter(|m| {
                m.product_line
                    .as_deref()
                    .is_some_and(|line| lines.contains(line))
            })
            .map(|m| m.material.as_str())
            .collect()
    }

    pub fn descriptions_of<S: AsRef<str>>(&self, materials: &[S]) -> Vec<String> {
        materials
            .iter()
            .map(|m| {
                let m = m.as_ref();
                self.materials
                    .get(m)
                    .map_or_else(|| m.to_string(), |found| found.description.clone())
            })
            .collect()
    }

    pub fn names_of<S: AsRef<str>>(&self, customers: &[S]) -> Vec<String> {
        self.customer_field(customers, |c| &c.name)
    }

    pub fn countries_of<S: AsRef<str>>(&self, customers: &[S]) -> Vec<String> {
        self.customer_field(customers, |c| &c.country)
    }

    fn customer_field<S, F>(&self, customers: &[S], field: F) -> Vec<String>
    where
        S: AsRef<str>,
        F: Fn(&Customer) -> &String,
    {
        customers
            .iter()
            .map(|c| {
                let c = c.as_ref();
                self.customers
                    .get(c)
                    .map_or_else(|| c.to_string(), |found| field(found).clone())
            })
            .collect()
    }
}
