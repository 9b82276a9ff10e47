use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::{Catalog, IdIndex, LookupStore, SparseMatrix, Triplets};
use crate::models::{Customer, Material};
use crate::services::recommender::{factor::FactorFile, FactorRecommender};

pub const CUSTOMERS_FILE: &str = "customers.json";
pub const MATERIALS_FILE: &str = "materials.json";
pub const AVAILABILITY_FILE: &str = "availability.json";
pub const CUSTOMER_INDEX_FILE: &str = "customer_index.json";
pub const MATERIAL_INDEX_FILE: &str = "material_index.json";
pub const INTERACTIONS_FILE: &str = "interactions.json";
pub const ORDER_YEARS_FILE: &str = "order_years.json";
pub const MODEL_FILE: &str = "model.json";

/// The snapshot files exactly as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSnapshot {
    pub customers: Vec<Customer>,
    pub materials: Vec<Material>,
    /// Sales organisation -> materials available in it
    pub availability: BTreeMap<String, Vec<String>>,
    /// Customer ids in matrix row order
    pub customer_index: Vec<String>,
    /// Material ids in matrix column order
    pub material_index: Vec<String>,
    pub interactions: Triplets<f32>,
    pub order_years: Triplets<i32>,
    pub model: FactorFile,
}

/// Validated, ready-to-serve data
pub struct Snapshot {
    pub catalog: Catalog,
    pub recommender: FactorRecommender,
}

impl RawSnapshot {
    pub fn read(dir: &Path) -> anyhow::Result<Self> {
        Ok(Self {
            customers: read_json(dir, CUSTOMERS_FILE)?,
            materials: read_json(dir, MATERIALS_FILE)?,
            availability: read_json(dir, AVAILABILITY_FILE)?,
            customer_index: read_json(dir, CUSTOMER_INDEX_FILE)?,
            material_index: read_json(dir, MATERIAL_INDEX_FILE)?,
            interactions: read_json(dir, INTERACTIONS_FILE)?,
            order_years: read_json(dir, ORDER_YEARS_FILE)?,
            model: read_json(dir, MODEL_FILE)?,
        })
    }

    pub fn write(&self, dir: &Path) -> anyhow::Result<()> {
        write_json(dir, CUSTOMERS_FILE, &self.customers)?;
        write_json(dir, MATERIALS_FILE, &self.materials)?;
        write_json(dir, AVAILABILITY_FILE, &self.availability)?;
        write_json(dir, CUSTOMER_INDEX_FILE, &self.customer_index)?;
        write_json(dir, MATERIAL_INDEX_FILE, &self.material_index)?;
        write_json(dir, INTERACTIONS_FILE, &self.interactions)?;
        write_json(dir, ORDER_YEARS_FILE, &self.order_years)?;
        write_json(dir, MODEL_FILE, &self.model)
    }

    /// Cross-checks the files against each other and builds the serving structures
    pub fn build(self) -> anyhow::Result<Snapshot> {
        let customers = IdIndex::from_ids(self.customer_index).context("customer index")?;
        let materials = IdIndex::from_ids(self.material_index).context("material index")?;
        let interactions =
            SparseMatrix::from_triplets(self.interactions).context("interaction matrix")?;
        let order_years =
            SparseMatrix::from_triplets(self.order_years).context("order year matrix")?;

        let recommender = FactorRecommender::from_file(self.model).context("model factors")?;
        recommender
            .check_dimensions(customers.len(), materials.len())
            .context("model does not match the id indexes")?;

        let availability: BTreeMap<String, BTreeSet<String>> = self
            .availability
            .into_iter()
            .map(|(org, materials)| (org, materials.into_iter().collect()))
            .collect();
        let store = LookupStore::new(self.customers, self.materials, availability);

        let catalog = Catalog::new(store, customers, materials, interactions, order_years)?;
        Ok(Snapshot {
            catalog,
            recommender,
        })
    }
}

/// Reads and validates the snapshot in `dir`
pub fn load_snapshot(dir: &Path) -> anyhow::Result<Snapshot> {
    let started = Instant::now();
    let snapshot = RawSnapshot::read(dir)?
        .build()
        .with_context(|| format!("invalid snapshot in {}", dir.display()))?;

    let summary = snapshot.catalog.summary();
    tracing::info!(
        data_dir = %dir.display(),
        customers = summary.customers,
        materials = summary.materials,
        indexed_customers = summary.indexed_customers,
        indexed_materials = summary.indexed_materials,
        interactions = summary.interactions,
        sales_orgs = summary.sales_orgs,
        model_rank = snapshot.recommender.rank(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Loaded data snapshot"
    );

    Ok(snapshot)
}

fn read_json<T: DeserializeOwned>(dir: &Path, name: &str) -> anyhow::Result<T> {
    let path = dir.join(name);
    let file = File::open(&path).with_context(|| format!("failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> anyhow::Result<()> {
    let path = dir.join(name);
    let file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer(BufWriter::new(file), value)
        .with_context(|| format!("failed to write {}", path.display()))
}
