//! In-memory store over a sales CSV export.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use restock_core::{HistoricalDemandSeries, ProductRecord, Sku};
use restock_planner::{DemandHistorySource, HistoryQuery, PlanningError, ProductSource};

use crate::error::{CatalogError, CatalogResult};
use crate::record::SalesRow;

/// Sales history keyed by SKU, loaded once and read-only afterwards.
///
/// Product lookup policy: the most recent row by date wins; rows sharing that
/// date are resolved in favour of the one appearing later in the file.
#[derive(Debug, Clone, Default)]
pub struct SalesStore {
    rows: Vec<SalesRow>,
    by_sku: BTreeMap<Sku, Vec<usize>>,
}

impl SalesStore {
    pub fn from_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_path(path)?;
        let store = Self::from_csv(reader)?;
        info!(
            path = %path.display(),
            rows = store.rows.len(),
            skus = store.by_sku.len(),
            "sales history loaded"
        );
        Ok(store)
    }

    pub fn from_reader<R: Read>(reader: R) -> CatalogResult<Self> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        Self::from_csv(reader)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> CatalogResult<Self> {
        let mut store = Self::default();
        for result in reader.deserialize::<SalesRow>() {
            let row = result?;
            store.push(row)?;
        }
        Ok(store)
    }

    fn push(&mut self, mut row: SalesRow) -> CatalogResult<()> {
        // header is line 1
        let line = self.rows.len() as u64 + 2;
        let sku = Sku::new(&row.sku).map_err(|e| CatalogError::InvalidRecord {
            line,
            reason: e.to_string(),
        })?;
        if !(row.price_unit.is_finite() && row.price_unit >= 0.0) {
            return Err(CatalogError::InvalidRecord {
                line,
                reason: format!("price_unit must be non-negative (got {})", row.price_unit),
            });
        }
        if !row.units_sold.is_finite() {
            return Err(CatalogError::InvalidRecord {
                line,
                reason: "units_sold is not a number".to_string(),
            });
        }
        row.sku = sku.as_str().to_string();
        self.by_sku.entry(sku).or_default().push(self.rows.len());
        self.rows.push(row);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorted, de-duplicated SKUs.
    pub fn skus(&self) -> Vec<Sku> {
        self.by_sku.keys().cloned().collect()
    }

    fn indices(&self, sku: &Sku) -> CatalogResult<&[usize]> {
        self.by_sku
            .get(sku)
            .map(Vec::as_slice)
            .ok_or_else(|| CatalogError::UnknownSku(sku.clone()))
    }

    /// Most recent product attributes for `sku`.
    pub fn latest(&self, sku: &Sku) -> CatalogResult<ProductRecord> {
        let idx = self
            .indices(sku)?
            .iter()
            .copied()
            .max_by_key(|&i| (self.rows[i].date, i))
            .ok_or_else(|| CatalogError::UnknownSku(sku.clone()))?;
        Ok(self.rows[idx].product(sku.clone()))
    }

    /// `(date, units_sold)` for `sku`, oldest first.
    pub fn sku_history(&self, sku: &Sku) -> CatalogResult<Vec<(NaiveDate, f64)>> {
        let mut idx = self.indices(sku)?.to_vec();
        idx.sort_by_key(|&i| (self.rows[i].date, i));
        Ok(idx
            .into_iter()
            .map(|i| (self.rows[i].date, self.rows[i].units_sold))
            .collect())
    }

    /// units_sold over every SKU, oldest first.
    pub fn global_history(&self) -> HistoricalDemandSeries {
        let mut idx: Vec<usize> = (0..self.rows.len()).collect();
        idx.sort_by_key(|&i| (self.rows[i].date, i));
        idx.into_iter().map(|i| self.rows[i].units_sold).collect()
    }
}

impl From<CatalogError> for PlanningError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownSku(sku) => PlanningError::ProductNotFound(sku),
            other => PlanningError::data_source(other.to_string()),
        }
    }
}

impl ProductSource for SalesStore {
    fn latest_product(&self, sku: &Sku) -> Result<ProductRecord, PlanningError> {
        Ok(self.latest(sku)?)
    }

    fn skus(&self) -> Result<Vec<Sku>, PlanningError> {
        Ok(SalesStore::skus(self))
    }
}

impl DemandHistorySource for SalesStore {
    fn demand_history(&self, query: &HistoryQuery) -> Result<HistoricalDemandSeries, PlanningError> {
        match query {
            HistoryQuery::Global => Ok(self.global_history()),
            HistoryQuery::Sku(sku) => Ok(self
                .sku_history(sku)?
                .into_iter()
                .map(|(_, units)| units)
                .collect()),
        }
    }
}
