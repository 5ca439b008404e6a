//! `restock-catalog`: product master and sales history backed by a CSV export.
//!
//! Implements the planner's storage collaborator traits. Selection policy for
//! product attributes (latest observation per SKU) is owned here, not by the
//! decision pipeline.

pub mod error;
pub mod record;
pub mod store;

pub use error::{CatalogError, CatalogResult};
pub use record::SalesRow;
pub use store::SalesStore;
