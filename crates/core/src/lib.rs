//! `restock-core`: shared data types for the forecast-to-policy pipeline.
//!
//! Pure values and the error model; no IO, no model, no storage.

pub mod calendar;
pub mod demand;
pub mod error;
pub mod inventory;
pub mod product;
pub mod sku;

pub use calendar::CalendarFeatures;
pub use demand::HistoricalDemandSeries;
pub use error::{PlanError, PlanResult};
pub use inventory::InventoryState;
pub use product::ProductRecord;
pub use sku::Sku;
