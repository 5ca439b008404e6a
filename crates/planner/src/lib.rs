//! `restock-planner`
//!
//! **Responsibility:** run the forecast-to-policy decision for one SKU on one
//! date.
//!
//! - [`Planner`]: the pure pipeline over explicitly passed artifacts.
//! - [`PlanningService`]: joins the pipeline with storage collaborators
//!   ([`ProductSource`], [`DemandHistorySource`]) that live elsewhere.

pub mod error;
pub mod pipeline;
pub mod service;
pub mod source;

pub use error::PlanningError;
pub use pipeline::{InventoryDecision, Planner};
pub use service::PlanningService;
pub use source::{DemandHistorySource, HistoryQuery, ProductSource};
