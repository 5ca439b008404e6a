//! Inventory Policy Engine.
//!
//! Converts a demand estimate, lead time, current stock and demand volatility
//! into a reorder decision. Deterministic arithmetic only (no IO, no state).

pub mod policy;
pub mod volatility;

pub use policy::{DEFAULT_SERVICE_LEVEL_Z, InventoryPolicy, InventoryRecommendation, PolicyConfig};
pub use volatility::{VolatilityScope, demand_sigma};
