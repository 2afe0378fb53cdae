//! Type definitions for the entitlement engine.

mod ids;
mod tiers;
mod workspace_plan;

pub use ids::*;
pub use tiers::*;
pub use workspace_plan::*;
