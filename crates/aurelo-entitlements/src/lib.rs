//! aurelo-entitlements - Plan entitlement engine for Aurelo
//!
//! This crate decides what a workspace can do based on its billing plan:
//! - Static plan catalog (tiers, feature flags, numeric limits)
//! - Pure resolution of feature access, limit checks, and upgrade paths
//! - Trial lifecycle (7-day Pro trial, single-use per workspace)
//! - A per-session context binding all of the above to the current workspace
//!
//! # Architecture
//!
//! Decisions always flow through the *effective* tier: the paid tier,
//! promoted to Pro while a trial is active. The literal paid tier is kept
//! distinct so upgrade suggestions follow the real billing ladder.
//!
//! The engine does no I/O. The initial [`WorkspacePlan`] record is fetched
//! by an external collaborator and handed to [`EntitlementContext::bound`];
//! usage counts are supplied by callers on each check.

use thiserror::Error;

pub mod catalog;
pub mod clock;
pub mod context;
pub mod resolver;
pub mod state;
pub mod types;

pub use catalog::{definition_of, PlanDefinition};
pub use clock::{Clock, FixedClock, SystemClock};
pub use context::EntitlementContext;
pub use state::{WorkspacePlanState, TRIAL_DURATION_DAYS, TRIAL_TIER};
pub use types::{
    FeatureKey, LimitKey, PlanTier, TrialStatus, WorkspaceId, WorkspacePlan,
};

/// Entitlement engine errors. Reads are total and cannot fail; only the
/// mutators report misuse.
#[derive(Debug, Error)]
pub enum EntitlementError {
    #[error("trial already consumed for this workspace")]
    TrialAlreadyUsed,

    #[error("trial is only available on the starter plan (current plan: {0})")]
    TrialNotAvailable(PlanTier),

    #[error("no workspace bound to this session")]
    NoWorkspaceBound,
}
