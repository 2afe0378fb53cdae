//! The persisted billing record for a workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PlanTier;

/// Billing plan record for a single workspace. Matches the shape of the
/// external persistence record field for field (camelCase keys), which is why
/// the fields are public data rather than accessors: this struct *is* the
/// persistence contract.
///
/// `plan_id` is the billing-authoritative tier. Access decisions must never
/// read it directly; they go through the effective tier, which promotes an
/// active trial (see `WorkspacePlanState`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspacePlan {
    /// Current paid tier (literal plan id).
    pub plan_id: PlanTier,

    /// When the current billing period was activated.
    pub activated_at: DateTime<Utc>,

    /// End of the current billing period, if known.
    #[serde(default)]
    pub period_end: Option<DateTime<Utc>>,

    /// External billing subscription reference, opaque to the engine.
    #[serde(default)]
    pub stripe_subscription_id: Option<String>,

    /// External billing customer reference, opaque to the engine.
    #[serde(default)]
    pub stripe_customer_id: Option<String>,

    /// Whether a trial grant was ever made. Stays `true` after the trial
    /// lapses; that is the "trial already used" signal.
    #[serde(default)]
    pub is_trial: bool,

    /// Instant after which the trial grant lapses.
    #[serde(default)]
    pub trial_end: Option<DateTime<Utc>>,
}

impl WorkspacePlan {
    /// The record a freshly created workspace starts with.
    pub fn starter_defaults(now: DateTime<Utc>) -> Self {
        Self {
            plan_id: PlanTier::Starter,
            activated_at: now,
            period_end: None,
            stripe_subscription_id: None,
            stripe_customer_id: None,
            is_trial: false,
            trial_end: None,
        }
    }
}
