//! Pure entitlement decision functions.
//!
//! Everything here is a side-effect-free function of a tier and the static
//! catalog. Callers supply current usage counts; the resolver never computes
//! them. Counts are unsigned: negative counts are not a valid input domain
//! and must be clamped by callers before reaching this module.

use crate::catalog::definition_of;
use crate::types::{FeatureKey, LimitKey, PlanTier};

/// Whether `tier` enables `key`.
pub fn has_feature(tier: PlanTier, key: FeatureKey) -> bool {
    definition_of(tier).feature_enabled(key)
}

/// Ceiling for `key` on `tier`; `None` means unlimited.
pub fn limit_of(tier: PlanTier, key: LimitKey) -> Option<u32> {
    definition_of(tier).limit(key)
}

/// Whether the workspace has reached the ceiling. A workspace exactly at the
/// ceiling is at limit. Use this to gate entry to an already-full list; use
/// [`would_exceed_limit`] to gate creation of one more item.
pub fn is_at_limit(tier: PlanTier, key: LimitKey, current_count: u32) -> bool {
    match limit_of(tier, key) {
        None => false,
        Some(ceiling) => current_count >= ceiling,
    }
}

/// Whether adding one more item would exceed the ceiling.
pub fn would_exceed_limit(tier: PlanTier, key: LimitKey, current_count: u32) -> bool {
    match limit_of(tier, key) {
        None => false,
        Some(ceiling) => current_count.saturating_add(1) > ceiling,
    }
}

/// Lowest tier that enables `key`. If no tier enables it, returns the highest
/// tier: fail toward requiring the most restrictive upgrade, never toward
/// silently granting access.
pub fn minimum_plan_for(key: FeatureKey) -> PlanTier {
    PlanTier::ALL
        .into_iter()
        .find(|tier| has_feature(*tier, key))
        .unwrap_or(PlanTier::HIGHEST)
}

/// Lowest tier strictly above `current_tier` that raises the ceiling for
/// `key`, either to a strictly greater finite value or to unlimited. `None`
/// when no higher tier increases the ceiling: the current limit is already
/// the maximum offered, or the current tier is already the top. A higher tier
/// with an equal ceiling is not an upgrade target for that limit.
pub fn upgrade_plan_for_limit(key: LimitKey, current_tier: PlanTier) -> Option<PlanTier> {
    let current = limit_of(current_tier, key)?;
    current_tier
        .tiers_above()
        .find(|candidate| match limit_of(*candidate, key) {
            None => true,
            Some(ceiling) => ceiling > current,
        })
}

/// Render a ceiling for display: the decimal integer, or the literal word
/// "unlimited".
pub fn format_limit(value: Option<u32>) -> String {
    match value {
        None => "unlimited".to_string(),
        Some(ceiling) => ceiling.to_string(),
    }
}
