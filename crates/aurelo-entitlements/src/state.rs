//! Per-workspace plan state and the trial lifecycle.

use chrono::{DateTime, Duration, Utc};

use crate::types::{PlanTier, TrialStatus, WorkspacePlan};
use crate::EntitlementError;

/// Trial length. Fixed, not configurable.
pub const TRIAL_DURATION_DAYS: i64 = 7;

/// Tier an active trial promotes to.
pub const TRIAL_TIER: PlanTier = PlanTier::Pro;

/// Owner of the single mutable [`WorkspacePlan`] record for a session.
///
/// Trial expiry is never cached: every derived read takes `now` and
/// recomputes from `trial_end`, so a trial lapses the instant the clock
/// passes it with no explicit transition call.
///
/// The trial grant is single-use per workspace. Unlike the surrounding UI,
/// which merely hides the trial offer once used, this layer hard-rejects a
/// second [`start_trial`](Self::start_trial) so a lapsed trial cannot be
/// re-armed by a stray call.
#[derive(Clone, Debug)]
pub struct WorkspacePlanState {
    plan: WorkspacePlan,
}

impl WorkspacePlanState {
    pub fn new(plan: WorkspacePlan) -> Self {
        Self { plan }
    }

    /// The current record (read-only view).
    pub fn plan(&self) -> &WorkspacePlan {
        &self.plan
    }

    /// Literal (billing-authoritative) tier. Not for access decisions; use
    /// [`effective_tier`](Self::effective_tier).
    pub fn plan_id(&self) -> PlanTier {
        self.plan.plan_id
    }

    /// Wholesale replace of the record, used when an authoritative new state
    /// arrives from billing. Replaces every field including trial fields.
    pub fn set_plan(&mut self, plan: WorkspacePlan) {
        self.plan = plan;
    }

    /// Narrow mutation: change only the tier, leaving billing-period and
    /// trial fields untouched.
    pub fn set_plan_id(&mut self, tier: PlanTier) {
        self.plan.plan_id = tier;
    }

    /// Grant the one-time trial: `trial_end = now + 7 days`, `plan_id`
    /// unchanged.
    ///
    /// Rejects workspaces that already consumed their trial (active or
    /// lapsed) and workspaces not on the Starter tier.
    pub fn start_trial(&mut self, now: DateTime<Utc>) -> Result<(), EntitlementError> {
        if self.plan.is_trial {
            return Err(EntitlementError::TrialAlreadyUsed);
        }
        if self.plan.plan_id != PlanTier::Starter {
            return Err(EntitlementError::TrialNotAvailable(self.plan.plan_id));
        }
        self.plan.is_trial = true;
        self.plan.trial_end = Some(now + Duration::days(TRIAL_DURATION_DAYS));
        Ok(())
    }

    /// Three-way trial state as of `now`.
    pub fn trial_status(&self, now: DateTime<Utc>) -> TrialStatus {
        if !self.plan.is_trial {
            TrialStatus::NeverStarted
        } else if self.trial_expired(now) {
            TrialStatus::Lapsed
        } else {
            TrialStatus::Active
        }
    }

    /// Whole days left on the trial, rounded up, floored at 0. Zero when no
    /// trial end is set.
    pub fn trial_days_remaining(&self, now: DateTime<Utc>) -> u32 {
        const DAY_MS: u64 = 86_400_000;
        let Some(trial_end) = self.plan.trial_end else {
            return 0;
        };
        // Ceil over milliseconds so a sub-second remainder still counts as
        // another day.
        let ms = (trial_end - now).num_milliseconds();
        if ms <= 0 {
            0
        } else {
            (ms as u64).div_ceil(DAY_MS) as u32
        }
    }

    /// Whether a granted trial has lapsed as of `now`.
    pub fn trial_expired(&self, now: DateTime<Utc>) -> bool {
        self.plan.is_trial && self.plan.trial_end.is_some_and(|end| end <= now)
    }

    /// Tier used for every entitlement check: the literal tier, promoted to
    /// [`TRIAL_TIER`] while a non-lapsed trial is active.
    pub fn effective_tier(&self, now: DateTime<Utc>) -> PlanTier {
        if self.plan.is_trial && !self.trial_expired(now) {
            TRIAL_TIER
        } else {
            self.plan.plan_id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starter_state(now: DateTime<Utc>) -> WorkspacePlanState {
        WorkspacePlanState::new(WorkspacePlan::starter_defaults(now))
    }

    #[test]
    fn test_fresh_workspace_has_no_trial() {
        let now = Utc::now();
        let state = starter_state(now);
        assert_eq!(state.trial_status(now), TrialStatus::NeverStarted);
        assert_eq!(state.trial_days_remaining(now), 0);
        assert!(!state.trial_expired(now));
        assert_eq!(state.effective_tier(now), PlanTier::Starter);
    }

    #[test]
    fn test_start_trial_sets_seven_day_window() {
        let now = Utc::now();
        let mut state = starter_state(now);
        state.start_trial(now).unwrap();

        let plan = state.plan();
        assert!(plan.is_trial);
        assert_eq!(plan.trial_end, Some(now + Duration::days(7)));
        // The literal tier is untouched; only the effective tier is promoted.
        assert_eq!(plan.plan_id, PlanTier::Starter);
        assert_eq!(state.effective_tier(now), PlanTier::Pro);
        assert_eq!(state.trial_status(now), TrialStatus::Active);
    }

    #[test]
    fn test_active_trial_days_remaining_rounds_up() {
        let now = Utc::now();
        let mut state = starter_state(now);
        state
            .set_plan(WorkspacePlan {
                is_trial: true,
                trial_end: Some(now + Duration::days(3)),
                ..WorkspacePlan::starter_defaults(now)
            });
        assert_eq!(state.trial_days_remaining(now), 3);

        // 2 days 1 hour left still shows as 3 days.
        let later = now + Duration::hours(23);
        assert_eq!(state.trial_days_remaining(later), 3);
    }

    #[test]
    fn test_trial_days_remaining_sub_second_remainder_rounds_up() {
        let now = Utc::now();
        let mut state = starter_state(now);
        state.set_plan(WorkspacePlan {
            is_trial: true,
            trial_end: Some(now + Duration::days(6) + Duration::milliseconds(300)),
            ..WorkspacePlan::starter_defaults(now)
        });
        // 6 days + 300ms is a started seventh day.
        assert_eq!(state.trial_days_remaining(now), 7);
    }

    #[test]
    fn test_active_trial_with_moments_left_still_shows_a_day() {
        let now = Utc::now();
        let mut state = starter_state(now);
        state.set_plan(WorkspacePlan {
            is_trial: true,
            trial_end: Some(now + Duration::milliseconds(500)),
            ..WorkspacePlan::starter_defaults(now)
        });
        // Still active, so the countdown must not read 0 yet.
        assert_eq!(state.trial_status(now), TrialStatus::Active);
        assert_eq!(state.trial_days_remaining(now), 1);
    }

    #[test]
    fn test_lapsed_trial_reverts_to_literal_tier() {
        let now = Utc::now();
        let mut state = starter_state(now);
        state.set_plan(WorkspacePlan {
            is_trial: true,
            trial_end: Some(now - Duration::days(1)),
            ..WorkspacePlan::starter_defaults(now)
        });

        assert_eq!(state.trial_status(now), TrialStatus::Lapsed);
        assert!(state.trial_expired(now));
        assert_eq!(state.trial_days_remaining(now), 0);
        assert_eq!(state.effective_tier(now), PlanTier::Starter);
    }

    #[test]
    fn test_trial_lapses_implicitly_with_the_clock() {
        let now = Utc::now();
        let mut state = starter_state(now);
        state.start_trial(now).unwrap();

        assert_eq!(state.effective_tier(now + Duration::days(6)), PlanTier::Pro);
        // No transition call between these two reads.
        assert_eq!(
            state.effective_tier(now + Duration::days(8)),
            PlanTier::Starter
        );
    }

    #[test]
    fn test_start_trial_is_single_use() {
        let now = Utc::now();
        let mut state = starter_state(now);
        state.start_trial(now).unwrap();

        // Still active: rejected.
        assert!(matches!(
            state.start_trial(now + Duration::days(1)),
            Err(EntitlementError::TrialAlreadyUsed)
        ));
        // Lapsed: still rejected; no re-arm.
        assert!(matches!(
            state.start_trial(now + Duration::days(30)),
            Err(EntitlementError::TrialAlreadyUsed)
        ));
    }

    #[test]
    fn test_start_trial_requires_starter() {
        let now = Utc::now();
        let mut state = starter_state(now);
        state.set_plan_id(PlanTier::Pro);
        assert!(matches!(
            state.start_trial(now),
            Err(EntitlementError::TrialNotAvailable(PlanTier::Pro))
        ));
    }

    #[test]
    fn test_set_plan_replaces_trial_fields_wholesale() {
        let now = Utc::now();
        let mut state = starter_state(now);
        state.start_trial(now).unwrap();

        // Billing webhook supplies a fresh authoritative record.
        state.set_plan(WorkspacePlan {
            plan_id: PlanTier::Pro,
            stripe_subscription_id: Some("sub_live".into()),
            ..WorkspacePlan::starter_defaults(now)
        });
        assert_eq!(state.plan_id(), PlanTier::Pro);
        assert_eq!(state.trial_status(now), TrialStatus::NeverStarted);
        assert!(state.plan().trial_end.is_none());
    }

    #[test]
    fn test_set_plan_id_leaves_trial_fields_untouched() {
        let now = Utc::now();
        let mut state = starter_state(now);
        state.start_trial(now).unwrap();
        let trial_end = state.plan().trial_end;

        state.set_plan_id(PlanTier::Studio);
        assert_eq!(state.plan_id(), PlanTier::Studio);
        assert!(state.plan().is_trial);
        assert_eq!(state.plan().trial_end, trial_end);
    }
}
