//! Per-session entitlement context.
//!
//! The one surface the rest of the application talks to: gating components,
//! banners, and upgrade nudges call these methods and never touch the
//! catalog, resolver, or plan state directly. Constructed once per session
//! and passed explicitly to whatever needs entitlement decisions.

use tracing::{info, warn};

use crate::clock::{Clock, SystemClock};
use crate::resolver;
use crate::state::WorkspacePlanState;
use crate::types::{FeatureKey, LimitKey, PlanTier, TrialStatus, WorkspaceId, WorkspacePlan};
use crate::EntitlementError;

/// Session binding. Before the workspace's plan record has loaded there is
/// nothing to decide against, so an unbound context answers every read with
/// Starter defaults: gated UI stays safe-by-default at the most restrictive
/// tier instead of leaking access.
#[derive(Clone, Debug)]
enum Session {
    Bound {
        workspace_id: WorkspaceId,
        state: WorkspacePlanState,
    },
    Unbound,
}

/// Unified read/mutate surface over the workspace plan.
///
/// Reads bind the resolver to the *effective* tier (trial-promoted); the one
/// exception is [`upgrade_plan`](Self::upgrade_plan), which works from the
/// literal paid tier so a trial never distorts the upgrade ladder.
///
/// All operations are synchronous and total; mutators fail only on misuse
/// (no workspace bound, trial already consumed).
#[derive(Clone, Debug)]
pub struct EntitlementContext<C: Clock = SystemClock> {
    session: Session,
    clock: C,
}

impl EntitlementContext<SystemClock> {
    /// Context for a session whose plan record has been loaded.
    pub fn bound(workspace_id: WorkspaceId, plan: WorkspacePlan) -> Self {
        Self::bound_with_clock(workspace_id, plan, SystemClock)
    }

    /// Context for a session with no workspace yet. Every read resolves with
    /// Starter defaults.
    pub fn unbound() -> Self {
        Self::unbound_with_clock(SystemClock)
    }
}

impl<C: Clock> EntitlementContext<C> {
    pub fn bound_with_clock(workspace_id: WorkspaceId, plan: WorkspacePlan, clock: C) -> Self {
        Self {
            session: Session::Bound {
                workspace_id,
                state: WorkspacePlanState::new(plan),
            },
            clock,
        }
    }

    pub fn unbound_with_clock(clock: C) -> Self {
        Self {
            session: Session::Unbound,
            clock,
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.session, Session::Bound { .. })
    }

    pub fn workspace_id(&self) -> Option<&WorkspaceId> {
        match &self.session {
            Session::Bound { workspace_id, .. } => Some(workspace_id),
            Session::Unbound => None,
        }
    }

    fn state(&self) -> Option<&WorkspacePlanState> {
        match &self.session {
            Session::Bound { state, .. } => Some(state),
            Session::Unbound => None,
        }
    }

    /// Tier used for access decisions, trial promotion included.
    pub fn effective_tier(&self) -> PlanTier {
        self.state()
            .map(|s| s.effective_tier(self.clock.now()))
            .unwrap_or(PlanTier::Starter)
    }

    /// Literal paid tier, unaffected by trial promotion.
    pub fn plan_id(&self) -> PlanTier {
        self.state()
            .map(|s| s.plan_id())
            .unwrap_or(PlanTier::Starter)
    }

    /// Whether the effective tier enables `key`.
    pub fn can(&self, key: FeatureKey) -> bool {
        resolver::has_feature(self.effective_tier(), key)
    }

    /// Ceiling for `key` on the effective tier; `None` means unlimited.
    pub fn limit(&self, key: LimitKey) -> Option<u32> {
        resolver::limit_of(self.effective_tier(), key)
    }

    /// Whether `count` has reached the effective tier's ceiling.
    pub fn at_limit(&self, key: LimitKey, count: u32) -> bool {
        resolver::is_at_limit(self.effective_tier(), key, count)
    }

    /// Whether adding one more would exceed the effective tier's ceiling.
    pub fn would_exceed(&self, key: LimitKey, count: u32) -> bool {
        resolver::would_exceed_limit(self.effective_tier(), key, count)
    }

    /// Lowest tier that enables `key`. Tier-independent.
    pub fn required_plan(&self, key: FeatureKey) -> PlanTier {
        resolver::minimum_plan_for(key)
    }

    /// Upgrade target that raises the ceiling for `key`, computed from the
    /// literal paid tier. A trial-promoted workspace over a Studio-only
    /// limit is offered the step up from its paid tier, not from trial Pro.
    pub fn upgrade_plan(&self, key: LimitKey) -> Option<PlanTier> {
        resolver::upgrade_plan_for_limit(key, self.plan_id())
    }

    pub fn is_at_least(&self, tier: PlanTier) -> bool {
        self.effective_tier() >= tier
    }

    pub fn is_exactly(&self, tier: PlanTier) -> bool {
        self.effective_tier() == tier
    }

    pub fn trial_status(&self) -> TrialStatus {
        self.state()
            .map(|s| s.trial_status(self.clock.now()))
            .unwrap_or(TrialStatus::NeverStarted)
    }

    pub fn trial_days_remaining(&self) -> u32 {
        self.state()
            .map(|s| s.trial_days_remaining(self.clock.now()))
            .unwrap_or(0)
    }

    pub fn trial_expired(&self) -> bool {
        self.state()
            .map(|s| s.trial_expired(self.clock.now()))
            .unwrap_or(false)
    }

    /// Replace the whole plan record (authoritative billing update).
    pub fn set_plan(&mut self, plan: WorkspacePlan) -> Result<(), EntitlementError> {
        match &mut self.session {
            Session::Bound {
                workspace_id,
                state,
            } => {
                info!(
                    workspace_id = %workspace_id,
                    plan = %plan.plan_id,
                    "workspace plan replaced"
                );
                state.set_plan(plan);
                Ok(())
            }
            Session::Unbound => {
                warn!("set_plan called with no workspace bound");
                Err(EntitlementError::NoWorkspaceBound)
            }
        }
    }

    /// Change only the tier, leaving billing and trial fields untouched.
    pub fn set_plan_id(&mut self, tier: PlanTier) -> Result<(), EntitlementError> {
        match &mut self.session {
            Session::Bound {
                workspace_id,
                state,
            } => {
                info!(workspace_id = %workspace_id, plan = %tier, "workspace tier changed");
                state.set_plan_id(tier);
                Ok(())
            }
            Session::Unbound => {
                warn!("set_plan_id called with no workspace bound");
                Err(EntitlementError::NoWorkspaceBound)
            }
        }
    }

    /// Start the one-time 7-day trial. The change is visible to the very
    /// next read.
    pub fn start_trial(&mut self) -> Result<(), EntitlementError> {
        let now = self.clock.now();
        match &mut self.session {
            Session::Bound {
                workspace_id,
                state,
            } => {
                state.start_trial(now)?;
                info!(
                    workspace_id = %workspace_id,
                    trial_end = %state.plan().trial_end.unwrap_or(now),
                    "trial started"
                );
                Ok(())
            }
            Session::Unbound => {
                warn!("start_trial called with no workspace bound");
                Err(EntitlementError::NoWorkspaceBound)
            }
        }
    }
}
