//! Static plan catalog.
//!
//! All tier/limit/feature definitions are compiled-in data. Keeping them as
//! data (not scattered conditionals) keeps the resolver tier-count-agnostic
//! and keeps tier comparison logic in the one ordered list on `PlanTier`.

use crate::types::{FeatureKey, LimitKey, PlanTier};

/// Attributes of one plan tier.
///
/// Invariant: every tier carries an entry for every `LimitKey` and lists its
/// enabled features explicitly; there are no partial definitions. Tests
/// assert totality and that higher tiers are feature supersets of lower ones.
#[derive(Debug)]
pub struct PlanDefinition {
    pub tier: PlanTier,
    pub name: &'static str,
    pub tagline: &'static str,
    /// Monthly price in cents.
    pub monthly_price_cents: u32,
    limits: [(LimitKey, Option<u32>); 4],
    features: &'static [FeatureKey],
}

impl PlanDefinition {
    /// Whether this tier enables the given capability. A key missing from the
    /// enabled list resolves to disabled, never an error.
    pub fn feature_enabled(&self, key: FeatureKey) -> bool {
        self.features.contains(&key)
    }

    /// Ceiling for the given resource; `None` means unlimited.
    pub fn limit(&self, key: LimitKey) -> Option<u32> {
        self.limits
            .iter()
            .find(|(k, _)| *k == key)
            .and_then(|(_, ceiling)| *ceiling)
    }

    /// Enabled features, in catalog order.
    pub fn features(&self) -> &'static [FeatureKey] {
        self.features
    }
}

static STARTER: PlanDefinition = PlanDefinition {
    tier: PlanTier::Starter,
    name: "Starter",
    tagline: "Track your clients and hours",
    monthly_price_cents: 0,
    limits: [
        (LimitKey::Seats, Some(1)),
        (LimitKey::ActiveClients, Some(5)),
        (LimitKey::ProjectsPerClient, Some(3)),
        (LimitKey::DataRetentionDays, Some(90)),
    ],
    features: &[],
};

static PRO: PlanDefinition = PlanDefinition {
    tier: PlanTier::Pro,
    name: "Pro",
    tagline: "For working freelancers",
    monthly_price_cents: 1200,
    limits: [
        (LimitKey::Seats, Some(3)),
        (LimitKey::ActiveClients, Some(25)),
        (LimitKey::ProjectsPerClient, Some(10)),
        (LimitKey::DataRetentionDays, Some(365)),
    ],
    features: &[
        FeatureKey::FullInsights,
        FeatureKey::ClientInvoicing,
        FeatureKey::RichNotes,
        FeatureKey::CustomCategories,
        FeatureKey::Integrations,
        FeatureKey::PdfExport,
        FeatureKey::AdvancedNotifications,
    ],
};

static STUDIO: PlanDefinition = PlanDefinition {
    tier: PlanTier::Studio,
    name: "Studio",
    tagline: "For agencies and small teams",
    monthly_price_cents: 2900,
    limits: [
        (LimitKey::Seats, None),
        (LimitKey::ActiveClients, None),
        (LimitKey::ProjectsPerClient, None),
        (LimitKey::DataRetentionDays, None),
    ],
    features: &[
        FeatureKey::FullInsights,
        FeatureKey::ClientInvoicing,
        FeatureKey::BatchInvoicing,
        FeatureKey::RichNotes,
        FeatureKey::CustomCategories,
        FeatureKey::Integrations,
        FeatureKey::PdfExport,
        FeatureKey::AdvancedNotifications,
        FeatureKey::WhiteLabelPortal,
        FeatureKey::TeamUtilization,
        FeatureKey::MultiWorkspace,
        FeatureKey::ApiAccess,
        FeatureKey::Webhooks,
        FeatureKey::CustomInvoiceTemplates,
    ],
};

/// Definition lookup. Total over `PlanTier`; never fails.
pub fn definition_of(tier: PlanTier) -> &'static PlanDefinition {
    match tier {
        PlanTier::Starter => &STARTER,
        PlanTier::Pro => &PRO,
        PlanTier::Studio => &STUDIO,
    }
}
