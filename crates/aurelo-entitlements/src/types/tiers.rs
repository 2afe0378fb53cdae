//! Plan tiers and the gateable capability/resource keys.
//!
//! The string forms here double as persistence keys in the external plan
//! record, so they are part of the contract: tiers are lowercase, feature
//! and limit keys are camelCase.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Plan tier (billing ladder). Ordering is significant: upgrade-path
/// computation and "at least tier X" checks rely on `Starter < Pro < Studio`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Starter,
    Pro,
    Studio,
}

/// Error type for parsing PlanTier from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePlanTierError(pub String);

impl std::fmt::Display for ParsePlanTierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid plan tier: {}", self.0)
    }
}

impl std::error::Error for ParsePlanTierError {}

impl FromStr for PlanTier {
    type Err = ParsePlanTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "starter" => Ok(PlanTier::Starter),
            "pro" => Ok(PlanTier::Pro),
            "studio" => Ok(PlanTier::Studio),
            _ => Err(ParsePlanTierError(s.to_string())),
        }
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PlanTier {
    /// All tiers in ascending order.
    pub const ALL: [PlanTier; 3] = [PlanTier::Starter, PlanTier::Pro, PlanTier::Studio];

    /// Top of the ladder (last element of [`ALL`](Self::ALL)).
    pub const HIGHEST: PlanTier = PlanTier::ALL[PlanTier::ALL.len() - 1];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Starter => "starter",
            PlanTier::Pro => "pro",
            PlanTier::Studio => "studio",
        }
    }

    /// Parse a persisted tier string, falling back to the most restrictive
    /// tier on anything unrecognized.
    pub fn parse_or_starter(s: &str) -> PlanTier {
        s.parse().unwrap_or(PlanTier::Starter)
    }

    /// Tiers strictly above this one, in ascending order.
    pub fn tiers_above(self) -> impl Iterator<Item = PlanTier> {
        PlanTier::ALL.into_iter().filter(move |t| *t > self)
    }
}

/// Binary-gated capability. Closed set; no dynamic registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureKey {
    FullInsights,
    ClientInvoicing,
    BatchInvoicing,
    RichNotes,
    CustomCategories,
    Integrations,
    PdfExport,
    AdvancedNotifications,
    WhiteLabelPortal,
    TeamUtilization,
    MultiWorkspace,
    ApiAccess,
    Webhooks,
    CustomInvoiceTemplates,
}

/// Error type for parsing FeatureKey from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFeatureKeyError(pub String);

impl std::fmt::Display for ParseFeatureKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid feature key: {}", self.0)
    }
}

impl std::error::Error for ParseFeatureKeyError {}

impl FromStr for FeatureKey {
    type Err = ParseFeatureKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ParseFeatureKeyError(s.to_string()))
    }
}

impl std::fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FeatureKey {
    pub const ALL: [FeatureKey; 14] = [
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
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKey::FullInsights => "fullInsights",
            FeatureKey::ClientInvoicing => "clientInvoicing",
            FeatureKey::BatchInvoicing => "batchInvoicing",
            FeatureKey::RichNotes => "richNotes",
            FeatureKey::CustomCategories => "customCategories",
            FeatureKey::Integrations => "integrations",
            FeatureKey::PdfExport => "pdfExport",
            FeatureKey::AdvancedNotifications => "advancedNotifications",
            FeatureKey::WhiteLabelPortal => "whiteLabelPortal",
            FeatureKey::TeamUtilization => "teamUtilization",
            FeatureKey::MultiWorkspace => "multiWorkspace",
            FeatureKey::ApiAccess => "apiAccess",
            FeatureKey::Webhooks => "webhooks",
            FeatureKey::CustomInvoiceTemplates => "customInvoiceTemplates",
        }
    }
}

/// Countable, ceiling-gated resource. Each tier maps every key to either a
/// positive integer ceiling or unlimited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LimitKey {
    Seats,
    ActiveClients,
    ProjectsPerClient,
    DataRetentionDays,
}

/// Error type for parsing LimitKey from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLimitKeyError(pub String);

impl std::fmt::Display for ParseLimitKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid limit key: {}", self.0)
    }
}

impl std::error::Error for ParseLimitKeyError {}

impl FromStr for LimitKey {
    type Err = ParseLimitKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LimitKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ParseLimitKeyError(s.to_string()))
    }
}

impl std::fmt::Display for LimitKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LimitKey {
    pub const ALL: [LimitKey; 4] = [
        LimitKey::Seats,
        LimitKey::ActiveClients,
        LimitKey::ProjectsPerClient,
        LimitKey::DataRetentionDays,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LimitKey::Seats => "seats",
            LimitKey::ActiveClients => "activeClients",
            LimitKey::ProjectsPerClient => "projectsPerClient",
            LimitKey::DataRetentionDays => "dataRetentionDays",
        }
    }
}

/// Trial sub-state of a workspace plan, derived from `(is_trial, trial_end)`
/// against a caller-supplied instant. The three states are distinguishable so
/// UI can decide between offering a trial and showing "trial already used".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrialStatus {
    /// No trial has ever been granted for this workspace.
    NeverStarted,
    /// A trial grant is active (`trial_end` in the future).
    Active,
    /// The trial grant has been consumed and has expired.
    Lapsed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(PlanTier::Starter < PlanTier::Pro);
        assert!(PlanTier::Pro < PlanTier::Studio);
        assert_eq!(PlanTier::ALL.len(), 3);
    }

    #[test]
    fn test_tier_as_str() {
        assert_eq!(PlanTier::Starter.as_str(), "starter");
        assert_eq!(PlanTier::Pro.as_str(), "pro");
        assert_eq!(PlanTier::Studio.as_str(), "studio");
    }

    #[test]
    fn test_tier_parse() {
        assert_eq!("starter".parse::<PlanTier>().unwrap(), PlanTier::Starter);
        assert_eq!("pro".parse::<PlanTier>().unwrap(), PlanTier::Pro);
        assert_eq!("studio".parse::<PlanTier>().unwrap(), PlanTier::Studio);
    }

    #[test]
    fn test_tier_parse_invalid() {
        assert!("enterprise".parse::<PlanTier>().is_err());
        assert!("Pro".parse::<PlanTier>().is_err()); // Case sensitive
        assert!("".parse::<PlanTier>().is_err());
    }

    #[test]
    fn test_tier_parse_or_starter_falls_back() {
        assert_eq!(PlanTier::parse_or_starter("studio"), PlanTier::Studio);
        assert_eq!(PlanTier::parse_or_starter("garbage"), PlanTier::Starter);
    }

    #[test]
    fn test_highest_is_last_in_ladder() {
        assert_eq!(PlanTier::HIGHEST, *PlanTier::ALL.last().unwrap());
        assert_eq!(PlanTier::HIGHEST, PlanTier::Studio);
    }

    #[test]
    fn test_tiers_above() {
        let above: Vec<_> = PlanTier::Starter.tiers_above().collect();
        assert_eq!(above, vec![PlanTier::Pro, PlanTier::Studio]);

        let above: Vec<_> = PlanTier::Pro.tiers_above().collect();
        assert_eq!(above, vec![PlanTier::Studio]);

        assert_eq!(PlanTier::Studio.tiers_above().count(), 0);
    }

    #[test]
    fn test_tier_roundtrip() {
        for tier in PlanTier::ALL {
            let parsed: PlanTier = tier.as_str().parse().unwrap();
            assert_eq!(tier, parsed);
        }
    }

    #[test]
    fn test_feature_key_roundtrip() {
        for key in FeatureKey::ALL {
            let parsed: FeatureKey = key.as_str().parse().unwrap();
            assert_eq!(key, parsed);
        }
    }

    #[test]
    fn test_feature_key_literals() {
        assert_eq!(FeatureKey::FullInsights.as_str(), "fullInsights");
        assert_eq!(FeatureKey::ClientInvoicing.as_str(), "clientInvoicing");
        assert_eq!(
            FeatureKey::CustomInvoiceTemplates.as_str(),
            "customInvoiceTemplates"
        );
    }

    #[test]
    fn test_feature_key_parse_invalid() {
        assert!("fullinsights".parse::<FeatureKey>().is_err()); // Case sensitive
        assert!("unknownFeature".parse::<FeatureKey>().is_err());
    }

    #[test]
    fn test_limit_key_roundtrip() {
        for key in LimitKey::ALL {
            let parsed: LimitKey = key.as_str().parse().unwrap();
            assert_eq!(key, parsed);
        }
    }

    #[test]
    fn test_limit_key_literals() {
        assert_eq!(LimitKey::Seats.as_str(), "seats");
        assert_eq!(LimitKey::ActiveClients.as_str(), "activeClients");
        assert_eq!(LimitKey::ProjectsPerClient.as_str(), "projectsPerClient");
        assert_eq!(LimitKey::DataRetentionDays.as_str(), "dataRetentionDays");
    }

    #[test]
    fn test_tier_serde_lowercase() {
        let json = serde_json::to_string(&PlanTier::Studio).unwrap();
        assert_eq!(json, "\"studio\"");
        let back: PlanTier = serde_json::from_str("\"pro\"").unwrap();
        assert_eq!(back, PlanTier::Pro);
    }

    #[test]
    fn test_feature_key_serde_camel_case() {
        let json = serde_json::to_string(&FeatureKey::FullInsights).unwrap();
        assert_eq!(json, "\"fullInsights\"");
    }
}
