use nova_core::ServiceTier;

/// Reported when the service omits the tier header.
pub const UNKNOWN_TIER: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierCheck {
    Confirmed,
    Mismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierReport {
    pub requested: ServiceTier,
    pub actual: String,
}

impl TierReport {
    pub fn new(requested: ServiceTier, reported: Option<&str>) -> Self {
        Self {
            requested,
            actual: reported.unwrap_or(UNKNOWN_TIER).to_string(),
        }
    }

    pub fn check(&self) -> TierCheck {
        if self.actual.eq_ignore_ascii_case(self.requested.as_str()) {
            TierCheck::Confirmed
        } else {
            TierCheck::Mismatch
        }
    }
}
