use crate::error::NovaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Request header carrying the requested tier, echoed back by the service
/// with the tier that actually served the call.
pub const SERVICE_TIER_HEADER: &str = "x-amzn-bedrock-service-tier";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceTier {
    Default,
    Flex,
    Priority,
}

impl ServiceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceTier::Default => "default",
            ServiceTier::Flex => "flex",
            ServiceTier::Priority => "priority",
        }
    }
}

impl fmt::Display for ServiceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceTier {
    type Err = NovaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(ServiceTier::Default),
            "flex" => Ok(ServiceTier::Flex),
            "priority" => Ok(ServiceTier::Priority),
            other => Err(NovaError::InvalidInput(format!(
                "unknown service tier '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_tier_case_insensitively() {
        assert_eq!("FLEX".parse::<ServiceTier>().unwrap(), ServiceTier::Flex);
        assert_eq!("default".parse::<ServiceTier>().unwrap(), ServiceTier::Default);
        assert!("turbo".parse::<ServiceTier>().is_err());
    }

    #[test]
    fn should_serialize_tier_as_lowercase() {
        let json = serde_json::to_string(&ServiceTier::Priority).unwrap();
        assert_eq!(json, "\"priority\"");
    }
}
