use crate::error::Result;
use crate::tier::ServiceTier;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Connection settings for one Bedrock runtime client.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportSettings {
    pub region: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvokeRequest {
    pub model_id: String,
    pub body: Vec<u8>,
    pub service_tier: Option<ServiceTier>,
}

impl InvokeRequest {
    pub fn new(model_id: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            model_id: model_id.into(),
            body,
            service_tier: None,
        }
    }

    pub fn with_service_tier(mut self, tier: ServiceTier) -> Self {
        self.service_tier = Some(tier);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InvokeResponse {
    pub body: Vec<u8>,
    pub status: u16,
    /// Header names are lowercased; values keep arrival order.
    pub headers: BTreeMap<String, Vec<String>>,
    pub request_id: Option<String>,
}

impl InvokeResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(value.into());
        self
    }
}

/// One synchronous-style model invocation: one request in, one response or
/// categorized failure out. Implementations never retry.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(&self, request: InvokeRequest) -> Result<InvokeResponse>;
}
