use crate::models::{ChatRequest, ChatResponseBody, InferenceConfig, Usage};
use crate::tier::TierReport;
use nova_core::{
    FlexSettings, InvokeRequest, InvokeResponse, ModelInvoker, NovaError, Result, ServiceTier,
    UnderstandingSettings, SERVICE_TIER_HEADER,
};
use std::collections::BTreeMap;
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq)]
pub struct ChatModelConfig {
    pub model_id: String,
    pub inference: InferenceConfig,
    pub service_tier: Option<ServiceTier>,
}

impl Default for ChatModelConfig {
    fn default() -> Self {
        Self {
            model_id: "global.amazon.nova-2-lite-v1:0".to_string(),
            inference: InferenceConfig::default(),
            service_tier: None,
        }
    }
}

impl From<&FlexSettings> for ChatModelConfig {
    fn from(settings: &FlexSettings) -> Self {
        Self {
            model_id: settings.model_id.clone(),
            inference: InferenceConfig::new(settings.max_tokens, settings.temperature),
            service_tier: Some(settings.service_tier),
        }
    }
}

impl From<&UnderstandingSettings> for ChatModelConfig {
    fn from(settings: &UnderstandingSettings) -> Self {
        Self {
            model_id: settings.model_id.clone(),
            inference: InferenceConfig {
                max_tokens: settings.max_tokens,
                temperature: settings.temperature,
                top_p: settings.top_p,
                top_k: settings.top_k,
            },
            service_tier: None,
        }
    }
}

/// Everything a chat-style invocation yields: the projected text plus the
/// transport metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOutcome {
    pub text: String,
    pub stop_reason: Option<String>,
    pub usage: Option<Usage>,
    pub body: serde_json::Value,
    pub status: u16,
    pub request_id: Option<String>,
    pub headers: BTreeMap<String, Vec<String>>,
    /// Present when a tier was requested.
    pub tier: Option<TierReport>,
}

impl ChatOutcome {
    pub fn from_response(
        response: &InvokeResponse,
        requested_tier: Option<ServiceTier>,
    ) -> Result<Self> {
        let body: serde_json::Value = serde_json::from_slice(&response.body).map_err(|e| {
            if let Ok(s) = std::str::from_utf8(&response.body) {
                error!("Failed to parse chat response JSON: {} | Raw: {}", e, s);
            }
            NovaError::MalformedResponse(e.to_string())
        })?;
        let parsed: ChatResponseBody = serde_json::from_value(body.clone())
            .map_err(|e| NovaError::MalformedResponse(e.to_string()))?;
        let text = parsed.first_text().map(str::to_string).ok_or_else(|| {
            NovaError::MalformedResponse(
                "output.message.content[0].text is missing".to_string(),
            )
        })?;

        Ok(Self {
            text,
            stop_reason: parsed.stop_reason,
            usage: parsed.usage,
            body,
            status: response.status,
            request_id: response.request_id.clone(),
            headers: response.headers.clone(),
            tier: requested_tier
                .map(|tier| TierReport::new(tier, response.header(SERVICE_TIER_HEADER))),
        })
    }
}

pub struct NovaChatClient {
    config: ChatModelConfig,
    invoker: Box<dyn ModelInvoker>,
}

impl NovaChatClient {
    pub fn new(config: ChatModelConfig, invoker: Box<dyn ModelInvoker>) -> Result<Self> {
        if config.model_id.is_empty() {
            let message = "Model ID cannot be empty";
            error!(message);
            return Err(NovaError::Config(message.to_string()));
        }
        Ok(Self { config, invoker })
    }

    pub async fn invoke(&self, request: &ChatRequest) -> Result<ChatOutcome> {
        let body = request.to_body()?;
        let mut invoke_request = InvokeRequest::new(&self.config.model_id, body);
        if let Some(tier) = self.config.service_tier {
            info!("Requesting service tier: {}", tier);
            invoke_request = invoke_request.with_service_tier(tier);
        }

        let response = self.invoker.invoke(invoke_request).await?;
        ChatOutcome::from_response(&response, self.config.service_tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentBlock, Message};
    use crate::tier::TierCheck;
    use nova_core::{ErrorCategory, MockInvoker};
    use serde_json::json;

    fn text_reply(text: &str) -> serde_json::Value {
        json!({
            "output": {"message": {"role": "assistant", "content": [{"text": text}]}},
            "stopReason": "end_turn",
            "usage": {"inputTokens": 5, "outputTokens": 7, "totalTokens": 12}
        })
    }

    fn hello_request() -> ChatRequest {
        ChatRequest::new(
            vec![Message::user(vec![ContentBlock::Text("What is Amazon Bedrock?".to_string())])],
            InferenceConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn should_map_flex_settings() {
        let config = ChatModelConfig::from(&FlexSettings::default());
        assert_eq!(config.model_id, "global.amazon.nova-2-lite-v1:0");
        assert_eq!(config.inference, InferenceConfig::new(512, 0.7));
        assert_eq!(config.service_tier, Some(ServiceTier::Flex));
    }

    #[test]
    fn should_map_understanding_settings_without_tier() {
        let config = ChatModelConfig::from(&UnderstandingSettings::default());
        assert_eq!(config.model_id, "us.amazon.nova-lite-v1:0");
        assert_eq!(config.inference.top_k, Some(20));
        assert_eq!(config.service_tier, None);
    }

    #[test]
    fn should_extract_outcome_from_response() {
        let response = InvokeResponse {
            body: text_reply("Bedrock is a managed service.").to_string().into_bytes(),
            status: 200,
            request_id: Some("req-1".to_string()),
            ..InvokeResponse::default()
        }
        .with_header("X-Amzn-Bedrock-Service-Tier", "flex");

        let outcome = ChatOutcome::from_response(&response, Some(ServiceTier::Flex)).unwrap();
        assert_eq!(outcome.text, "Bedrock is a managed service.");
        assert_eq!(outcome.status, 200);
        assert_eq!(outcome.request_id.as_deref(), Some("req-1"));
        assert_eq!(outcome.stop_reason.as_deref(), Some("end_turn"));
        assert_eq!(outcome.tier.unwrap().check(), TierCheck::Confirmed);
    }

    #[test]
    fn should_not_report_tier_when_none_requested() {
        let response = InvokeResponse {
            body: text_reply("ok").to_string().into_bytes(),
            status: 200,
            ..InvokeResponse::default()
        };
        let outcome = ChatOutcome::from_response(&response, None).unwrap();
        assert!(outcome.tier.is_none());
    }

    #[test]
    fn should_fail_when_output_text_missing() {
        let response = InvokeResponse {
            body: json!({"output": {"message": {"content": []}}}).to_string().into_bytes(),
            status: 200,
            ..InvokeResponse::default()
        };
        let err = ChatOutcome::from_response(&response, None).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::MalformedResponse);
    }

    #[tokio::test]
    async fn should_send_tier_out_of_band() {
        let mock = MockInvoker::with_json(text_reply("hi"));
        let config = ChatModelConfig {
            service_tier: Some(ServiceTier::Flex),
            ..ChatModelConfig::default()
        };
        let client = NovaChatClient::new(config, Box::new(mock.clone())).unwrap();

        let outcome = client.invoke(&hello_request()).await.unwrap();
        assert_eq!(outcome.text, "hi");
        assert_eq!(outcome.tier.unwrap().actual, "unknown");

        let sent = &mock.requests()[0];
        assert_eq!(sent.service_tier, Some(ServiceTier::Flex));
        let body: serde_json::Value = serde_json::from_slice(&sent.body).unwrap();
        assert!(body.get("serviceTier").is_none());
        assert_eq!(body["schemaVersion"], "messages-v1");
    }

    #[tokio::test]
    async fn should_propagate_auth_failure() {
        let mock = MockInvoker::failing(NovaError::Auth, "The security token included in the request is expired");
        let client = NovaChatClient::new(ChatModelConfig::default(), Box::new(mock)).unwrap();

        let err = client.invoke(&hello_request()).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Auth);
    }
}
