use crate::error::{mentions_credentials, NovaError, Result};
use crate::tier::SERVICE_TIER_HEADER;
use crate::transport::{InvokeRequest, InvokeResponse, ModelInvoker, TransportSettings};
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_bedrockruntime::config::interceptors::BeforeDeserializationInterceptorContextRef;
use aws_sdk_bedrockruntime::config::{ConfigBag, Intercept, RuntimeComponents};
use aws_sdk_bedrockruntime::error::{BoxError, DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_bedrockruntime::operation::invoke_model::InvokeModelError;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client;
use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
use aws_smithy_runtime_api::client::result::SdkError;
use aws_types::request_id::RequestId;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{error, info, warn};

const JSON_CONTENT_TYPE: &str = "application/json";

/// `ModelInvoker` backed by the Bedrock runtime `InvokeModel` operation.
///
/// The SDK client is built with retries disabled; a failed call is reported
/// once, categorized, and never re-sent.
pub struct BedrockInvoker {
    client: Client,
}

impl BedrockInvoker {
    pub async fn connect(settings: &TransportSettings) -> Result<Self> {
        Self::log_aws_environment();

        if settings.region.is_empty() {
            let message = "AWS region cannot be empty";
            error!(message);
            return Err(NovaError::Config(message.to_string()));
        }

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(settings.region.clone()))
            .retry_config(RetryConfig::disabled());

        if let Some(secs) = settings.timeout_secs {
            loader = loader.timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(Duration::from_secs(secs))
                    .build(),
            );
        }

        let aws_config = loader.load().await;
        info!("Bedrock runtime client ready in region {}", settings.region);

        Ok(Self::from_client(Client::new(&aws_config)))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    fn log_aws_environment() {
        // Only presence is checked; values are never logged.
        let aws_access_key = std::env::var("AWS_ACCESS_KEY_ID").is_ok();
        let aws_secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").is_ok();

        if !aws_access_key && !aws_secret_key {
            warn!("No AWS credentials found in environment variables. Relying on other credential sources (IAM role, ~/.aws/credentials, etc.)");
        }
    }
}

#[async_trait]
impl ModelInvoker for BedrockInvoker {
    async fn invoke(&self, request: InvokeRequest) -> Result<InvokeResponse> {
        let capture = ResponseCapture::default();
        let mut customized = self
            .client
            .invoke_model()
            .model_id(&request.model_id)
            .content_type(JSON_CONTENT_TYPE)
            .accept(JSON_CONTENT_TYPE)
            .body(Blob::new(request.body))
            .customize()
            .interceptor(capture.clone());

        if let Some(tier) = request.service_tier {
            let tier = tier.as_str();
            customized = customized.mutate_request(move |req| {
                req.headers_mut().insert(SERVICE_TIER_HEADER, tier);
            });
        }

        info!("Invoking Bedrock model: {}", request.model_id);
        let output = customized.send().await.map_err(|e| {
            error!("Bedrock invoke_model failed: {}", DisplayErrorContext(&e));
            classify_sdk_error(e)
        })?;

        let (status, headers) = capture.take().unwrap_or((200, BTreeMap::new()));
        info!(
            "Received response from Bedrock model: {} (status {})",
            request.model_id, status
        );

        Ok(InvokeResponse {
            request_id: output.request_id().map(str::to_string),
            body: output.body().as_ref().to_vec(),
            status,
            headers,
        })
    }
}

/// Records the raw status and headers of the HTTP response, which the
/// modeled `InvokeModelOutput` does not expose.
#[derive(Debug, Clone, Default)]
struct ResponseCapture {
    inner: Arc<Mutex<Option<(u16, BTreeMap<String, Vec<String>>)>>>,
}

impl ResponseCapture {
    fn take(&self) -> Option<(u16, BTreeMap<String, Vec<String>>)> {
        self.inner.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl Intercept for ResponseCapture {
    fn name(&self) -> &'static str {
        "ResponseCapture"
    }

    fn read_after_transmit(
        &self,
        context: &BeforeDeserializationInterceptorContextRef<'_>,
        _runtime_components: &RuntimeComponents,
        _cfg: &mut ConfigBag,
    ) -> std::result::Result<(), BoxError> {
        let response = context.response();
        let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in response.headers().iter() {
            headers
                .entry(name.to_ascii_lowercase())
                .or_default()
                .push(value.to_string());
        }
        if let Ok(mut slot) = self.inner.lock() {
            *slot = Some((response.status().as_u16(), headers));
        }
        Ok(())
    }
}

fn classify_sdk_error(err: SdkError<InvokeModelError, HttpResponse>) -> NovaError {
    let message = DisplayErrorContext(&err).to_string();
    match &err {
        SdkError::ServiceError(context) => {
            classify_service_error(context.err(), context.raw().status().as_u16(), message)
        }
        SdkError::TimeoutError(_) => NovaError::Transport(message),
        SdkError::DispatchFailure(failure) if failure.is_io() || failure.is_timeout() => {
            NovaError::Transport(message)
        }
        // Credential resolution failures surface in both of these without a
        // modeled category; nothing else on these paths is the request's fault.
        SdkError::DispatchFailure(_) => credentials_or(message, NovaError::Transport),
        SdkError::ConstructionFailure(_) => credentials_or(message, NovaError::Config),
        SdkError::ResponseError(_) => NovaError::MalformedResponse(message),
        _ => NovaError::from_message(message),
    }
}

fn credentials_or(message: String, fallback: fn(String) -> NovaError) -> NovaError {
    if mentions_credentials(&message) {
        NovaError::Auth(message)
    } else {
        fallback(message)
    }
}

pub(crate) fn classify_service_error(
    err: &InvokeModelError,
    status: u16,
    message: String,
) -> NovaError {
    if err.is_access_denied_exception() {
        return NovaError::Auth(message);
    }
    if err.is_validation_exception() || err.is_resource_not_found_exception() {
        return NovaError::Validation(message);
    }
    if err.is_throttling_exception()
        || err.is_service_quota_exceeded_exception()
        || err.is_service_unavailable_exception()
        || err.is_model_not_ready_exception()
        || err.is_model_timeout_exception()
        || err.is_model_error_exception()
        || err.is_internal_server_exception()
    {
        return NovaError::Service(message);
    }

    match (err.code(), status) {
        (
            Some(
                "UnrecognizedClientException"
                | "InvalidSignatureException"
                | "ExpiredTokenException"
                | "MissingAuthenticationTokenException",
            ),
            _,
        )
        | (_, 401 | 403) => NovaError::Auth(message),
        (_, 400..=499) => NovaError::Validation(message),
        (_, 500..=599) => NovaError::Service(message),
        _ => NovaError::from_message(message),
    }
}
