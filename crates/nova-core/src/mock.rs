use crate::error::{NovaError, Result};
use crate::transport::{InvokeRequest, InvokeResponse, ModelInvoker};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// In-memory transport that records every request and replays a canned
/// response. Clones share state, so a test can keep a handle after moving
/// a clone into a client.
#[derive(Clone)]
pub struct MockInvoker {
    response: Arc<Mutex<MockReply>>,
    requests: Arc<Mutex<Vec<InvokeRequest>>>,
}

enum MockReply {
    Respond(InvokeResponse),
    Fail(fn(String) -> NovaError, String),
}

impl MockInvoker {
    pub fn responding(response: InvokeResponse) -> Self {
        Self {
            response: Arc::new(Mutex::new(MockReply::Respond(response))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A 200 response with the given JSON body.
    pub fn with_json(body: serde_json::Value) -> Self {
        Self::responding(InvokeResponse {
            body: body.to_string().into_bytes(),
            status: 200,
            request_id: Some("00000000-0000-0000-0000-000000000000".to_string()),
            ..InvokeResponse::default()
        })
    }

    /// Fails every call with the error built by `make` from `message`.
    pub fn failing(make: fn(String) -> NovaError, message: impl Into<String>) -> Self {
        Self {
            response: Arc::new(Mutex::new(MockReply::Fail(make, message.into()))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<InvokeRequest> {
        self.recorded().clone()
    }

    pub fn call_count(&self) -> usize {
        self.recorded().len()
    }

    // A panicking test may poison the lock; the recorded requests are still valid.
    fn recorded(&self) -> MutexGuard<'_, Vec<InvokeRequest>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ModelInvoker for MockInvoker {
    async fn invoke(&self, request: InvokeRequest) -> Result<InvokeResponse> {
        self.recorded().push(request);
        match &*self.response.lock().unwrap_or_else(PoisonError::into_inner) {
            MockReply::Respond(response) => Ok(response.clone()),
            MockReply::Fail(make, message) => Err(make(message.clone())),
        }
    }
}
