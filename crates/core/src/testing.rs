//! In-memory [`GenerationService`] for tests.
//!
//! Used by this crate's unit tests and by the HTTP integration tests of the
//! API crate. Responses are queued up front and handed out in order; every
//! call is recorded so tests can assert on the exact request sent.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::{oneshot, Notify};

use crate::generation::{GenerationRequest, GenerationService, GenerationServiceError};

enum MockResponse {
    Immediate(Result<String, GenerationServiceError>),
    /// Completes only once the paired sender fires (or is dropped).
    Gated {
        response: Result<String, GenerationServiceError>,
        release: oneshot::Receiver<()>,
    },
}

/// Scripted stand-in for the external generation service.
#[derive(Default)]
pub struct MockGenerationService {
    responses: Mutex<VecDeque<MockResponse>>,
    calls: Mutex<Vec<GenerationRequest>>,
    call_started: Notify,
}

impl MockGenerationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn push_script(&self, script: impl Into<String>) {
        self.push(MockResponse::Immediate(Ok(script.into())));
    }

    /// Queue a failure.
    pub fn push_error(&self, error: GenerationServiceError) {
        self.push(MockResponse::Immediate(Err(error)));
    }

    /// Queue a successful response that is held back until the returned
    /// sender fires.
    pub fn push_gated_script(&self, script: impl Into<String>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(MockResponse::Gated {
            response: Ok(script.into()),
            release: rx,
        });
        tx
    }

    /// Every request received so far, oldest first.
    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    /// Wait until a call has reached the service.
    pub async fn wait_for_call(&self) {
        self.call_started.notified().await;
    }

    fn push(&self, response: MockResponse) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(response);
        }
    }
}

#[async_trait]
impl GenerationService for MockGenerationService {
    async fn generate_script(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, GenerationServiceError> {
        let next = {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(request.clone());
            }
            self.responses
                .lock()
                .ok()
                .and_then(|mut responses| responses.pop_front())
        };
        self.call_started.notify_one();

        match next {
            Some(MockResponse::Immediate(response)) => response,
            Some(MockResponse::Gated { response, release }) => {
                let _ = release.await;
                response
            }
            None => Err(GenerationServiceError::Malformed(
                "no mock response configured".into(),
            )),
        }
    }
}
