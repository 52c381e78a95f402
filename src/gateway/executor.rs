use super::{
    composer::{self, ComposedResponse},
    fsm::{RequestEvent, RequestStateMachine},
    invoker::Invoker,
    normalizer,
    types::InferenceRequest,
};
use crate::{
    Error, Result,
    bedrock::ModelInvoker,
    config::{Config, ValidationMode},
};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

/// Runs one request through normalize, invoke and compose.
///
/// Holds no per-request state, so a single instance serves concurrent requests.
pub struct Gateway {
    invoker: Invoker,
    mode: ValidationMode,
}

impl Gateway {
    pub fn new(backend: Arc<dyn ModelInvoker>, config: &Config) -> Self {
        Self::with_invoker(
            Invoker::new(backend, config.bedrock.model_id.clone()),
            config.normalizer.mode,
        )
    }

    pub fn with_invoker(invoker: Invoker, mode: ValidationMode) -> Self {
        info!(
            "Gateway initialized for model {} ({:?} validation)",
            invoker.model_id(),
            mode
        );
        Self { invoker, mode }
    }

    pub fn model_id(&self) -> &str {
        self.invoker.model_id()
    }

    pub async fn handle(&self, payload: &[u8]) -> ComposedResponse {
        let request_id = Uuid::new_v4();
        let span = info_span!("inference", %request_id);

        async move {
            let mut fsm = RequestStateMachine::new(request_id);
            let response = self.run(&mut fsm, payload).await;
            info!(status = response.status.as_u16(), "Request composed");
            response
        }
        .instrument(span)
        .await
    }

    async fn run(&self, fsm: &mut RequestStateMachine, payload: &[u8]) -> ComposedResponse {
        let request = match self.normalize(payload) {
            Ok(request) => request,
            Err(e) => return fail(fsm, RequestEvent::Rejected, e),
        };

        if let Err(e) = fsm.transition(RequestEvent::Normalized) {
            return composer::failure(&e);
        }

        info!(
            "Invoking model with prompt of {} chars (maxTokenCount={}, temperature={}, topP={})",
            request.prompt_len(),
            request.config.max_token_count,
            request.config.temperature,
            request.config.top_p
        );

        match self.invoker.invoke(&request).await {
            Ok(result) => match fsm.transition(RequestEvent::BackendResponded) {
                Ok(()) => composer::success(&request, result),
                Err(e) => composer::failure(&e),
            },
            Err(e) => {
                error!("Model invocation failed: {}", e);
                fail(fsm, RequestEvent::BackendFailed, e)
            }
        }
    }

    fn normalize(&self, payload: &[u8]) -> Result<InferenceRequest> {
        match self.mode {
            ValidationMode::Lenient => Ok(normalizer::normalize(payload)),
            ValidationMode::Strict => {
                let request = normalizer::parse(payload)?;
                request.validate()?;
                Ok(request)
            }
        }
    }
}

fn fail(fsm: &mut RequestStateMachine, event: RequestEvent, err: Error) -> ComposedResponse {
    if let Err(transition_err) = fsm.transition(event) {
        error!("{}", transition_err);
    }
    composer::failure(&err)
}
