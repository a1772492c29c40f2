//! Request relay - one outbound request per invocation

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use tokio::time::Instant;

use crate::application::errors::RelayError;
use crate::application::messaging::reply;
use crate::domain::entities::{
    CommandInvocation, CommandVariant, Credentials, OutboundRequest, RelayOutcome, RelayParameters,
    RelayState, Reply, RequestBody,
};
use crate::domain::traits::{Backend, BackendResponse, Responder};
use crate::infrastructure::logging::StructuredLogger;

/// Fixed relay settings, shared read-only by every invocation
#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub target_url: String,
    pub credentials: Credentials,
    pub dashboard_url: String,
    pub variant: CommandVariant,
}

/// Explicit dependencies of the relay
pub struct RelayContext {
    pub settings: RelaySettings,
    pub backend: Arc<dyn Backend>,
    pub logger: Arc<StructuredLogger>,
}

/// What happened to one invocation
#[derive(Debug, Clone)]
pub struct RelayReport {
    pub states: Vec<RelayState>,
    pub outcome: RelayOutcome,
    pub reply: Reply,
    pub reply_delivered: bool,
}

impl RelayReport {
    /// Terminal state, if handling got that far
    pub fn final_state(&self) -> Option<RelayState> {
        self.states.last().copied().filter(RelayState::is_terminal)
    }
}

/// Parameters extracted for the configured variant
enum Extracted {
    Research(RelayParameters),
    Start,
}

pub struct RelayService {
    ctx: RelayContext,
}

impl RelayService {
    pub fn new(ctx: RelayContext) -> Self {
        Self { ctx }
    }

    pub fn command_name(&self) -> &'static str {
        self.ctx.settings.variant.command_name()
    }

    pub fn logger(&self) -> &Arc<StructuredLogger> {
        &self.ctx.logger
    }

    /// Run one invocation to a terminal state. Never fails; every error ends
    /// in `RepliedFailure` and is logged.
    pub async fn handle(
        &self,
        invocation: &CommandInvocation,
        responder: &dyn Responder,
        deadline: Instant,
    ) -> RelayReport {
        let logger = &self.ctx.logger;
        let mut states = vec![RelayState::Received];
        logger.info(&invocation.to_string());

        if let Err(e) = responder.acknowledge().await {
            logger.error(
                "Failed to acknowledge interaction",
                Some(&serde_json::json!({ "error": { "message": e.to_string() } })),
            );
        }
        states.push(RelayState::Acknowledged);
        tracing::debug!(invocation = %invocation.id, "acknowledged");

        let result = match self.extract(invocation) {
            Ok(extracted) => {
                states.push(RelayState::ParametersExtracted);
                self.send(extracted, deadline, &mut states).await
            }
            Err(e) => Err(e),
        };

        let (outcome, reply, terminal) = match result {
            Ok((response, elapsed, reply)) => {
                logger.info(&format!(
                    "API request successful - Status: {}, Time: {}ms",
                    response.status,
                    elapsed.as_millis()
                ));
                let outcome = RelayOutcome::Success {
                    status_code: response.status,
                    status_text: response.status_text,
                    elapsed,
                };
                (outcome, reply, RelayState::RepliedSuccess)
            }
            Err(e) => {
                logger.error("Error sending research request", Some(&error_data(&e)));
                let message = self.ctx.settings.credentials.scrub(&e.to_string());
                let outcome = match &e {
                    RelayError::Status { status, body, .. } => RelayOutcome::Failure {
                        message: message.clone(),
                        status_code: Some(*status),
                        response_body: Some(body.clone()),
                    },
                    _ => RelayOutcome::Failure {
                        message: message.clone(),
                        status_code: None,
                        response_body: None,
                    },
                };
                (outcome, reply::failure(&message), RelayState::RepliedFailure)
            }
        };

        let reply_delivered = match responder.reply(&reply).await {
            Ok(()) => {
                logger.debug("Response sent to user", None);
                true
            }
            Err(e) => {
                logger.error(
                    "Failed to deliver reply",
                    Some(&serde_json::json!({
                        "invocation": invocation.id,
                        "error": { "message": e.to_string() },
                    })),
                );
                false
            }
        };
        states.push(terminal);
        tracing::debug!(
            invocation = %invocation.id,
            state = ?terminal,
            total_ms = (Utc::now() - invocation.received_at).num_milliseconds(),
            "finished"
        );

        RelayReport {
            states,
            outcome,
            reply,
            reply_delivered,
        }
    }

    fn extract(&self, invocation: &CommandInvocation) -> Result<Extracted, RelayError> {
        match self.ctx.settings.variant {
            CommandVariant::Research => {
                let params = RelayParameters::from_invocation(invocation)?;
                self.ctx.logger.debug(
                    "Research parameters",
                    Some(&serde_json::to_value(&params).unwrap_or(Value::Null)),
                );
                Ok(Extracted::Research(params))
            }
            CommandVariant::Start => Ok(Extracted::Start),
        }
    }

    async fn send(
        &self,
        extracted: Extracted,
        deadline: Instant,
        states: &mut Vec<RelayState>,
    ) -> Result<(BackendResponse, Duration, Reply), RelayError> {
        let settings = &self.ctx.settings;
        let body = match &extracted {
            Extracted::Research(params) => RequestBody::Research(params.clone()),
            Extracted::Start => RequestBody::Empty,
        };
        let request = OutboundRequest::new(&settings.target_url, body, settings.credentials.clone());

        self.ctx
            .logger
            .debug(&format!("Sending HTTP request to {}", settings.target_url), None);
        states.push(RelayState::RequestSent);

        let start = Instant::now();
        let response = tokio::time::timeout_at(deadline, self.ctx.backend.send(&request))
            .await
            .map_err(|_| RelayError::Expired)??;
        let elapsed = start.elapsed();

        let reply = match &extracted {
            Extracted::Research(params) => reply::research_success(params, elapsed, &settings.dashboard_url),
            Extracted::Start => reply::start_success(response.status, &response.status_text),
        };

        Ok((response, elapsed, reply))
    }
}

/// Diagnostic block for a failed invocation
fn error_data(e: &RelayError) -> Value {
    let response = match e {
        RelayError::Status {
            status,
            status_text,
            body,
        } => serde_json::json!({
            "status": status,
            "statusText": status_text,
            "data": serde_json::from_str::<Value>(body).unwrap_or_else(|_| Value::String(body.clone())),
        }),
        _ => Value::String("No response".to_string()),
    };

    serde_json::json!({
        "error": {
            "message": e.to_string(),
            "stack": e.stack(),
            "code": e.code(),
            "response": response,
        }
    })
}
