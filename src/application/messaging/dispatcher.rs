//! Invocation dispatcher - routes matching invocations to the relay

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::application::services::{RelayReport, RelayService};
use crate::domain::entities::CommandInvocation;
use crate::domain::traits::Responder;

/// How long the platform keeps an interaction token valid
pub const INTERACTION_TTL: Duration = Duration::from_secs(15 * 60);

pub struct InvocationDispatcher {
    relay: Arc<RelayService>,
}

impl InvocationDispatcher {
    pub fn new(relay: Arc<RelayService>) -> Self {
        Self { relay }
    }

    pub fn command_name(&self) -> &'static str {
        self.relay.command_name()
    }

    /// Spawn the relay for a matching invocation on its own task.
    ///
    /// Returns `None` for any other command name.
    pub fn dispatch(
        &self,
        invocation: CommandInvocation,
        responder: Arc<dyn Responder>,
    ) -> Option<JoinHandle<RelayReport>> {
        if invocation.command_name != self.command_name() {
            return None;
        }

        let relay = self.relay.clone();
        let deadline = Instant::now() + INTERACTION_TTL;
        Some(tokio::spawn(async move {
            relay.handle(&invocation, responder.as_ref(), deadline).await
        }))
    }

    /// Dispatch and wait, logging a task that died instead of finishing
    pub async fn run(&self, invocation: CommandInvocation, responder: Arc<dyn Responder>) -> Option<RelayReport> {
        let invocation_id = invocation.id.clone();
        let handle = self.dispatch(invocation, responder)?;

        match handle.await {
            Ok(report) => {
                tracing::debug!(
                    invocation = %invocation_id,
                    delivered = report.reply_delivered,
                    "reply: {}",
                    report.reply.plain_text()
                );
                Some(report)
            }
            Err(e) => {
                self.relay.logger().error(
                    "Unhandled Rejection",
                    Some(&serde_json::json!({
                        "invocation": invocation_id,
                        "reason": e.to_string(),
                    })),
                );
                None
            }
        }
    }
}
