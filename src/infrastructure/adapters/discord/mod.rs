//! Discord adapter
//!
//! Owns the gateway session: lifecycle logging, invocation delivery and
//! graceful shutdown. Relay logic lives in the application layer.

pub mod convert;
pub mod publisher;
pub mod responder;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serenity::all::{
    ActivityData, Client, ConnectionStage, Context, EventHandler, GatewayIntents, Interaction, Ready,
    ResumedEvent, ShardStageUpdateEvent,
};
use serenity::async_trait;

use crate::application::errors::BotError;
use crate::application::messaging::InvocationDispatcher;
use crate::infrastructure::logging::StructuredLogger;

pub use publisher::{rest_client, GuildCommandPublisher};
pub use responder::InteractionResponder;

/// Gateway event handler
pub struct GatewayHandler {
    dispatcher: Arc<InvocationDispatcher>,
    logger: Arc<StructuredLogger>,
    activity: String,
    logged_in: AtomicBool,
}

impl GatewayHandler {
    pub fn new(dispatcher: Arc<InvocationDispatcher>, logger: Arc<StructuredLogger>, activity: impl Into<String>) -> Self {
        Self {
            dispatcher,
            logger,
            activity: activity.into(),
            logged_in: AtomicBool::new(false),
        }
    }

    /// Log the login line for the first `ready` only; later ones are re-identifies
    fn note_ready(&self, tag: &str) {
        if !self.logged_in.swap(true, Ordering::Relaxed) {
            self.logger.info("Logged in successfully");
        }
        self.logger.info(&format!("Bot is online as {}", tag));
    }
}

#[async_trait]
impl EventHandler for GatewayHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        self.note_ready(&ready.user.tag());

        ctx.set_activity(Some(ActivityData::watching(&self.activity)));
    }

    async fn resume(&self, _ctx: Context, _event: ResumedEvent) {
        self.logger.info("Bot session resumed");
    }

    async fn shard_stage_update(&self, _ctx: Context, event: ShardStageUpdateEvent) {
        match (&event.old, &event.new) {
            (_, ConnectionStage::Disconnected) => {
                self.logger.warn(
                    "Bot disconnected",
                    Some(&serde_json::json!({
                        "shard": format!("{:?}", event.shard_id),
                        "from": format!("{:?}", event.old),
                    })),
                );
            }
            (ConnectionStage::Connected, ConnectionStage::Connecting | ConnectionStage::Resuming) => {
                self.logger.info("Bot is reconnecting");
            }
            (old, new) => tracing::debug!("Shard {:?}: {:?} -> {:?}", event.shard_id, old, new),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };
        if command.data.name != self.dispatcher.command_name() {
            return;
        }

        let guild_name = command.guild_id.and_then(|id| id.name(&ctx.cache));
        let invocation = convert::to_invocation(&command, guild_name);
        let responder = Arc::new(InteractionResponder::new(ctx.http.clone(), command));

        self.dispatcher.run(invocation, responder).await;
    }
}

/// Connect to the gateway and run until shutdown.
///
/// Returns an error when the client cannot be built or login is rejected.
pub async fn start_gateway(token: &str, handler: GatewayHandler) -> Result<(), BotError> {
    let mut client = Client::builder(token, GatewayIntents::GUILDS)
        .event_handler(handler)
        .await
        .map_err(|e| BotError::Gateway(e.to_string()))?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        wait_for_shutdown().await;
        tracing::info!("Shutdown signal received, stopping Discord client...");
        shard_manager.shutdown_all().await;
    });

    tracing::info!("Starting Discord gateway connection...");
    client.start().await.map_err(|e| BotError::Gateway(e.to_string()))
}

async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                tracing::warn!("SIGTERM handler unavailable: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{RelayContext, RelayService, RelaySettings};
    use crate::domain::entities::{CommandVariant, Credentials};
    use crate::infrastructure::http::HttpBackend;

    fn handler(dir: &tempfile::TempDir) -> GatewayHandler {
        let logger = Arc::new(StructuredLogger::new(dir.path(), false));
        let relay = RelayService::new(RelayContext {
            settings: RelaySettings {
                target_url: "http://127.0.0.1:9/research".to_string(),
                credentials: Credentials::new("u", "p"),
                dashboard_url: "https://dash.example".to_string(),
                variant: CommandVariant::Research,
            },
            backend: Arc::new(HttpBackend::new()),
            logger: logger.clone(),
        });
        GatewayHandler::new(Arc::new(InvocationDispatcher::new(Arc::new(relay))), logger, "Trends")
    }

    #[test]
    fn test_login_logged_once_across_ready_events() {
        let dir = tempfile::tempdir().unwrap();
        let handler = handler(&dir);

        handler.note_ready("relay#0001");
        handler.note_ready("relay#0001");

        let log: String = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| std::fs::read_to_string(e.unwrap().path()).unwrap())
            .collect();
        assert_eq!(log.matches("Logged in successfully").count(), 1);
        assert_eq!(log.matches("Bot is online as relay#0001").count(), 2);
    }
}
