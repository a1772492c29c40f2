//! Command registration

use std::sync::Arc;

use crate::domain::entities::{CommandSpec, CommandVariant};
use crate::domain::traits::CommandPublisher;
use crate::infrastructure::logging::StructuredLogger;

/// Publishes the relay's command set to one guild
pub struct CommandRegistrar {
    commands: Vec<CommandSpec>,
    logger: Arc<StructuredLogger>,
}

impl CommandRegistrar {
    pub fn new(variant: CommandVariant, logger: Arc<StructuredLogger>) -> Self {
        Self {
            commands: vec![CommandSpec::for_variant(variant)],
            logger,
        }
    }

    /// Replace the guild's commands with ours. Failures are logged, never
    /// returned: the gateway still starts without the command.
    pub async fn register_commands(&self, publisher: &dyn CommandPublisher, guild_id: &str) -> bool {
        self.logger.info("Started refreshing application (/) commands");

        match publisher.publish(guild_id, &self.commands).await {
            Ok(names) => {
                self.logger.log(
                    "info",
                    "Successfully reloaded application (/) commands",
                    Some(&serde_json::json!({ "guild": guild_id, "commands": names })),
                );
                true
            }
            Err(e) => {
                self.logger.error(
                    "Failed to reload commands",
                    Some(&serde_json::json!({ "guild": guild_id, "error": { "message": e.to_string() } })),
                );
                false
            }
        }
    }
}
