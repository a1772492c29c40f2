use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::CommandSpec;

/// Guild-scoped command registry on the platform
#[async_trait]
pub trait CommandPublisher: Send + Sync {
    /// Replace the guild's full command set. Returns the registered names.
    async fn publish(&self, guild_id: &str, commands: &[CommandSpec]) -> Result<Vec<String>, BotError>;
}
