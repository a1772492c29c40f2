//! Guild command registration over the REST API

use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{ApplicationId, GuildId, Http};

use super::convert::to_create_command;
use crate::application::errors::BotError;
use crate::domain::entities::CommandSpec;
use crate::domain::traits::CommandPublisher;

/// Parse a snowflake id; zero and non-numeric values are rejected
pub fn parse_id(field: &'static str, value: &str) -> Result<u64, BotError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| BotError::InvalidId {
            field,
            value: value.to_string(),
        })
}

/// REST client bound to the bot's application
pub fn rest_client(token: &str, application_id: &str) -> Result<Arc<Http>, BotError> {
    let http = Http::new(token);
    http.set_application_id(ApplicationId::new(parse_id("CLIENT_ID", application_id)?));
    Ok(Arc::new(http))
}

pub struct GuildCommandPublisher {
    http: Arc<Http>,
}

impl GuildCommandPublisher {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl CommandPublisher for GuildCommandPublisher {
    async fn publish(&self, guild_id: &str, commands: &[CommandSpec]) -> Result<Vec<String>, BotError> {
        let guild = GuildId::new(parse_id("GUILD_ID", guild_id)?);
        let builders = commands.iter().map(to_create_command).collect();

        let registered = guild
            .set_commands(&self.http, builders)
            .await
            .map_err(|e| BotError::Registration(e.to_string()))?;

        tracing::debug!("Guild {} now has {} commands", guild, registered.len());
        Ok(registered.into_iter().map(|c| c.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("GUILD_ID", " 123 ").unwrap(), 123);
        assert!(matches!(parse_id("GUILD_ID", "0"), Err(BotError::InvalidId { field: "GUILD_ID", .. })));
        assert!(parse_id("GUILD_ID", "").is_err());
        assert!(parse_id("CLIENT_ID", "abc").is_err());
    }

    #[test]
    fn test_rest_client_requires_application_id() {
        assert!(rest_client("token", "").is_err());
        assert!(rest_client("token", "1001").is_ok());
    }
}
