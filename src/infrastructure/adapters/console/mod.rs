//! Console adapter for development/testing

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::{Reply, ReplyBody};
use crate::domain::traits::Responder;

/// Prints replies to stdout instead of a chat platform
#[derive(Default)]
pub struct ConsoleResponder;

impl ConsoleResponder {
    pub fn new() -> Self {
        Self
    }

    pub fn render(reply: &Reply) -> String {
        let visibility = if reply.ephemeral { " (only you)" } else { "" };
        match &reply.body {
            ReplyBody::Embed(embed) => format!("[BOT]{} {}\n{}", visibility, embed.title, embed.description),
            ReplyBody::Text(text) => format!("[BOT]{} {}", visibility, text),
        }
    }
}

#[async_trait]
impl Responder for ConsoleResponder {
    async fn acknowledge(&self) -> Result<(), BotError> {
        println!("[BOT] is thinking...");
        Ok(())
    }

    async fn reply(&self, reply: &Reply) -> Result<(), BotError> {
        println!("{}", Self::render(reply));
        Ok(())
    }
}
