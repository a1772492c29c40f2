//! Interaction reply channel

use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{
    CommandInteraction, CreateInteractionResponseFollowup, EditInteractionResponse, Http,
};

use super::convert::to_create_embed;
use crate::application::errors::BotError;
use crate::domain::entities::{Reply, ReplyBody};
use crate::domain::traits::Responder;

pub struct InteractionResponder {
    http: Arc<Http>,
    interaction: CommandInteraction,
}

impl InteractionResponder {
    pub fn new(http: Arc<Http>, interaction: CommandInteraction) -> Self {
        Self { http, interaction }
    }

    async fn edit(&self, reply: &Reply) -> Result<(), BotError> {
        let builder = match &reply.body {
            ReplyBody::Embed(embed) => EditInteractionResponse::new().embed(to_create_embed(embed)),
            ReplyBody::Text(text) => EditInteractionResponse::new().content(text),
        };

        self.interaction
            .edit_response(&*self.http, builder)
            .await
            .map(|_| ())
            .map_err(|e| BotError::Reply(e.to_string()))
    }

    async fn follow_up_ephemeral(&self, reply: &Reply) -> Result<(), BotError> {
        let builder = match &reply.body {
            ReplyBody::Embed(embed) => CreateInteractionResponseFollowup::new().embed(to_create_embed(embed)),
            ReplyBody::Text(text) => CreateInteractionResponseFollowup::new().content(text),
        };

        self.interaction
            .create_followup(&*self.http, builder.ephemeral(true))
            .await
            .map(|_| ())
            .map_err(|e| BotError::Reply(e.to_string()))
    }
}

#[async_trait]
impl Responder for InteractionResponder {
    async fn acknowledge(&self) -> Result<(), BotError> {
        self.interaction
            .defer(&*self.http)
            .await
            .map_err(|e| BotError::Reply(e.to_string()))
    }

    async fn reply(&self, reply: &Reply) -> Result<(), BotError> {
        if !reply.ephemeral {
            return self.edit(reply).await;
        }

        // A deferred response keeps the visibility it was deferred with, so the
        // public placeholder is removed and the reply goes out as a follow-up.
        if let Err(e) = self.interaction.delete_response(&*self.http).await {
            tracing::warn!("Could not remove deferred response, editing it instead: {}", e);
            return self.edit(reply).await;
        }

        self.follow_up_ephemeral(reply).await
    }
}
