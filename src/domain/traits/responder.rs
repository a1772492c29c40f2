use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::Reply;

/// Reply channel for a single invocation
#[async_trait]
pub trait Responder: Send + Sync {
    /// Tell the platform a reply is pending
    async fn acknowledge(&self) -> Result<(), BotError>;

    /// Deliver the final reply
    async fn reply(&self, reply: &Reply) -> Result<(), BotError>;
}
