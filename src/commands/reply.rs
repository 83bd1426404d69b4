use serenity::async_trait;
use serenity::builder::{CreateAttachment, CreateMessage};
use serenity::model::id::ChannelId;
use serenity::prelude::Context;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to send message: {0}")]
pub struct SendError(pub String);

/// Outbound side of a command: always answers the channel the command came from.
#[async_trait]
pub trait Reply: Send + Sync {
    async fn text(&self, content: &str) -> Result<(), SendError>;
    async fn file(&self, filename: &str, data: Vec<u8>) -> Result<(), SendError>;
}

pub struct ChannelReply<'a> {
    ctx: &'a Context,
    channel_id: ChannelId,
}

impl<'a> ChannelReply<'a> {
    pub fn new(ctx: &'a Context, channel_id: ChannelId) -> Self {
        Self { ctx, channel_id }
    }
}

#[async_trait]
impl<'a> Reply for ChannelReply<'a> {
    async fn text(&self, content: &str) -> Result<(), SendError> {
        self.channel_id
            .send_message(self.ctx, CreateMessage::default().content(content))
            .await
            .map(|_| ())
            .map_err(|e| SendError(e.to_string()))
    }

    async fn file(&self, filename: &str, data: Vec<u8>) -> Result<(), SendError> {
        let attachment = CreateAttachment::bytes(data, filename);
        self.channel_id
            .send_message(self.ctx, CreateMessage::default().add_file(attachment))
            .await
            .map(|_| ())
            .map_err(|e| SendError(e.to_string()))
    }
}
