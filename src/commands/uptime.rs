use std::path::Path;

use async_trait::async_trait;
use poise::serenity_prelude::CreateAttachment;

use crate::error::ReportError;
use crate::services::ReportChannel;

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, super::Data, Error>;

/// Replies to the invoking message or interaction.
struct MessageChannel<'a> {
    ctx: Context<'a>,
}

#[async_trait]
impl<'a> ReportChannel for MessageChannel<'a> {
    async fn reply_with_file(&self, body: &str, attachment: &Path) -> Result<(), ReportError> {
        let file = CreateAttachment::path(attachment)
            .await
            .map_err(|e| ReportError::Delivery(e.to_string()))?;

        self.ctx
            .send(
                poise::CreateReply::default()
                    .content(body)
                    .attachment(file)
                    .reply(true),
            )
            .await
            .map_err(|e| ReportError::Delivery(e.to_string()))?;
        Ok(())
    }

    async fn reply_text(&self, body: &str) -> Result<(), ReportError> {
        self.ctx
            .send(poise::CreateReply::default().content(body).reply(true))
            .await
            .map_err(|e| ReportError::Delivery(e.to_string()))?;
        Ok(())
    }
}

/// Show the bot's system status card
#[poise::command(
    slash_command,
    prefix_command,
    aliases("up4", "upt4"),
    user_cooldown = 5,
    category = "system"
)]
pub async fn uptt(ctx: Context<'_>) -> Result<(), Error> {
    tracing::info!(user = %ctx.author().name, "uptime report requested");

    if let Err(e) = ctx.defer().await {
        tracing::warn!(error = %e, "could not defer uptime report");
    }

    let channel = MessageChannel { ctx };
    ctx.data().reports.run(&channel).await;

    Ok(())
}
