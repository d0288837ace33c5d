use crate::commands::Data;
use poise::serenity_prelude::CreateEmbed;

type Error = Box<dyn std::error::Error + Send + Sync>;

const COLOR_ERROR: u32 = 0xE74C3C;
const COLOR_WARNING: u32 = 0xF39C12;

/// Handle framework errors
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!(command = %ctx.command().name, error = %error, "command failed");
            let embed = CreateEmbed::new()
                .title("[ERROR] Command Failed")
                .description(format!("{}", error))
                .color(COLOR_ERROR);
            let _ = ctx.send(poise::CreateReply::default().embed(embed)).await;
        }
        poise::FrameworkError::CommandPanic { payload, ctx, .. } => {
            tracing::error!(command = %ctx.command().name, payload = ?payload, "command panicked");
            let embed = CreateEmbed::new()
                .title("[ERROR] Internal Error")
                .description("An unexpected error occurred. Please try again later.")
                .color(COLOR_ERROR);
            let _ = ctx.send(poise::CreateReply::default().embed(embed)).await;
        }
        poise::FrameworkError::CooldownHit {
            remaining_cooldown,
            ctx,
            ..
        } => {
            tracing::debug!(user = %ctx.author().name, "cooldown hit");
            let embed = CreateEmbed::new()
                .title("[WARN] Slow down")
                .description(format!(
                    "Try again in {:.1}s.",
                    remaining_cooldown.as_secs_f32()
                ))
                .color(COLOR_WARNING);
            let _ = ctx
                .send(poise::CreateReply::default().embed(embed).ephemeral(true))
                .await;
        }
        error => {
            tracing::warn!(error = %error, "unhandled framework error");
        }
    }
}
