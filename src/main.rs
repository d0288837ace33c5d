use dotenvy::dotenv;
use serenity::all::GatewayIntents;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uptt::commands::{Data, uptime};
use uptt::config::Config;
use uptt::error::{BotError, Result};
use uptt::handlers::on_error;
use uptt::render::PngRenderer;
use uptt::render::text::FontSet;
use uptt::services::ReportComposer;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    tracing::info!("Starting uptime bot...");

    let config = Config::from_env()?;

    let fonts = FontSet::load(config.font_path.as_deref());
    let reports = ReportComposer::new(config.report_settings(), PngRenderer::new(fonts));
    tracing::info!(
        report_dir = %config.report_dir.display(),
        reply_timeout_secs = config.reply_timeout.as_secs(),
        "report settings loaded"
    );

    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILDS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![uptime::uptt()],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.prefix.clone()),
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            let reports = reports.clone();
            Box::pin(async move {
                tracing::info!(user = %ready.user.name, "logged in");

                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                tracing::info!("slash commands registered globally");

                Ok(Data { reports })
            })
        })
        .build();

    let mut client = serenity::Client::builder(&config.token, intents)
        .framework(framework)
        .await
        .map_err(|e| BotError::Client(format!("Failed to create client: {}", e)))?;

    client
        .start()
        .await
        .map_err(|e| BotError::Client(format!("Failed to initialize client: {}", e)))?;

    Ok(())
}

const DEFAULT_LOG_FILTER: &str = "uptt=info";

/// `RUST_LOG` filters, `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = log_filter(std::env::var("RUST_LOG").ok().as_deref());

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if use_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Directives from `RUST_LOG` win; unset, blank or unparsable falls back to
/// `uptt=info`.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn rust_log_can_raise_the_crate_level() {
        let filter = log_filter(Some("uptt=debug"));
        assert!(filter.to_string().contains("uptt=debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn missing_rust_log_defaults_to_info() {
        for directives in [None, Some(""), Some("  ")] {
            let filter = log_filter(directives);
            assert_eq!(filter.to_string(), DEFAULT_LOG_FILTER);
            assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
        }
    }
}
