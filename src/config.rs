use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::BotError;
use crate::services::report::ReportSettings;

const DEFAULT_PREFIX: &str = "!";
const DEFAULT_BRAND: &str = "Uptt";
const DEFAULT_ADMIN: &str = "not configured";
const DEFAULT_REPLY_TIMEOUT_SECS: u64 = 30;
const CLEANUP_DELAY: Duration = Duration::from_millis(5000);

#[derive(Clone, Debug)]
pub struct Config {
    pub token: String,
    pub prefix: String,
    pub bot_admin: String,
    pub brand: String,
    pub report_dir: PathBuf,
    pub font_path: Option<PathBuf>,
    pub reply_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = non_empty("TOKEN")
            .ok_or_else(|| BotError::Config("TOKEN not configured".to_string()))?;

        let reply_timeout = match non_empty("REPLY_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| {
                    BotError::Config(format!("REPLY_TIMEOUT_SECS '{}' is invalid: {}", raw, e))
                })?;
                if secs == 0 {
                    return Err(BotError::Config(
                        "REPLY_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_REPLY_TIMEOUT_SECS),
        };

        Ok(Self {
            token,
            prefix: non_empty("PREFIX").unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            bot_admin: non_empty("BOT_ADMIN").unwrap_or_else(|| DEFAULT_ADMIN.to_string()),
            brand: non_empty("BOT_BRAND").unwrap_or_else(|| DEFAULT_BRAND.to_string()),
            report_dir: non_empty("REPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
            font_path: non_empty("FONT_PATH").map(PathBuf::from),
            reply_timeout,
        })
    }

    pub fn report_settings(&self) -> ReportSettings {
        ReportSettings {
            brand: self.brand.clone(),
            admin: self.bot_admin.clone(),
            report_dir: self.report_dir.clone(),
            file_tag: file_tag(&self.brand),
            cleanup_delay: CLEANUP_DELAY,
            reply_timeout: self.reply_timeout,
        }
    }
}

/// Filename-safe form of the brand used in temp file names.
fn file_tag(brand: &str) -> String {
    let tag: String = brand
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let tag = tag.trim_matches('_');
    if tag.is_empty() { "bot".to_string() } else { tag.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_token_is_set() {
        let config = Config::from_lookup(lookup(&[("TOKEN", "abc")])).unwrap();
        assert_eq!(config.prefix, "!");
        assert_eq!(config.brand, "Uptt");
        assert_eq!(config.bot_admin, "not configured");
        assert_eq!(config.reply_timeout, Duration::from_secs(30));
        assert!(config.font_path.is_none());
    }

    #[test]
    fn missing_token_is_an_error() {
        let err = Config::from_lookup(lookup(&[("TOKEN", "  ")])).unwrap_err();
        assert!(err.to_string().contains("TOKEN"));
    }

    #[test]
    fn malformed_timeout_is_rejected() {
        let err = Config::from_lookup(lookup(&[("TOKEN", "abc"), ("REPLY_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, BotError::Config(_)));

        let err = Config::from_lookup(lookup(&[("TOKEN", "abc"), ("REPLY_TIMEOUT_SECS", "0")]))
            .unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn report_settings_carry_admin_and_brand() {
        let config = Config::from_lookup(lookup(&[
            ("TOKEN", "abc"),
            ("BOT_ADMIN", "@ops"),
            ("BOT_BRAND", "Lawkey AI"),
            ("REPORT_DIR", "/var/tmp/reports"),
        ]))
        .unwrap();

        let settings = config.report_settings();
        assert_eq!(settings.admin, "@ops");
        assert_eq!(settings.brand, "Lawkey AI");
        assert_eq!(settings.file_tag, "lawkey_ai");
        assert_eq!(settings.report_dir, PathBuf::from("/var/tmp/reports"));
        assert_eq!(settings.cleanup_delay, Duration::from_millis(5000));
    }

    #[test]
    fn file_tag_never_empty() {
        assert_eq!(file_tag("✨✨"), "bot");
        assert_eq!(file_tag("WR Bot"), "wr_bot");
    }
}
