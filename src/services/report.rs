use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::artifact::TempArtifact;
use crate::error::ReportError;
use crate::render::{CardContent, CardRenderer, ReportRow};
use crate::utils::sys::{MetricsSnapshot, format_uptime};

#[derive(Clone, Debug)]
pub struct ReportSettings {
    pub brand: String,
    /// Administrator identity shown in the Admin row.
    pub admin: String,
    pub report_dir: PathBuf,
    /// Filename-safe prefix for temp files.
    pub file_tag: String,
    pub cleanup_delay: Duration,
    pub reply_timeout: Duration,
}

/// Where the report is answered to, usually the invoking chat message.
#[async_trait]
pub trait ReportChannel: Send + Sync {
    /// Reply with `body` and the file at `attachment`, read at send time.
    async fn reply_with_file(&self, body: &str, attachment: &Path) -> Result<(), ReportError>;

    async fn reply_text(&self, body: &str) -> Result<(), ReportError>;
}

pub fn report_rows(snapshot: &MetricsSnapshot, admin: &str) -> Vec<ReportRow> {
    let row = |label, value: String| ReportRow { label, value };
    vec![
        row("⏱️ Uptime", format_uptime(snapshot.uptime_secs)),
        row(
            "🧠 CPU",
            format!("{} ({} cores)", snapshot.cpu_model, snapshot.cpu_cores),
        ),
        row(
            "📈 Load Avg",
            format!("{:.2} ({:.1}%)", snapshot.load(), snapshot.cpu_load_percent()),
        ),
        row(
            "💾 RAM",
            format!(
                "{:.1} MB / {:.1} MB ({:.1}%)",
                snapshot.used_memory_mb(),
                snapshot.total_memory_mb(),
                snapshot.ram_usage_percent()
            ),
        ),
        row(
            "🛠️ Platform",
            format!("{} ({})", snapshot.platform, snapshot.arch),
        ),
        row("Admin", admin.to_string()),
        row("📦 Node", snapshot.runtime_version.clone()),
        row("🔖 Host", snapshot.host_name.clone()),
    ]
}

/// Plain-text twin of the card.
pub fn compose_body(brand: &str, rows: &[ReportRow], snapshot: &MetricsSnapshot) -> String {
    let plain = rows
        .iter()
        .map(|row| format!("{}: {}", row.label, row.value))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "🔧 {} – Uptime Report\n\n{}\n\nRAM Usage: {:.1}%\nCPU Load: {:.2} ({:.1}%)",
        brand,
        plain,
        snapshot.ram_usage_percent(),
        snapshot.load(),
        snapshot.cpu_load_percent()
    )
}

pub fn error_reply(brand: &str, error: &ReportError) -> String {
    format!(
        "❌ Failed to generate uptime report, {} will fix later, console says: {}",
        brand, error
    )
}

pub fn card_content(
    brand: &str,
    rows: Vec<ReportRow>,
    snapshot: &MetricsSnapshot,
    generated_at: DateTime<Local>,
) -> CardContent {
    CardContent {
        title: format!("{} – System Monitor", brand),
        rows,
        ram_percent: snapshot.ram_usage_percent(),
        cpu_percent: snapshot.cpu_load_percent(),
        footer: format!("⏰ Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
    }
}

/// Runs one report invocation end to end: collect, render, encode, deliver,
/// then clean up. Nothing it does fails outward.
#[derive(Clone)]
pub struct ReportComposer {
    settings: ReportSettings,
    renderer: Arc<dyn CardRenderer>,
}

impl ReportComposer {
    pub fn new(settings: ReportSettings, renderer: impl CardRenderer + 'static) -> Self {
        Self {
            settings,
            renderer: Arc::new(renderer),
        }
    }

    /// Reports on the live host. Returns the pending cleanup task when a
    /// temp file was written.
    pub async fn run(&self, channel: &dyn ReportChannel) -> Option<JoinHandle<()>> {
        // the full process scan blocks, keep it off the async workers
        match tokio::task::spawn_blocking(MetricsSnapshot::collect).await {
            Ok(snapshot) => self.run_with(channel, snapshot).await,
            Err(e) => {
                let e = ReportError::Collect(e.to_string());
                tracing::warn!(error = %e, "host metrics unavailable");
                self.report_failure(channel, &e).await;
                None
            }
        }
    }

    pub async fn run_with(
        &self,
        channel: &dyn ReportChannel,
        snapshot: MetricsSnapshot,
    ) -> Option<JoinHandle<()>> {
        let rows = report_rows(&snapshot, &self.settings.admin);
        let body = compose_body(&self.settings.brand, &rows, &snapshot);

        let artifact = match self.prepare(rows, &snapshot).await {
            Ok(artifact) => artifact,
            Err(e) => {
                tracing::warn!(error = %e, "uptime report could not be produced");
                self.report_failure(channel, &e).await;
                return None;
            }
        };

        let delivered = self
            .bounded(channel.reply_with_file(&body, artifact.path()))
            .await;
        let cleanup = artifact.schedule_cleanup(self.settings.cleanup_delay);

        match delivered {
            Ok(()) => tracing::info!("uptime report delivered"),
            Err(e) => {
                tracing::warn!(error = %e, "uptime report delivery failed");
                self.report_failure(channel, &e).await;
            }
        }

        Some(cleanup)
    }

    async fn prepare(
        &self,
        rows: Vec<ReportRow>,
        snapshot: &MetricsSnapshot,
    ) -> Result<TempArtifact, ReportError> {
        let card = card_content(&self.settings.brand, rows, snapshot, Local::now());
        let png = self.renderer.render_png(&card)?;

        let identifier = format!(
            "{}_{}",
            self.settings.file_tag,
            &Uuid::new_v4().simple().to_string()[..8]
        );
        let artifact = TempArtifact::write(&self.settings.report_dir, &identifier, &png).await?;
        tracing::debug!(path = %artifact.path().display(), bytes = png.len(), "report written");
        Ok(artifact)
    }

    async fn bounded<F>(&self, reply: F) -> Result<(), ReportError>
    where
        F: Future<Output = Result<(), ReportError>>,
    {
        let limit = self.settings.reply_timeout;
        tokio::time::timeout(limit, reply)
            .await
            .map_err(|_| ReportError::Timeout(limit))?
    }

    /// Best effort: if even the error reply fails it is only logged.
    async fn report_failure(&self, channel: &dyn ReportChannel, error: &ReportError) {
        let body = error_reply(&self.settings.brand, error);
        if let Err(e) = self.bounded(channel.reply_text(&body)).await {
            tracing::debug!(error = %e, "error reply dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> MetricsSnapshot {
        MetricsSnapshot {
            uptime_secs: 90061,
            total_memory: 8_589_934_592,
            free_memory: 4_294_967_296,
            cpu_model: "Test CPU @ 3.00GHz".to_string(),
            cpu_cores: 4,
            load_average: 2.0,
            runtime_version: "uptt v0.1.0".to_string(),
            platform: "linux".to_string(),
            arch: "x64".to_string(),
            host_name: "test-host".to_string(),
        }
    }

    #[test]
    fn rows_are_in_display_order() {
        let labels: Vec<_> = report_rows(&snapshot(), "@ops")
            .into_iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(
            labels,
            [
                "⏱️ Uptime",
                "🧠 CPU",
                "📈 Load Avg",
                "💾 RAM",
                "🛠️ Platform",
                "Admin",
                "📦 Node",
                "🔖 Host"
            ]
        );
    }

    #[test]
    fn body_matches_reply_format() {
        let s = snapshot();
        let body = compose_body("Uptt", &report_rows(&s, "@ops"), &s);
        let expected = "🔧 Uptt – Uptime Report\n\n\
            ⏱️ Uptime: 1d 1h 1m 1s\n\
            🧠 CPU: Test CPU @ 3.00GHz (4 cores)\n\
            📈 Load Avg: 2.00 (50.0%)\n\
            💾 RAM: 4096.0 MB / 8192.0 MB (50.0%)\n\
            🛠️ Platform: linux (x64)\n\
            Admin: @ops\n\
            📦 Node: uptt v0.1.0\n\
            🔖 Host: test-host\n\n\
            RAM Usage: 50.0%\n\
            CPU Load: 2.00 (50.0%)";
        assert_eq!(body, expected);
    }

    #[test]
    fn saturated_load_is_capped_in_text() {
        let mut s = snapshot();
        s.load_average = 12.5;
        let body = compose_body("Uptt", &report_rows(&s, "-"), &s);
        assert!(body.contains("📈 Load Avg: 12.50 (100.0%)"));
        assert!(body.ends_with("CPU Load: 12.50 (100.0%)"));
    }

    #[test]
    fn error_reply_names_brand_and_cause() {
        let text = error_reply("Uptt", &ReportError::Encode("boom".to_string()));
        assert_eq!(
            text,
            "❌ Failed to generate uptime report, Uptt will fix later, console says: png encoding failed: boom"
        );
    }

    #[test]
    fn collection_failure_reads_as_an_error_reply() {
        let text = error_reply("Uptt", &ReportError::Collect("task panicked".to_string()));
        assert!(text.ends_with("console says: metrics collection failed: task panicked"));
    }

    #[test]
    fn card_uses_the_same_percentages_as_the_text() {
        let s = snapshot();
        let generated = Local::now();
        let card = card_content("Uptt", report_rows(&s, "-"), &s, generated);
        assert_eq!(card.title, "Uptt – System Monitor");
        assert_eq!(card.ram_percent, 50.0);
        assert_eq!(card.cpu_percent, 50.0);
        assert!(card.footer.starts_with("⏰ Generated: "));
        assert_eq!(card.rows.len(), 8);
    }
}
