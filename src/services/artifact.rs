use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;

/// A rendered report on disk, owned by one invocation.
///
/// Until `schedule_cleanup` takes it over, dropping the artifact removes the
/// file, so a failure between writing and replying never leaves it behind.
#[derive(Debug)]
pub struct TempArtifact {
    path: PathBuf,
    armed: bool,
}

impl TempArtifact {
    pub fn file_name(identifier: &str, unix_millis: i64) -> String {
        format!("uptime_report_{}_{}.png", identifier, unix_millis)
    }

    pub async fn write(dir: &Path, identifier: &str, bytes: &[u8]) -> io::Result<Self> {
        let name = Self::file_name(identifier, Utc::now().timestamp_millis());
        let artifact = Self {
            path: dir.join(name),
            armed: true,
        };
        // a failed write drops `artifact`, which removes any partial file
        tokio::fs::write(&artifact.path, bytes).await?;
        Ok(artifact)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the file once `delay` has passed. Removal errors are ignored.
    pub fn schedule_cleanup(mut self, delay: Duration) -> JoinHandle<()> {
        self.armed = false;
        let path = std::mem::take(&mut self.path);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::debug!(path = %path.display(), error = %e, "temp report already gone");
            }
        })
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        if self.armed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_follows_pattern() {
        assert_eq!(
            TempArtifact::file_name("uptt_1a2b3c4d", 1_700_000_000_000),
            "uptime_report_uptt_1a2b3c4d_1700000000000.png"
        );
    }

    #[tokio::test]
    async fn dropping_unscheduled_artifact_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = TempArtifact::write(dir.path(), "drop", b"png").await.unwrap();
        let path = artifact.path().to_path_buf();
        assert!(path.exists());

        drop(artifact);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn failed_write_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir");
        assert!(TempArtifact::write(&missing, "x", b"png").await.is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cleanup_waits_for_the_delay() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = TempArtifact::write(dir.path(), "later", b"png").await.unwrap();
        let path = artifact.path().to_path_buf();

        let handle = artifact.schedule_cleanup(Duration::from_millis(5000));
        tokio::time::sleep(Duration::from_millis(4900)).await;
        assert!(path.exists());

        handle.await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test(start_paused = true)]
    async fn cleanup_of_a_vanished_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = TempArtifact::write(dir.path(), "gone", b"png").await.unwrap();
        std::fs::remove_file(artifact.path()).unwrap();

        artifact
            .schedule_cleanup(Duration::from_millis(10))
            .await
            .unwrap();
    }
}
