//! Download harvested file URLs into `<output_dir>/<id>/<ext>/`.

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::client::ExofopClient;
use crate::types::{DownloadError, ExofopResult};

/// Outcome of one `save_files` call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SaveReport {
    /// Files written by this call.
    pub saved: Vec<PathBuf>,
    /// Destinations that already existed; nothing was downloaded for them.
    pub skipped: Vec<PathBuf>,
    /// Per-file failures; they did not stop the remaining downloads.
    pub failed: Vec<DownloadError>,
    /// Destination of the last URL processed.
    pub last_destination: Option<PathBuf>,
}

impl SaveReport {
    /// Number of URLs processed.
    pub fn attempted(&self) -> usize {
        self.saved.len() + self.skipped.len() + self.failed.len()
    }

    /// True when no file failed (including the no-op case).
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// True when every URL failed.
    pub fn is_total_failure(&self) -> bool {
        !self.failed.is_empty() && self.saved.is_empty() && self.skipped.is_empty()
    }
}

impl ExofopClient {
    /// Download `urls` to `<output_dir>/<identifier>/<extension>/<basename>`.
    ///
    /// `None` or an empty list is a no-op. Existing destinations are skipped
    /// without a request. Failures are collected in the report.
    pub async fn save_files(
        &self,
        identifier: &str,
        urls: Option<&[String]>,
        extension: &str,
    ) -> ExofopResult<SaveReport> {
        let mut report = SaveReport::default();
        let Some(urls) = urls.filter(|u| !u.is_empty()) else {
            return Ok(report);
        };

        let dir = self.config.output_dir.join(identifier).join(extension);
        tokio::fs::create_dir_all(&dir).await?;
        tracing::info!("saving {} .{extension} files to {}", urls.len(), dir.display());

        let bar = progress_bar(urls.len() as u64);
        for url in urls {
            bar.set_message(url.clone());

            let Some(name) = basename(url) else {
                tracing::warn!("no file name in {url:?}; not saved");
                report.failed.push(DownloadError {
                    url: url.clone(),
                    message: "URL has no file name".to_string(),
                });
                bar.inc(1);
                continue;
            };

            let destination = dir.join(name);
            if tokio::fs::try_exists(&destination).await.unwrap_or(false) {
                tracing::info!("{} exists", destination.display());
                report.skipped.push(destination.clone());
            } else {
                match self.download_to(url, &destination).await {
                    Ok(()) => {
                        tracing::debug!("saved {url}");
                        report.saved.push(destination.clone());
                    }
                    Err(message) => {
                        tracing::warn!("not saved: {url}: {message}");
                        report.failed.push(DownloadError {
                            url: url.clone(),
                            message,
                        });
                    }
                }
            }

            report.last_destination = Some(destination);
            bar.inc(1);
        }
        bar.finish_and_clear();

        Ok(report)
    }

    async fn download_to(&self, url: &str, destination: &std::path::Path) -> Result<(), String> {
        let bytes = self.get_bytes(url).await?;
        tokio::fs::write(destination, bytes)
            .await
            .map_err(|e| format!("write {}: {e}", destination.display()))
    }
}

/// Text after the last `/`, if non-empty.
fn basename(url: &str) -> Option<&str> {
    url.rsplit('/').next().filter(|name| !name.is_empty())
}

fn progress_bar(len: u64) -> ProgressBar {
    let style = ProgressStyle::with_template("{bar:40} {pos}/{len} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    ProgressBar::new(len).with_style(style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExofopConfig;

    #[test]
    fn test_basename() {
        assert_eq!(basename("https://x.test/k2/files/a.csv"), Some("a.csv"));
        assert_eq!(basename("a.csv"), Some("a.csv"));
        assert_eq!(basename("https://x.test/k2/"), None);
    }

    #[test]
    fn test_report_classification() {
        let mut report = SaveReport::default();
        assert!(report.is_complete());
        assert!(!report.is_total_failure());

        report.failed.push(DownloadError {
            url: "u".into(),
            message: "m".into(),
        });
        assert!(report.is_total_failure());

        report.skipped.push(PathBuf::from("1/csv/a.csv"));
        assert!(!report.is_total_failure());
        assert!(!report.is_complete());
        assert_eq!(report.attempted(), 2);
    }

    #[tokio::test]
    async fn test_no_urls_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let client = ExofopClient::new(ExofopConfig::default().with_output_dir(dir.path()));

        let report = client.save_files("201", None, "csv").await.unwrap();
        assert_eq!(report.attempted(), 0);
        assert!(report.last_destination.is_none());

        let empty: Vec<String> = Vec::new();
        let report = client
            .save_files("201", Some(empty.as_slice()), "csv")
            .await
            .unwrap();
        assert_eq!(report.attempted(), 0);
        assert!(!dir.path().join("201").exists());
    }

    #[tokio::test]
    async fn test_unnamed_url_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let client = ExofopClient::new(ExofopConfig::default().with_output_dir(dir.path()));

        let urls = vec!["http://127.0.0.1:9/k2/".to_string()];
        let report = client.save_files("201", Some(urls.as_slice()), "csv").await.unwrap();
        assert_eq!(report.failed.len(), 1);
        assert!(report.last_destination.is_none());
        assert!(dir.path().join("201").join("csv").is_dir());
    }
}
