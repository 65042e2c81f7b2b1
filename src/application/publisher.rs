// Publisher - writes the dashboard JSON locally and optionally uploads a debug copy
use crate::application::dashboard_uploader::DashboardUploader;
use crate::domain::dashboard::{Dashboard, MAX_UID_LEN};
use crate::domain::error::{DashboardError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DEBUG_UID_SUFFIX: &str = "-debug";
pub const DEBUG_TITLE_SUFFIX: &str = " (debug)";

pub const DEFAULT_OUTPUT_DIR: &str = "dist";

/// Output path for a named dashboard
pub fn output_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.json", name))
}

/// Copy of `dashboard` that cannot collide with the production one.
/// The base uid is shortened so the suffix always survives the uid limit.
pub fn debug_copy(dashboard: &Dashboard) -> Dashboard {
    let mut copy = dashboard.clone();
    let base: String = copy
        .uid
        .chars()
        .take(MAX_UID_LEN - DEBUG_UID_SUFFIX.len())
        .collect();
    copy.uid = format!("{}{}", base, DEBUG_UID_SUFFIX);
    copy.title.push_str(DEBUG_TITLE_SUFFIX);
    copy
}

#[derive(Clone)]
pub struct DashboardPublisher {
    uploader: Option<Arc<dyn DashboardUploader>>,
}

impl DashboardPublisher {
    pub fn new(uploader: Option<Arc<dyn DashboardUploader>>) -> Self {
        Self { uploader }
    }

    pub async fn publish(&self, dashboard: &Dashboard, filename: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(dashboard)?;

        if let Some(parent) = filename.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DashboardError::io(parent, e))?;
        }
        tokio::fs::write(filename, json)
            .await
            .map_err(|e| DashboardError::io(filename, e))?;
        tracing::info!("Dashboard saved to {}", filename.display());

        if let Some(uploader) = &self.uploader {
            let debug_dashboard = debug_copy(dashboard);
            tracing::info!(
                "Uploading dashboard {} to Grafana at {}",
                debug_dashboard.uid,
                uploader.target()
            );
            uploader.upload(&debug_dashboard).await?;
        }

        Ok(())
    }
}
