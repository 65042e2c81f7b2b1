// Uploader trait for pushing dashboards to a remote Grafana
use crate::domain::dashboard::Dashboard;
use crate::domain::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait DashboardUploader: Send + Sync {
    /// Create or overwrite the remote dashboard with the same uid
    async fn upload(&self, dashboard: &Dashboard) -> Result<()>;

    /// Where uploads go, for logging
    fn target(&self) -> &str;
}
