// Generate one named dashboard end to end
use crate::application::dashboard_uploader::DashboardUploader;
use crate::application::publisher::{DashboardPublisher, output_path};
use crate::application::registry::DashboardRegistry;
use crate::domain::error::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Look up `name`, build it, write `<out_dir>/<name>.json` and upload when an
/// uploader is given. Returns the written path.
pub async fn run(
    registry: &DashboardRegistry,
    name: &str,
    uploader: Option<Arc<dyn DashboardUploader>>,
    out_dir: &Path,
) -> Result<PathBuf> {
    // Resolve before touching the filesystem
    let build = registry.lookup(name)?;
    let dashboard = build()?;

    let path = output_path(out_dir, name);
    DashboardPublisher::new(uploader)
        .publish(&dashboard, &path)
        .await?;
    Ok(path)
}
