// Error types shared by every layer below the entry point
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Requested name has no registry entry
    #[error("unknown dashboard: {name} (known: {known})")]
    UnknownDashboard { name: String, known: String },

    /// Dashboard document could not be assembled
    #[error("failed to build dashboard: {0}")]
    Build(String),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize dashboard: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("request to Grafana failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status code: {status}. Body: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}

impl DashboardError {
    pub fn build(msg: impl Into<String>) -> Self {
        Self::Build(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
