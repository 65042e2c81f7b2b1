// Grafana HTTP API client
use crate::application::dashboard_uploader::DashboardUploader;
use crate::domain::dashboard::Dashboard;
use crate::domain::error::{DashboardError, Result};
use crate::infrastructure::config::GrafanaSettings;
use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
enum Auth {
    None,
    Bearer(String),
    Basic { username: String, password: String },
}

#[derive(Debug, Clone)]
pub struct GrafanaClient {
    base_url: String,
    auth: Auth,
    folder_uid: Option<String>,
    client: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveDashboardRequest<'a> {
    dashboard: &'a Dashboard,
    overwrite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    folder_uid: Option<&'a str>,
}

impl GrafanaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth: Auth::None,
            folder_uid: None,
            client: reqwest::Client::new(),
        }
    }

    /// `None` when no URL is configured, meaning uploads are disabled
    pub fn from_settings(settings: &GrafanaSettings) -> Option<Self> {
        let url = settings.url.as_ref()?;
        let auth = match (&settings.api_token, &settings.username, &settings.password) {
            (Some(token), _, _) => Auth::Bearer(token.clone()),
            (None, Some(username), Some(password)) => Auth::Basic {
                username: username.clone(),
                password: password.clone(),
            },
            _ => Auth::None,
        };

        Some(Self {
            auth,
            folder_uid: settings.folder_uid.clone(),
            ..Self::new(url.clone())
        })
    }

    fn save_url(&self) -> String {
        format!("{}/api/dashboards/db", self.base_url)
    }
}

#[async_trait]
impl DashboardUploader for GrafanaClient {
    async fn upload(&self, dashboard: &Dashboard) -> Result<()> {
        let body = serde_json::to_vec(&SaveDashboardRequest {
            dashboard,
            overwrite: true,
            folder_uid: self.folder_uid.as_deref(),
        })?;

        let mut request = self
            .client
            .post(self.save_url())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        request = match &self.auth {
            Auth::None => request,
            Auth::Bearer(token) => request.bearer_auth(token),
            Auth::Basic { username, password } => request.basic_auth(username, Some(password)),
        };

        let response = request.send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => format!("<unreadable body: {}>", e),
            };
            return Err(DashboardError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!("Grafana accepted dashboard {}", dashboard.uid);
        Ok(())
    }

    fn target(&self) -> &str {
        &self.base_url
    }
}
