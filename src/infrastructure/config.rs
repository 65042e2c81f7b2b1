use crate::domain::error::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct GrafanaSettings {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub folder_uid: Option<String>,
}

impl GrafanaSettings {
    /// Blank values count as unset
    fn normalized(self) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        Self {
            url: non_empty(self.url).map(|u| u.trim_end_matches('/').to_string()),
            api_token: non_empty(self.api_token),
            username: non_empty(self.username),
            password: non_empty(self.password),
            folder_uid: non_empty(self.folder_uid),
        }
    }
}

const SETTINGS_FILE: &str = "config/grafana";
const ENV_PREFIX: &str = "GRAFANA";

/// Load settings from `config/grafana` and `GRAFANA_*`.
/// `url` is only ever taken from `GRAFANA_URL`, so a settings file alone never enables uploads.
pub fn load_grafana_settings() -> Result<GrafanaSettings> {
    build_grafana_settings(SETTINGS_FILE, None)
}

fn environment(vars: Option<config::Map<String, String>>) -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX).source(vars)
}

fn build_grafana_settings(
    file: &str,
    vars: Option<config::Map<String, String>>,
) -> Result<GrafanaSettings> {
    let mut settings: GrafanaSettings = config::Config::builder()
        .add_source(config::File::with_name(file).required(false))
        .add_source(environment(vars.clone()))
        .build()?
        .try_deserialize()?;

    let env_only: GrafanaSettings = config::Config::builder()
        .add_source(environment(vars))
        .build()?
        .try_deserialize()?;
    settings.url = env_only.url;

    Ok(settings.normalized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DashboardError;

    fn from_vars(vars: &[(&str, &str)]) -> GrafanaSettings {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        build_grafana_settings("config/does-not-exist", Some(map)).unwrap()
    }

    #[test]
    fn test_no_variables_means_no_upload() {
        assert_eq!(from_vars(&[]).url, None);
    }

    #[test]
    fn test_empty_url_is_unset() {
        assert_eq!(from_vars(&[("GRAFANA_URL", "")]).url, None);
    }

    #[test]
    fn test_reads_prefixed_variables() {
        let settings = from_vars(&[
            ("GRAFANA_URL", "http://grafana.local:3000/"),
            ("GRAFANA_API_TOKEN", "glsa_token"),
            ("GRAFANA_FOLDER_UID", "infra"),
            ("OTHER_URL", "http://ignored"),
        ]);

        assert_eq!(settings.url.as_deref(), Some("http://grafana.local:3000"));
        assert_eq!(settings.api_token.as_deref(), Some("glsa_token"));
        assert_eq!(settings.folder_uid.as_deref(), Some("infra"));
        assert_eq!(settings.username, None);
    }

    #[test]
    fn test_settings_file_cannot_enable_upload() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("grafana.toml"),
            "url = \"http://grafana.example\"\napi_token = \"from-file\"\nfolder_uid = \"ops\"\n",
        )
        .unwrap();
        let file = dir.path().join("grafana");

        let settings =
            build_grafana_settings(file.to_str().unwrap(), Some(config::Map::new())).unwrap();
        assert_eq!(settings.url, None);
        assert_eq!(settings.api_token.as_deref(), Some("from-file"));
        assert_eq!(settings.folder_uid.as_deref(), Some("ops"));

        let mut vars = config::Map::new();
        vars.insert("GRAFANA_URL".to_string(), "http://grafana.env".to_string());
        vars.insert("GRAFANA_API_TOKEN".to_string(), "from-env".to_string());
        let settings = build_grafana_settings(file.to_str().unwrap(), Some(vars)).unwrap();
        assert_eq!(settings.url.as_deref(), Some("http://grafana.env"));
        assert_eq!(settings.api_token.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_malformed_settings_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("grafana.toml"), "url = [unterminated").unwrap();
        let file = dir.path().join("grafana");

        let err = build_grafana_settings(file.to_str().unwrap(), Some(config::Map::new()))
            .unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }
}
