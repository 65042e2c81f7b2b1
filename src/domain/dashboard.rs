// Dashboard domain model
use super::error::{DashboardError, Result};
use super::panel::Panel;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Longest uid Grafana accepts
pub const MAX_UID_LEN: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timezone {
    #[default]
    Browser,
    Utc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateVariable {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub label: String,
    /// Datasource plugin type for datasource variables
    pub query: String,
    pub hide: u8,
}

impl TemplateVariable {
    pub fn datasource(name: impl Into<String>, label: impl Into<String>, plugin: impl Into<String>) -> Self {
        Self {
            kind: "datasource".to_string(),
            name: name.into(),
            label: label.into(),
            query: plugin.into(),
            hide: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Templating {
    pub list: Vec<TemplateVariable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub title: String,
    pub show_title: bool,
    pub collapse: bool,
    pub panels: Vec<Panel>,
}

impl Row {
    pub fn new(title: impl Into<String>, panels: Vec<Panel>) -> Self {
        Self {
            title: title.into(),
            show_title: true,
            collapse: false,
            panels,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: String,
    pub to: String,
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            from: "now-3h".to_string(),
            to: "now".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub title: String,
    pub uid: String,
    pub slug: String,
    pub tags: Vec<String>,
    pub timezone: Timezone,
    pub editable: bool,
    pub time: TimeRange,
    pub templating: Templating,
    pub rows: Vec<Row>,
    pub schema_version: u32,
}

impl Dashboard {
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.rows.iter().flat_map(|row| row.panels.iter())
    }
}

/// Collects dashboard parts; nothing is checked until `build`
#[derive(Debug, Clone)]
pub struct DashboardBuilder {
    title: String,
    uid: String,
    slug: String,
    tags: Vec<String>,
    timezone: Timezone,
    variables: Vec<TemplateVariable>,
    rows: Vec<Row>,
}

impl DashboardBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uid: String::new(),
            slug: String::new(),
            tags: Vec::new(),
            timezone: Timezone::default(),
            variables: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = uid.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn variable(mut self, variable: TemplateVariable) -> Self {
        self.variables.push(variable);
        self
    }

    pub fn row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Validate everything at once and number the panels in document order
    pub fn build(self) -> Result<Dashboard> {
        if self.title.trim().is_empty() {
            return Err(DashboardError::build("dashboard title is empty"));
        }
        if self.uid.is_empty() {
            return Err(DashboardError::build(format!(
                "dashboard {:?} has no uid",
                self.title
            )));
        }
        if self.uid.chars().count() > MAX_UID_LEN {
            return Err(DashboardError::build(format!(
                "uid {:?} is longer than {} characters",
                self.uid, MAX_UID_LEN
            )));
        }

        let mut seen = HashSet::new();
        for variable in &self.variables {
            if variable.name.is_empty() {
                return Err(DashboardError::build("templating variable has no name"));
            }
            if !seen.insert(variable.name.as_str()) {
                return Err(DashboardError::build(format!(
                    "templating variable {:?} is defined twice",
                    variable.name
                )));
            }
        }

        let mut rows = self.rows;
        let mut next_id = 1;
        for row in &mut rows {
            for panel in &mut row.panels {
                if !(1..=12).contains(&panel.span()) {
                    return Err(DashboardError::build(format!(
                        "panel {:?} in row {:?} has span {}, expected 1..=12",
                        panel.title(),
                        row.title,
                        panel.span()
                    )));
                }
                panel.set_id(next_id);
                next_id += 1;
            }
        }

        let slug = if self.slug.is_empty() {
            self.uid.clone()
        } else {
            self.slug
        };

        Ok(Dashboard {
            title: self.title,
            uid: self.uid,
            slug,
            tags: self.tags,
            timezone: self.timezone,
            editable: true,
            time: TimeRange::default(),
            templating: Templating {
                list: self.variables,
            },
            rows,
            schema_version: 16,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::panel::{DataSourceRef, GraphPanel, TimeSeriesPanelOpts};
    use crate::domain::query::QueryExpr;

    fn graph(title: &str) -> Panel {
        Panel::Graph(GraphPanel::new(
            title,
            DataSourceRef::prometheus("prom"),
            &[QueryExpr::new("up", "")],
        ))
    }

    fn base() -> DashboardBuilder {
        DashboardBuilder::new("Example").uid("example")
    }

    #[test]
    fn test_build_numbers_panels_across_rows() {
        let dashboard = base()
            .row(Row::new("first", vec![graph("a"), graph("b")]))
            .row(Row::new("second", vec![TimeSeriesPanelOpts::default().panel()]))
            .build()
            .unwrap();

        let ids: Vec<u32> = dashboard.panels().map(Panel::id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_slug_defaults_to_uid() {
        let dashboard = base().build().unwrap();
        assert_eq!(dashboard.slug, "example");

        let dashboard = base().slug("custom-slug").build().unwrap();
        assert_eq!(dashboard.slug, "custom-slug");
    }

    #[test]
    fn test_missing_uid_is_rejected() {
        let err = DashboardBuilder::new("No uid").build().unwrap_err();
        assert!(matches!(err, DashboardError::Build(_)));
    }

    #[test]
    fn test_long_uid_is_rejected() {
        let err = base().uid("x".repeat(MAX_UID_LEN + 1)).build().unwrap_err();
        assert!(err.to_string().contains("longer than 40"));
    }

    #[test]
    fn test_duplicate_variable_is_rejected() {
        let err = base()
            .variable(TemplateVariable::datasource("datasource", "Datasource", "prometheus"))
            .variable(TemplateVariable::datasource("datasource", "Other", "loki"))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("defined twice"));
    }

    #[test]
    fn test_bad_span_fails_whole_build() {
        let mut panel = graph("wide");
        if let Panel::Graph(p) = &mut panel {
            p.span = 13;
        }
        let err = base()
            .row(Row::new("ok", vec![graph("fine")]))
            .row(Row::new("broken", vec![panel]))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("\"wide\""));
    }

    #[test]
    fn test_dashboard_json_shape() {
        let dashboard = base()
            .tags(["a", "b"])
            .variable(TemplateVariable::datasource("datasource", "Datasource", "prometheus"))
            .row(Row::new("first", vec![graph("a")]))
            .build()
            .unwrap();
        let json = serde_json::to_value(&dashboard).unwrap();

        assert_eq!(json["timezone"], "browser");
        assert_eq!(json["schemaVersion"], 16);
        assert_eq!(json["tags"], serde_json::json!(["a", "b"]));
        assert_eq!(json["templating"]["list"][0]["type"], "datasource");
        assert_eq!(json["templating"]["list"][0]["query"], "prometheus");
        assert_eq!(json["rows"][0]["showTitle"], true);
        assert_eq!(json["rows"][0]["panels"][0]["type"], "graph");
        assert_eq!(json["rows"][0]["panels"][0]["id"], 1);
    }
}
