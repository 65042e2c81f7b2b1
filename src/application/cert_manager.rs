// cert-manager dashboard
use crate::domain::dashboard::{Dashboard, DashboardBuilder, Row, TemplateVariable, Timezone};
use crate::domain::error::Result;
use crate::domain::panel::{
    DataSourceRef, DEFAULT_REQUEST_RATE_EXPR, DEFAULT_REQUEST_RATE_LEGEND, GraphPanel, Panel, Style,
    TimeSeriesPanelOpts,
};
use crate::domain::query::QueryExpr;

pub const UID: &str = "cert-manager";
const TITLE: &str = "Cert Manager";

pub const SYNC_CALLS_TITLE: &str = "The number of sync() calls made by a controller";
pub const SYNC_CALLS_EXPR: &str =
    "sum(increase(certmanager_controller_sync_call_count[$__interval])) by (controller)";

pub fn cert_manager_dashboard() -> Result<Dashboard> {
    let http_rate = GraphPanel::new(
        "HTTP Rate",
        DataSourceRef::prometheus("prometheus-default"),
        &[QueryExpr::new(
            DEFAULT_REQUEST_RATE_EXPR,
            DEFAULT_REQUEST_RATE_LEGEND,
        )],
    );

    let sync_calls = TimeSeriesPanelOpts {
        title: SYNC_CALLS_TITLE.to_string(),
        exprs: vec![QueryExpr::new(SYNC_CALLS_EXPR, "{{ controller }}")],
        unit: "short".to_string(),
        style: Style::Bars,
        ..Default::default()
    };

    DashboardBuilder::new(TITLE)
        .uid(UID)
        .tags([UID])
        .slug(UID)
        .timezone(Timezone::Browser)
        .variable(TemplateVariable::datasource(
            "datasource",
            "Datasource",
            "prometheus",
        ))
        .row(Row::new("Ready status", vec![Panel::Graph(http_rate)]))
        .row(Row::new("Metrics", vec![sync_calls.panel()]))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::panel::{LegendCalc, LegendDisplayMode, LegendPlacement};

    #[test]
    fn test_layout() {
        let dashboard = cert_manager_dashboard().unwrap();

        assert_eq!(dashboard.title, "Cert Manager");
        assert_eq!(dashboard.uid, "cert-manager");
        assert_eq!(dashboard.slug, "cert-manager");
        assert_eq!(dashboard.tags, vec!["cert-manager"]);
        assert_eq!(dashboard.timezone, Timezone::Browser);

        let variable = &dashboard.templating.list[0];
        assert_eq!(variable.name, "datasource");
        assert_eq!(variable.label, "Datasource");
        assert_eq!(variable.query, "prometheus");

        let titles: Vec<&str> = dashboard.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Ready status", "Metrics"]);

        let ready = &dashboard.rows[0].panels;
        assert_eq!(ready.len(), 1);
        assert!(matches!(&ready[0], Panel::Graph(p) if p.title == "HTTP Rate"));
    }

    #[test]
    fn test_sync_calls_panel() {
        let dashboard = cert_manager_dashboard().unwrap();
        let metrics = &dashboard.rows[1].panels;
        assert_eq!(metrics.len(), 1);

        let Panel::TimeSeries(panel) = &metrics[0] else {
            panic!("expected time series panel");
        };
        assert_eq!(panel.title, SYNC_CALLS_TITLE);
        assert_eq!(panel.span, 12);
        assert_eq!(panel.options.legend.calcs, vec![LegendCalc::Total]);
        assert!(panel.targets.iter().any(|t| t.expr.contains("certmanager_controller_sync_call_count")
            && t.expr.contains("by (controller)")));
    }

    #[test]
    fn test_sync_calls_legend_is_visible() {
        let dashboard = cert_manager_dashboard().unwrap();
        let Panel::TimeSeries(panel) = &dashboard.rows[1].panels[0] else {
            panic!("expected time series panel");
        };
        let legend = &panel.options.legend;
        assert_eq!(legend.display_mode, LegendDisplayMode::List);
        assert_eq!(legend.placement, LegendPlacement::Bottom);
        assert!(legend.show_legend);
    }

    #[test]
    fn test_rebuild_is_identical() {
        let first = cert_manager_dashboard().unwrap();
        let second = cert_manager_dashboard().unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_json_round_trip_keeps_structure() {
        let dashboard = cert_manager_dashboard().unwrap();
        let text = serde_json::to_string_pretty(&dashboard).unwrap();
        let parsed: Dashboard = serde_json::from_str(&text).unwrap();

        let summary = |d: &Dashboard| {
            d.rows
                .iter()
                .map(|row| {
                    let panels: Vec<(String, Vec<String>)> = row
                        .panels
                        .iter()
                        .map(|p| {
                            let exprs = p.targets().iter().map(|t| t.expr.clone()).collect();
                            (p.title().to_string(), exprs)
                        })
                        .collect();
                    (row.title.clone(), panels)
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(summary(&parsed), summary(&dashboard));
    }
}
