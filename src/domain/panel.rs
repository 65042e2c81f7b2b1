// Panel option model and the serialized panel shapes it produces
use super::query::{QueryExpr, Target, to_targets};
use serde::{Deserialize, Serialize};

/// Datasource uid that resolves to the dashboard's "datasource" variable
pub const DATASOURCE_VARIABLE_REF: &str = "${datasource}";

/// Baseline traffic query added to every time-series panel
pub const DEFAULT_REQUEST_RATE_EXPR: &str = "rate(prometheus_http_requests_total[30s])";
pub const DEFAULT_REQUEST_RATE_LEGEND: &str = "{{handler}} - {{ code }}";

pub const TIME_SERIES_SPAN: u8 = 12;
pub const TIME_SERIES_HEIGHT: &str = "400px";
const GRAPH_SPAN: u8 = 6;
const GRAPH_HEIGHT: &str = "250px";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    Area,
    #[default]
    Line,
    Bars,
}

impl Style {
    /// Unknown names fall back to `Line`
    pub fn from_name(name: &str) -> Self {
        match name {
            "area" => Style::Area,
            "line" => Style::Line,
            "bars" => Style::Bars,
            other => {
                tracing::warn!("Unknown panel style {:?}, rendering as line", other);
                Style::Line
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendCalc {
    #[serde(rename = "sum")]
    Total,
    #[serde(rename = "min")]
    Min,
    #[serde(rename = "max")]
    Max,
    #[serde(rename = "mean")]
    Mean,
    #[serde(rename = "last")]
    Last,
    #[serde(rename = "lastNotNull")]
    LastNotNull,
}

impl LegendCalc {
    /// Column header Grafana shows for this calculation
    pub fn display_name(self) -> &'static str {
        match self {
            LegendCalc::Total => "Total",
            LegendCalc::Min => "Min",
            LegendCalc::Max => "Max",
            LegendCalc::Mean => "Mean",
            LegendCalc::Last => "Last",
            LegendCalc::LastNotNull => "Last *",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendDisplayMode {
    #[default]
    List,
    Table,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPlacement {
    #[default]
    Bottom,
    Right,
}

#[derive(Debug, Clone, Default)]
pub struct TimeSeriesPanelOpts {
    pub title: String,
    pub exprs: Vec<QueryExpr>,
    pub unit: String,
    pub style: Style,
    /// `None` lets the style pick a default
    pub legend_calcs: Option<Vec<LegendCalc>>,
    pub legend_display_mode: LegendDisplayMode,
    pub legend_placement: LegendPlacement,
}

impl TimeSeriesPanelOpts {
    /// Legend calculations after style defaults are applied
    pub fn effective_legend_calcs(&self) -> Vec<LegendCalc> {
        let calcs = match (&self.legend_calcs, self.style) {
            (Some(calcs), _) => calcs.clone(),
            (None, Style::Bars) => vec![LegendCalc::Total],
            (None, _) => Vec::new(),
        };

        let mut unique = Vec::with_capacity(calcs.len());
        for calc in calcs {
            if !unique.contains(&calc) {
                unique.push(calc);
            }
        }
        unique
    }

    /// Build the row panel. The title comes from `self.title` rather than a
    /// fixed "sync() calls" string, so one opts type serves any time-series panel.
    pub fn panel(&self) -> Panel {
        let mut exprs = Vec::with_capacity(self.exprs.len() + 1);
        exprs.push(QueryExpr::new(
            DEFAULT_REQUEST_RATE_EXPR,
            DEFAULT_REQUEST_RATE_LEGEND,
        ));
        exprs.extend(self.exprs.iter().cloned());

        let calcs = self.effective_legend_calcs();
        let (sort_by, sort_desc) = match calcs.last() {
            Some(calc) => (Some(calc.display_name().to_string()), Some(true)),
            None => (None, None),
        };

        let (draw_style, fill_opacity, stacking_mode) = match self.style {
            Style::Line => ("line", 0, "none"),
            Style::Area => ("line", 30, "none"),
            Style::Bars => ("bars", 100, "normal"),
        };

        tracing::debug!(
            "Building time series panel {:?} with {} queries",
            self.title,
            exprs.len()
        );

        Panel::TimeSeries(TimeSeriesPanel {
            id: 0,
            title: self.title.clone(),
            span: TIME_SERIES_SPAN,
            height: TIME_SERIES_HEIGHT.to_string(),
            datasource: DataSourceRef::prometheus(DATASOURCE_VARIABLE_REF),
            targets: to_targets(&exprs),
            options: TimeSeriesOptions {
                legend: LegendOptions {
                    display_mode: self.legend_display_mode,
                    placement: self.legend_placement,
                    show_legend: self.legend_display_mode != LegendDisplayMode::Hidden,
                    calcs,
                    sort_by,
                    sort_desc,
                },
                tooltip: TooltipOptions {
                    mode: "multi".to_string(),
                    sort: "desc".to_string(),
                },
            },
            field_config: FieldConfig {
                defaults: FieldDefaults {
                    unit: (!self.unit.is_empty()).then(|| self.unit.clone()),
                    custom: GraphFieldConfig {
                        draw_style: draw_style.to_string(),
                        fill_opacity,
                        line_width: 1,
                        stacking: Stacking {
                            mode: stacking_mode.to_string(),
                            group: "A".to_string(),
                        },
                    },
                },
                overrides: Vec::new(),
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSourceRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub uid: String,
}

impl DataSourceRef {
    pub fn prometheus(uid: impl Into<String>) -> Self {
        Self {
            kind: "prometheus".to_string(),
            uid: uid.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Panel {
    #[serde(rename = "graph")]
    Graph(GraphPanel),
    #[serde(rename = "timeseries")]
    TimeSeries(TimeSeriesPanel),
}

impl Panel {
    pub fn title(&self) -> &str {
        match self {
            Panel::Graph(p) => &p.title,
            Panel::TimeSeries(p) => &p.title,
        }
    }

    pub fn targets(&self) -> &[Target] {
        match self {
            Panel::Graph(p) => &p.targets,
            Panel::TimeSeries(p) => &p.targets,
        }
    }

    pub fn span(&self) -> u8 {
        match self {
            Panel::Graph(p) => p.span,
            Panel::TimeSeries(p) => p.span,
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            Panel::Graph(p) => p.id,
            Panel::TimeSeries(p) => p.id,
        }
    }

    pub(crate) fn set_id(&mut self, id: u32) {
        match self {
            Panel::Graph(p) => p.id = id,
            Panel::TimeSeries(p) => p.id = id,
        }
    }
}

/// Legacy graph panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphPanel {
    #[serde(default)]
    pub id: u32,
    pub title: String,
    pub span: u8,
    pub height: String,
    pub datasource: DataSourceRef,
    pub targets: Vec<Target>,
    pub lines: bool,
    pub linewidth: u8,
    pub fill: u8,
}

impl GraphPanel {
    pub fn new(title: impl Into<String>, datasource: DataSourceRef, exprs: &[QueryExpr]) -> Self {
        Self {
            id: 0,
            title: title.into(),
            span: GRAPH_SPAN,
            height: GRAPH_HEIGHT.to_string(),
            datasource,
            targets: to_targets(exprs),
            lines: true,
            linewidth: 1,
            fill: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPanel {
    #[serde(default)]
    pub id: u32,
    pub title: String,
    pub span: u8,
    pub height: String,
    pub datasource: DataSourceRef,
    pub targets: Vec<Target>,
    pub options: TimeSeriesOptions,
    pub field_config: FieldConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesOptions {
    pub legend: LegendOptions,
    pub tooltip: TooltipOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendOptions {
    pub display_mode: LegendDisplayMode,
    pub placement: LegendPlacement,
    pub show_legend: bool,
    pub calcs: Vec<LegendCalc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_desc: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipOptions {
    pub mode: String,
    pub sort: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub defaults: FieldDefaults,
    pub overrides: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub custom: GraphFieldConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphFieldConfig {
    pub draw_style: String,
    pub fill_opacity: u8,
    pub line_width: u8,
    pub stacking: Stacking,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stacking {
    pub mode: String,
    pub group: String,
}
