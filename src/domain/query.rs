// Prometheus query model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryExpr {
    pub expr: String,
    pub legend_format: String,
    /// Empty means "assign by position"
    pub ref_id: String,
}

impl QueryExpr {
    pub fn new(expr: impl Into<String>, legend_format: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            legend_format: legend_format.into(),
            ref_id: String::new(),
        }
    }

    pub fn with_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = ref_id.into();
        self
    }
}

/// A query as it appears inside a serialized panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub ref_id: String,
    pub expr: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub legend_format: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "time_series".to_string()
}

/// Turn queries into panel targets, filling blank ref ids with "A", "B", ...
pub fn to_targets(exprs: &[QueryExpr]) -> Vec<Target> {
    exprs
        .iter()
        .enumerate()
        .map(|(i, q)| Target {
            ref_id: if q.ref_id.is_empty() {
                positional_ref_id(i)
            } else {
                q.ref_id.clone()
            },
            expr: q.expr.clone(),
            legend_format: q.legend_format.clone(),
            format: default_format(),
        })
        .collect()
}

// A..Z, then AA, AB, ... like spreadsheet columns
fn positional_ref_id(mut index: usize) -> String {
    let mut id = Vec::new();
    loop {
        id.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    id.reverse();
    String::from_utf8_lossy(&id).into_owned()
}
