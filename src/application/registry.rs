// Registry of buildable dashboards, keyed by the name given on the command line
use crate::application::cert_manager::cert_manager_dashboard;
use crate::domain::dashboard::Dashboard;
use crate::domain::error::{DashboardError, Result};

pub type DashboardFn = fn() -> Result<Dashboard>;

const DASHBOARDS: &[(&str, DashboardFn)] = &[("cert-manager", cert_manager_dashboard)];

#[derive(Debug, Clone, Copy)]
pub struct DashboardRegistry {
    entries: &'static [(&'static str, DashboardFn)],
}

impl DashboardRegistry {
    pub fn builtin() -> Self {
        Self {
            entries: DASHBOARDS,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn lookup(&self, name: &str) -> Result<DashboardFn> {
        tracing::debug!("Looking up dashboard {}", name);
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, build)| *build)
            .ok_or_else(|| DashboardError::UnknownDashboard {
                name: name.to_string(),
                known: self.names().collect::<Vec<_>>().join(", "),
            })
    }
}
