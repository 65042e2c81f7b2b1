// Domain layer - Dashboard value objects
pub mod dashboard;
pub mod error;
pub mod panel;
pub mod query;
