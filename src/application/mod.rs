// Application layer - Dashboard definitions, registry and publishing
pub mod cert_manager;
pub mod dashboard_uploader;
pub mod publisher;
pub mod registry;
pub mod runner;
