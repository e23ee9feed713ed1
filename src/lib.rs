pub mod analytics_client;
pub mod chart;
pub mod config;
pub mod fetchable;
pub mod format;
pub mod host;
pub mod selection;
pub mod store;
pub mod ui;
pub mod ui_framework;
