// Domain layer - Dashboards, widgets and execution results
pub mod dashboard;
pub mod execution;
pub mod metadata;
pub mod widget;
