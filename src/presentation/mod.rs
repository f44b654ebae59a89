// Presentation layer - Terminal dashboard
pub mod app;
pub mod ui;
