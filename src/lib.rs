// Library surface for headless/integration tests and the binary.
// Sessions never touch the terminal; the binary wires in crossterm/ratatui.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod menu;
pub mod metrics;
pub mod render;
pub mod runtime;
pub mod scrolling;
pub mod text_source;
pub mod typing;
pub mod ui;
