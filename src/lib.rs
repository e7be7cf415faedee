pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod model;
pub mod parser;
pub mod state;
pub mod timer;
pub mod tui;
pub mod ui;
