//! Library entry for Popstar exposing core logic for integration tests.

pub mod app;
pub mod args;
pub mod error;
pub mod events;
pub mod install;
pub mod logic;
pub mod settings;
pub mod sources;
pub mod state;
pub mod theme;
pub mod ui;
pub mod util;
