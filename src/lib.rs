//! Pokemon catalog TUI
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod cache;
pub mod components;
pub mod effect;
pub mod fetcher;
pub mod logging;
pub mod reducer;
pub mod state;
pub mod view;
