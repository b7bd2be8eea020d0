//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Coordinates config, the worker supervisor, the readiness
//! probe, and the window with its webview.

mod core;
mod event_handler;
mod init;
mod polling;
mod shutdown;
mod types;
mod worker;

pub use core::BlurkitApp;
