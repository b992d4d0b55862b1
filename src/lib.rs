//! ascii-mirror library crate.
//!
//! Frame-to-text pipeline (`ascii`), video input (`camera`), the capture
//! state machine (`controller`) and the terminal front-end around them.

pub mod ascii;
pub mod camera;
pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod event_loop;
pub mod input;
pub mod logging;
pub mod output;
pub mod session;
pub mod terminal;

pub use error::AppError;
