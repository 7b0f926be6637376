//! A personal desktop of draggable, closable mini-app windows hosted in a
//! terminal, with a memory-matching game as the built-in app.
//!
//! The pure core lives in [`desktop`] (window identities, cascade placement,
//! stacking and drag and drop, all in pixels) and [`memory`] (the card game
//! state machine). Everything else maps that core onto terminal cells and
//! drives it from crossterm input.

pub mod component_context;
pub mod components;
pub mod config;
pub mod constants;
pub mod desktop;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod layout;
pub mod memory;
pub mod runner;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;

pub use error::{DeskError, DeskResult};
