//! Paragraph typing trainer: a catalog of levelled practice paragraphs, a
//! session controller that times and scores attempts, and the terminal UI
//! around them. The binary in `main.rs` wires these to a real terminal.

pub mod app;
pub mod catalog;
pub mod config;
pub mod cue;
pub mod event;
pub mod grammar;
pub mod session;
pub mod speech;
pub mod ui;
