//! # Connect Four
//!
//! Rules engine and persisted state machine for two-player Connect Four,
//! played in the terminal with Ratatui. An unfinished game survives restarts:
//! only the grid is saved, and whose turn it is gets derived on load.
//!
//! ## Modules
//!
//! - [`game`] - Core game logic: board, player, state machine
//! - [`session`] - Controller tying the game to storage and the UI
//! - [`store`] - Saved-board slot: JSON file or in-memory
//! - [`ui`] - Terminal UI: game view, resume prompt
//! - [`config`] - TOML configuration loading and validation
//! - [`error`] - Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod session;
pub mod store;
pub mod ui;
