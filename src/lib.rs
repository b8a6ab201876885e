//! # tui-2048
//!
//! The sliding-tile merge puzzle 2048, played in the terminal. Shift every
//! tile left, right, up or down; equal neighbours merge and double, a new
//! tile appears after each move that changed the board, and the game ends
//! when a 2048 tile shows up or nothing can move any more.
//!
//! ## Modules
//!
//! - [`game`] — Grid, directions and the board engine
//! - [`store`] — Best-score persistence
//! - [`ui`] — Terminal UI built with Ratatui
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod store;
pub mod ui;
