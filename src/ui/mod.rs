//! Terminal UI: intro animation, the game view and the key-driven app loop.

mod app;
pub mod board_widget;
mod game_view;
mod intro;

pub use app::{App, UiConfig};
