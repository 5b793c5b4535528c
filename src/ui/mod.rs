//! Terminal UI: board view with a highlighted drop column, status line and
//! the resume-or-new-game prompt.

mod app;
mod game_view;

pub use app::{App, StatusFeed};
