//! Text front-end: a numbered menu read from standard input.

mod menu;
mod prompt;
mod render;

pub use menu::{execute, Command, Menu, MenuAction, MenuState, Outcome};
pub use prompt::Prompt;
