pub mod auth_commands;
pub mod command_handler;
pub mod handlers;

pub use auth_commands::*;
pub use command_handler::{Command, CommandHandler};
