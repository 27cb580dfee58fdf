use serde::Serialize;

use crate::application::commands::command_handler::Command;

/// Sign in an existing user
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub username: String,
}

impl Command for LoginCommand {}

/// Create a user and sign in
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub username: String,
}

impl Command for RegisterCommand {}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResult {
    pub username: String,
}

#[derive(Debug, Clone, Default)]
pub struct LogoutCommand;

impl Command for LogoutCommand {}
