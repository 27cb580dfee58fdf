use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use habit_hero_domain::session::{AuthGateway, Username};
use habit_hero_domain::shared::DomainError;

use crate::application::commands::auth_commands::*;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::services::SessionState;

/// Handles login and registration against the auth gateway
pub struct AuthCommandHandler {
    gateway: Arc<dyn AuthGateway>,
}

impl AuthCommandHandler {
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl CommandHandler<LoginCommand> for AuthCommandHandler {
    type Result = AuthResult;

    async fn handle(&self, cmd: LoginCommand) -> Result<Self::Result, DomainError> {
        let username = Username::parse(&cmd.username)?;
        info!("Handling LoginCommand for user: {}", username);

        let user = self.gateway.login(&username).await?;
        Ok(AuthResult {
            username: user.username,
        })
    }
}

#[async_trait]
impl CommandHandler<RegisterCommand> for AuthCommandHandler {
    type Result = AuthResult;

    async fn handle(&self, cmd: RegisterCommand) -> Result<Self::Result, DomainError> {
        let username = Username::parse(&cmd.username)?;
        info!("Handling RegisterCommand for user: {}", username);

        let user = self.gateway.register(&username).await?;
        Ok(AuthResult {
            username: user.username,
        })
    }
}

/// Ends the remote session and drops the loaded profile
pub struct LogoutCommandHandler {
    gateway: Arc<dyn AuthGateway>,
    session: Arc<SessionState>,
}

impl LogoutCommandHandler {
    pub fn new(gateway: Arc<dyn AuthGateway>, session: Arc<SessionState>) -> Self {
        Self { gateway, session }
    }
}

#[async_trait]
impl CommandHandler<LogoutCommand> for LogoutCommandHandler {
    type Result = ();

    async fn handle(&self, _cmd: LogoutCommand) -> Result<Self::Result, DomainError> {
        info!("Handling LogoutCommand");

        self.session.clear().await;
        self.gateway.logout().await
    }
}
