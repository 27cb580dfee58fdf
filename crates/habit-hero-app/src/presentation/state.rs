use std::sync::Arc;

use crate::application::commands::handlers::*;
use crate::application::event_handlers::Announcements;
use crate::application::queries::AuthQueryService;
use crate::application::services::{ConfigService, ProgressService, SessionState};

pub struct CommandHandlers {
    pub auth: Arc<AuthCommandHandler>,
    pub logout: Arc<LogoutCommandHandler>,
}

pub struct Services {
    pub progress: Arc<ProgressService>,
    pub config: Arc<ConfigService>,
}

pub struct Queries {
    pub auth: Arc<AuthQueryService>,
}

/// Everything a command needs, built once per invocation
pub struct AppState {
    pub session: Arc<SessionState>,
    pub command_handlers: CommandHandlers,
    pub services: Services,
    pub queries: Queries,
    pub announcements: Announcements,
}
