use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use habit_hero_domain::events::event_bus::TypedEventHandlerWrapper;
use habit_hero_domain::events::progress_events::{
    DailyBonusGranted, LeveledUp, PersonalRecordBeaten,
};
use habit_hero_domain::events::EventBus;
use habit_hero_domain::profile::UserDataRepository;
use habit_hero_domain::session::{AuthGateway, TokenStore};
use habit_hero_infrastructure::auth::HttpAuthGateway;
use habit_hero_infrastructure::config::ApiConfig;
use habit_hero_infrastructure::events::InMemoryEventBus;
use habit_hero_infrastructure::http::HttpClient;
use habit_hero_infrastructure::persistence::{FileTokenStore, HttpUserDataRepository};

use crate::application::commands::handlers::*;
use crate::application::event_handlers::{AnnouncementEventHandler, Announcements};
use crate::application::queries::AuthQueryService;
use crate::application::services::{ConfigService, ProgressService, SessionState};
use crate::presentation::state::{AppState, CommandHandlers, Queries, Services};

/// Wire the adapters for `api` into an [`AppState`]
pub async fn build_app_state(config: ConfigService, api: ApiConfig) -> Result<AppState> {
    info!("[bootstrap] using backend {}", api.base_url());

    let client = Arc::new(HttpClient::new(api)?);
    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::in_dir(config.config_dir()));

    let repo: Arc<dyn UserDataRepository> =
        Arc::new(HttpUserDataRepository::new(client.clone(), tokens.clone()));
    let gateway: Arc<dyn AuthGateway> = Arc::new(HttpAuthGateway::new(client, tokens));

    let announcements = Announcements::new();
    let event_bus = Arc::new(InMemoryEventBus::new());
    let handler = AnnouncementEventHandler::new(announcements.clone());

    event_bus
        .subscribe(Arc::new(
            TypedEventHandlerWrapper::<LeveledUp, _>::new(handler.clone()),
        ))
        .await;
    event_bus
        .subscribe(Arc::new(
            TypedEventHandlerWrapper::<DailyBonusGranted, _>::new(handler.clone()),
        ))
        .await;
    event_bus
        .subscribe(Arc::new(
            TypedEventHandlerWrapper::<PersonalRecordBeaten, _>::new(handler),
        ))
        .await;

    let event_bus: Arc<dyn EventBus> = event_bus;
    let session = Arc::new(SessionState::new());

    Ok(AppState {
        command_handlers: CommandHandlers {
            auth: Arc::new(AuthCommandHandler::new(gateway.clone())),
            logout: Arc::new(LogoutCommandHandler::new(gateway.clone(), session.clone())),
        },
        services: Services {
            progress: Arc::new(ProgressService::new(repo, event_bus, session.clone())),
            config: Arc::new(config),
        },
        queries: Queries {
            auth: Arc::new(AuthQueryService::new(gateway)),
        },
        session,
        announcements,
    })
}
