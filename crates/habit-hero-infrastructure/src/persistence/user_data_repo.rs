use async_trait::async_trait;
use std::sync::Arc;

use habit_hero_domain::profile::{ProfileUpdate, UserDataRepository, UserProfile};
use habit_hero_domain::session::TokenStore;
use habit_hero_domain::DomainError;

use crate::http::{to_domain_error, HttpClient};

/// User-data store reached over `GET/POST /api/user`
pub struct HttpUserDataRepository {
    client: Arc<HttpClient>,
    tokens: Arc<dyn TokenStore>,
}

impl HttpUserDataRepository {
    pub fn new(client: Arc<HttpClient>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { client, tokens }
    }
}

#[async_trait]
impl UserDataRepository for HttpUserDataRepository {
    async fn load(&self) -> Result<UserProfile, DomainError> {
        let token = self.tokens.load()?;
        self.client
            .get_user_data(token.as_ref())
            .await
            .map_err(to_domain_error)
    }

    async fn save(&self, update: &ProfileUpdate) -> Result<(), DomainError> {
        if update.is_empty() {
            return Ok(());
        }

        let token = self.tokens.load()?;
        self.client
            .post_user_data(token.as_ref(), update)
            .await
            .map_err(to_domain_error)
    }
}
