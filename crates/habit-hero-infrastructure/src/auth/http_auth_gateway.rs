use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use habit_hero_domain::session::{AuthGateway, AuthToken, AuthenticatedUser, TokenStore, Username};
use habit_hero_domain::DomainError;

use crate::http::{to_domain_error, AuthMode, HttpClient, HttpStatusError};

/// Form-based auth against the backend; the session id becomes the bearer token
pub struct HttpAuthGateway {
    client: Arc<HttpClient>,
    tokens: Arc<dyn TokenStore>,
}

impl HttpAuthGateway {
    pub fn new(client: Arc<HttpClient>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { client, tokens }
    }

    async fn authenticate(
        &self,
        mode: AuthMode,
        username: &Username,
    ) -> Result<AuthenticatedUser, DomainError> {
        let session = self
            .client
            .submit_auth_form(mode, username)
            .await
            .map_err(|e| match e.downcast_ref::<HttpStatusError>() {
                Some(status_err) if status_err.status.is_client_error() => {
                    DomainError::Unauthorized(status_err.detail.clone())
                }
                _ => to_domain_error(e),
            })?;

        match session.session_id.as_deref().map(AuthToken::new) {
            Some(Ok(token)) => {
                self.tokens.save(&token)?;
                info!("[auth] {} succeeded for {}, token saved", mode.label(), username);
            }
            _ => warn!(
                "[auth] {} for {} returned no session id, requests will be anonymous",
                mode.label(),
                username
            ),
        }

        Ok(AuthenticatedUser {
            username: session
                .username
                .unwrap_or_else(|| username.as_str().to_string()),
        })
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, username: &Username) -> Result<AuthenticatedUser, DomainError> {
        self.authenticate(AuthMode::Login, username).await
    }

    async fn register(&self, username: &Username) -> Result<AuthenticatedUser, DomainError> {
        self.authenticate(AuthMode::Register, username).await
    }

    async fn current_user(&self) -> Result<Option<AuthenticatedUser>, DomainError> {
        let Some(token) = self.tokens.load()? else {
            return Ok(None);
        };

        let username = self
            .client
            .fetch_current_user(Some(&token))
            .await
            .map_err(to_domain_error)?;

        Ok(username.map(|username| AuthenticatedUser { username }))
    }

    /// The local token is dropped first; a failing backend call does not undo that
    async fn logout(&self) -> Result<(), DomainError> {
        let token = self.tokens.load()?;
        self.tokens.clear()?;

        if let Err(e) = self.client.logout(token.as_ref()).await {
            warn!("[auth] backend logout failed: {:#}", e);
        }

        info!("[auth] logged out");
        Ok(())
    }
}
