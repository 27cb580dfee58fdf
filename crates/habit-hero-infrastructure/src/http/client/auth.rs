use anyhow::{Context, Result};
use habit_hero_domain::session::{AuthToken, Username};
use log::info;

use super::types::{AuthMode, AuthSession, MeResponse};
use crate::http::error::HttpStatusError;

const CURRENT_USER_PATH: &str = "/api/auth/me";
const LOGOUT_PATH: &str = "/api/auth/logout";

impl super::HttpClient {
    /// Submit the login or registration form. Not retried: registration is not idempotent.
    pub async fn submit_auth_form(
        &self,
        mode: AuthMode,
        username: &Username,
    ) -> Result<AuthSession> {
        let url = self.api.endpoint(mode.path())?;
        let operation = format!("{} for {}", mode.label(), username);

        info!("[auth] attempting {} with username: {}", mode.label(), username);

        let response = self
            .client
            .post(url)
            .form(&[("username", username.as_str())])
            .timeout(self.timeouts.auth_request)
            .send()
            .await
            .with_context(|| format!("Failed to send {} request", mode.label()))?;

        let response = Self::ensure_success(&operation, response).await?;

        response
            .json::<AuthSession>()
            .await
            .context("Failed to parse auth response")
    }

    /// GET /api/auth/me; `None` when the backend does not recognise the session
    pub async fn fetch_current_user(&self, token: Option<&AuthToken>) -> Result<Option<String>> {
        let url = self.api.endpoint(CURRENT_USER_PATH)?;

        let result = self
            .execute_with_retry("Check auth status", || {
                let request = Self::authorize(self.client.get(url.clone()), token)
                    .timeout(self.timeouts.auth_request);

                async move {
                    let response = request
                        .send()
                        .await
                        .context("Failed to send auth status request")?;
                    let response = Self::ensure_success("Check auth status", response).await?;
                    response
                        .json::<MeResponse>()
                        .await
                        .context("Failed to parse auth status")
                }
            })
            .await;

        match result {
            Ok(me) => Ok(Some(me.username)),
            Err(e) => match e.downcast_ref::<HttpStatusError>() {
                Some(status_err) if status_err.is_unauthorized() => Ok(None),
                _ => Err(e),
            },
        }
    }

    /// POST /api/auth/logout
    pub async fn logout(&self, token: Option<&AuthToken>) -> Result<()> {
        let url = self.api.endpoint(LOGOUT_PATH)?;

        let response = Self::authorize(self.client.post(url), token)
            .send()
            .await
            .context("Failed to send logout request")?;

        Self::ensure_success("Logout", response).await?;
        Ok(())
    }
}
