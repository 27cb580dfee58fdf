use anyhow::{Context, Result};
use habit_hero_domain::profile::{ProfileUpdate, UserProfile};
use habit_hero_domain::session::AuthToken;

const USER_DATA_PATH: &str = "/api/user";

impl super::HttpClient {
    /// GET /api/user with the short session-start timeout
    pub async fn get_user_data(&self, token: Option<&AuthToken>) -> Result<UserProfile> {
        let url = self.api.endpoint(USER_DATA_PATH)?;
        let timeout = self.timeouts.user_data_load;

        self.execute_with_retry("Load user data", || {
            let request = Self::authorize(self.client.get(url.clone()), token).timeout(timeout);

            async move {
                let response = request
                    .send()
                    .await
                    .context("Failed to send user data request")?;
                let response = Self::ensure_success("Load user data", response).await?;

                log::debug!("[http] user data response status: {}", response.status());

                response
                    .json::<UserProfile>()
                    .await
                    .context("Failed to parse user data")
            }
        })
        .await
    }

    /// POST /api/user with a partial record; the backend merges it
    pub async fn post_user_data(
        &self,
        token: Option<&AuthToken>,
        update: &ProfileUpdate,
    ) -> Result<()> {
        let url = self.api.endpoint(USER_DATA_PATH)?;

        self.execute_with_retry("Save user data", || {
            let request = Self::authorize(self.client.post(url.clone()), token).json(update);

            async move {
                let response = request
                    .send()
                    .await
                    .context("Failed to send user data update")?;
                Self::ensure_success("Save user data", response).await?;
                Ok(())
            }
        })
        .await
    }
}
