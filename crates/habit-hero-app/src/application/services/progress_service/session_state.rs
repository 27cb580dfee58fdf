use tokio::sync::Mutex;

use habit_hero_domain::profile::UserProfile;
use habit_hero_domain::shared::DomainError;

/// The signed-in user's record for the current session.
/// Passed explicitly to whoever needs it; there is no global instance.
#[derive(Default)]
pub struct SessionState {
    profile: Mutex<Option<UserProfile>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn replace(&self, profile: UserProfile) {
        *self.profile.lock().await = Some(profile);
    }

    pub async fn clear(&self) {
        *self.profile.lock().await = None;
    }

    pub async fn is_loaded(&self) -> bool {
        self.profile.lock().await.is_some()
    }

    /// Run `f` against the loaded profile while holding the session lock
    pub async fn with_profile<R, F>(&self, f: F) -> Result<R, DomainError>
    where
        F: FnOnce(&mut UserProfile) -> Result<R, DomainError>,
    {
        let mut guard = self.profile.lock().await;
        let profile = guard.as_mut().ok_or_else(|| {
            DomainError::Validation("No user data loaded for this session".to_string())
        })?;
        f(profile)
    }
}
