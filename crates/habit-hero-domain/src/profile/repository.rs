use async_trait::async_trait;

use super::{ProfileUpdate, UserProfile};
use crate::shared::DomainError;

/// Access to the external user-data store
#[async_trait]
pub trait UserDataRepository: Send + Sync {
    /// Load the signed-in user's record, the session's source of truth
    async fn load(&self) -> Result<UserProfile, DomainError>;

    /// Send a partial update; the store merges it into the existing record
    async fn save(&self, update: &ProfileUpdate) -> Result<(), DomainError>;
}
