use async_trait::async_trait;

use super::{AuthToken, AuthenticatedUser, Username};
use crate::shared::DomainError;

/// Remote authentication service
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, username: &Username) -> Result<AuthenticatedUser, DomainError>;

    async fn register(&self, username: &Username) -> Result<AuthenticatedUser, DomainError>;

    /// `None` when no valid session exists
    async fn current_user(&self) -> Result<Option<AuthenticatedUser>, DomainError>;

    async fn logout(&self) -> Result<(), DomainError>;
}

/// Local storage for the bearer token
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<AuthToken>, DomainError>;

    fn save(&self, token: &AuthToken) -> Result<(), DomainError>;

    fn clear(&self) -> Result<(), DomainError>;
}
