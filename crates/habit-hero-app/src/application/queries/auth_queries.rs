use std::sync::Arc;

use habit_hero_domain::session::{AuthGateway, AuthenticatedUser};
use habit_hero_domain::shared::DomainError;

pub struct AuthQueryService {
    gateway: Arc<dyn AuthGateway>,
}

impl AuthQueryService {
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self { gateway }
    }

    /// The signed-in user, or `None` when the stored session is missing or expired
    pub async fn current_user(&self) -> Result<Option<AuthenticatedUser>, DomainError> {
        self.gateway.current_user().await
    }
}
