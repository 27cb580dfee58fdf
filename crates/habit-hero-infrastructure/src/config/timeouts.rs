use std::time::Duration;

/// Timeout durations used by the HTTP adapters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Loading the user record at session start
    pub user_data_load: Duration,

    /// Login / register form submission
    pub auth_request: Duration,

    /// Any other HTTP request
    pub http_request: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        GLOBAL_TIMEOUT_CONFIG.clone()
    }
}

impl TimeoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global() -> &'static Self {
        &GLOBAL_TIMEOUT_CONFIG
    }
}

static GLOBAL_TIMEOUT_CONFIG: TimeoutConfig = TimeoutConfig {
    user_data_load: Duration::from_secs(5),
    auth_request: Duration::from_secs(5),
    http_request: Duration::from_secs(30),
};
