mod config_service;
mod progress_service;

pub use config_service::{ConfigService, LogLevel};
pub use progress_service::{ProgressService, SessionState};
