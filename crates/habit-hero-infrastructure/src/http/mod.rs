pub mod client;
mod error;

pub use client::{AuthMode, AuthSession, HttpClient, RetryConfig};
pub use error::{to_domain_error, HttpStatusError};
