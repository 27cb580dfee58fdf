// Infrastructure layer - HTTP adapters, local storage, logging
// Depends on the domain layer and implements its ports

pub mod auth;
pub mod config;
pub mod events;
pub mod http;
pub mod logging;
pub mod persistence;
