//! HTTP client for the Engage backend
//!
//! A thin async wrapper over the REST API: JSON headers on every request,
//! bearer authentication from a [`TokenStore`], and error mapping that keeps
//! 422 validation payloads field by field.

pub mod auth;
pub mod config;
pub mod error;
pub mod model;
pub mod token;

mod client;

pub use auth::AuthService;
pub use client::*;
pub use config::ApiConfig;
pub use error::{ApiError, Error, Feedback};
pub use token::{AUTH_TOKEN_KEY, MemoryTokenStore, TokenStore};
