//! Identity Gateway Library
//!
//! Thin HTTP gateway in front of a Keycloak-style identity provider.
//!
//! # Features
//!
//! - **Token introspection**: validates caller bearer tokens against the
//!   provider's userinfo endpoint (no local JWT parsing)
//! - **Admin proxying**: user and group administration via a service-account
//!   token obtained per call with the client-credentials grant
//! - **Interactive docs**: descriptor-driven API explorer at `/docs`
//!
//! The gateway is stateless: every operation is one or two sequential
//! upstream calls with no caching, retries, or shared mutable state.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod provider;

pub use error::{Error, Result};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup tracing/logging
pub fn setup_tracing(level: &str, format: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        Some("json") => {
            subscriber.with(fmt::layer().json()).init();
        }
        _ => {
            subscriber.with(fmt::layer()).init();
        }
    }

    Ok(())
}
