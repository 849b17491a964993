//! Identity-provider client
//!
//! REST client for the provider's token-introspection, token, and admin
//! endpoints. The gateway never inspects the payloads it relays beyond the
//! `sub` claim of a userinfo object.

mod client;
mod types;

pub use client::ProviderClient;
pub use types::CreateUserRequest;
