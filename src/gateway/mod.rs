//! Gateway HTTP surface

pub mod docs;
pub mod router;
pub mod server;

pub use server::Gateway;
