//! Anime Fusion API server library.
//!
//! Exposes config, state, error handling, routes and the local upload store
//! so integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod upload_store;
