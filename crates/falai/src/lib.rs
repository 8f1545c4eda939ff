//! fal.ai REST client library.
//!
//! Provides the HTTP API wrapper, typed response payloads, the
//! [`FalGateway`](gateway::FalGateway) and
//! [`FalUploadStore`](storage::FalUploadStore) implementations of the
//! `fusion-core` seams, and an offline [`DevGateway`](dev::DevGateway) for
//! running without an API key.

pub mod api;
pub mod config;
pub mod dev;
pub mod gateway;
pub mod messages;
pub mod storage;
