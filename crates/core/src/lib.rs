//! Domain logic for anime fusion: the character and fusion-mode catalog,
//! credit pricing, editorial recommendations, upload constraints, and the
//! fusion orchestration that sits in front of a generation gateway.
//!
//! Nothing in this crate performs I/O directly. Gateways and upload stores
//! are reached through the traits in [`gateway`] and [`upload`].

pub mod catalog;
pub mod error;
pub mod fusion;
pub mod gateway;
pub mod pricing;
pub mod prompt;
pub mod recommendation;
pub mod types;
pub mod upload;
