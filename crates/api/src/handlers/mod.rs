pub mod catalog;
pub mod fusion;
pub mod pricing;
pub mod upload;
