//! `stockroom-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no storage).

pub mod error;
pub mod id;
pub mod timestamp;

pub use error::{DomainError, DomainResult};
pub use id::MovementId;
pub use timestamp::Timestamp;
