//! `stockbatch-core` — shared building blocks.
//!
//! This crate contains **pure** primitives used by the batch domain and the
//! client (no IO, no HTTP).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::BatchId;
pub use value_object::ValueObject;
