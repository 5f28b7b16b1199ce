//! Core components shared by every stage of the pipeline.
//!
//! This module contains the foundational building blocks:
//! - The shared HTTP [`Client`] and its builder.
//! - The primary [`Error`] type.

/// The shared HTTP client (`Client`), builder, and retry configuration.
pub mod client;
/// The primary error type (`Error`) for the crate.
pub mod error;

// convenient re-exports so most code can just `use crate::core::Client`
pub use client::{Client, ClientBuilder};
pub use error::Error;
