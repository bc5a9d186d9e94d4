//! Core components of the `earthengine-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`EeClient`] and its builder.
//! - The primary [`EeError`] type.
//! - Wire models for service-issued identifiers.
//! - Internal networking and response-decoding logic.

/// The main client (`EeClient`), builder, and configuration.
pub mod client;
/// The primary error type (`EeError`) for the crate.
pub mod error;
/// Wire models for service-issued identifiers (e.g., `MapId`).
pub mod wire;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::EeClient`
pub use client::{Credentials, EeClient, EeClientBuilder, HttpMethod, ProfileHook, RetryConfig};
pub use error::EeError;
pub use wire::{DownloadId, MapId, ThumbId};
