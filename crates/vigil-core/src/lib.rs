//! Core types, configuration, and error handling for vigil.
//!
//! This crate provides the shared foundation used by the other vigil crates:
//! - [`VigilError`] — unified error type using `thiserror`
//! - [`VigilConfig`] — configuration loaded from `.vigil.toml` and the environment
//! - Shared types: [`CommitRef`], [`CommitRange`], [`ChangeSet`], and the
//!   text-file allowlist used before anything is sent to a model

mod config;
mod error;
mod types;

pub use config::{LlmConfig, ReviewConfig, VigilConfig};
pub use error::VigilError;
pub use types::{filter_text_paths, is_text_path, ChangeSet, CommitRange, CommitRef};

/// A convenience `Result` type for vigil operations.
pub type Result<T> = std::result::Result<T, VigilError>;
