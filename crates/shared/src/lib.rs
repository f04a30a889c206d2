//! Shared types, errors, and configuration for Folio.
//!
//! This crate holds the vocabulary common to every other crate in the
//! workspace: typed identifiers, the application error taxonomy, and
//! configuration loading. It has no web or database dependencies.

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
