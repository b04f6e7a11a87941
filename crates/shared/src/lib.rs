//! Shared types, errors, and configuration for Caixa.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management
//! - JWT claims and token handling

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::{AppConfig, MissingProductPolicy};
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, JwtService, JwtSettings};
