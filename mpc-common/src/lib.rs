//! # MPC Common Library
//!
//! Shared code for the mobile price comparison services:
//! - Database schema, models and repository queries
//! - Configuration loading (TOML + environment + settings table)
//! - Slug helpers and payload validation
//! - Common error type

pub mod config;
pub mod db;
pub mod error;
pub mod slug;
pub mod validation;

pub use error::{Error, Result};
pub use validation::FieldError;
