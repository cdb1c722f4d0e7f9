//! # SmartShop Common Library
//!
//! Shared code for the SmartShop backend including:
//! - API request/response types (Detection, prediction, products, orders)
//! - Database initialization, models, and seed catalog
//! - Configuration loading and root folder resolution
//! - Common error types

pub mod api;
pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
