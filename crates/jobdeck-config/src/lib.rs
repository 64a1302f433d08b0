//! KDL configuration parsing for the jobdeck dashboard service.
//!
//! This crate handles parsing of:
//! - Database connection settings
//! - HTTP server settings

pub mod error;
pub mod service;

pub use error::{ConfigError, ConfigResult};
pub use service::{
    DatabaseConfig, ServerConfig, ServiceConfig, load_service_config, parse_service_config,
};
