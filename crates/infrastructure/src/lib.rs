//! Bazaar Infrastructure - Adapters and implementations
//!
//! Concrete implementations of the ports defined in the application layer,
//! plus configuration loading and logging setup for binaries.

pub mod adapters;
pub mod config;
pub mod logging;
pub mod persistence;

pub use adapters::ReqwestTransport;
pub use crate::config::{ConfigError, load_config, load_config_from, session_path};
pub use persistence::FileSessionStore;
