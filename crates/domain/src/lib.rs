//! Bazaar Domain - Core gateway types
//!
//! This crate defines the domain model for the Bazaar API gateway:
//! request descriptors, responses, the session snapshot, the normalized
//! error taxonomy and the runtime configuration model.
//! All types here are pure Rust with no I/O dependencies.

pub mod ad;
pub mod api_error;
pub mod config;
pub mod error;
pub mod request;
pub mod response;
pub mod session;

pub use ad::{Ad, AdImage, DEFAULT_AD_IMAGE};
pub use api_error::{ApiError, ApiErrorKind};
pub use config::{AppConfig, Environment};
pub use error::{DomainError, DomainResult};
pub use request::{FormPart, HttpMethod, RequestBody, RequestDescriptor};
pub use response::{ApiResponse, StatusCode};
pub use session::{SessionKey, SessionSnapshot};
