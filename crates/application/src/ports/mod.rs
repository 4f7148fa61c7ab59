//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the gateway core and external systems.
//! Each port is a trait implemented by adapters in the infrastructure layer.

mod http_transport;
mod session_store;

pub use http_transport::{HttpTransport, PreparedRequest, TransportError};
pub use session_store::{SessionStore, SessionStoreError};
