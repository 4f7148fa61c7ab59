//! Bazaar Application - Gateway core
//!
//! Ports to the outside world, the error classifier, the `ApiGateway`
//! itself and the services that call through it.

pub mod ads;
pub mod classify;
pub mod gateway;
pub mod ports;
pub mod session;

pub use ads::AdService;
pub use classify::{AuthExemptions, CallContext, Classification, Failure, classify};
pub use gateway::{ApiGateway, GatewayConfig};
pub use session::{MemorySessionStore, SessionService};
