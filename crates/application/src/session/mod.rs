//! Session state: storage and lifecycle.

mod memory_store;
mod service;

pub use memory_store::MemorySessionStore;
pub use service::SessionService;
