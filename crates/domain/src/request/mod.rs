//! Outbound request types

mod body;
mod descriptor;
mod method;

pub use body::{FormPart, RequestBody};
pub use descriptor::RequestDescriptor;
pub use method::HttpMethod;
