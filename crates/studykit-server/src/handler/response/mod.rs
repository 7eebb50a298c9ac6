//! Response types for HTTP handlers.

mod error_response;
mod generations;
mod gradings;
mod monitors;

pub use error_response::ErrorResponse;
pub use generations::*;
pub use gradings::*;
pub use monitors::*;
