//! Request types for HTTP handlers.

mod generations;
mod gradings;
mod validations;

pub use generations::*;
pub use gradings::*;
pub use validations::*;
