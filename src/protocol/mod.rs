//! Wire messages and request validation for the generation endpoint.

mod messages;

pub use messages::*;
