//! Data models for users, request inputs, and the response envelope.

pub mod response;
pub mod user;

pub use response::*;
pub use user::*;
