//! Authentication: password hashing, token issuance, register/login handlers.

mod handlers;
mod jwt;
pub mod password;

pub use handlers::{login, register};
pub use jwt::JwtSecret;
