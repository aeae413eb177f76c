//! Business logic: user registration and login.

pub mod auth;

pub use auth::AuthService;
