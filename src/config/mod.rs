//! Application configuration, loaded from environment variables.
//!
//! - [`cors`]: CORS allowed origins
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: JWT secret and token lifetime

pub mod cors;
pub mod database;
pub mod jwt;
