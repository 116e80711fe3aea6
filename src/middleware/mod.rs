//! Request-processing middleware and extractors.
//!
//! - [`auth`]: `AuthUser` extractor that verifies the bearer token
//! - [`role`]: role gate with per-operation allowed-role sets, declared
//!   either as route layers at registration time or as typed extractors
//!
//! # Authentication flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::AuthUser`] verifies the JWT signature and expiry (401 on failure)
//! 3. The role gate checks the claim role against the operation's allowed set
//!    (403 on mismatch)
//! 4. Handler executes if both checks pass

pub mod auth;
pub mod role;
