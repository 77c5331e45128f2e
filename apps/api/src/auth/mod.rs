//! Authentication and authorization.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- bearer token issuance and validation.
//! - [`extractor`] -- the `CurrentUser` extractor guarding protected routes.
//! - [`handlers`] -- register, token, me, logout.

pub mod extractor;
pub mod handlers;
pub mod jwt;
pub mod password;

pub use extractor::CurrentUser;
