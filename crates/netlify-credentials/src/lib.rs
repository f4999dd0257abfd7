//! Credential resolution for Netlify hosts
//!
//! This crate provides:
//! - The git credential protocol (`CredentialRequest`)
//! - Token validation against the Netlify API (`HostAccessCheck`)
//! - Token lookup in the stored Netlify config
//! - The browser-based ticket login
//! - `CredentialHelper`, which ties the chain together

mod access;
mod browser;
mod error;
mod helper;
pub mod protocol;
mod reader;

pub use access::*;
pub use browser::*;
pub use error::*;
pub use helper::*;
pub use reader::*;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
