//! Minimal client for the Veracode REST APIs used to manage application
//! profiles and their linked SCA projects.
//!
//! Every request is signed with the `VERACODE-HMAC-SHA-256` scheme using the
//! API credentials resolved by [`ApiCredentials::load`].

pub mod client;
pub mod credentials;
pub mod error;
pub mod signing;
pub mod types;

pub use client::VeracodeClient;
pub use credentials::{ApiCredentials, Region};
pub use error::{ClientError, Result};
pub use types::{Application, ApplicationProfileInfo, CredentialInfo};
