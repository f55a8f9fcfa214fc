//! Reconcile a legacy application inventory against the current application
//! catalog, then link or unlink SCA projects on the matched profiles.

pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod model;
pub mod platform;
pub mod prompt;
pub mod reconcile;

pub use config::{Action, AppConfig};
pub use error::{RelinkError, Result};
pub use executor::{Tally, execute};
pub use reconcile::{LegacyIndex, Reconciliation, reconcile};
