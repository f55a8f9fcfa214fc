pub mod credentials;
pub mod find;
pub mod reconcile;
pub mod run;
