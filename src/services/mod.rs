pub mod credentials;
pub mod providers;

pub use credentials::{CredentialStore, ServiceAccountKey};
