//! # rolegate-credentials
//!
//! First-run credential bootstrap for Rolegate.
//!
//! Each configured user gets a random password the first time the process
//! starts. Passwords are persisted to a JSON file and carried forward on
//! later starts, so returning users keep logging in with the same password.
//!
//! - [`password`]: password alphabet and generation
//! - [`store`]: the in-memory [`CredentialStore`]
//! - [`file`]: the persisted [`CredentialFile`]
//! - [`bootstrap`](mod@bootstrap): load, reconcile, persist
//!
//! Passwords are stored in plain text. This is meant for development and
//! test deployments.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bootstrap;
pub mod error;
pub mod file;
pub mod password;
pub mod store;

mod proptests;

pub use bootstrap::{bootstrap, reconcile, Bootstrap};
pub use error::{Error, Result};
pub use file::{CredentialFile, CREDENTIAL_DIRECTORY_ENV, CREDENTIAL_FILE_NAME};
pub use password::{generate_password, ALPHABET, PASSWORD_LENGTH};
pub use store::CredentialStore;
