//! # Formfill Config
//!
//! TOML configuration for the formfill host: where records are stored,
//! how long a learn capture stays valid, and how logs are written.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
