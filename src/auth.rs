//! Client-credentials configuration, bearer-token model, and secret redaction.

pub mod config;
pub mod secret;
pub mod token;

pub use config::*;
pub use secret::*;
pub use token::*;
