//! Error type for domain resolution.
//!
//! Classification never fails; only rewriting and building a pattern or
//! replacement table can. Every error is terminal for the call that raised it.

use crate::environment::Environment;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The URL's domain does not match the host pattern, so it cannot be retargeted.
    #[error("URL domain not recognized for environment rewriting: {url}")]
    DomainFormat { url: String },

    /// The replacement table has no usable entry (missing environment or bad prefix).
    #[error("replacement table misconfigured: {message}")]
    Configuration { message: String },

    /// Tier tokens or base-domain families cannot form a host pattern.
    #[error("invalid host pattern: {message}")]
    InvalidPattern { message: String },
}

impl ResolveError {
    pub(crate) fn unmapped(env: Environment) -> Self {
        ResolveError::Configuration {
            message: format!("no replacement prefix for environment '{env}'"),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;
