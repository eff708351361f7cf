//! Environment-aware backend domain resolution.
//!
//! Classifies the host a client runs under into a deployment [`Environment`]
//! and rewrites backend URLs to the matching tier (`sit`, `uat`, `test`, or
//! production). The resolver core is pure and synchronous.

pub mod config;
pub mod dispatcher;
pub mod environment;
pub mod error;
pub mod logging;
pub mod pattern;
pub mod replacement;
pub mod resolver;

pub use environment::Environment;
pub use error::ResolveError;
pub use pattern::HostPattern;
pub use replacement::ReplacementTable;
pub use resolver::{classify_environment, rewrite_url, DomainResolver};
