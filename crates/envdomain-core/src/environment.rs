//! Deployment environments a client can be connected through.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deployment tier inferred from a host string.
///
/// `Local` is what every unrecognized host degrades to; `Pub` is production
/// (a bare base-domain family with no tier token).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Local,
    Sit,
    Uat,
    Test,
    Pub,
}

impl Environment {
    /// Every environment, in declaration order.
    pub const ALL: [Environment; 5] = [
        Environment::Local,
        Environment::Sit,
        Environment::Uat,
        Environment::Test,
        Environment::Pub,
    ];

    /// Environments that appear as a tier token inside hostnames.
    pub const TIERS: [Environment; 3] = [Environment::Sit, Environment::Uat, Environment::Test];

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Sit => "sit",
            Environment::Uat => "uat",
            Environment::Test => "test",
            Environment::Pub => "pub",
        }
    }

    /// Token used for this environment inside a hostname, if it has one.
    pub fn tier_token(self) -> Option<&'static str> {
        match self {
            Environment::Sit | Environment::Uat | Environment::Test => Some(self.as_str()),
            Environment::Local | Environment::Pub => None,
        }
    }

    /// Maps a captured tier token back to its environment.
    pub fn from_tier_token(token: &str) -> Option<Self> {
        Self::TIERS
            .into_iter()
            .find(|env| env.tier_token() == Some(token))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown environment name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown environment: {0:?} (expected one of local, sit, uat, test, pub)")]
pub struct ParseEnvironmentError(pub String);

impl FromStr for Environment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| ParseEnvironmentError(s.to_string()))
    }
}
