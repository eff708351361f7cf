//! Replacement table: environment → domain prefix substituted before the family.

use crate::environment::Environment;
use crate::error::{ResolveError, Result};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Total mapping from [`Environment`] to the prefix written in front of the
/// base-domain family. Construction checks totality, so [`ReplacementTable::prefix`]
/// only fails if that check is bypassed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementTable {
    prefixes: BTreeMap<Environment, String>,
}

impl ReplacementTable {
    /// Builds a table, rejecting maps that miss an environment or carry a
    /// prefix that is neither empty nor dot-terminated.
    pub fn new(prefixes: BTreeMap<Environment, String>) -> Result<Self> {
        let missing: Vec<&str> = Environment::ALL
            .into_iter()
            .filter(|env| !prefixes.contains_key(env))
            .map(Environment::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(ResolveError::Configuration {
                message: format!("missing prefix for {}", missing.join(", ")),
            });
        }
        for (env, prefix) in &prefixes {
            if !prefix.is_empty() && (!prefix.ends_with('.') || prefix.starts_with('.')) {
                return Err(ResolveError::Configuration {
                    message: format!(
                        "prefix {prefix:?} for '{env}' must be empty or a label ending in '.'"
                    ),
                });
            }
        }
        Ok(Self { prefixes })
    }

    /// Built-in table. Local development targets the sit backend.
    pub fn builtin() -> &'static ReplacementTable {
        static BUILTIN: OnceLock<ReplacementTable> = OnceLock::new();
        BUILTIN.get_or_init(|| ReplacementTable {
            prefixes: Environment::ALL
                .into_iter()
                .map(|env| (env, default_prefix(env).to_string()))
                .collect(),
        })
    }

    /// Built-in table with selected entries replaced.
    pub fn with_overrides(overrides: &BTreeMap<Environment, String>) -> Result<Self> {
        let mut prefixes = Self::builtin().prefixes.clone();
        for (env, prefix) in overrides {
            prefixes.insert(*env, prefix.clone());
        }
        Self::new(prefixes)
    }

    pub fn prefix(&self, env: Environment) -> Result<&str> {
        self.prefixes
            .get(&env)
            .map(String::as_str)
            .ok_or_else(|| ResolveError::unmapped(env))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Environment, &str)> {
        self.prefixes.iter().map(|(env, p)| (*env, p.as_str()))
    }
}

impl Default for ReplacementTable {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

fn default_prefix(env: Environment) -> &'static str {
    match env {
        Environment::Local | Environment::Sit => "sit.",
        Environment::Uat => "uat.",
        Environment::Test => "test.",
        Environment::Pub => "",
    }
}
