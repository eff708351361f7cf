//! Domain environment resolution.
//!
//! Two operations, composed by [`rewrite_url`]: classify the client's host
//! into an [`Environment`], then retarget a URL's `.<tier>.<family>` segment
//! using the [`ReplacementTable`]. Both are pure; nothing is cached.

mod authority;

pub use authority::host_span;

use crate::environment::Environment;
use crate::error::{ResolveError, Result};
use crate::pattern::HostPattern;
use crate::replacement::ReplacementTable;

/// Host used when no current host is configured.
pub const DEFAULT_HOST: &str = "localhost";

/// Classifies `host` against `pattern`.
///
/// A match with a tier token yields that tier, a match without one yields
/// [`Environment::Pub`], and anything else (including an empty host) falls
/// back to [`Environment::Local`]. Never fails.
pub fn classify_environment(host: &str, pattern: &HostPattern) -> Environment {
    match pattern.find(host) {
        Some(m) => m.tier.unwrap_or(Environment::Pub),
        None => {
            tracing::debug!(host, "host not recognized, treating as local");
            Environment::Local
        }
    }
}

/// Rewrites `url` for the environment `host` classifies to, using the built-in
/// replacement table.
///
/// # Examples
///
/// - `rewrite_url("https://api.sit.ffan.com/x", "m.ffan.com", pattern)` → `"https://api.ffan.com/x"`
/// - `rewrite_url("https://api.ffan.com/x", "localhost", pattern)` → `"https://api.sit.ffan.com/x"`
pub fn rewrite_url(url: &str, host: &str, pattern: &HostPattern) -> Result<String> {
    rewrite_url_with(url, host, pattern, ReplacementTable::builtin())
}

/// [`rewrite_url`] with an explicit replacement table.
///
/// The prefix for the classified environment must be one `pattern` matches
/// again (see [`HostPattern::accepts_prefix`]); otherwise a second rewrite
/// would stack another label, and the call fails with
/// [`ResolveError::Configuration`].
pub fn rewrite_url_with(
    url: &str,
    host: &str,
    pattern: &HostPattern,
    table: &ReplacementTable,
) -> Result<String> {
    let domain_format = || ResolveError::DomainFormat {
        url: url.to_string(),
    };
    let span = host_span(url).ok_or_else(domain_format)?;
    let m = pattern.find(&url[span.clone()]).ok_or_else(domain_format)?;

    let env = classify_environment(host, pattern);
    let prefix = table.prefix(env)?;
    if !pattern.accepts_prefix(prefix) {
        return Err(unmatchable_prefix(env, prefix));
    }

    let start = span.start + m.segment.start;
    let end = span.start + m.segment.end;
    let rewritten = format!("{}.{}{}{}", &url[..start], prefix, m.family, &url[end..]);
    tracing::debug!(%env, from = url, to = %rewritten, "rewrote URL");
    Ok(rewritten)
}

/// Checks every environment `pattern` can classify to against `table`.
///
/// Environments the pattern cannot produce (a tier it does not recognize)
/// are not checked.
pub fn check_compatible(pattern: &HostPattern, table: &ReplacementTable) -> Result<()> {
    for env in pattern.reachable() {
        let prefix = table.prefix(env)?;
        if !pattern.accepts_prefix(prefix) {
            return Err(unmatchable_prefix(env, prefix));
        }
    }
    Ok(())
}

fn unmatchable_prefix(env: Environment, prefix: &str) -> ResolveError {
    ResolveError::Configuration {
        message: format!(
            "prefix {prefix:?} for '{env}' is not a tier token of the host pattern"
        ),
    }
}

/// Owned resolver configuration: host pattern, replacement table and the
/// host the client is currently running under.
///
/// The `Option<&str>` host arguments stand in for "use the current host";
/// an empty string is treated the same as `None`.
#[derive(Debug, Clone)]
pub struct DomainResolver {
    pattern: HostPattern,
    table: ReplacementTable,
    current_host: String,
}

impl DomainResolver {
    pub fn new(current_host: impl Into<String>) -> Self {
        Self {
            pattern: HostPattern::default(),
            table: ReplacementTable::default(),
            current_host: current_host.into(),
        }
    }

    /// Resolver over an explicit pattern and table, rejected unless every
    /// environment the pattern yields has a prefix it can match again.
    pub fn from_parts(
        current_host: impl Into<String>,
        pattern: HostPattern,
        table: ReplacementTable,
    ) -> Result<Self> {
        check_compatible(&pattern, &table)?;
        Ok(Self {
            pattern,
            table,
            current_host: current_host.into(),
        })
    }

    pub fn with_pattern(self, pattern: HostPattern) -> Result<Self> {
        Self::from_parts(self.current_host, pattern, self.table)
    }

    pub fn with_table(self, table: ReplacementTable) -> Result<Self> {
        Self::from_parts(self.current_host, self.pattern, table)
    }

    pub fn pattern(&self) -> &HostPattern {
        &self.pattern
    }

    pub fn table(&self) -> &ReplacementTable {
        &self.table
    }

    pub fn current_host(&self) -> &str {
        &self.current_host
    }

    pub fn classify(&self, host: Option<&str>) -> Environment {
        classify_environment(self.host_or_current(host), &self.pattern)
    }

    pub fn rewrite(&self, url: &str, host: Option<&str>) -> Result<String> {
        rewrite_url_with(url, self.host_or_current(host), &self.pattern, &self.table)
    }

    fn host_or_current<'a>(&'a self, host: Option<&'a str>) -> &'a str {
        host.filter(|h| !h.is_empty())
            .unwrap_or(self.current_host.as_str())
    }
}

impl Default for DomainResolver {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}
