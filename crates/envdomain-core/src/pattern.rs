//! Host pattern: optional tier token followed by a recognized base-domain family.
//!
//! A hostname such as `api.sit.ffan.com` is matched on the segment `.sit.ffan`:
//! a dot, an optional `<tier>.` token and one base-domain family. The match
//! is unanchored; the first (leftmost) occurrence wins.

use crate::environment::Environment;
use crate::error::{ResolveError, Result};
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// Base-domain families recognized by the built-in pattern.
pub const DEFAULT_FAMILIES: [&str; 3] = ["ffan", "tasicc.net", "tasicc.com"];

/// Result of applying a [`HostPattern`] to a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostMatch<'h> {
    /// Byte range of the matched `.<tier>.<family>` segment.
    pub segment: Range<usize>,
    /// Captured tier token, if the segment carried one.
    pub tier: Option<Environment>,
    /// Captured base-domain family.
    pub family: &'h str,
}

/// Immutable matcher for tier tokens and base-domain families.
///
/// A family must end at a label boundary, so `ffan` does not match `www.ffanatic.org`.
#[derive(Debug, Clone)]
pub struct HostPattern {
    tiers: Vec<Environment>,
    families: Vec<String>,
    regex: Regex,
}

impl HostPattern {
    /// Builds a pattern from tier environments and base-domain families.
    ///
    /// Tiers must be a non-empty subset of `sit`, `uat`, `test`. Families must
    /// be non-empty dotted labels (`ffan`, `example.com`) with no leading or
    /// trailing dot or hyphen.
    pub fn new<F, S>(tiers: &[Environment], families: F) -> Result<Self>
    where
        F: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if tiers.is_empty() {
            return Err(invalid("at least one tier token is required"));
        }
        let mut tier_list: Vec<Environment> = Vec::with_capacity(tiers.len());
        for &env in tiers {
            if env.tier_token().is_none() {
                return Err(invalid(format!("'{env}' has no tier token")));
            }
            if !tier_list.contains(&env) {
                tier_list.push(env);
            }
        }

        let mut family_list: Vec<String> = Vec::new();
        for family in families {
            let family = family.as_ref().trim().to_ascii_lowercase();
            validate_family(&family)?;
            if !family_list.contains(&family) {
                family_list.push(family);
            }
        }
        if family_list.is_empty() {
            return Err(invalid("at least one base-domain family is required"));
        }

        let regex = compile(&tier_list, &family_list)?;
        Ok(Self {
            tiers: tier_list,
            families: family_list,
            regex,
        })
    }

    /// The built-in pattern: tiers `sit|uat|test`, families [`DEFAULT_FAMILIES`].
    pub fn builtin() -> &'static HostPattern {
        static BUILTIN: OnceLock<HostPattern> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            HostPattern::new(&Environment::TIERS, DEFAULT_FAMILIES)
                .expect("built-in host pattern is valid")
        })
    }

    pub fn tiers(&self) -> &[Environment] {
        &self.tiers
    }

    pub fn families(&self) -> &[String] {
        &self.families
    }

    /// Applies the pattern to `input`, returning the leftmost match.
    pub fn find<'h>(&self, input: &'h str) -> Option<HostMatch<'h>> {
        let caps = self.regex.captures(input)?;
        let whole = caps.get(0)?;
        let family = caps.name("family")?.as_str();
        // Captured tokens come from `self.tiers`, so the lookup cannot miss.
        let tier = caps
            .name("tier")
            .and_then(|m| Environment::from_tier_token(m.as_str()));
        Some(HostMatch {
            segment: whole.range(),
            tier,
            family,
        })
    }

    /// Environments [`classify_environment`](crate::classify_environment) can
    /// yield under this pattern: `local`, `pub`, and the configured tiers.
    pub fn reachable(&self) -> impl Iterator<Item = Environment> + '_ {
        [Environment::Local, Environment::Pub]
            .into_iter()
            .chain(self.tiers.iter().copied())
    }

    /// Whether a segment rewritten with `prefix` is matched again with the
    /// same tier: `""`, or `"<t>."` for a tier `t` of this pattern.
    pub fn accepts_prefix(&self, prefix: &str) -> bool {
        if prefix.is_empty() {
            return true;
        }
        prefix
            .strip_suffix('.')
            .and_then(Environment::from_tier_token)
            .map_or(false, |env| self.tiers.contains(&env))
    }
}

impl Default for HostPattern {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

fn invalid(message: impl Into<String>) -> ResolveError {
    ResolveError::InvalidPattern {
        message: message.into(),
    }
}

fn validate_family(family: &str) -> Result<()> {
    if family.is_empty() {
        return Err(invalid("base-domain family must not be empty"));
    }
    for label in family.split('.') {
        let ok = !label.is_empty()
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-');
        if !ok {
            return Err(invalid(format!("malformed base-domain family '{family}'")));
        }
    }
    Ok(())
}

fn compile(tiers: &[Environment], families: &[String]) -> Result<Regex> {
    let tier_alt = tiers
        .iter()
        .filter_map(|env| env.tier_token())
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");

    // Longest family first so `example.com` wins over a shorter `example`.
    let mut sorted: Vec<&String> = families.iter().collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()));
    let family_alt = sorted
        .into_iter()
        .map(|f| regex::escape(f))
        .collect::<Vec<_>>()
        .join("|");

    let source = format!(r"\.(?:(?P<tier>{tier_alt})\.)?(?P<family>{family_alt})\b");
    Regex::new(&source).map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> HostPattern {
        HostPattern::new(&Environment::TIERS, ["example.com", "example.net"]).unwrap()
    }

    #[test]
    fn builtin_matches_tier_and_family() {
        let m = HostPattern::builtin().find("api.sit.ffan.com").unwrap();
        assert_eq!(m.tier, Some(Environment::Sit));
        assert_eq!(m.family, "ffan");
        assert_eq!(&"api.sit.ffan.com"[m.segment], ".sit.ffan");
    }

    #[test]
    fn builtin_matches_bare_family() {
        let m = HostPattern::builtin().find("h5.tasicc.net").unwrap();
        assert_eq!(m.tier, None);
        assert_eq!(m.family, "tasicc.net");
    }

    #[test]
    fn family_needs_leading_dot() {
        assert!(HostPattern::builtin().find("ffan.com").is_none());
        assert!(HostPattern::builtin().find("localhost:8080").is_none());
    }

    #[test]
    fn family_ends_at_label_boundary() {
        assert!(HostPattern::builtin().find("www.ffanatic.org").is_none());
        assert!(example().find("api.example.community").is_none());
    }

    #[test]
    fn unknown_token_is_not_a_tier() {
        let m = example().find("api.dev.example.com").unwrap();
        assert_eq!(m.tier, None);
        assert_eq!(m.family, "example.com");
    }

    #[test]
    fn restricted_tiers_ignore_others() {
        let p = HostPattern::new(&[Environment::Uat], ["example.com"]).unwrap();
        assert_eq!(p.find("a.uat.example.com").unwrap().tier, Some(Environment::Uat));
        // "sit." is not a tier here, but the bare family after it still matches.
        let m = p.find("a.sit.example.com").unwrap();
        assert_eq!(m.tier, None);
        assert_eq!(m.segment, 5..17);
    }

    #[test]
    fn accepts_only_prefixes_it_can_match_again() {
        let uat_only = HostPattern::new(&[Environment::Uat], ["example.com"]).unwrap();
        assert!(uat_only.accepts_prefix(""));
        assert!(uat_only.accepts_prefix("uat."));
        assert!(!uat_only.accepts_prefix("sit."));
        assert!(!HostPattern::builtin().accepts_prefix("dev."));
        assert!(!HostPattern::builtin().accepts_prefix("sit"));
        assert_eq!(
            uat_only.reachable().collect::<Vec<_>>(),
            [Environment::Local, Environment::Pub, Environment::Uat]
        );
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(matches!(
            HostPattern::new(&[], ["example.com"]),
            Err(ResolveError::InvalidPattern { .. })
        ));
        assert!(HostPattern::new(&[Environment::Pub], ["example.com"]).is_err());
        assert!(HostPattern::new(&Environment::TIERS, Vec::<String>::new()).is_err());
        assert!(HostPattern::new(&Environment::TIERS, [".example.com"]).is_err());
        assert!(HostPattern::new(&Environment::TIERS, ["exa mple"]).is_err());
    }

    #[test]
    fn families_are_normalized_and_deduplicated() {
        let p = HostPattern::new(&Environment::TIERS, ["Example.COM", "example.com"]).unwrap();
        assert_eq!(p.families(), ["example.com".to_string()]);
    }
}
