use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::environment::Environment;
use crate::pattern::{HostPattern, DEFAULT_FAMILIES};
use crate::replacement::ReplacementTable;
use crate::resolver::{DomainResolver, DEFAULT_HOST};

/// Default logical API base (production-style domain).
pub const DEFAULT_API_BASE: &str = "https://api.ffan.com";

/// Host pattern section (optional `[pattern]` table in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Tier environments recognized as hostname tokens.
    pub tiers: Vec<Environment>,
    /// Base-domain families, e.g. "ffan" or "example.com".
    pub families: Vec<String>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            tiers: Environment::TIERS.to_vec(),
            families: DEFAULT_FAMILIES.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Per-environment prefix overrides (optional `[replacements]` table).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplacementOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "pub")]
    pub production: Option<String>,
}

impl ReplacementOverrides {
    pub fn is_empty(&self) -> bool {
        self.to_map().is_empty()
    }

    pub fn to_map(&self) -> BTreeMap<Environment, String> {
        [
            (Environment::Local, &self.local),
            (Environment::Sit, &self.sit),
            (Environment::Uat, &self.uat),
            (Environment::Test, &self.test),
            (Environment::Pub, &self.production),
        ]
        .into_iter()
        .filter_map(|(env, prefix)| prefix.clone().map(|p| (env, p)))
        .collect()
    }
}

/// Global configuration loaded from `~/.config/envdomain/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvdomainConfig {
    /// Host the client runs under. None = "localhost" (classifies as local).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_host: Option<String>,
    /// Logical API base every dispatcher request is built on.
    pub api_base: String,
    /// Optional host pattern; if missing, the built-in pattern is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PatternConfig>,
    /// Per-environment prefix overrides merged over the built-in table.
    #[serde(default)]
    pub replacements: ReplacementOverrides,
}

impl Default for EnvdomainConfig {
    fn default() -> Self {
        Self {
            current_host: None,
            api_base: DEFAULT_API_BASE.to_string(),
            pattern: None,
            replacements: ReplacementOverrides::default(),
        }
    }
}

impl EnvdomainConfig {
    /// Builds a validated resolver. `host_override` (CLI flag / env var) wins
    /// over `current_host`.
    ///
    /// The replacement table is checked here, both on its own and against
    /// the pattern, so a bad table fails at startup instead of on a rewrite.
    pub fn resolver(&self, host_override: Option<&str>) -> Result<DomainResolver> {
        let host = host_override
            .filter(|h| !h.is_empty())
            .or(self.current_host.as_deref())
            .unwrap_or(DEFAULT_HOST);

        let table = ReplacementTable::with_overrides(&self.replacements.to_map())
            .context("invalid [replacements] in config")?;
        let pattern = match &self.pattern {
            Some(p) => {
                HostPattern::new(&p.tiers, &p.families).context("invalid [pattern] in config")?
            }
            None => HostPattern::default(),
        };

        DomainResolver::from_parts(host, pattern, table)
            .context("[replacements] do not fit the host pattern")
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("envdomain")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<EnvdomainConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = EnvdomainConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from a specific file.
pub fn load_from(path: &Path) -> Result<EnvdomainConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: EnvdomainConfig =
        toml::from_str(&data).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = EnvdomainConfig::default();
        assert_eq!(cfg.api_base, "https://api.ffan.com");
        assert!(cfg.current_host.is_none());
        assert!(cfg.pattern.is_none());
        assert!(cfg.replacements.is_empty());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = EnvdomainConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: EnvdomainConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.api_base, cfg.api_base);
        assert_eq!(parsed.current_host, cfg.current_host);
        assert_eq!(parsed.replacements, cfg.replacements);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            current_host = "m.uat.example.com"
            api_base = "https://api.example.com"

            [pattern]
            tiers = ["sit", "uat"]
            families = ["example.com", "example.net"]

            [replacements]
            local = "uat."
        "#;
        let cfg: EnvdomainConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.current_host.as_deref(), Some("m.uat.example.com"));
        let pattern = cfg.pattern.as_ref().unwrap();
        assert_eq!(pattern.tiers, vec![Environment::Sit, Environment::Uat]);
        assert_eq!(cfg.replacements.local.as_deref(), Some("uat."));

        let resolver = cfg.resolver(None).unwrap();
        assert_eq!(resolver.classify(None), Environment::Uat);
        assert_eq!(resolver.classify(Some("localhost")), Environment::Local);
        assert_eq!(
            resolver
                .rewrite("https://api.example.com/x", Some("localhost"))
                .unwrap(),
            "https://api.uat.example.com/x"
        );
    }

    #[test]
    fn host_override_wins() {
        let cfg = EnvdomainConfig {
            current_host: Some("m.sit.ffan.com".to_string()),
            ..EnvdomainConfig::default()
        };
        let resolver = cfg.resolver(Some("m.ffan.com")).unwrap();
        assert_eq!(resolver.current_host(), "m.ffan.com");
        assert_eq!(EnvdomainConfig::default().resolver(None).unwrap().current_host(), "localhost");
    }

    #[test]
    fn unknown_environment_key_is_rejected() {
        let toml = r#"
            api_base = "https://api.ffan.com"

            [replacements]
            prod = ""
        "#;
        assert!(toml::from_str::<EnvdomainConfig>(toml).is_err());
    }

    #[test]
    fn pub_override_uses_environment_name() {
        let toml = r#"
            api_base = "https://api.ffan.com"

            [replacements]
            pub = "www."
        "#;
        let cfg: EnvdomainConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.replacements.production.as_deref(), Some("www."));
        let map = cfg.replacements.to_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&Environment::Pub).map(String::as_str), Some("www."));
    }

    #[test]
    fn malformed_prefix_fails_at_resolver_build() {
        let toml = r#"
            api_base = "https://api.ffan.com"

            [replacements]
            sit = "sit"
        "#;
        let cfg: EnvdomainConfig = toml::from_str(toml).unwrap();
        let err = cfg.resolver(None).unwrap_err();
        assert!(format!("{err:#}").contains("replacement table misconfigured"));
    }

    #[test]
    fn non_tier_override_fails_at_resolver_build() {
        let toml = r#"
            api_base = "https://api.ffan.com"

            [replacements]
            local = "dev."
        "#;
        let cfg: EnvdomainConfig = toml::from_str(toml).unwrap();
        let err = cfg.resolver(None).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("do not fit the host pattern"), "{msg}");
        assert!(msg.contains("\"dev.\""), "{msg}");
    }

    #[test]
    fn restricted_pattern_needs_matching_local_prefix() {
        let toml = r#"
            api_base = "https://api.example.com"

            [pattern]
            tiers = ["uat"]
            families = ["example.com"]
        "#;
        let cfg: EnvdomainConfig = toml::from_str(toml).unwrap();
        assert!(cfg.resolver(None).is_err());

        let cfg = EnvdomainConfig {
            replacements: ReplacementOverrides {
                local: Some("uat.".to_string()),
                ..ReplacementOverrides::default()
            },
            ..cfg
        };
        let resolver = cfg.resolver(None).unwrap();
        let once = resolver.rewrite("https://api.example.com/x", None).unwrap();
        assert_eq!(once, "https://api.uat.example.com/x");
        assert_eq!(resolver.rewrite(&once, None).unwrap(), once);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_base = \"https://api.tasicc.com\"\n").unwrap();
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.api_base, "https://api.tasicc.com");
        assert!(load_from(&dir.path().join("missing.toml")).is_err());
    }
}
