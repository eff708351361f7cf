//! Request dispatcher seam: turns logical API paths into tier-appropriate targets.
//!
//! Nothing here performs I/O. A dispatcher hands back a [`RequestSpec`] whose
//! URL has already been rewritten for the current environment; whatever
//! owns the transport issues it. A rewrite failure is a request failure, the
//! logical (production) URL is never returned in its place.

use std::fmt;

use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::EnvdomainConfig;
use crate::error::ResolveError;
use crate::resolver::DomainResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
        }
    }
}

/// Minimal request specification handed to the transport.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub url: String,
}

#[derive(Debug, Error)]
pub enum DispatchError {
    /// The API base cannot carry a request path.
    #[error("invalid API base {base:?}: {reason}")]
    InvalidBase { base: String, reason: String },

    /// Rewriting the target URL for the current environment failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Trait implemented by request dispatchers so collaborators do not depend
/// on a concrete API client.
pub trait Dispatch {
    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestSpec, DispatchError>;
}

/// Plaza API client: logical API base, resolver, and the client-owned data blob.
#[derive(Debug, Clone)]
pub struct PlazaApi {
    resolver: DomainResolver,
    api_base: Url,
    data: Value,
}

impl PlazaApi {
    pub fn new(resolver: DomainResolver, api_base: &str) -> Result<Self, DispatchError> {
        let invalid = |reason: String| DispatchError::InvalidBase {
            base: api_base.to_string(),
            reason,
        };
        let parsed = Url::parse(api_base).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() || parsed.host_str().is_none() {
            return Err(invalid("URL has no host".to_string()));
        }
        Ok(Self {
            resolver,
            api_base: parsed,
            data: Value::Null,
        })
    }

    pub fn from_config(cfg: &EnvdomainConfig, host_override: Option<&str>) -> anyhow::Result<Self> {
        let resolver = cfg.resolver(host_override)?;
        Ok(Self::new(resolver, &cfg.api_base)?)
    }

    pub fn resolver(&self) -> &DomainResolver {
        &self.resolver
    }

    /// Replaces the client-owned data (initial settings, theme, and so on).
    pub fn set_data(&mut self, value: Value) {
        self.data = value;
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// `GET /plazas/<ids>` against the environment-appropriate API host.
    pub fn plaza_ids_request(&self, ids: &str) -> Result<RequestSpec, DispatchError> {
        self.request(Method::Get, &["plazas", ids])
    }

    fn logical_url(&self, segments: &[&str]) -> Result<Url, DispatchError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| DispatchError::InvalidBase {
                base: self.api_base.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl Dispatch for PlazaApi {
    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestSpec, DispatchError> {
        let logical = self.logical_url(segments)?;
        let url = self.resolver.rewrite(logical.as_str(), None)?;
        tracing::debug!(%method, logical = %logical, target = %url, "dispatch target resolved");
        Ok(RequestSpec { method, url })
    }
}
