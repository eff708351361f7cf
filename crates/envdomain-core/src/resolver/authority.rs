//! Locating the host inside a URL string without normalizing it.
//!
//! `url::Url` would rewrite the input (trailing slash, lower-casing,
//! punycode), so the host span is found on the raw text instead.

use std::ops::Range;

/// Byte range of the host within `url`.
///
/// Accepts `scheme://host`, protocol-relative `//host` and scheme-less
/// `host/path` forms. Userinfo and port are excluded. Returns `None` for
/// relative paths such as `/plazas/1`.
pub fn host_span(url: &str) -> Option<Range<usize>> {
    let start = authority_start(url);
    let rest = &url[start..];
    let authority_len = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..authority_len];

    let host_offset = authority.rfind('@').map(|i| i + 1).unwrap_or(0);
    let host_and_port = &authority[host_offset..];
    let host_len = if host_and_port.starts_with('[') {
        host_and_port.find(']').map(|i| i + 1)?
    } else {
        host_and_port.find(':').unwrap_or(host_and_port.len())
    };
    if host_len == 0 {
        return None;
    }

    let host_start = start + host_offset;
    Some(host_start..host_start + host_len)
}

fn authority_start(url: &str) -> usize {
    if let Some(i) = url.find("://") {
        if is_scheme(&url[..i]) {
            return i + 3;
        }
    }
    if url.starts_with("//") {
        2
    } else {
        0
    }
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
