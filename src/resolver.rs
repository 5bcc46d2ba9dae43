//! Slug resolution for profile requests.
//!
//! A deployment picks one [`SlugStrategy`]. Whatever the strategy, a
//! non-empty `?agent=` query parameter overrides it. Resolution never fails:
//! when no slug can be found the result is the empty string, which matches no
//! agent and ends in a 404.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Where the agent slug is read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlugStrategy {
    /// `/meet/{slug}`
    #[default]
    Path,
    /// First label of the `Host` header, e.g. `jay-bloom.example.com`
    Host,
}

impl FromStr for SlugStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "path" => Ok(Self::Path),
            "host" | "subdomain" => Ok(Self::Host),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for SlugStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => f.write_str("path"),
            Self::Host => f.write_str("host"),
        }
    }
}

/// The parts of a request a slug may come from.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlugSource<'a> {
    pub path: Option<&'a str>,
    pub query: Option<&'a str>,
    pub host: Option<&'a str>,
}

/// Determine the requested agent slug.
pub fn resolve_slug(strategy: SlugStrategy, source: SlugSource<'_>) -> String {
    if let Some(agent) = source.query.map(str::trim).filter(|q| !q.is_empty()) {
        return agent.to_string();
    }

    let slug = match strategy {
        SlugStrategy::Path => source.path.map(str::trim),
        SlugStrategy::Host => source.host.and_then(subdomain_of),
    };

    slug.unwrap_or_default().to_string()
}

/// Leading label of `sub.domain.tld`; `None` for bare domains and IP addresses.
pub fn subdomain_of(host: &str) -> Option<&str> {
    let host = strip_port(host.trim());
    if host.parse::<std::net::IpAddr>().is_ok() {
        return None;
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 3 || labels.iter().any(|label| label.is_empty()) {
        return None;
    }

    Some(labels[0])
}

fn strip_port(host: &str) -> &str {
    // Bracketed IPv6 literal, with or without a port.
    if let Some(rest) = host.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }

    match host.rsplit_once(':') {
        Some((name, port)) if !name.contains(':') && port.chars().all(|c| c.is_ascii_digit()) => {
            name
        }
        _ => host,
    }
}
