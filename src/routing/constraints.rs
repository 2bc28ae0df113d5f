//! URI constraints accumulated while rendering outbound links.
//!
//! Resolvers and the cross-site linker never build URLs themselves. They add
//! constraints (scheme, host, path prefix, …) which the enclosing router
//! merges into the final URL via [`UriConstraints::apply_to`].

use serde::Serialize;
use thiserror::Error;
use url::Url;

/// Error applying constraints to a base URL.
#[derive(Debug, Error)]
pub enum ConstraintError {
    #[error("cannot switch base URL to scheme \"{0}\"")]
    Scheme(String),

    #[error("invalid host: {0}")]
    Host(#[from] url::ParseError),

    #[error("cannot set port {0} on this URL")]
    Port(u16),
}

/// Host prefix constraint: replaces any known prefix of the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostPrefix {
    pub prefix: String,
    pub replace_prefixes: Vec<String>,
}

/// Immutable builder of URI constraints. Every `with_*` returns a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UriConstraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    host_prefix: Option<HostPrefix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fragment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path_suffix: Option<String>,
}

impl UriConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scheme(self, scheme: impl Into<String>) -> Self {
        Self {
            scheme: Some(scheme.into()),
            ..self
        }
    }

    pub fn with_host(self, host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            ..self
        }
    }

    /// Prefix the host with `prefix.`, first stripping any of `replace_prefixes`.
    pub fn with_host_prefix(self, prefix: impl Into<String>, replace_prefixes: Vec<String>) -> Self {
        Self {
            host_prefix: Some(HostPrefix {
                prefix: prefix.into(),
                replace_prefixes,
            }),
            ..self
        }
    }

    pub fn with_port(self, port: u16) -> Self {
        Self {
            port: Some(port),
            ..self
        }
    }

    pub fn with_query_string(self, query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..self
        }
    }

    pub fn with_fragment(self, fragment: impl Into<String>) -> Self {
        Self {
            fragment: Some(fragment.into()),
            ..self
        }
    }

    /// Set the path prefix. With `append`, the prefix goes after an existing
    /// one, so resolvers running later in the chain render deeper segments.
    pub fn with_path_prefix(self, prefix: impl Into<String>, append: bool) -> Self {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return self;
        }
        let path_prefix = match (append, self.path_prefix.as_deref()) {
            (true, Some(existing)) => format!("{existing}{prefix}"),
            _ => prefix,
        };
        Self {
            path_prefix: Some(path_prefix),
            ..self
        }
    }

    pub fn with_path_suffix(self, suffix: impl Into<String>) -> Self {
        Self {
            path_suffix: Some(suffix.into()),
            ..self
        }
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn host_prefix(&self) -> Option<&HostPrefix> {
        self.host_prefix.as_ref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn path_prefix(&self) -> Option<&str> {
        self.path_prefix.as_deref()
    }

    pub fn path_suffix(&self) -> Option<&str> {
        self.path_suffix.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the constraints and the resolved path into `base`.
    pub fn apply_to(&self, path: &str, base: &Url) -> Result<Url, ConstraintError> {
        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);

        if let Some(scheme) = &self.scheme {
            url.set_scheme(scheme)
                .map_err(|_| ConstraintError::Scheme(scheme.clone()))?;
        }
        if let Some(host) = &self.host {
            url.set_host(Some(host))?;
        }
        if let Some(host_prefix) = &self.host_prefix {
            let current = url.host_str().unwrap_or_default().to_string();
            let mut host = current.as_str();
            for replace in host_prefix.replace_prefixes.iter().filter(|p| !p.is_empty()) {
                if let Some(stripped) = host.strip_prefix(&format!("{replace}.")) {
                    host = stripped;
                    break;
                }
            }
            let host = if host_prefix.prefix.is_empty() {
                host.to_string()
            } else {
                format!("{}.{}", host_prefix.prefix, host)
            };
            url.set_host(Some(&host))?;
        }
        if let Some(port) = self.port {
            url.set_port(Some(port))
                .map_err(|_| ConstraintError::Port(port))?;
        }

        let mut full_path = String::from("/");
        full_path.push_str(self.path_prefix.as_deref().unwrap_or_default());
        full_path.push_str(path.trim_start_matches('/'));
        full_path.push_str(self.path_suffix.as_deref().unwrap_or_default());
        url.set_path(&full_path);

        url.set_query(self.query.as_deref());
        url.set_fragment(self.fragment.as_deref());
        Ok(url)
    }

    /// Like [`apply_to`](Self::apply_to), but returns a relative reference
    /// when the result stays on the origin of `base`.
    pub fn render(&self, path: &str, base: &Url) -> Result<String, ConstraintError> {
        let url = self.apply_to(path, base)?;
        if url.origin() != base.origin() {
            return Ok(url.to_string());
        }
        let mut relative = url.path().to_string();
        if let Some(query) = url.query() {
            relative.push('?');
            relative.push_str(query);
        }
        if let Some(fragment) = url.fragment() {
            relative.push('#');
            relative.push_str(fragment);
        }
        Ok(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/current?x=1").unwrap()
    }

    #[test]
    fn test_path_prefix_append_keeps_chain_order() {
        let constraints = UriConstraints::new()
            .with_path_prefix("de/", true)
            .with_path_prefix("mobile/", true);
        assert_eq!(constraints.path_prefix(), Some("de/mobile/"));

        let replaced = constraints.with_path_prefix("en/", false);
        assert_eq!(replaced.path_prefix(), Some("en/"));
    }

    #[test]
    fn test_empty_prefix_is_ignored() {
        let constraints = UriConstraints::new().with_path_prefix("", true);
        assert!(constraints.is_empty());
    }

    #[test]
    fn test_render_relative_on_same_origin() {
        let constraints = UriConstraints::new()
            .with_path_prefix("de/", true)
            .with_path_suffix(".html");
        assert_eq!(constraints.render("about", &base()).unwrap(), "/de/about.html");
        assert_eq!(UriConstraints::new().render("", &base()).unwrap(), "/");
    }

    #[test]
    fn test_render_absolute_across_origins() {
        let constraints = UriConstraints::new()
            .with_scheme("https")
            .with_host("example.org")
            .with_port(443)
            .with_query_string("y=1")
            .with_fragment("top");
        assert_eq!(
            constraints.render("/x", &base()).unwrap(),
            "https://example.org/x?y=1#top"
        );
    }

    #[test]
    fn test_host_prefix_replaces_known_prefix() {
        let base = Url::parse("https://de.example.com/").unwrap();
        let to_en = UriConstraints::new().with_host_prefix("", vec!["de".into(), "fr".into()]);
        assert_eq!(to_en.apply_to("about", &base).unwrap().as_str(), "https://example.com/about");

        let to_fr = UriConstraints::new().with_host_prefix("fr", vec!["de".into(), "fr".into()]);
        assert_eq!(to_fr.apply_to("about", &base).unwrap().as_str(), "https://fr.example.com/about");
    }
}
