//! Document node information as seen by the router.

use serde::Serialize;
use std::collections::BTreeSet;

/// How a shortcut node picks its target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "target")]
pub enum ShortcutMode {
    FirstChild,
    Parent,
    /// `node://<aggregate-id>` or an absolute external URI.
    SelectedTarget(String),
}

impl ShortcutMode {
    pub fn parse(value: &str) -> Self {
        match value {
            "first_child" | "firstChildNode" => Self::FirstChild,
            "parent" | "parentNode" => Self::Parent,
            other => Self::SelectedTarget(other.to_string()),
        }
    }
}

/// Tags attached to match/resolve results for cache invalidation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteTags(BTreeSet<String>);

impl RouteTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.0.insert(tag.into());
        self
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A document node in one dimension space point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeInfo {
    pub node_aggregate_id: String,
    pub parent_node_aggregate_id: Option<String>,
    pub site_node_name: String,
    /// URI path without leading or trailing slash; empty for the site root.
    pub uri_path: String,
    pub dimension_space_point_hash: String,
    pub disabled: bool,
    pub shortcut: Option<ShortcutMode>,
    pub route_tags: RouteTags,
}

impl NodeInfo {
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_shortcut(&self) -> bool {
        self.shortcut.is_some()
    }

    pub fn has_uri_path(&self) -> bool {
        !self.uri_path.is_empty()
    }

    /// The site root is the only document with an empty URI path.
    pub fn is_site_root(&self) -> bool {
        self.uri_path.is_empty()
    }
}
