//! In-memory document store.
//!
//! Built once from the `[[documents]]` configuration and shared read-only.
//! Implements both the document lookup and the shortcut resolver.

use std::collections::{HashMap, HashSet};

use url::Url;

use crate::config::schema::DocumentConfig;
use crate::dimension::DimensionSpacePoint;
use crate::document::lookup::{DocumentLookup, LookupError, ShortcutResolution, ShortcutResolver};
use crate::document::node::{NodeInfo, RouteTags, ShortcutMode};
use crate::routing::error::ConfigurationError;

const NODE_SCHEME: &str = "node://";

#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    live_content_stream_id: String,
    /// (aggregate id, point hash) -> node
    by_address: HashMap<(String, String), NodeInfo>,
    /// (site, uri path, point hash) -> aggregate id
    by_path: HashMap<(String, String, String), String>,
    /// (parent aggregate id, point hash) -> children in declaration order
    children: HashMap<(String, String), Vec<String>>,
}

impl InMemoryDocumentStore {
    /// Build the store, computing inherited disabled state and route tags.
    pub fn from_config(
        documents: &[DocumentConfig],
        live_content_stream_id: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let mut store = Self {
            live_content_stream_id: live_content_stream_id.into(),
            ..Self::default()
        };

        for document in documents {
            let point = DimensionSpacePoint::new(document.coordinates.clone());
            let hash = point.hash().to_string();
            let uri_path = document.uri_path.trim_matches('/').to_string();

            let address_key = (document.aggregate_id.clone(), hash.clone());
            if store.by_address.contains_key(&address_key) {
                return Err(ConfigurationError::DuplicateDocument {
                    aggregate_id: document.aggregate_id.clone(),
                    point: point.to_string(),
                });
            }
            let path_key = (document.site.clone(), uri_path.clone(), hash.clone());
            if store.by_path.contains_key(&path_key) {
                return Err(ConfigurationError::DuplicateDocumentPath {
                    site: document.site.clone(),
                    uri_path,
                    point: point.to_string(),
                });
            }

            if let Some(parent) = &document.parent {
                store
                    .children
                    .entry((parent.clone(), hash.clone()))
                    .or_default()
                    .push(document.aggregate_id.clone());
            }
            store.by_path.insert(path_key, document.aggregate_id.clone());
            store.by_address.insert(
                address_key,
                NodeInfo {
                    node_aggregate_id: document.aggregate_id.clone(),
                    parent_node_aggregate_id: document.parent.clone(),
                    site_node_name: document.site.clone(),
                    uri_path,
                    dimension_space_point_hash: hash,
                    disabled: document.disabled,
                    shortcut: document.shortcut.as_deref().map(ShortcutMode::parse),
                    route_tags: RouteTags::from_tags(document.tags.iter().cloned()),
                },
            );
        }

        store.inherit_from_ancestors();
        tracing::debug!(documents = store.by_address.len(), "Document store built");
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.by_address.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_address.is_empty()
    }

    // Ancestors contribute their ids as route tags and their disabled flag.
    fn inherit_from_ancestors(&mut self) {
        let mut updates = Vec::with_capacity(self.by_address.len());
        for (key, node) in &self.by_address {
            let mut tags = node.route_tags.clone().with_tag(node.node_aggregate_id.clone());
            let mut disabled = node.disabled;
            let mut visited = HashSet::new();
            let mut parent = node.parent_node_aggregate_id.clone();

            while let Some(parent_id) = parent {
                if !visited.insert(parent_id.clone()) {
                    break;
                }
                match self.by_address.get(&(parent_id.clone(), key.1.clone())) {
                    Some(ancestor) => {
                        tags = tags.with_tag(parent_id);
                        disabled |= ancestor.disabled;
                        parent = ancestor.parent_node_aggregate_id.clone();
                    }
                    None => break,
                }
            }
            updates.push((key.clone(), tags, disabled));
        }

        for (key, tags, disabled) in updates {
            if let Some(node) = self.by_address.get_mut(&key) {
                node.route_tags = tags;
                node.disabled = disabled;
            }
        }
    }

    fn node(&self, aggregate_id: &str, hash: &str) -> Option<&NodeInfo> {
        self.by_address
            .get(&(aggregate_id.to_string(), hash.to_string()))
    }

    fn first_enabled_child(&self, node: &NodeInfo) -> Option<&NodeInfo> {
        self.children
            .get(&(node.node_aggregate_id.clone(), node.dimension_space_point_hash.clone()))?
            .iter()
            .filter_map(|id| self.node(id, &node.dimension_space_point_hash))
            .find(|child| !child.is_disabled())
    }
}

impl DocumentLookup for InMemoryDocumentStore {
    fn find(
        &self,
        site_node_name: &str,
        uri_path: &str,
        dimension_space_point_hash: &str,
    ) -> Result<Option<NodeInfo>, LookupError> {
        let key = (
            site_node_name.to_string(),
            uri_path.to_string(),
            dimension_space_point_hash.to_string(),
        );
        Ok(self
            .by_path
            .get(&key)
            .and_then(|id| self.node(id, dimension_space_point_hash))
            .filter(|node| !node.is_disabled())
            .cloned())
    }

    fn find_by_address(
        &self,
        node_aggregate_id: &str,
        dimension_space_point_hash: &str,
    ) -> Result<Option<NodeInfo>, LookupError> {
        Ok(self.node(node_aggregate_id, dimension_space_point_hash).cloned())
    }

    fn live_content_stream_id(&self) -> Result<String, LookupError> {
        Ok(self.live_content_stream_id.clone())
    }
}

impl ShortcutResolver for InMemoryDocumentStore {
    fn resolve_shortcut(&self, node: &NodeInfo) -> Result<ShortcutResolution, LookupError> {
        let hash = node.dimension_space_point_hash.as_str();
        let mut current = node.clone();
        let mut visited = HashSet::new();

        loop {
            let Some(mode) = current.shortcut.clone() else {
                return Ok(ShortcutResolution::Node(current));
            };
            if !visited.insert(current.node_aggregate_id.clone()) {
                return Ok(ShortcutResolution::Invalid(format!(
                    "shortcut cycle through \"{}\"",
                    current.node_aggregate_id
                )));
            }

            let next = match &mode {
                ShortcutMode::FirstChild => self.first_enabled_child(&current),
                ShortcutMode::Parent => current
                    .parent_node_aggregate_id
                    .as_deref()
                    .and_then(|parent| self.node(parent, hash)),
                ShortcutMode::SelectedTarget(target) => match target.strip_prefix(NODE_SCHEME) {
                    Some(target_id) => self.node(target_id, hash),
                    None => {
                        return Ok(match Url::parse(target) {
                            Ok(url) => ShortcutResolution::External(url),
                            Err(e) => ShortcutResolution::Invalid(format!(
                                "shortcut target {target:?} of \"{}\" is not a valid URI: {e}",
                                current.node_aggregate_id
                            )),
                        });
                    }
                },
            };

            match next {
                Some(target) if !target.is_disabled() => current = target.clone(),
                _ => {
                    return Ok(ShortcutResolution::Invalid(format!(
                        "shortcut \"{}\" ({:?}) has no enabled target",
                        current.node_aggregate_id, mode
                    )))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn doc(id: &str, path: &str, parent: Option<&str>) -> DocumentConfig {
        DocumentConfig {
            aggregate_id: id.into(),
            site: "site".into(),
            uri_path: path.into(),
            coordinates: BTreeMap::from([("language".to_string(), "en".to_string())]),
            parent: parent.map(Into::into),
            disabled: false,
            shortcut: None,
            tags: Vec::new(),
        }
    }

    fn hash() -> String {
        DimensionSpacePoint::from_pairs([("language", "en")]).hash().to_string()
    }

    #[test]
    fn test_find_by_path_and_tags() {
        let store = InMemoryDocumentStore::from_config(
            &[doc("root", "", None), doc("about", "/about/", Some("root"))],
            "cs",
        )
        .unwrap();

        let about = store.find("site", "about", &hash()).unwrap().unwrap();
        assert_eq!(about.node_aggregate_id, "about");
        assert!(about.route_tags.contains("about"));
        assert!(about.route_tags.contains("root"));
        assert!(store.find("site", "missing", &hash()).unwrap().is_none());
        assert!(store.find("other", "about", &hash()).unwrap().is_none());
    }

    #[test]
    fn test_disabled_is_inherited() {
        let mut parent = doc("parent", "parent", None);
        parent.disabled = true;
        let store = InMemoryDocumentStore::from_config(
            &[parent, doc("child", "parent/child", Some("parent"))],
            "cs",
        )
        .unwrap();

        assert!(store.find("site", "parent/child", &hash()).unwrap().is_none());
        let child = store.find_by_address("child", &hash()).unwrap().unwrap();
        assert!(child.is_disabled());
    }

    #[test]
    fn test_duplicate_document_rejected() {
        let err = InMemoryDocumentStore::from_config(&[doc("a", "x", None), doc("a", "y", None)], "cs")
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicateDocument { .. }));

        let err = InMemoryDocumentStore::from_config(&[doc("a", "x", None), doc("b", "x", None)], "cs")
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicateDocumentPath { .. }));
    }

    #[test]
    fn test_shortcut_modes() {
        let mut first = doc("first", "first", Some("root"));
        first.shortcut = Some("first_child".into());
        let mut up = doc("up", "up", Some("root"));
        up.shortcut = Some("parent".into());
        let mut external = doc("ext", "ext", Some("root"));
        external.shortcut = Some("https://example.org/x?y=1".into());
        let mut chained = doc("chained", "chained", Some("root"));
        chained.shortcut = Some("node://first".into());

        let store = InMemoryDocumentStore::from_config(
            &[
                doc("root", "", None),
                first,
                doc("first-child", "first/child", Some("first")),
                up,
                external,
                chained,
            ],
            "cs",
        )
        .unwrap();
        let node = |id: &str| store.find_by_address(id, &hash()).unwrap().unwrap();

        match store.resolve_shortcut(&node("first")).unwrap() {
            ShortcutResolution::Node(target) => assert_eq!(target.node_aggregate_id, "first-child"),
            other => panic!("unexpected {other:?}"),
        }
        match store.resolve_shortcut(&node("up")).unwrap() {
            ShortcutResolution::Node(target) => assert_eq!(target.node_aggregate_id, "root"),
            other => panic!("unexpected {other:?}"),
        }
        match store.resolve_shortcut(&node("chained")).unwrap() {
            ShortcutResolution::Node(target) => assert_eq!(target.node_aggregate_id, "first-child"),
            other => panic!("unexpected {other:?}"),
        }
        match store.resolve_shortcut(&node("ext")).unwrap() {
            ShortcutResolution::External(url) => assert_eq!(url.host_str(), Some("example.org")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_shortcut_cycle_is_invalid() {
        let mut a = doc("a", "a", None);
        a.shortcut = Some("node://b".into());
        let mut b = doc("b", "b", None);
        b.shortcut = Some("node://a".into());
        let store = InMemoryDocumentStore::from_config(&[a, b], "cs").unwrap();
        let a = store.find_by_address("a", &hash()).unwrap().unwrap();
        assert!(matches!(
            store.resolve_shortcut(&a).unwrap(),
            ShortcutResolution::Invalid(_)
        ));
    }
}
