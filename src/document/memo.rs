//! Request-scoped memoization of document lookups.
//!
//! Create one per request and drop it with the request. Never share it
//! across requests: entries are not invalidated.

use std::sync::Arc;

use dashmap::DashMap;

use crate::document::lookup::{DocumentLookup, LookupError};
use crate::document::node::NodeInfo;

type AddressKey = (String, String);
type PathKey = (String, String, String);

pub struct MemoizedLookup {
    inner: Arc<dyn DocumentLookup>,
    by_address: DashMap<AddressKey, Option<NodeInfo>>,
    by_path: DashMap<PathKey, Option<NodeInfo>>,
}

impl MemoizedLookup {
    pub fn new(inner: Arc<dyn DocumentLookup>) -> Self {
        Self {
            inner,
            by_address: DashMap::new(),
            by_path: DashMap::new(),
        }
    }

    /// Number of memoized entries.
    pub fn len(&self) -> usize {
        self.by_address.len() + self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentLookup for MemoizedLookup {
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
        if let Some(hit) = self.by_path.get(&key) {
            return Ok(hit.value().clone());
        }
        // Errors are not memoized.
        let found = self
            .inner
            .find(site_node_name, uri_path, dimension_space_point_hash)?;
        self.by_path.insert(key, found.clone());
        Ok(found)
    }

    fn find_by_address(
        &self,
        node_aggregate_id: &str,
        dimension_space_point_hash: &str,
    ) -> Result<Option<NodeInfo>, LookupError> {
        let key = (
            node_aggregate_id.to_string(),
            dimension_space_point_hash.to_string(),
        );
        if let Some(hit) = self.by_address.get(&key) {
            return Ok(hit.value().clone());
        }
        let found = self
            .inner
            .find_by_address(node_aggregate_id, dimension_space_point_hash)?;
        self.by_address.insert(key, found.clone());
        Ok(found)
    }

    fn live_content_stream_id(&self) -> Result<String, LookupError> {
        self.inner.live_content_stream_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingLookup {
        calls: AtomicUsize,
    }

    impl DocumentLookup for CountingLookup {
        fn find(&self, _: &str, _: &str, _: &str) -> Result<Option<NodeInfo>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }

        fn find_by_address(&self, _: &str, _: &str) -> Result<Option<NodeInfo>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(LookupError::Backend("down".into()))
        }

        fn live_content_stream_id(&self) -> Result<String, LookupError> {
            Ok("cs".into())
        }
    }

    #[test]
    fn test_repeated_lookups_hit_memo() {
        let inner = Arc::new(CountingLookup::default());
        let memo = MemoizedLookup::new(inner.clone());

        assert!(memo.find("site", "about", "h").unwrap().is_none());
        assert!(memo.find("site", "about", "h").unwrap().is_none());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn test_errors_are_not_memoized() {
        let inner = Arc::new(CountingLookup::default());
        let memo = MemoizedLookup::new(inner.clone());

        assert!(memo.find_by_address("a", "h").is_err());
        assert!(memo.find_by_address("a", "h").is_err());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
        assert!(memo.is_empty());
    }
}
