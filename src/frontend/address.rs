//! Content addresses and their URI token form.
//!
//! Token format: `<workspace>.<base64url(JSON coordinates)>.<aggregate id>`.
//! The middle part never contains `.`, and workspace names are rejected if
//! they do, so the token splits unambiguously even when the aggregate id
//! contains dots.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::dimension::DimensionSpacePoint;

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("invalid workspace name {0:?}")]
    InvalidWorkspaceName(String),

    #[error("node aggregate id must not be empty")]
    EmptyNodeAggregateId,

    #[error("malformed content address token {0:?}")]
    Malformed(String),

    #[error("content address token is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("content address token carries invalid coordinates: {0}")]
    Coordinates(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WorkspaceName(String);

impl WorkspaceName {
    pub const LIVE: &'static str = "live";

    pub fn new(name: impl Into<String>) -> Result<Self, AddressError> {
        let name = name.into();
        if name.is_empty() || name.contains('.') || name.contains('/') {
            return Err(AddressError::InvalidWorkspaceName(name));
        }
        Ok(Self(name))
    }

    pub fn live() -> Self {
        Self(Self::LIVE.to_string())
    }

    pub fn is_live(&self) -> bool {
        self.0 == Self::LIVE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkspaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies a document in one workspace and dimension space point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentAddress {
    content_stream_id: String,
    dimension_space_point: DimensionSpacePoint,
    node_aggregate_id: String,
    workspace_name: WorkspaceName,
}

impl ContentAddress {
    pub fn new(
        content_stream_id: impl Into<String>,
        dimension_space_point: DimensionSpacePoint,
        node_aggregate_id: impl Into<String>,
        workspace_name: WorkspaceName,
    ) -> Self {
        Self {
            content_stream_id: content_stream_id.into(),
            dimension_space_point,
            node_aggregate_id: node_aggregate_id.into(),
            workspace_name,
        }
    }

    pub fn content_stream_id(&self) -> &str {
        &self.content_stream_id
    }

    pub fn dimension_space_point(&self) -> &DimensionSpacePoint {
        &self.dimension_space_point
    }

    pub fn node_aggregate_id(&self) -> &str {
        &self.node_aggregate_id
    }

    pub fn workspace_name(&self) -> &WorkspaceName {
        &self.workspace_name
    }

    pub fn with_node_aggregate_id(&self, node_aggregate_id: impl Into<String>) -> Self {
        Self {
            node_aggregate_id: node_aggregate_id.into(),
            ..self.clone()
        }
    }

    /// Compact URI-safe token. The content stream is not part of it.
    pub fn serialize_for_uri(&self) -> Result<String, AddressError> {
        if self.node_aggregate_id.is_empty() {
            return Err(AddressError::EmptyNodeAggregateId);
        }
        let coordinates = serde_json::to_vec(self.dimension_space_point.coordinates())?;
        Ok(format!(
            "{}.{}.{}",
            self.workspace_name,
            URL_SAFE_NO_PAD.encode(coordinates),
            self.node_aggregate_id
        ))
    }

    /// Inverse of [`serialize_for_uri`](Self::serialize_for_uri).
    pub fn parse(token: &str, content_stream_id: impl Into<String>) -> Result<Self, AddressError> {
        let malformed = || AddressError::Malformed(token.to_string());
        let (workspace, rest) = token.split_once('.').ok_or_else(malformed)?;
        let (encoded, node_aggregate_id) = rest.split_once('.').ok_or_else(malformed)?;
        if node_aggregate_id.is_empty() {
            return Err(malformed());
        }

        let workspace_name = WorkspaceName::new(workspace)?;
        let decoded = URL_SAFE_NO_PAD.decode(encoded)?;
        let dimension_space_point: DimensionSpacePoint = serde_json::from_slice(&decoded)?;

        Ok(Self::new(
            content_stream_id,
            dimension_space_point,
            node_aggregate_id,
            workspace_name,
        ))
    }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}@{}",
            self.workspace_name, self.node_aggregate_id, self.dimension_space_point
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(node: &str) -> ContentAddress {
        ContentAddress::new(
            "cs-live",
            DimensionSpacePoint::from_pairs([("language", "de"), ("country", "at")]),
            node,
            WorkspaceName::live(),
        )
    }

    #[test]
    fn test_token_round_trip() {
        let original = address("products.shoes");
        let token = original.serialize_for_uri().unwrap();
        assert!(token.starts_with("live."));
        assert!(!token.contains('/') && !token.contains('+') && !token.contains('='));

        let parsed = ContentAddress::parse(&token, "cs-live").unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        assert!(matches!(
            ContentAddress::parse("no-dots", "cs").unwrap_err(),
            AddressError::Malformed(_)
        ));
        assert!(matches!(
            ContentAddress::parse("live.e30.", "cs").unwrap_err(),
            AddressError::Malformed(_)
        ));
        assert!(matches!(
            ContentAddress::parse("live.!!!.node", "cs").unwrap_err(),
            AddressError::Encoding(_)
        ));
        let not_json = URL_SAFE_NO_PAD.encode("[1,2]");
        assert!(matches!(
            ContentAddress::parse(&format!("live.{not_json}.node"), "cs").unwrap_err(),
            AddressError::Coordinates(_)
        ));
    }

    #[test]
    fn test_with_node_aggregate_id_is_a_new_value() {
        let original = address("a");
        let changed = original.with_node_aggregate_id("b");
        assert_eq!(original.node_aggregate_id(), "a");
        assert_eq!(changed.node_aggregate_id(), "b");
        assert_eq!(changed.dimension_space_point(), original.dimension_space_point());
    }

    #[test]
    fn test_workspace_name_validation() {
        assert!(WorkspaceName::new("user-admin").is_ok());
        assert!(WorkspaceName::new("").is_err());
        assert!(WorkspaceName::new("a.b").is_err());
        assert!(WorkspaceName::live().is_live());
    }
}
