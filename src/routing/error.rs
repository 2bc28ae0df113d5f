//! Configuration errors raised while building resolver tables.
//!
//! These are fatal: they surface once at load time and the routing runtime
//! refuses to start (or a reload is rejected). They never occur per request.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("content dimension \"{0}\" does not exist")]
    UnknownDimension(String),

    #[error("content dimension value \"{value}\" in dimension \"{dimension}\" does not exist")]
    UnknownDimensionValue { dimension: String, value: String },

    #[error("separator must be exactly one character other than \"/\", got {0:?}")]
    InvalidSeparator(String),

    #[error("the URI path segment {segment:?} for dimension value \"{value}\" contains the separator {separator:?}")]
    SeparatorInSegment {
        segment: String,
        value: String,
        separator: char,
    },

    #[error("URI path segment {segment:?} is already configured by dimension space point {existing}, cannot use it for {conflicting}")]
    DuplicateUriPathSegment {
        segment: String,
        existing: String,
        conflicting: String,
    },

    #[error("host prefix {0:?} is configured more than once")]
    DuplicateHostPrefix(String),

    #[error("unknown dimension resolver \"{0}\"")]
    UnknownResolver(String),

    #[error("document \"{aggregate_id}\" is configured twice for dimension space point {point}")]
    DuplicateDocument { aggregate_id: String, point: String },

    #[error("document path {uri_path:?} in site \"{site}\" is configured twice for dimension space point {point}")]
    DuplicateDocumentPath {
        site: String,
        uri_path: String,
        point: String,
    },
}
