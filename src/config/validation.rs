//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (segments, defaults and documents reference declared dimensions and sites)
//! - Validate value formats (addresses, separator, resolver names)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system; table building
//!   (collisions, cartesian product) happens afterwards in startup

use std::collections::{BTreeMap, HashSet};
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{DimensionConfig, RouterConfig};
use crate::routing::segment::Separator;

/// Resolver names accepted in `routing.resolvers`.
pub const KNOWN_RESOLVERS: &[&str] = &["uri_path", "host_prefix"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("routing.separator: must be one character other than \"/\", got {0:?}")]
    InvalidSeparator(String),

    #[error("routing.resolvers: unknown resolver {0:?}")]
    UnknownResolver(String),

    #[error("routing.resolvers: resolver {0:?} listed twice")]
    DuplicateResolver(String),

    #[error("dimensions: duplicate dimension {0:?}")]
    DuplicateDimension(String),

    #[error("dimensions: dimension {0:?} has no values")]
    EmptyDimension(String),

    #[error("{context}: unknown dimension {dimension:?}")]
    UnknownDimension { context: String, dimension: String },

    #[error("{context}: value {value:?} is not legal for dimension {dimension:?}")]
    UnknownDimensionValue {
        context: String,
        dimension: String,
        value: String,
    },

    #[error("sites: duplicate site {0:?}")]
    DuplicateSite(String),

    #[error("documents: document {document:?} references unknown site {site:?}")]
    UnknownSite { document: String, site: String },
}

/// Validate the whole configuration, collecting every problem.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if Separator::new(&config.routing.separator).is_err() {
        errors.push(ValidationError::InvalidSeparator(config.routing.separator.clone()));
    }

    let mut seen = HashSet::new();
    for resolver in &config.routing.resolvers {
        if !KNOWN_RESOLVERS.contains(&resolver.as_str()) {
            errors.push(ValidationError::UnknownResolver(resolver.clone()));
        } else if !seen.insert(resolver.as_str()) {
            errors.push(ValidationError::DuplicateResolver(resolver.clone()));
        }
    }

    let mut dimensions: BTreeMap<&str, &DimensionConfig> = BTreeMap::new();
    for dimension in &config.dimensions {
        if dimensions.insert(dimension.id.as_str(), dimension).is_some() {
            errors.push(ValidationError::DuplicateDimension(dimension.id.clone()));
        }
        if dimension.values.is_empty() {
            errors.push(ValidationError::EmptyDimension(dimension.id.clone()));
        }
    }

    let mut check_coordinate = |context: String, dimension: &str, value: Option<&str>| {
        match dimensions.get(dimension) {
            None => errors.push(ValidationError::UnknownDimension {
                context,
                dimension: dimension.to_string(),
            }),
            Some(declared) => {
                if let Some(value) = value {
                    if !declared.values.iter().any(|v| v == value) {
                        errors.push(ValidationError::UnknownDimensionValue {
                            context,
                            dimension: dimension.to_string(),
                            value: value.to_string(),
                        });
                    }
                }
            }
        }
    };

    for (dimension, value) in &config.default_dimension_space_point {
        check_coordinate("default_dimension_space_point".to_string(), dimension.as_str(), Some(value.as_str()));
    }
    for segment in &config.segments {
        if segment.mapping.is_empty() {
            check_coordinate(format!("segments.{}", segment.dimension), segment.dimension.as_str(), None);
        }
        for mapping in &segment.mapping {
            check_coordinate(
                format!("segments.{}", segment.dimension),
                segment.dimension.as_str(),
                Some(mapping.value.as_str()),
            );
        }
    }
    for host_prefix in &config.host_prefixes {
        for (dimension, value) in &host_prefix.coordinates {
            check_coordinate(
                format!("host_prefixes.{:?}", host_prefix.prefix),
                dimension.as_str(),
                Some(value.as_str()),
            );
        }
    }
    for document in &config.documents {
        for (dimension, value) in &document.coordinates {
            check_coordinate(
                format!("documents.{}", document.aggregate_id),
                dimension.as_str(),
                Some(value.as_str()),
            );
        }
    }

    let mut sites = HashSet::new();
    for site in &config.sites {
        if !sites.insert(site.node_name.as_str()) {
            errors.push(ValidationError::DuplicateSite(site.node_name.clone()));
        }
    }
    for document in &config.documents {
        if !sites.contains(document.site.as_str()) {
            errors.push(ValidationError::UnknownSite {
                document: document.aggregate_id.clone(),
                site: document.site.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
