//! Shared fixtures for integration tests.

#![allow(dead_code)]

use dimension_router::config::loader::parse_config;
use dimension_router::dimension::DimensionSpacePoint;
use dimension_router::frontend::{ContentAddress, WorkspaceName};
use dimension_router::lifecycle::RoutingRuntime;

pub const LIVE: &str = "cs-live";

/// Two languages, two sites, and a handful of documents covering shortcuts,
/// disabled subtrees and cross-site targets.
pub const FIXTURE: &str = r#"
[[dimensions]]
id = "language"
values = ["en", "de"]

[default_dimension_space_point]
language = "en"

[[segments]]
dimension = "language"
mapping = [{ value = "en", segment = "" }, { value = "de", segment = "de" }]

[[sites]]
node_name = "main"
hosts = ["example.com"]

[[sites]]
node_name = "shop"
hosts = ["shop.example.net"]
scheme = "https"

[[documents]]
aggregate_id = "home"
site = "main"
coordinates = { language = "en" }

[[documents]]
aggregate_id = "home"
site = "main"
coordinates = { language = "de" }

[[documents]]
aggregate_id = "about"
site = "main"
uri_path = "about"
parent = "home"
coordinates = { language = "en" }
tags = ["team"]

[[documents]]
aggregate_id = "about"
site = "main"
uri_path = "ueber-uns"
parent = "home"
coordinates = { language = "de" }

[[documents]]
aggregate_id = "external"
site = "main"
uri_path = "elsewhere"
parent = "home"
coordinates = { language = "en" }
shortcut = "https://example.org/x?y=1"

[[documents]]
aggregate_id = "jump"
site = "main"
uri_path = "jump"
parent = "home"
coordinates = { language = "en" }
shortcut = "node://about"

[[documents]]
aggregate_id = "archive"
site = "main"
uri_path = "archive"
parent = "home"
disabled = true
coordinates = { language = "en" }

[[documents]]
aggregate_id = "archive-2020"
site = "main"
uri_path = "archive/2020"
parent = "archive"
coordinates = { language = "en" }

[[documents]]
aggregate_id = "products"
site = "shop"
uri_path = "products"
coordinates = { language = "de" }
"#;

/// The fixture with extra `[routing]` settings.
pub fn config_with_routing(routing: &str) -> String {
    format!("[routing]\nlive_content_stream_id = \"{LIVE}\"\n{routing}\n{FIXTURE}")
}

pub fn runtime() -> RoutingRuntime {
    runtime_with_routing("")
}

pub fn runtime_with_routing(routing: &str) -> RoutingRuntime {
    let config = parse_config(&config_with_routing(routing)).unwrap();
    RoutingRuntime::build(config).unwrap()
}

pub fn point(language: &str) -> DimensionSpacePoint {
    DimensionSpacePoint::from_pairs([("language", language)])
}

/// Serialized live address of `aggregate_id` in `language`.
pub fn token(aggregate_id: &str, language: &str) -> String {
    ContentAddress::new(LIVE, point(language), aggregate_id, WorkspaceName::live())
        .serialize_for_uri()
        .unwrap()
}
