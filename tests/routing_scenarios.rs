//! End-to-end match and resolve scenarios against the fixture configuration.

use dimension_router::frontend::{MatchOutcome, MatchResult, ResolveOutcome, ResolveResult};
use dimension_router::lifecycle::RoutingRuntime;
use url::Url;

mod common;

fn matched(runtime: &RoutingRuntime, host: &str, path: &str) -> MatchResult {
    match runtime.match_request(Some(host), path).unwrap() {
        MatchOutcome::Matched(result) => result,
        MatchOutcome::NoMatch => panic!("{path} did not match"),
    }
}

fn resolved(runtime: &RoutingRuntime, host: &str, token: &str) -> ResolveResult {
    match runtime.resolve_token(Some(host), token).unwrap() {
        ResolveOutcome::Resolved(result) => result,
        ResolveOutcome::CannotResolve => panic!("{token} did not resolve"),
    }
}

fn render(result: &ResolveResult, host: &str) -> String {
    let base = Url::parse(&format!("http://{host}/")).unwrap();
    result.constraints.render(&result.resolved_value, &base).unwrap()
}

#[test]
fn test_match_language_segment() {
    let runtime = common::runtime();

    let result = matched(&runtime, "example.com", "/de/ueber-uns");
    assert_eq!(result.matched_value, common::token("about", "de"));
    assert_eq!(result.remaining_request_path, "");

    let result = matched(&runtime, "example.com", "/about");
    assert_eq!(result.matched_value, common::token("about", "en"));
    assert!(result.tags.contains("about"));
    assert!(result.tags.contains("home"));
    assert!(result.tags.contains("team"));
}

#[test]
fn test_match_site_roots() {
    let runtime = common::runtime();
    assert_eq!(matched(&runtime, "example.com", "/").matched_value, common::token("home", "en"));
    assert_eq!(matched(&runtime, "example.com", "/de").matched_value, common::token("home", "de"));
    assert_eq!(matched(&runtime, "example.com", "/de/").matched_value, common::token("home", "de"));
}

#[test]
fn test_missing_document_is_no_match() {
    let runtime = common::runtime();
    for path in ["/missing", "/de/about", "/fr/about", "/archive", "/archive/2020"] {
        assert_eq!(
            runtime.match_request(Some("example.com"), path).unwrap(),
            MatchOutcome::NoMatch,
            "{path}"
        );
    }
}

#[test]
fn test_match_uses_detected_site() {
    let runtime = common::runtime();
    assert_eq!(
        matched(&runtime, "shop.example.net", "/de/products").matched_value,
        common::token("products", "de")
    );
    assert_eq!(
        runtime.match_request(Some("example.com"), "/de/products").unwrap(),
        MatchOutcome::NoMatch
    );
}

#[test]
fn test_resolve_renders_language_prefix() {
    let runtime = common::runtime();

    let result = resolved(&runtime, "example.com", &common::token("about", "de"));
    assert_eq!(result.resolved_value, "ueber-uns");
    assert_eq!(result.constraints.path_prefix(), Some("de/"));
    assert_eq!(render(&result, "example.com"), "/de/ueber-uns");

    let result = resolved(&runtime, "example.com", &common::token("about", "en"));
    assert_eq!(result.constraints.path_prefix(), None);
    assert_eq!(render(&result, "example.com"), "/about");
}

#[test]
fn test_resolve_default_root_has_no_segment() {
    let runtime = common::runtime();
    let result = resolved(&runtime, "example.com", &common::token("home", "en"));
    assert_eq!(render(&result, "example.com"), "/");

    let result = resolved(&runtime, "example.com", &common::token("home", "de"));
    assert_eq!(render(&result, "example.com"), "/de/");
}

#[test]
fn test_round_trip() {
    let runtime = common::runtime();
    for path in ["/", "/about", "/de/", "/de/ueber-uns"] {
        let token = matched(&runtime, "example.com", path).matched_value;
        let result = resolved(&runtime, "example.com", &token);
        assert_eq!(render(&result, "example.com"), path);
    }
}

#[test]
fn test_external_shortcut() {
    let runtime = common::runtime();
    let result = resolved(&runtime, "example.com", &common::token("external", "en"));

    assert_eq!(result.resolved_value, "/x");
    assert_eq!(result.constraints.scheme(), Some("https"));
    assert_eq!(result.constraints.host(), Some("example.org"));
    assert_eq!(result.constraints.port(), Some(443));
    assert_eq!(result.constraints.query(), Some("y=1"));
    assert_eq!(render(&result, "example.com"), "https://example.org/x?y=1");
}

#[test]
fn test_node_shortcut_resolves_to_target() {
    let runtime = common::runtime();
    let result = resolved(&runtime, "example.com", &common::token("jump", "en"));
    assert_eq!(render(&result, "example.com"), "/about");
    assert!(result.tags.contains("about"));
}

#[test]
fn test_disabled_documents_cannot_resolve() {
    let runtime = common::runtime();
    for id in ["archive", "archive-2020", "missing"] {
        assert_eq!(
            runtime
                .resolve_token(Some("example.com"), &common::token(id, "en"))
                .unwrap(),
            ResolveOutcome::CannotResolve,
            "{id}"
        );
    }
}

#[test]
fn test_malformed_token_cannot_resolve() {
    let runtime = common::runtime();
    for token in ["", "garbage", "live.!!!.about", "live.e30"] {
        assert_eq!(
            runtime.resolve_token(Some("example.com"), token).unwrap(),
            ResolveOutcome::CannotResolve,
            "{token:?}"
        );
    }
}

#[test]
fn test_cross_site_link() {
    let runtime = common::runtime();
    let result = resolved(&runtime, "example.com", &common::token("products", "de"));
    assert_eq!(result.constraints.host(), Some("shop.example.net"));
    assert_eq!(render(&result, "example.com"), "https://shop.example.net/de/products");

    let same_site = resolved(&runtime, "shop.example.net", &common::token("products", "de"));
    assert_eq!(same_site.constraints.host(), None);
}

#[test]
fn test_uri_suffix() {
    let runtime = common::runtime_with_routing("uri_suffix = \".html\"");

    assert_eq!(
        matched(&runtime, "example.com", "/about.html").matched_value,
        common::token("about", "en")
    );
    assert_eq!(
        runtime.match_request(Some("example.com"), "/about").unwrap(),
        MatchOutcome::NoMatch
    );
    assert_eq!(matched(&runtime, "example.com", "/de/").matched_value, common::token("home", "de"));

    let result = resolved(&runtime, "example.com", &common::token("about", "de"));
    assert_eq!(render(&result, "example.com"), "/de/ueber-uns.html");
    let root = resolved(&runtime, "example.com", &common::token("home", "en"));
    assert_eq!(render(&root, "example.com"), "/");
}

#[test]
fn test_split_string_remainder() {
    let runtime = common::runtime_with_routing("split_string = \"--\"");

    let result = matched(&runtime, "example.com", "/de/ueber-uns--page/2");
    assert_eq!(result.matched_value, common::token("about", "de"));
    assert_eq!(result.remaining_request_path, "--page/2");

    let result = matched(&runtime, "example.com", "/about");
    assert_eq!(result.remaining_request_path, "");
}
