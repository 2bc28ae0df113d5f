//! Host prefix and URI path resolvers composed in one chain.

use dimension_router::config::loader::parse_config;
use dimension_router::dimension::DimensionSpacePoint;
use dimension_router::frontend::{ContentAddress, MatchOutcome, ResolveOutcome, WorkspaceName};
use dimension_router::lifecycle::RoutingRuntime;
use url::Url;

const CONFIG: &str = r#"
[routing]
resolvers = ["host_prefix", "uri_path"]

[[dimensions]]
id = "language"
values = ["en", "de"]

[[dimensions]]
id = "device"
values = ["desktop", "mobile"]

[default_dimension_space_point]
language = "en"
device = "desktop"

[[host_prefixes]]
prefix = ""
coordinates = { language = "en" }

[[host_prefixes]]
prefix = "de"
coordinates = { language = "de" }

[[segments]]
dimension = "device"
mapping = [{ value = "desktop", segment = "" }, { value = "mobile", segment = "m" }]

[[sites]]
node_name = "main"
hosts = ["example.com"]

[[documents]]
aggregate_id = "about"
site = "main"
uri_path = "about"
coordinates = { language = "en", device = "desktop" }

[[documents]]
aggregate_id = "about"
site = "main"
uri_path = "ueber-uns"
coordinates = { language = "de", device = "mobile" }
"#;

fn runtime() -> RoutingRuntime {
    RoutingRuntime::build(parse_config(CONFIG).unwrap()).unwrap()
}

fn token(language: &str, device: &str) -> String {
    ContentAddress::new(
        "live",
        DimensionSpacePoint::from_pairs([("language", language), ("device", device)]),
        "about",
        WorkspaceName::live(),
    )
    .serialize_for_uri()
    .unwrap()
}

fn render(runtime: &RoutingRuntime, host: &str, token: &str) -> String {
    match runtime.resolve_token(Some(host), token).unwrap() {
        ResolveOutcome::Resolved(result) => {
            let base = Url::parse(&format!("http://{host}/")).unwrap();
            result.constraints.render(&result.resolved_value, &base).unwrap()
        }
        ResolveOutcome::CannotResolve => panic!("{token} did not resolve"),
    }
}

#[test]
fn test_match_combines_host_and_path() {
    let runtime = runtime();

    match runtime.match_request(Some("de.example.com"), "/m/ueber-uns").unwrap() {
        MatchOutcome::Matched(result) => assert_eq!(result.matched_value, token("de", "mobile")),
        MatchOutcome::NoMatch => panic!("no match"),
    }
    match runtime.match_request(Some("example.com"), "/about").unwrap() {
        MatchOutcome::Matched(result) => assert_eq!(result.matched_value, token("en", "desktop")),
        MatchOutcome::NoMatch => panic!("no match"),
    }
    assert_eq!(
        runtime.match_request(Some("example.com"), "/m/ueber-uns").unwrap(),
        MatchOutcome::NoMatch
    );
}

#[test]
fn test_resolve_combines_host_and_path() {
    let runtime = runtime();
    assert_eq!(
        render(&runtime, "example.com", &token("de", "mobile")),
        "http://de.example.com/m/ueber-uns"
    );
    assert_eq!(render(&runtime, "de.example.com", &token("en", "desktop")), "http://example.com/about");
    assert_eq!(render(&runtime, "example.com", &token("en", "desktop")), "/about");
}
