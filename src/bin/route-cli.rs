use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use dimension_router::frontend::{MatchOutcome, ResolveOutcome};
use dimension_router::http::request::base_url;
use dimension_router::lifecycle::load_runtime;
use dimension_router::observability::logging;

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Inspect dimension routing for a configuration file", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "router.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the URI path segment table
    Table,
    /// Match a request path to a content address
    Match {
        path: String,
        #[arg(long)]
        host: Option<String>,
    },
    /// Resolve a content address token to a URI
    Resolve {
        address: String,
        #[arg(long)]
        host: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging("warn");
    let runtime = load_runtime(&cli.config)?;

    let output = match cli.command {
        Commands::Table => match runtime.uri_path_resolver() {
            Some(resolver) => Value::Array(
                resolver
                    .entries()
                    .map(|(segment, point)| json!({ "segment": segment, "point": point }))
                    .collect(),
            ),
            None => json!([]),
        },
        Commands::Match { path, host } => match runtime.match_request(host.as_deref(), &path)? {
            MatchOutcome::Matched(result) => json!({
                "address": result.matched_value,
                "tags": result.tags,
                "remaining_request_path": result.remaining_request_path,
            }),
            MatchOutcome::NoMatch => json!({ "error": "no_match" }),
        },
        Commands::Resolve { address, host } => {
            match runtime.resolve_token(host.as_deref(), &address)? {
                ResolveOutcome::Resolved(result) => {
                    let base = base_url(host.as_deref())?;
                    json!({
                        "uri": result.constraints.render(&result.resolved_value, &base)?,
                        "path": result.resolved_value,
                        "constraints": result.constraints,
                        "tags": result.tags,
                    })
                }
                ResolveOutcome::CannotResolve => json!({ "error": "cannot_resolve" }),
            }
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
