/*!

This is the command line interface for managing Camel-K objects (integrations, kamelets, pipes and
friends) in a Kubernetes cluster with server-side apply.

!*/

#![deny(
    clippy::expect_used,
    clippy::get_unwrap,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::panicking_unwrap,
    clippy::unwrap_in_result,
    clippy::unwrap_used
)]

/// Run `$body` with `$k` bound to the Camel-K type that `$kind` names.
macro_rules! with_kind {
    ($kind:expr, $k:ident => $body:expr) => {
        match $kind {
            camelk_model::CamelKind::Build => {
                type $k = camelk_model::camel::Build;
                $body
            }
            camelk_model::CamelKind::Integration => {
                type $k = camelk_model::camel::Integration;
                $body
            }
            camelk_model::CamelKind::IntegrationKit => {
                type $k = camelk_model::camel::IntegrationKit;
                $body
            }
            camelk_model::CamelKind::IntegrationPlatform => {
                type $k = camelk_model::camel::IntegrationPlatform;
                $body
            }
            camelk_model::CamelKind::Kamelet => {
                type $k = camelk_model::camel::Kamelet;
                $body
            }
            camelk_model::CamelKind::Pipe => {
                type $k = camelk_model::camel::Pipe;
                $body
            }
        }
    };
}

mod apply;
mod delete;
mod get;
mod import;
mod kinds;
mod manifest;
mod provider;
mod state_file;

use anyhow::Result;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;
use provider::Provider;
use std::path::PathBuf;

/// Create, inspect, import and delete Camel-K objects using server-side apply.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    /// Set logging verbosity [trace|debug|info|warn|error]. If the environment variable `RUST_LOG`
    /// is present, it overrides the default logging behavior. See https://docs.rs/env_logger/latest
    #[clap(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
    /// Path to the kubeconfig file. Also can be passed with the KUBECONFIG environment variable.
    #[clap(long = "kubeconfig")]
    kubeconfig: Option<PathBuf>,
    /// The kubeconfig context to use.
    #[clap(long = "context")]
    context: Option<String>,
    /// Path to a YAML provider configuration. Flags given on the command line take precedence.
    #[clap(long = "config")]
    config: Option<PathBuf>,
    /// The field manager used for server-side apply [default: camelk].
    #[clap(long = "field-manager")]
    field_manager: Option<String>,
    /// Take ownership of fields that another field manager owns.
    #[clap(long = "force-conflicts")]
    force_conflicts: bool,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Parser)]
enum Command {
    /// Create or update a Camel-K object from a state file.
    Apply(apply::Apply),
    /// Get the state of an existing Camel-K object.
    Get(get::Get),
    /// Import an existing Camel-K object as a new state.
    Import(import::Import),
    /// Delete a Camel-K object and wait for it to disappear.
    Delete(delete::Delete),
    /// Render the manifest of a state file without contacting a cluster.
    Manifest(manifest::Manifest),
    /// List the supported Camel-K kinds.
    Kinds(kinds::Kinds),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logger(args.log_level);
    if let Err(e) = run(args).await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let provider = Provider::from_args(
        args.config.as_deref(),
        args.kubeconfig,
        args.context,
        args.field_manager,
        args.force_conflicts,
    )?;
    match args.command {
        Command::Apply(apply) => apply.run(&provider).await,
        Command::Get(get) => get.run(&provider).await,
        Command::Import(import) => import.run(&provider).await,
        Command::Delete(delete) => delete.run(&provider).await,
        Command::Manifest(manifest) => manifest.run(),
        Command::Kinds(kinds) => kinds.run(),
    }
}

/// Initialize the logger with the value passed by `--log-level` (or its default) when the
/// `RUST_LOG` environment variable is not present. If present, the `RUST_LOG` environment variable
/// overrides `--log-level`/`level`.
fn init_logger(level: LevelFilter) {
    match std::env::var(env_logger::DEFAULT_FILTER_ENV).ok() {
        Some(_) => {
            // RUST_LOG exists; env_logger will use it.
            Builder::from_default_env().init();
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate and the model.
            Builder::new()
                .filter(Some(env!("CARGO_CRATE_NAME")), level)
                .filter(Some("camelk_model"), level)
                .init();
        }
    }
}
