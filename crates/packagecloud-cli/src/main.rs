//! # packagecloud
//!
//! Command-line client for packagecloud.io package repositories.
//!
//! This is the main entry point. It parses the command line, sets up logging,
//! loads the token and service URL, and dispatches to the command handlers.
//! Failures are reported on stderr and mapped to the process exit status.

use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use packagecloud_config::{ConfigLayering, ConfigLoader, ConfigOverrides};
use packagecloud_core::error::{PackagecloudError, PackagecloudResult};
use packagecloud_core::types::Ecosystem;
use tracing::debug;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::{exit_status, ErrorFormatter};

/// Manage packages in packagecloud.io repositories
#[derive(Parser)]
#[command(name = "packagecloud", version, about = "packagecloud.io repository client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ~/.packagecloud)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Service base URL
    #[arg(long, global = true, value_name = "URL")]
    pub url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Push a package from a local file or an http(s) URL
    #[command(after_help = "example:\n    packagecloud push example-user/example-repository/ubuntu/xenial /tmp/example.deb")]
    Push {
        /// user/repo/distro/version
        target: String,
        /// Package file path or URL
        source: String,
    },
    /// Delete a package
    #[command(alias = "yank", after_help = "example:\n    packagecloud rm example-user/example-repository/ubuntu/xenial example_1.0.1-1_amd64.deb")]
    Rm {
        /// user/repo/distro/version
        target: String,
        /// Package filename
        filename: String,
    },
    /// Copy a package to another repository
    #[command(after_help = "example:\n    packagecloud promote example-user/repo1/ubuntu/xenial example_1.0-1_amd64.deb example-user/repo2")]
    Promote {
        /// user/src_repo/distro/version
        target: String,
        /// Package filename
        filename: String,
        /// user/dst_repo
        destination: String,
    },
    /// List packages matching a query
    #[command(after_help = "example:\n    packagecloud list example-user/example-repository example 1.0.0")]
    List {
        /// user/repo[/distro[/version]]
        target: String,
        /// Search query
        query: String,
        /// Only show this package version
        version: Option<String>,
    },
    /// Download packages matching a query into the current directory
    #[command(after_help = "example:\n    packagecloud pull example-user/example-repository example_1.0.0_all.deb")]
    Pull {
        /// user/repo[/distro[/version]]
        target: String,
        /// Search query
        query: String,
        /// Only download this package version
        version: Option<String>,
    },
    /// Print supported distributions as JSON
    #[command(after_help = "example:\n    packagecloud distro\n    packagecloud distro deb ubuntu\n    packagecloud distro | jq .deb")]
    Distro {
        /// Ecosystem (deb, rpm, py, ...)
        ecosystem: Option<Ecosystem>,
        /// Distribution index name
        name: Option<String>,
    },
    /// Print download statistics for packages matching a query
    Stats {
        /// user/repo[/distro[/version]]
        target: String,
        /// Search query
        query: String,
        /// Only count this package version
        version: Option<String>,
        /// First day to count, as YYYYMMDDZ
        #[arg(long)]
        start_date: Option<String>,
        /// Last day to count, as YYYYMMDDZ
        #[arg(long)]
        end_date: Option<String>,
        /// Print every download record instead of a total
        #[arg(long)]
        detail: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    debug!("packagecloud v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(code = %e.code(), "command failed: {:?}", e);
            eprint!("{}", ErrorFormatter::new().format_error(&e));
            ExitCode::from(exit_status(&e))
        }
    }
}

fn run_cli(cli: Cli) -> PackagecloudResult<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| PackagecloudError::io("failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        tokio::select! {
            result = run(cli) => result,
            _ = interrupted() => Err(PackagecloudError::Cancelled),
        }
    })
}

async fn run(cli: Cli) -> PackagecloudResult<()> {
    let loader = cli.config.map(ConfigLoader::with_path).unwrap_or_default();
    let config = ConfigLayering::new()
        .with_file(loader.load().await?)
        .with_env(ConfigLayering::collect_env_overrides())
        .with_cli(ConfigOverrides {
            token: None,
            url: cli.url,
        })
        .merge()?;

    let ctx = CommandContext::new(&config)?;
    commands::dispatch_command(cli.command, &ctx).await
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "packagecloud={level},packagecloud_api={level},packagecloud_config={level}"
                ))
            }),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
