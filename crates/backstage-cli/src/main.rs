use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::validate::SchemaName;

#[derive(Parser, Debug)]
#[command(name = "backstage", version, about = "Backstage store administration dashboard")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,

    /// Log filter, e.g. `info` or `backstage_dashboard=debug`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the dashboard web server.
    Serve {
        /// Path to the configuration file (defaults to ./backstage.yaml when present)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Host to bind, overriding `dashboard.host`
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on, overriding `dashboard.port`
        #[arg(long)]
        port: Option<u16>,

        /// Storefront API base URL, overriding `api.base_url` and its env variable
        #[arg(long = "api-url")]
        api_url: Option<String>,
    },

    /// Load the configuration and report problems without starting anything.
    Check {
        /// Path to the configuration file (defaults to ./backstage.yaml when present)
        #[arg(long, short)]
        config: Option<PathBuf>,
    },

    /// Print the dashboard route table.
    Routes,

    /// Validate a JSON payload file against one of the form schemas.
    Validate {
        /// Schema to validate against
        #[arg(value_enum)]
        schema: SchemaName,

        /// JSON file holding the payload
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match &cli.log_level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.cmd {
        Command::Serve {
            config,
            host,
            port,
            api_url,
        } => {
            let overrides = commands::serve::Overrides { host, port, api_url };
            commands::serve::run(config.as_deref(), overrides).await
        }
        Command::Check { config } => commands::check::run(config.as_deref()),
        Command::Routes => {
            commands::routes::run();
            Ok(())
        }
        Command::Validate { schema, file } => commands::validate::run(schema, &file),
    }
}
