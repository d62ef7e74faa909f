//! site-router
//!
//! Serves the personal site shell and inspects its route table.
//!
//! ```text
//!   site.toml / BASE_URL / --base
//!            │
//!            ▼
//!     ┌─────────────┐     ┌──────────────┐     ┌──────────────────┐
//!     │   config    │────▶│ route table  │────▶│ Resolver/Router  │
//!     └─────────────┘     └──────────────┘     └────────┬─────────┘
//!                                                       │
//!                      ┌────────────────────────────────┼──────────────┐
//!                      ▼                                ▼              ▼
//!               serve (site shell)                 routes/resolve     href
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use site_router::config::loader::{load_or_default, with_base_override, ConfigError};
use site_router::config::validation::validate_config;
use site_router::http::RouteEntry;
use site_router::lifecycle::{signals, Shutdown};
use site_router::observability::{logging, metrics};
use site_router::pages::ComponentRegistry;
use site_router::routing::{site_table, BasePath, Resolver, RouteError};
use site_router::{SiteConfig, SiteServer};

#[derive(Parser)]
#[command(name = "site-router", version)]
#[command(about = "Route table and site shell for the personal site", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "SITE_CONFIG")]
    config: Option<PathBuf>,

    /// Base path every route is served under; overrides BASE_URL
    #[arg(long, global = true)]
    base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the site shell
    Serve {
        /// Bind address, overrides server.bind_address
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Print the route table
    Routes {
        #[arg(long)]
        json: bool,
    },
    /// Resolve a URL to its component
    Resolve { url: String },
    /// Print the URL of a named route
    Href { name: String },
}

fn load(cli: &Cli) -> Result<SiteConfig, ConfigError> {
    let config = load_or_default(cli.config.as_deref())?;
    with_base_override(config, cli.base.as_deref())
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = load(&cli)?;
    logging::init_logging(&config.observability);

    let resolver = Resolver::new(site_table()?, BasePath::new(&config.site.base_url));

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind_address = bind;
                validate_config(&config).map_err(ConfigError::Validation)?;
            }
            serve(config, resolver).await?;
        }
        Commands::Routes { json } => {
            if json {
                let routes = RouteEntry::listing(&resolver);
                println!("{}", serde_json::to_string_pretty(&routes)?);
            } else {
                for route in resolver.table().iter() {
                    println!("{:<24} {:<16} {}", route.path, route.name, route.component);
                }
            }
        }
        Commands::Resolve { url } => match resolver.resolve(&url) {
            Ok(resolved) => println!("{} {}", resolved.component(), resolved.href),
            Err(RouteError::NotFound { path }) => {
                eprintln!("not found: {}", path);
                return Ok(ExitCode::FAILURE);
            }
            Err(e) => return Err(e.into()),
        },
        Commands::Href { name } => println!("{}", resolver.href(&name)?),
    }

    Ok(ExitCode::SUCCESS)
}

async fn serve(config: SiteConfig, resolver: Resolver) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        bind_address = %config.server.bind_address,
        base = %resolver.base().prefix(),
        routes = resolver.table().len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let server = SiteServer::new(config, resolver, ComponentRegistry::with_placeholders())?;
    server.run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
