use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use netroute::{
    Network, NoRoute, TracingDiagnostics,
    parsers::loader::{load_connections_file, load_devices_file},
    topology::export::to_dot,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Dot,
}

/// Find the minimum-hop route between two devices of a network.
#[derive(Parser)]
#[command(name = "netroute")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Device file, one `id,type[,Config:{...}]` per line
    #[arg(env = "NETROUTE_DEVICES")]
    devices: PathBuf,

    /// Connection file, one `idA,idB` per line
    #[arg(env = "NETROUTE_CONNECTIONS")]
    connections: PathBuf,

    /// Source device id
    from: String,

    /// Destination device id
    to: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Only log warnings
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("netroute={}", log_level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let mut network = Network::new(Arc::new(TracingDiagnostics));
    load_devices_file(&cli.devices, &mut network).context("loading devices")?;
    load_connections_file(&cli.connections, &mut network).context("loading connections")?;

    if let OutputFormat::Dot = cli.format {
        println!("{}", to_dot(network.registry(), network.router()));
        return Ok(());
    }

    match network.optimal_route(&cli.from, &cli.to) {
        Ok(route) => match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&route)?),
            _ => println!("Optimal route: {}", route),
        },
        Err(NoRoute::Unreachable { .. }) => match cli.format {
            OutputFormat::Json => println!("{}", serde_json::json!({ "route": null })),
            _ => println!("No route found!"),
        },
        Err(err) => match cli.format {
            OutputFormat::Json => println!("{}", serde_json::json!({ "error": err.to_string() })),
            _ => println!("Invalid source or destination!"),
        },
    }
    Ok(())
}
