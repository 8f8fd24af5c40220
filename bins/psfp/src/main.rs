//! psfp - PSFP management utility
//!
//! Configures IEEE 802.1Qci per-stream filtering and policing on the
//! LAN966x switch via Generic Netlink.

mod fm;
mod gce;
mod sf;
mod sg;

use clap::{Parser, Subcommand};
use tsn::netlink::Result;

#[derive(Parser)]
#[command(name = "psfp")]
#[command(about = "LAN966x per-stream filtering and policing", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Configure a stream filter or show its counters
    Sf(sf::SfArgs),

    /// Configure a stream gate or show its status
    Sg(sg::SgArgs),

    /// Configure a gate control entry or show its status
    Gce(gce::GceArgs),

    /// Configure a flow meter
    Fm(fm::FmArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Sf(args) => sf::run(args).await,
        Command::Sg(args) => sg::run(args).await,
        Command::Gce(args) => gce::run(args).await,
        Command::Fm(args) => fm::run(args).await,
    }
}
