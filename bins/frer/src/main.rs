//! frer - FRER management utility
//!
//! Configures IEEE 802.1CB frame replication and elimination on the
//! LAN966x switch via Generic Netlink.

mod cs;
mod iflow;
mod ms;
mod stream;
mod vlan;

use clap::{Parser, Subcommand};
use tsn::netlink::Result;

#[derive(Parser)]
#[command(name = "frer")]
#[command(about = "LAN966x frame replication and elimination", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Configure a compound stream or show its counters
    Cs(cs::CsArgs),

    /// Allocate a member stream across one or two ports
    Msa(ms::MsaArgs),

    /// Free a member stream
    Msf(ms::MsfArgs),

    /// Configure a member stream or show its counters
    Ms(ms::MsArgs),

    /// Configure an ingress flow
    Iflow(iflow::IflowArgs),

    /// Configure per-VLAN flooding and learning
    Vlan(vlan::VlanArgs),
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
        Command::Cs(args) => cs::run(args).await,
        Command::Msa(args) => ms::run_alloc(args).await,
        Command::Msf(args) => ms::run_free(args).await,
        Command::Ms(args) => ms::run(args).await,
        Command::Iflow(args) => iflow::run(args).await,
        Command::Vlan(args) => vlan::run(args).await,
    }
}
