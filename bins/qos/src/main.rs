//! qos - QoS classification utility
//!
//! Configures LAN966x ingress and egress priority mapping via Generic
//! Netlink.

mod dscp;
mod port;

use clap::{Parser, Subcommand};
use tsn::netlink::Result;

#[derive(Parser)]
#[command(name = "qos")]
#[command(about = "LAN966x QoS classification", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Configure the ingress (PCP, DEI) to (priority, DPL) map
    #[command(name = "i_tag_map")]
    ITagMap(port::ITagMapArgs),

    /// Configure the ingress classification for a DSCP value
    #[command(name = "i_dscp_map")]
    IDscpMap(dscp::IDscpMapArgs),

    /// Configure ingress port defaults
    #[command(name = "i_def")]
    IDef(port::IDefArgs),

    /// Configure ingress classification modes
    #[command(name = "i_mode")]
    IMode(port::IModeArgs),

    /// Configure the egress (priority, DPL) to (PCP, DEI) map
    #[command(name = "e_tag_map")]
    ETagMap(port::ETagMapArgs),

    /// Configure egress port defaults
    #[command(name = "e_def")]
    EDef(port::EDefArgs),

    /// Configure the egress tagging mode
    #[command(name = "e_mode")]
    EMode(port::EModeArgs),
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
        Command::ITagMap(args) => port::run_i_tag_map(args).await,
        Command::IDscpMap(args) => dscp::run(args).await,
        Command::IDef(args) => port::run_i_def(args).await,
        Command::IMode(args) => port::run_i_mode(args).await,
        Command::ETagMap(args) => port::run_e_tag_map(args).await,
        Command::EDef(args) => port::run_e_def(args).await,
        Command::EMode(args) => port::run_e_mode(args).await,
    }
}
