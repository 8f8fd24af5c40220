//! Compound stream command implementation.

use clap::Args;
use tsn::netlink::Result;
use tsn::netlink::genl::frer::FrerConnection;

use crate::stream::{self, StreamOpts};

#[derive(Args)]
pub struct CsArgs {
    /// Compound stream ID
    pub cs_id: u32,

    #[command(flatten)]
    pub opts: StreamOpts,

    /// Show counters
    #[arg(long)]
    pub cnt: bool,

    /// Clear counters
    #[arg(long)]
    pub clr: bool,

    /// Print counters as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the cs command.
pub async fn run(args: CsArgs) -> Result<()> {
    let conn = FrerConnection::new().await?;

    if args.cnt {
        let counters = conn.cs_counters(args.cs_id).await?;
        stream::print_counters(&counters, args.json);
        return Ok(());
    }

    if args.clr {
        return conn.clear_cs_counters(args.cs_id).await;
    }

    let config = conn.cs_config(args.cs_id).await?;
    let updated = stream::apply(&config, &args.opts);

    if updated == config {
        stream::print_config(&config, false);
        return Ok(());
    }

    conn.set_cs_config(args.cs_id, &updated).await
}
