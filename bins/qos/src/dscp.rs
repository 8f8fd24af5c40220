//! DSCP classification command (i_dscp_map).

use clap::Args;
use tsn::netlink::Result;
use tsn::netlink::genl::qos::{QosConnection, QosDscpPrioDpl};

#[derive(Args)]
pub struct IDscpMapArgs {
    /// DSCP value to map
    pub dscp: u32,

    /// Trust this DSCP value for classification
    #[arg(long)]
    pub enable: Option<u8>,

    /// Classified priority
    #[arg(long)]
    pub prio: Option<u8>,

    /// Classified DPL
    #[arg(long)]
    pub dpl: Option<u8>,
}

fn apply(config: &QosDscpPrioDpl, args: &IDscpMapArgs) -> QosDscpPrioDpl {
    let mut updated = *config;
    if let Some(v) = args.enable {
        updated.trust = (v != 0) as u8;
    }
    if let Some(v) = args.prio {
        updated.prio = v;
    }
    if let Some(v) = args.dpl {
        updated.dpl = v;
    }
    updated
}

/// Run the i_dscp_map command.
pub async fn run(args: IDscpMapArgs) -> Result<()> {
    let conn = QosConnection::new().await?;
    let config = conn.dscp_config(args.dscp).await?;
    let updated = apply(&config, &args);

    if updated == config {
        println!(
            "i_dscp_map --enable {} --prio {} --dpl {}",
            config.trust, config.prio, config.dpl
        );
        return Ok(());
    }

    conn.set_dscp_config(args.dscp, &updated).await
}
