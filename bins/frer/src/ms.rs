//! Member stream command implementations (msa, msf, ms).

use clap::Args;
use tsn::netlink::Result;
use tsn::netlink::genl::frer::{FrerConnection, FrerStreamConfig};
use tsn::util::ifname;

use crate::stream::{self, StreamOpts};

#[derive(Args)]
pub struct MsaArgs {
    /// First port
    pub dev1: String,

    /// Optional second port
    pub dev2: Option<String>,
}

#[derive(Args)]
pub struct MsfArgs {
    /// Member stream ID
    pub ms_id: u32,
}

#[derive(Args)]
pub struct MsArgs {
    /// Port the member stream is attached to
    pub dev: String,

    /// Member stream ID
    pub ms_id: u32,

    #[command(flatten)]
    pub opts: StreamOpts,

    /// Compound stream ID
    #[arg(long = "cs_id")]
    pub cs_id: Option<u16>,

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

/// Run the msa command, printing the allocated member stream ID.
pub async fn run_alloc(args: MsaArgs) -> Result<()> {
    let dev1 = ifname::name_to_index(&args.dev1)?;
    let dev2 = match &args.dev2 {
        Some(name) => ifname::name_to_index(name)?,
        None => 0,
    };

    let conn = FrerConnection::new().await?;
    let ms_id = conn.alloc_member_stream(dev1, dev2).await?;
    println!("{}", ms_id);
    Ok(())
}

/// Run the msf command.
pub async fn run_free(args: MsfArgs) -> Result<()> {
    let conn = FrerConnection::new().await?;
    conn.free_member_stream(args.ms_id).await
}

/// Run the ms command.
pub async fn run(args: MsArgs) -> Result<()> {
    let ifindex = ifname::name_to_index(&args.dev)?;
    let conn = FrerConnection::new().await?;

    if args.cnt {
        let counters = conn.ms_counters(ifindex, args.ms_id).await?;
        stream::print_counters(&counters, args.json);
        return Ok(());
    }

    if args.clr {
        return conn.clear_ms_counters(ifindex, args.ms_id).await;
    }

    let config = conn.ms_config(ifindex, args.ms_id).await?;
    let updated = apply(&config, &args);

    if updated == config {
        stream::print_config(&config, true);
        return Ok(());
    }

    conn.set_ms_config(ifindex, args.ms_id, &updated).await
}

fn apply(config: &FrerStreamConfig, args: &MsArgs) -> FrerStreamConfig {
    let mut updated = stream::apply(config, &args.opts);
    if let Some(v) = args.cs_id {
        updated.cs_id = v;
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: MsArgs,
    }

    fn ms_args(args: &[&str]) -> MsArgs {
        TestCli::parse_from(std::iter::once("test").chain(args.iter().copied())).args
    }

    #[test]
    fn test_apply_cs_id() {
        let config = FrerStreamConfig {
            enable: 1,
            hlen: 8,
            ..Default::default()
        };
        let updated = apply(&config, &ms_args(&["eth0", "3", "--cs_id", "12"]));
        assert_eq!(updated.cs_id, 12);
        assert_eq!(updated.enable, 1);
        assert_eq!(updated.hlen, 8);
    }

    #[test]
    fn test_apply_no_options_is_identity() {
        let config = FrerStreamConfig {
            enable: 1,
            cs_id: 5,
            ..Default::default()
        };
        assert_eq!(apply(&config, &ms_args(&["eth0", "3"])), config);
    }
}
