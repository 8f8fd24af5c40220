//! Gate control entry command implementation.

use clap::Args;
use tsn::netlink::Result;
use tsn::netlink::genl::psfp::{GateControlEntry, PsfpConnection};

#[derive(Args)]
pub struct GceArgs {
    /// Stream gate instance
    pub sgi: u32,

    /// Gate control entry index
    pub gci: u32,

    /// StreamGateState
    #[arg(long = "gate_open")]
    pub gate_open: Option<u8>,

    /// Enable IPV
    #[arg(long = "ipv_enable")]
    pub ipv_enable: Option<u8>,

    /// Internal priority value
    #[arg(long)]
    pub ipv: Option<u8>,

    /// TimeInterval in nanoseconds
    #[arg(long = "time_interval")]
    pub time_interval: Option<u32>,

    /// IntervalOctetMax (zero disables the check)
    #[arg(long = "octet_max")]
    pub octet_max: Option<u32>,

    /// Show the operational entry
    #[arg(long)]
    pub status: bool,

    /// Print status as JSON
    #[arg(long)]
    pub json: bool,
}

fn apply(config: &GateControlEntry, args: &GceArgs) -> GateControlEntry {
    let mut updated = *config;
    if let Some(v) = args.gate_open {
        updated.gate_open = v;
    }
    if let Some(v) = args.ipv_enable {
        updated.ipv_enable = v;
    }
    if let Some(v) = args.ipv {
        updated.ipv = v;
    }
    if let Some(v) = args.time_interval {
        updated.time_interval = v;
    }
    if let Some(v) = args.octet_max {
        updated.octet_max = v;
    }
    updated
}

fn print_entry(entry: &GateControlEntry, json: bool) {
    if json {
        let value = serde_json::json!({
            "gate_open": entry.gate_open,
            "ipv_enable": entry.ipv_enable,
            "ipv": entry.ipv,
            "time_interval": entry.time_interval,
            "octet_max": entry.octet_max,
        });
        println!("{}", value);
        return;
    }

    println!("gate_open: {}", entry.gate_open);
    println!("ipv_enable: {}", entry.ipv_enable);
    println!("ipv: {}", entry.ipv);
    println!("time_interval: {}", entry.time_interval);
    println!("octet_max: {}", entry.octet_max);
}

/// Run the gce command.
pub async fn run(args: GceArgs) -> Result<()> {
    let conn = PsfpConnection::new().await?;

    if args.status {
        let entry = conn.gce_status(args.sgi, args.gci).await?;
        print_entry(&entry, args.json);
        return Ok(());
    }

    let config = conn.gce_config(args.sgi, args.gci).await?;
    let updated = apply(&config, &args);

    if updated == config {
        print_entry(&config, false);
        return Ok(());
    }

    conn.set_gce_config(args.sgi, args.gci, &updated).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: GceArgs,
    }

    fn gce_args(args: &[&str]) -> GceArgs {
        TestCli::parse_from(std::iter::once("test").chain(args.iter().copied())).args
    }

    #[test]
    fn test_apply_no_options_is_identity() {
        let config = GateControlEntry {
            gate_open: 1,
            time_interval: 50_000,
            ..Default::default()
        };
        assert_eq!(apply(&config, &gce_args(&["2", "0"])), config);
    }

    #[test]
    fn test_apply_edits() {
        let config = GateControlEntry::default();
        let updated = apply(
            &config,
            &gce_args(&["2", "0", "--gate_open", "1", "--time_interval", "100000"]),
        );
        assert_eq!(updated.gate_open, 1);
        assert_eq!(updated.time_interval, 100_000);
        assert_eq!(updated.octet_max, 0);
    }
}
