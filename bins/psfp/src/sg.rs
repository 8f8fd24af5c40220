//! Stream gate command implementation.

use clap::Args;
use tsn::netlink::Result;
use tsn::netlink::genl::psfp::{PsfpConnection, StreamGateConfig, StreamGateStatus};

#[derive(Args)]
pub struct SgArgs {
    /// Stream gate instance
    pub sgi: u32,

    /// PSFPGateEnabled
    #[arg(long)]
    pub enable: Option<u8>,

    /// PSFPAdminGateStates, the initial gate state
    #[arg(long = "gate_open")]
    pub gate_open: Option<u8>,

    /// Enable PSFPAdminIPV
    #[arg(long = "ipv_enable")]
    pub ipv_enable: Option<u8>,

    /// PSFPAdminIPV
    #[arg(long)]
    pub ipv: Option<u8>,

    /// PSFPGateClosedDueToInvalidRxEnable
    #[arg(long = "close_invalid_rx_enable")]
    pub close_invalid_rx_enable: Option<u8>,

    /// PSFPGateClosedDueToInvalidRx
    #[arg(long = "close_invalid_rx")]
    pub close_invalid_rx: Option<u8>,

    /// PSFPGateClosedDueToOctetsExceededEnable
    #[arg(long = "close_octets_exceeded_enable")]
    pub close_octets_exceeded_enable: Option<u8>,

    /// PSFPGateClosedDueOctetsExceeded
    #[arg(long = "close_octets_exceeded")]
    pub close_octets_exceeded: Option<u8>,

    /// PSFPConfigChange, applies the admin list
    #[arg(long = "config_change")]
    pub config_change: Option<u8>,

    /// PSFPAdminBaseTime in nanoseconds
    #[arg(long = "base_time", allow_hyphen_values = true)]
    pub base_time: Option<i64>,

    /// PSFPAdminCycleTime in nanoseconds
    #[arg(long = "cycle_time")]
    pub cycle_time: Option<u32>,

    /// PSFPAdminCycleTimeExtension in nanoseconds
    #[arg(long = "cycle_time_ext")]
    pub cycle_time_ext: Option<u32>,

    /// PSFPAdminControlListLength
    #[arg(long = "gcl_length")]
    pub gcl_length: Option<u32>,

    /// Show gate status
    #[arg(long)]
    pub status: bool,

    /// Print status as JSON
    #[arg(long)]
    pub json: bool,
}

fn apply(config: &StreamGateConfig, args: &SgArgs) -> StreamGateConfig {
    let mut updated = *config;
    if let Some(v) = args.enable {
        updated.enable = v;
    }
    if let Some(v) = args.gate_open {
        updated.gate_open = v;
    }
    if let Some(v) = args.ipv_enable {
        updated.ipv_enable = v;
    }
    if let Some(v) = args.ipv {
        updated.ipv = v;
    }
    if let Some(v) = args.close_invalid_rx_enable {
        updated.close_invalid_rx_enable = v;
    }
    if let Some(v) = args.close_invalid_rx {
        updated.close_invalid_rx = v;
    }
    if let Some(v) = args.close_octets_exceeded_enable {
        updated.close_octets_exceeded_enable = v;
    }
    if let Some(v) = args.close_octets_exceeded {
        updated.close_octets_exceeded = v;
    }
    if let Some(v) = args.config_change {
        updated.config_change = v;
    }
    if let Some(v) = args.base_time {
        updated.admin.base_time = v;
    }
    if let Some(v) = args.cycle_time {
        updated.admin.cycle_time = v;
    }
    if let Some(v) = args.cycle_time_ext {
        updated.admin.cycle_time_ext = v;
    }
    if let Some(v) = args.gcl_length {
        updated.admin.gcl_length = v;
    }
    updated
}

fn print_config(config: &StreamGateConfig) {
    println!("enable: {}", config.enable);
    println!("gate_open: {}", config.gate_open);
    println!("ipv_enable: {}", config.ipv_enable);
    println!("ipv: {}", config.ipv);
    println!("close_invalid_rx_enable: {}", config.close_invalid_rx_enable);
    println!("close_invalid_rx: {}", config.close_invalid_rx);
    println!(
        "close_octets_exceeded_enable: {}",
        config.close_octets_exceeded_enable
    );
    println!("close_octets_exceeded: {}", config.close_octets_exceeded);
    println!("config_change: {}", config.config_change);
    println!("base_time: {}", config.admin.base_time);
    println!("cycle_time: {}", config.admin.cycle_time);
    println!("cycle_time_ext: {}", config.admin.cycle_time_ext);
    println!("gcl_length: {}", config.admin.gcl_length);
}

fn print_status(status: &StreamGateStatus, json: bool) {
    if json {
        let value = serde_json::json!({
            "gate_open": status.gate_open,
            "ipv_enable": status.ipv_enable,
            "ipv": status.ipv,
            "config_change_time": status.config_change_time,
            "current_time": status.current_time,
            "config_pending": status.config_pending,
            "base_time": status.oper.base_time,
            "cycle_time": status.oper.cycle_time,
            "cycle_time_ext": status.oper.cycle_time_ext,
            "gcl_length": status.oper.gcl_length,
        });
        println!("{}", value);
        return;
    }

    println!("gate_open: {}", status.gate_open);
    println!("ipv_enable: {}", status.ipv_enable);
    println!("ipv: {}", status.ipv);
    println!("config_change_time: {}", status.config_change_time);
    println!("current_time: {}", status.current_time);
    println!("config_pending: {}", status.config_pending);
    println!("base_time: {}", status.oper.base_time);
    println!("cycle_time: {}", status.oper.cycle_time);
    println!("cycle_time_ext: {}", status.oper.cycle_time_ext);
    println!("gcl_length: {}", status.oper.gcl_length);
}

/// Run the sg command.
pub async fn run(args: SgArgs) -> Result<()> {
    let conn = PsfpConnection::new().await?;

    if args.status {
        let status = conn.gate_status(args.sgi).await?;
        print_status(&status, args.json);
        return Ok(());
    }

    let config = conn.gate_config(args.sgi).await?;
    let updated = apply(&config, &args);

    if updated == config {
        print_config(&config);
        return Ok(());
    }

    conn.set_gate_config(args.sgi, &updated).await
}
