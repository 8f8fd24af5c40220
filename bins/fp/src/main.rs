//! fp - frame preemption configuration utility
//!
//! Configures IEEE 802.1Qbu / 802.3br frame preemption on LAN966x
//! switch ports via Generic Netlink.

use clap::Parser;
use tsn::netlink::Result;
use tsn::netlink::genl::fp::{FpConnection, FpPortConfig, FpPortStatus};
use tsn::util::ifname;

#[derive(Parser)]
#[command(name = "fp")]
#[command(about = "LAN966x frame preemption configuration", long_about = None)]
#[command(version)]
struct Cli {
    /// Interface name
    #[arg(long)]
    dev: String,

    /// Preemptible priority bitmask (hex with 0x prefix, or decimal)
    #[arg(long = "admin_status", value_parser = parse_admin_status)]
    admin_status: Option<u8>,

    /// Enable preemption transmission (aMACMergeEnableTx)
    #[arg(long = "enable_tx")]
    enable_tx: Option<u8>,

    /// Disable the verification handshake (aMACMergeVerifyDisableTx)
    #[arg(long = "verify_disable_tx")]
    verify_disable_tx: Option<u8>,

    /// Verification timeout in milliseconds (aMACMergeVerifyTime)
    #[arg(long = "verify_time")]
    verify_time: Option<u8>,

    /// Additional fragment size (aMACMergeAddFragSize)
    #[arg(long = "add_frag_size")]
    add_frag_size: Option<u8>,

    /// Show port status instead of configuration
    #[arg(long)]
    status: bool,

    /// Print status as JSON
    #[arg(long)]
    json: bool,
}

fn parse_admin_status(s: &str) -> std::result::Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|_| format!("invalid priority mask: {}", s))
}

fn apply(config: &FpPortConfig, cli: &Cli) -> FpPortConfig {
    let mut updated = *config;
    if let Some(v) = cli.admin_status {
        updated.admin_status = v;
    }
    if let Some(v) = cli.enable_tx {
        updated.enable_tx = v;
    }
    if let Some(v) = cli.verify_disable_tx {
        updated.verify_disable_tx = v;
    }
    if let Some(v) = cli.verify_time {
        updated.verify_time = v;
    }
    if let Some(v) = cli.add_frag_size {
        updated.add_frag_size = v;
    }
    updated
}

fn print_config(config: &FpPortConfig) {
    println!("admin_status: 0x{:x}", config.admin_status);
    println!("enable_tx: {}", config.enable_tx);
    println!("verify_disable_tx: {}", config.verify_disable_tx);
    println!("verify_time: {}", config.verify_time);
    println!("add_frag_size: {}", config.add_frag_size);
}

fn print_status(dev: &str, status: &FpPortStatus, json: bool) {
    if json {
        let value = serde_json::json!({
            "dev": dev,
            "hold_advance": status.hold_advance,
            "release_advance": status.release_advance,
            "preemption_active": status.preemption_active,
            "hold_request": status.hold_request,
            "status_verify": status.status_verify_name(),
        });
        println!("{}", value);
        return;
    }

    println!("dev: {}", dev);
    println!("hold_advance: {}", status.hold_advance);
    println!("release_advance: {}", status.release_advance);
    println!("preemption_active: {}", status.preemption_active);
    println!("hold_request: {}", status.hold_request);
    println!("status_verify: {}", status.status_verify_name());
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
    let ifindex = ifname::name_to_index(&cli.dev)?;
    let conn = FpConnection::new().await?;

    if cli.status {
        let status = conn.port_status(ifindex).await?;
        print_status(&cli.dev, &status, cli.json);
        return Ok(());
    }

    let config = conn.port_config(ifindex).await?;
    let updated = apply(&config, &cli);

    if updated == config {
        print_config(&config);
        return Ok(());
    }

    conn.set_port_config(ifindex, &updated).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("fp").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_admin_status() {
        assert_eq!(parse_admin_status("0xfe").unwrap(), 0xfe);
        assert_eq!(parse_admin_status("0XFF").unwrap(), 0xff);
        assert_eq!(parse_admin_status("5").unwrap(), 5);
        assert!(parse_admin_status("0xzz").is_err());
        assert!(parse_admin_status("300").is_err());
    }

    #[test]
    fn test_apply_no_options_is_identity() {
        let config = FpPortConfig {
            admin_status: 0x0f,
            enable_tx: 1,
            verify_disable_tx: 0,
            verify_time: 10,
            add_frag_size: 2,
        };
        let updated = apply(&config, &cli(&["--dev", "eth0"]));
        assert_eq!(updated, config);
    }

    #[test]
    fn test_apply_edits_only_named_fields() {
        let config = FpPortConfig {
            admin_status: 0x0f,
            enable_tx: 0,
            verify_disable_tx: 0,
            verify_time: 10,
            add_frag_size: 2,
        };
        let updated = apply(
            &config,
            &cli(&["--dev", "eth0", "--admin_status", "0xfe", "--enable_tx", "1"]),
        );
        assert_eq!(updated.admin_status, 0xfe);
        assert_eq!(updated.enable_tx, 1);
        assert_eq!(updated.verify_time, 10);
        assert_eq!(updated.add_frag_size, 2);
        assert_ne!(updated, config);
    }
}
