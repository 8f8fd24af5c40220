//! Flow meter command implementation.

use clap::Args;
use tsn::netlink::Result;
use tsn::netlink::genl::psfp::{FlowMeterConfig, PsfpConnection};

#[derive(Args)]
pub struct FmArgs {
    /// Flow meter instance
    pub fmi: u32,

    /// Enable the flow meter
    #[arg(long)]
    pub enable: Option<u8>,

    /// Committed information rate in kbit/s
    #[arg(long)]
    pub cir: Option<u32>,

    /// Committed burst size in octets
    #[arg(long)]
    pub cbs: Option<u32>,

    /// Excess information rate in kbit/s
    #[arg(long)]
    pub eir: Option<u32>,

    /// Excess burst size in octets
    #[arg(long)]
    pub ebs: Option<u32>,

    /// Coupling flag
    #[arg(long)]
    pub cf: Option<u8>,

    /// Drop yellow frames
    #[arg(long = "drop_on_yellow")]
    pub drop_on_yellow: Option<u8>,

    /// Enable red marking
    #[arg(long = "mark_red_enable")]
    pub mark_red_enable: Option<u8>,

    /// Mark red
    #[arg(long = "mark_red")]
    pub mark_red: Option<u8>,
}

fn apply(config: &FlowMeterConfig, args: &FmArgs) -> FlowMeterConfig {
    let mut updated = *config;
    if let Some(v) = args.enable {
        updated.enable = v;
    }
    if let Some(v) = args.cir {
        updated.cir = v;
    }
    if let Some(v) = args.cbs {
        updated.cbs = v;
    }
    if let Some(v) = args.eir {
        updated.eir = v;
    }
    if let Some(v) = args.ebs {
        updated.ebs = v;
    }
    if let Some(v) = args.cf {
        updated.cf = v;
    }
    if let Some(v) = args.drop_on_yellow {
        updated.drop_on_yellow = v;
    }
    if let Some(v) = args.mark_red_enable {
        updated.mark_red_enable = v;
    }
    if let Some(v) = args.mark_red {
        updated.mark_red = v;
    }
    updated
}

fn print_config(config: &FlowMeterConfig) {
    println!("enable: {}", config.enable);
    println!("cir: {}", config.cir);
    println!("cbs: {}", config.cbs);
    println!("eir: {}", config.eir);
    println!("ebs: {}", config.ebs);
    println!("cf: {}", config.cf);
    println!("drop_on_yellow: {}", config.drop_on_yellow);
    println!("mark_red_enable: {}", config.mark_red_enable);
    println!("mark_red: {}", config.mark_red);
}

/// Run the fm command.
pub async fn run(args: FmArgs) -> Result<()> {
    let conn = PsfpConnection::new().await?;
    let config = conn.meter_config(args.fmi).await?;
    let updated = apply(&config, &args);

    if updated == config {
        print_config(&config);
        return Ok(());
    }

    conn.set_meter_config(args.fmi, &updated).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: FmArgs,
    }

    fn fm_args(args: &[&str]) -> FmArgs {
        TestCli::parse_from(std::iter::once("test").chain(args.iter().copied())).args
    }

    #[test]
    fn test_apply_no_options_is_identity() {
        let config = FlowMeterConfig {
            enable: 1,
            cir: 10_000,
            cbs: 4096,
            ..Default::default()
        };
        assert_eq!(apply(&config, &fm_args(&["3"])), config);
    }

    #[test]
    fn test_apply_rate_edits() {
        let config = FlowMeterConfig {
            eir: 500,
            ..Default::default()
        };
        let updated = apply(&config, &fm_args(&["3", "--cir", "1000", "--cbs", "2000"]));
        assert_eq!(updated.cir, 1000);
        assert_eq!(updated.cbs, 2000);
        assert_eq!(updated.eir, 500);
        assert_ne!(updated, config);
    }
}
