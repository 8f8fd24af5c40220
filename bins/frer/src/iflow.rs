//! Ingress flow command implementation.

use clap::Args;
use tsn::netlink::Result;
use tsn::netlink::genl::frer::{FrerConnection, FrerIflow};
use tsn::util::ifname;

#[derive(Args)]
pub struct IflowArgs {
    /// Ingress flow ID
    pub id: u32,

    /// Enable member stream
    #[arg(long = "ms_enable")]
    pub ms_enable: Option<u8>,

    /// Allocated member stream ID
    #[arg(long = "ms_id")]
    pub ms_id: Option<u16>,

    /// Enable sequence generation
    #[arg(long)]
    pub generation: Option<u8>,

    /// Enable popping of R-tag
    #[arg(long)]
    pub pop: Option<u8>,

    /// Split device 1, or '-' to remove
    #[arg(long, value_parser = parse_dev, allow_hyphen_values = true)]
    pub dev1: Option<u32>,

    /// Split device 2, or '-' to remove
    #[arg(long, value_parser = parse_dev, allow_hyphen_values = true)]
    pub dev2: Option<u32>,
}

fn parse_dev(s: &str) -> std::result::Result<u32, String> {
    if s.starts_with('-') {
        return Ok(0);
    }
    ifname::name_to_index(s).map_err(|e| e.to_string())
}

fn apply(flow: &FrerIflow, args: &IflowArgs) -> FrerIflow {
    let mut updated = *flow;
    if let Some(v) = args.ms_enable {
        updated.config.ms_enable = (v != 0) as u8;
    }
    if let Some(v) = args.ms_id {
        updated.config.ms_id = v;
    }
    if let Some(v) = args.generation {
        updated.config.generation = (v != 0) as u8;
    }
    if let Some(v) = args.pop {
        updated.config.pop = (v != 0) as u8;
    }
    if let Some(v) = args.dev1 {
        updated.dev1 = v;
    }
    if let Some(v) = args.dev2 {
        updated.dev2 = v;
    }
    updated
}

fn dev_name(index: u32) -> String {
    ifname::index_to_name(index).unwrap_or_else(|_| "-".to_string())
}

fn print_flow(flow: &FrerIflow) {
    println!("{:<14} {:>8}", "ms_enable:", flow.config.ms_enable);
    println!("{:<14} {:>8}", "ms_id:", flow.config.ms_id);
    println!("{:<14} {:>8}", "generation:", flow.config.generation);
    println!("{:<14} {:>8}", "pop:", flow.config.pop);
    println!("{:<14} {:>8}", "dev1:", dev_name(flow.dev1));
    println!("{:<14} {:>8}", "dev2:", dev_name(flow.dev2));
}

/// Run the iflow command.
pub async fn run(args: IflowArgs) -> Result<()> {
    let conn = FrerConnection::new().await?;
    let flow = conn.iflow(args.id).await?;
    let updated = apply(&flow, &args);

    if updated == flow {
        print_flow(&flow);
        return Ok(());
    }

    conn.set_iflow(args.id, &updated).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tsn::netlink::genl::frer::FrerIflowConfig;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: IflowArgs,
    }

    fn iflow_args(args: &[&str]) -> IflowArgs {
        TestCli::parse_from(std::iter::once("test").chain(args.iter().copied())).args
    }

    #[test]
    fn test_apply_no_options_is_identity() {
        let flow = FrerIflow {
            config: FrerIflowConfig {
                ms_enable: 1,
                ms_id: 4,
                ..Default::default()
            },
            dev1: 2,
            dev2: 0,
        };
        assert_eq!(apply(&flow, &iflow_args(&["7"])), flow);
    }

    #[test]
    fn test_apply_normalizes_booleans() {
        let flow = FrerIflow::default();
        let updated = apply(
            &flow,
            &iflow_args(&["7", "--ms_enable", "3", "--generation", "1", "--pop", "0"]),
        );
        assert_eq!(updated.config.ms_enable, 1);
        assert_eq!(updated.config.generation, 1);
        assert_eq!(updated.config.pop, 0);
    }

    #[test]
    fn test_dash_removes_device() {
        let flow = FrerIflow {
            dev1: 2,
            dev2: 3,
            ..Default::default()
        };
        let updated = apply(&flow, &iflow_args(&["7", "--dev1", "-"]));
        assert_eq!(updated.dev1, 0);
        assert_eq!(updated.dev2, 3);
    }
}
