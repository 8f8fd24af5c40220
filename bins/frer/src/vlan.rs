//! VLAN command implementation.

use clap::Args;
use tsn::netlink::Result;
use tsn::netlink::genl::frer::{FrerConnection, FrerVlanConfig};

#[derive(Args)]
pub struct VlanArgs {
    /// VLAN ID
    pub vid: u32,

    /// Disable flooding in the VLAN
    #[arg(long = "flood_disable")]
    pub flood_disable: Option<u8>,

    /// Disable learning in the VLAN
    #[arg(long = "learn_disable")]
    pub learn_disable: Option<u8>,
}

fn apply(config: &FrerVlanConfig, args: &VlanArgs) -> FrerVlanConfig {
    let mut updated = *config;
    if let Some(v) = args.flood_disable {
        updated.flood_disable = (v != 0) as u8;
    }
    if let Some(v) = args.learn_disable {
        updated.learn_disable = (v != 0) as u8;
    }
    updated
}

/// Run the vlan command.
pub async fn run(args: VlanArgs) -> Result<()> {
    let conn = FrerConnection::new().await?;
    let config = conn.vlan_config(args.vid).await?;
    let updated = apply(&config, &args);

    if updated == config {
        println!("{:<14} {:>8}", "flood_disable:", config.flood_disable);
        println!("{:<14} {:>8}", "learn_disable:", config.learn_disable);
        return Ok(());
    }

    conn.set_vlan_config(args.vid, &updated).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: VlanArgs,
    }

    fn vlan_args(args: &[&str]) -> VlanArgs {
        TestCli::parse_from(std::iter::once("test").chain(args.iter().copied())).args
    }

    #[test]
    fn test_apply() {
        let config = FrerVlanConfig {
            flood_disable: 0,
            learn_disable: 1,
        };
        let updated = apply(&config, &vlan_args(&["100", "--flood_disable", "7"]));
        assert_eq!(updated.flood_disable, 1);
        assert_eq!(updated.learn_disable, 1);

        assert_eq!(apply(&config, &vlan_args(&["100"])), config);
    }
}
