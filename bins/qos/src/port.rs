//! Port configuration commands (i_tag_map, i_def, i_mode, e_tag_map,
//! e_def, e_mode).

use clap::Args;
use tsn::netlink::Result;
use tsn::netlink::genl::qos::{
    E_MODE_CLASSIFIED, E_MODE_DEFAULT, E_MODE_MAPPED, QosConnection, QosPortConfig,
};
use tsn::util::ifname;

/// One tag map column, one digit per PCP (8 digits) or per PCP and DEI
/// (16 digits). A plain Vec would make clap treat the option as
/// multi-valued.
#[derive(Clone)]
pub struct TagMap(Vec<u8>);

fn parse_map(s: &str) -> std::result::Result<TagMap, String> {
    if s.len() != 8 && s.len() != 16 {
        return Err(format!("expected 8 or 16 digits, got {}", s.len()));
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid digit in map: {}", s));
    }
    Ok(TagMap(s.bytes().map(|b| b - b'0').collect()))
}

/// Fetch the port configuration, apply an edit and write it back only
/// when something changed. An unchanged configuration is printed.
async fn update_port(
    dev: &str,
    edit: impl FnOnce(&QosPortConfig) -> QosPortConfig,
    print: impl FnOnce(&QosPortConfig),
) -> Result<()> {
    let ifindex = ifname::name_to_index(dev)?;
    let conn = QosConnection::new().await?;
    let config = conn.port_config(ifindex).await?;
    let updated = edit(&config);

    if updated == config {
        print(&config);
        return Ok(());
    }

    conn.set_port_config(ifindex, &updated).await
}

#[derive(Args)]
pub struct ITagMapArgs {
    /// Interface name
    pub dev: String,

    /// Priority per (PCP, DEI), 8 or 16 digits
    #[arg(long, value_parser = parse_map)]
    pub prio: Option<TagMap>,

    /// DPL per (PCP, DEI), 8 or 16 digits
    #[arg(long, value_parser = parse_map)]
    pub dpl: Option<TagMap>,
}

fn apply_i_tag_map(config: &QosPortConfig, args: &ITagMapArgs) -> QosPortConfig {
    let mut updated = *config;
    if let Some(TagMap(map)) = &args.prio {
        for (i, &v) in map.iter().enumerate() {
            updated.i_pcp_dei_prio_dpl_map[i % 8][i / 8].prio = v;
        }
    }
    if let Some(TagMap(map)) = &args.dpl {
        for (i, &v) in map.iter().enumerate() {
            updated.i_pcp_dei_prio_dpl_map[i % 8][i / 8].dpl = v;
        }
    }
    updated
}

fn print_i_tag_map(config: &QosPortConfig) {
    let mut prio = String::new();
    let mut dpl = String::new();
    for dei in 0..2 {
        for pcp in 0..8 {
            let entry = config.i_pcp_dei_prio_dpl_map[pcp][dei];
            prio.push_str(&entry.prio.to_string());
            dpl.push_str(&entry.dpl.to_string());
        }
    }
    println!("i_tag_map --prio {} --dpl {}", prio, dpl);
}

pub async fn run_i_tag_map(args: ITagMapArgs) -> Result<()> {
    update_port(
        &args.dev,
        |config| apply_i_tag_map(config, &args),
        print_i_tag_map,
    )
    .await
}

#[derive(Args)]
pub struct IDefArgs {
    /// Interface name
    pub dev: String,

    /// Default priority
    #[arg(long)]
    pub prio: Option<u8>,

    /// Default PCP
    #[arg(long)]
    pub pcp: Option<u8>,

    /// Default DEI
    #[arg(long)]
    pub dei: Option<u8>,

    /// Default DPL
    #[arg(long)]
    pub dpl: Option<u8>,
}

fn apply_i_def(config: &QosPortConfig, args: &IDefArgs) -> QosPortConfig {
    let mut updated = *config;
    if let Some(v) = args.prio {
        updated.i_default_prio = v;
    }
    if let Some(v) = args.pcp {
        updated.i_default_pcp = v;
    }
    if let Some(v) = args.dei {
        updated.i_default_dei = v;
    }
    if let Some(v) = args.dpl {
        updated.i_default_dpl = v;
    }
    updated
}

pub async fn run_i_def(args: IDefArgs) -> Result<()> {
    update_port(
        &args.dev,
        |config| apply_i_def(config, &args),
        |config| {
            println!(
                "i_def --prio {} --pcp {} --dei {} --dpl {}",
                config.i_default_prio,
                config.i_default_pcp,
                config.i_default_dei,
                config.i_default_dpl
            );
        },
    )
    .await
}

#[derive(Args)]
pub struct IModeArgs {
    /// Interface name
    pub dev: String,

    /// Enable tag-based classification
    #[arg(long)]
    pub tag: Option<u8>,

    /// Enable DSCP-based classification
    #[arg(long)]
    pub dscp: Option<u8>,
}

fn apply_i_mode(config: &QosPortConfig, args: &IModeArgs) -> QosPortConfig {
    let mut updated = *config;
    if let Some(v) = args.tag {
        updated.i_mode_tag_map_enable = (v != 0) as u8;
    }
    if let Some(v) = args.dscp {
        updated.i_mode_dscp_map_enable = (v != 0) as u8;
    }
    updated
}

pub async fn run_i_mode(args: IModeArgs) -> Result<()> {
    update_port(
        &args.dev,
        |config| apply_i_mode(config, &args),
        |config| {
            println!(
                "i_mode --tag {} --dscp {}",
                config.i_mode_tag_map_enable, config.i_mode_dscp_map_enable
            );
        },
    )
    .await
}

#[derive(Args)]
pub struct ETagMapArgs {
    /// Interface name
    pub dev: String,

    /// PCP per (priority, DPL), 8 or 16 digits
    #[arg(long, value_parser = parse_map)]
    pub pcp: Option<TagMap>,

    /// DEI per (priority, DPL), 8 or 16 digits
    #[arg(long, value_parser = parse_map)]
    pub dei: Option<TagMap>,
}

fn apply_e_tag_map(config: &QosPortConfig, args: &ETagMapArgs) -> QosPortConfig {
    let mut updated = *config;
    if let Some(TagMap(map)) = &args.pcp {
        for (i, &v) in map.iter().enumerate() {
            updated.e_prio_dpl_pcp_dei_map[i % 8][i / 8].pcp = v;
        }
    }
    if let Some(TagMap(map)) = &args.dei {
        for (i, &v) in map.iter().enumerate() {
            updated.e_prio_dpl_pcp_dei_map[i % 8][i / 8].dei = v;
        }
    }
    updated
}

fn print_e_tag_map(config: &QosPortConfig) {
    let mut pcp = String::new();
    let mut dei = String::new();
    for dpl in 0..2 {
        for prio in 0..8 {
            let entry = config.e_prio_dpl_pcp_dei_map[prio][dpl];
            pcp.push_str(&entry.pcp.to_string());
            dei.push_str(&entry.dei.to_string());
        }
    }
    println!("e_tag_map --pcp {} --dei {}", pcp, dei);
}

pub async fn run_e_tag_map(args: ETagMapArgs) -> Result<()> {
    update_port(
        &args.dev,
        |config| apply_e_tag_map(config, &args),
        print_e_tag_map,
    )
    .await
}

#[derive(Args)]
pub struct EDefArgs {
    /// Interface name
    pub dev: String,

    /// Default PCP
    #[arg(long)]
    pub pcp: Option<u8>,

    /// Default DEI
    #[arg(long)]
    pub dei: Option<u8>,
}

fn apply_e_def(config: &QosPortConfig, args: &EDefArgs) -> QosPortConfig {
    let mut updated = *config;
    if let Some(v) = args.pcp {
        updated.e_default_pcp = v;
    }
    if let Some(v) = args.dei {
        updated.e_default_dei = v;
    }
    updated
}

pub async fn run_e_def(args: EDefArgs) -> Result<()> {
    update_port(
        &args.dev,
        |config| apply_e_def(config, &args),
        |config| {
            println!(
                "e_def --pcp {} --dei {}",
                config.e_default_pcp, config.e_default_dei
            );
        },
    )
    .await
}

#[derive(Args)]
pub struct EModeArgs {
    /// Interface name
    pub dev: String,

    /// Use default PCP/DEI as tag PCP/DEI
    #[arg(long, conflicts_with_all = ["classified", "mapped"])]
    pub default: bool,

    /// Use ingress classified PCP/DEI as tag PCP/DEI
    #[arg(long, conflicts_with = "mapped")]
    pub classified: bool,

    /// Use mapped priority and DPL as tag PCP/DEI
    #[arg(long)]
    pub mapped: bool,
}

fn apply_e_mode(config: &QosPortConfig, args: &EModeArgs) -> QosPortConfig {
    let mut updated = *config;
    if args.default {
        updated.e_mode = E_MODE_DEFAULT;
    } else if args.classified {
        updated.e_mode = E_MODE_CLASSIFIED;
    } else if args.mapped {
        updated.e_mode = E_MODE_MAPPED;
    }
    updated
}

pub async fn run_e_mode(args: EModeArgs) -> Result<()> {
    update_port(
        &args.dev,
        |config| apply_e_mode(config, &args),
        |config| {
            println!(
                "e_mode --default {} --classified {} --mapped {}",
                (config.e_mode == E_MODE_DEFAULT) as u8,
                (config.e_mode == E_MODE_CLASSIFIED) as u8,
                (config.e_mode == E_MODE_MAPPED) as u8
            );
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct ITagMapCli {
        #[command(flatten)]
        args: ITagMapArgs,
    }

    #[derive(Parser)]
    struct ETagMapCli {
        #[command(flatten)]
        args: ETagMapArgs,
    }

    #[derive(Parser)]
    struct EModeCli {
        #[command(flatten)]
        args: EModeArgs,
    }

    fn i_tag_map_args(args: &[&str]) -> ITagMapArgs {
        ITagMapCli::parse_from(std::iter::once("test").chain(args.iter().copied())).args
    }

    #[test]
    fn test_parse_map() {
        assert_eq!(parse_map("01234567").unwrap().0, vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(parse_map("0123456701234567").unwrap().0.len(), 16);
        assert!(parse_map("0123").is_err());
        assert!(parse_map("0123456x").is_err());
        assert!(parse_map("").is_err());
    }

    #[test]
    fn test_apply_i_tag_map_eight_digits_sets_dei0_only() {
        let mut config = QosPortConfig::default();
        config.i_pcp_dei_prio_dpl_map[3][1].prio = 9;

        let updated = apply_i_tag_map(&config, &i_tag_map_args(&["eth0", "--prio", "76543210"]));
        assert_eq!(updated.i_pcp_dei_prio_dpl_map[0][0].prio, 7);
        assert_eq!(updated.i_pcp_dei_prio_dpl_map[7][0].prio, 0);
        // DEI 1 column untouched
        assert_eq!(updated.i_pcp_dei_prio_dpl_map[3][1].prio, 9);
    }

    #[test]
    fn test_apply_i_tag_map_sixteen_digits() {
        let config = QosPortConfig::default();
        let updated = apply_i_tag_map(
            &config,
            &i_tag_map_args(&["eth0", "--dpl", "0000000011111111"]),
        );
        for pcp in 0..8 {
            assert_eq!(updated.i_pcp_dei_prio_dpl_map[pcp][0].dpl, 0);
            assert_eq!(updated.i_pcp_dei_prio_dpl_map[pcp][1].dpl, 1);
        }
    }

    #[test]
    fn test_parse_map_option_holds_one_column() {
        // The option takes the whole column as a single value, it is
        // not a per-digit multi-value argument.
        let args = i_tag_map_args(&["eth0", "--prio", "76543210", "--dpl", "11111111"]);
        assert_eq!(args.prio.unwrap().0.len(), 8);
        assert_eq!(args.dpl.unwrap().0, vec![1; 8]);
    }

    #[test]
    fn test_apply_e_tag_map() {
        let config = QosPortConfig::default();
        let args = ETagMapCli::parse_from(["test", "eth0", "--pcp", "7654321076543210"]).args;
        let updated = apply_e_tag_map(&config, &args);
        assert_eq!(updated.e_prio_dpl_pcp_dei_map[0][0].pcp, 7);
        assert_eq!(updated.e_prio_dpl_pcp_dei_map[7][0].pcp, 0);
        assert_eq!(updated.e_prio_dpl_pcp_dei_map[0][1].pcp, 7);
        assert_eq!(updated.e_prio_dpl_pcp_dei_map[0][0].dei, 0);
    }

    #[test]
    fn test_apply_e_mode() {
        let config = QosPortConfig::default();

        let args = EModeCli::parse_from(["test", "eth0", "--mapped"]).args;
        assert_eq!(apply_e_mode(&config, &args).e_mode, E_MODE_MAPPED);

        let args = EModeCli::parse_from(["test", "eth0"]).args;
        assert_eq!(apply_e_mode(&config, &args), config);
    }

    #[test]
    fn test_e_mode_flags_conflict() {
        assert!(EModeCli::try_parse_from(["test", "eth0", "--default", "--mapped"]).is_err());
    }
}
