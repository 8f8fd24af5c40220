//! Stream filter command implementation.

use clap::Args;
use tsn::netlink::Result;
use tsn::netlink::genl::psfp::{PsfpConnection, StreamFilterConfig, StreamFilterCounters};

#[derive(Args)]
pub struct SfArgs {
    /// Stream filter instance
    pub sfi: u32,

    /// Enable the filter
    #[arg(long)]
    pub enable: Option<u8>,

    /// Maximum SDU size (zero disables the check)
    #[arg(long = "max_sdu")]
    pub max_sdu: Option<u16>,

    /// StreamBlockedDueToOversizeFrameEnable
    #[arg(long = "block_oversize_enable")]
    pub block_oversize_enable: Option<u8>,

    /// StreamBlockedDueToOversizeFrame
    #[arg(long = "block_oversize")]
    pub block_oversize: Option<u8>,

    /// Show counters
    #[arg(long)]
    pub status: bool,

    /// Print counters as JSON
    #[arg(long)]
    pub json: bool,
}

fn apply(config: &StreamFilterConfig, args: &SfArgs) -> StreamFilterConfig {
    let mut updated = *config;
    if let Some(v) = args.enable {
        updated.enable = v;
    }
    if let Some(v) = args.max_sdu {
        updated.max_sdu = v;
    }
    if let Some(v) = args.block_oversize_enable {
        updated.block_oversize_enable = v;
    }
    if let Some(v) = args.block_oversize {
        updated.block_oversize = v;
    }
    updated
}

fn print_config(config: &StreamFilterConfig) {
    println!("enable: {}", config.enable);
    println!("max_sdu: {}", config.max_sdu);
    println!("block_oversize_enable: {}", config.block_oversize_enable);
    println!("block_oversize: {}", config.block_oversize);
}

fn print_counters(counters: &StreamFilterCounters, json: bool) {
    if json {
        let value = serde_json::json!({
            "matching_frames_count": counters.matching_frames_count,
            "passing_frames_count": counters.passing_frames_count,
            "not_passing_frames_count": counters.not_passing_frames_count,
            "passing_sdu_count": counters.passing_sdu_count,
            "not_passing_sdu_count": counters.not_passing_sdu_count,
            "red_frames_count": counters.red_frames_count,
        });
        println!("{}", value);
        return;
    }

    println!("matching_frames_count: {}", counters.matching_frames_count);
    println!("passing_frames_count: {}", counters.passing_frames_count);
    println!(
        "not_passing_frames_count: {}",
        counters.not_passing_frames_count
    );
    println!("passing_sdu_count: {}", counters.passing_sdu_count);
    println!("not_passing_sdu_count: {}", counters.not_passing_sdu_count);
    println!("red_frames_count: {}", counters.red_frames_count);
}

/// Run the sf command.
pub async fn run(args: SfArgs) -> Result<()> {
    let conn = PsfpConnection::new().await?;

    if args.status {
        let counters = conn.filter_counters(args.sfi).await?;
        print_counters(&counters, args.json);
        return Ok(());
    }

    let config = conn.filter_config(args.sfi).await?;
    let updated = apply(&config, &args);

    if updated == config {
        print_config(&config);
        return Ok(());
    }

    conn.set_filter_config(args.sfi, &updated).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: SfArgs,
    }

    fn sf_args(args: &[&str]) -> SfArgs {
        TestCli::parse_from(std::iter::once("test").chain(args.iter().copied())).args
    }

    #[test]
    fn test_apply_no_options_is_identity() {
        let config = StreamFilterConfig {
            enable: 1,
            max_sdu: 1500,
            ..Default::default()
        };
        assert_eq!(apply(&config, &sf_args(&["1"])), config);
    }

    #[test]
    fn test_apply_edits() {
        let config = StreamFilterConfig::default();
        let updated = apply(
            &config,
            &sf_args(&["1", "--enable", "1", "--max_sdu", "1518"]),
        );
        assert_eq!(updated.enable, 1);
        assert_eq!(updated.max_sdu, 1518);
        assert_eq!(updated.block_oversize_enable, 0);
    }
}
