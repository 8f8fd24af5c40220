//! Shared recovery stream options and output.

use clap::Args;
use tsn::netlink::genl::frer::{FrerCounters, FrerStreamConfig};

/// Recovery options common to compound and member streams.
#[derive(Args)]
pub struct StreamOpts {
    /// Enable recovery
    #[arg(long)]
    pub enable: Option<u8>,

    /// frerSeqRcvyAlgorithm (0: Vector, 1: Match)
    #[arg(long)]
    pub alg: Option<u8>,

    /// frerSeqRcvyHistoryLength
    #[arg(long)]
    pub hlen: Option<u8>,

    /// frerSeqRcvyResetMSec
    #[arg(long = "reset_time")]
    pub reset_time: Option<u16>,

    /// frerSeqRcvyTakeNoSequence
    #[arg(long = "take_no_seq")]
    pub take_no_seq: Option<u8>,
}

/// Apply recovery options on top of a fetched configuration.
///
/// Boolean options are normalized to 0 or 1.
pub fn apply(config: &FrerStreamConfig, opts: &StreamOpts) -> FrerStreamConfig {
    let mut updated = *config;
    if let Some(v) = opts.enable {
        updated.enable = (v != 0) as u8;
    }
    if let Some(v) = opts.alg {
        updated.alg = (v != 0) as u32;
    }
    if let Some(v) = opts.hlen {
        updated.hlen = v;
    }
    if let Some(v) = opts.reset_time {
        updated.reset_time = v;
    }
    if let Some(v) = opts.take_no_seq {
        updated.take_no_seq = (v != 0) as u8;
    }
    updated
}

pub fn print_config(config: &FrerStreamConfig, with_cs_id: bool) {
    println!("{:<14} {:>8}", "enable:", config.enable);
    println!("{:<14} {:>8}", "alg:", config.alg);
    println!("{:<14} {:>8}", "hlen:", config.hlen);
    println!("{:<14} {:>8}", "reset_time:", config.reset_time);
    println!("{:<14} {:>8}", "take_no_seq:", config.take_no_seq);
    if with_cs_id {
        println!("{:<14} {:>8}", "cs_id:", config.cs_id);
    }
}

pub fn print_counters(counters: &FrerCounters, json: bool) {
    if json {
        let value = serde_json::json!({
            "OutOfOrderPackets": counters.out_of_order_packets,
            "RoguePackets": counters.rogue_packets,
            "PassedPackets": counters.passed_packets,
            "DiscardedPackets": counters.discarded_packets,
            "LostPackets": counters.lost_packets,
            "TaglessPackets": counters.tagless_packets,
            "Resets": counters.resets,
        });
        println!("{}", value);
        return;
    }

    println!("{:<18}: {:>16}", "OutOfOrderPackets", counters.out_of_order_packets);
    println!("{:<18}: {:>16}", "RoguePackets", counters.rogue_packets);
    println!("{:<18}: {:>16}", "PassedPackets", counters.passed_packets);
    println!("{:<18}: {:>16}", "DiscardedPackets", counters.discarded_packets);
    println!("{:<18}: {:>16}", "LostPackets", counters.lost_packets);
    println!("{:<18}: {:>16}", "TaglessPackets", counters.tagless_packets);
    println!("{:<18}: {:>16}", "Resets", counters.resets);
}
