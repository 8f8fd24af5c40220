//! Fixed-layout records exchanged with the FRER family.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Member or compound stream recovery configuration.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct FrerStreamConfig {
    /// Enable recovery.
    pub enable: u8,
    pub _pad0: [u8; 3],
    /// frerSeqRcvyAlgorithm (0: Vector, 1: Match).
    pub alg: u32,
    /// frerSeqRcvyHistoryLength.
    pub hlen: u8,
    pub _pad1: u8,
    /// frerSeqRcvyResetMSec.
    pub reset_time: u16,
    /// frerSeqRcvyTakeNoSequence.
    pub take_no_seq: u8,
    pub _pad2: u8,
    /// Compound stream ID (member streams only).
    pub cs_id: u16,
}

/// Per-stream recovery counters (frerCpsSeqRcvy*).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct FrerCounters {
    pub out_of_order_packets: u64,
    pub rogue_packets: u64,
    pub passed_packets: u64,
    pub discarded_packets: u64,
    pub lost_packets: u64,
    pub tagless_packets: u64,
    pub resets: u64,
}

/// Ingress flow FRER configuration.
///
/// The split devices travel out of band in the DEV1 and DEV2 attributes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct FrerIflowConfig {
    /// Enable member stream.
    pub ms_enable: u8,
    pub _pad0: u8,
    /// Member stream base ID.
    pub ms_id: u16,
    /// Enable sequence generation.
    pub generation: u8,
    /// Pop R-tag.
    pub pop: u8,
    /// Egress ports to split into.
    pub split_mask: u8,
    pub _pad1: u8,
}

/// Per-VLAN FRER configuration.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct FrerVlanConfig {
    /// Disable flooding.
    pub flood_disable: u8,
    /// Disable learning.
    pub learn_disable: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_sizes() {
        assert_eq!(std::mem::size_of::<FrerStreamConfig>(), 16);
        assert_eq!(std::mem::size_of::<FrerCounters>(), 56);
        assert_eq!(std::mem::size_of::<FrerIflowConfig>(), 8);
        assert_eq!(std::mem::size_of::<FrerVlanConfig>(), 2);
    }

    #[test]
    fn test_stream_config_field_offsets() {
        let cfg = FrerStreamConfig {
            enable: 1,
            alg: 1,
            hlen: 8,
            reset_time: 1000,
            take_no_seq: 1,
            cs_id: 42,
            ..Default::default()
        };
        let bytes = zerocopy::IntoBytes::as_bytes(&cfg);
        assert_eq!(bytes[0], 1);
        assert_eq!(u32::from_ne_bytes(bytes[4..8].try_into().unwrap()), 1);
        assert_eq!(bytes[8], 8);
        assert_eq!(u16::from_ne_bytes(bytes[10..12].try_into().unwrap()), 1000);
        assert_eq!(bytes[12], 1);
        assert_eq!(u16::from_ne_bytes(bytes[14..16].try_into().unwrap()), 42);
    }
}
