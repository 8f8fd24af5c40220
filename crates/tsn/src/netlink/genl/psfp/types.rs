//! Fixed-layout records exchanged with the PSFP family.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Stream filter configuration.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct StreamFilterConfig {
    /// Enable the filter.
    pub enable: u8,
    pub _pad: u8,
    /// Maximum SDU size, zero disables the check.
    pub max_sdu: u16,
    /// StreamBlockedDueToOversizeFrameEnable.
    pub block_oversize_enable: u8,
    /// StreamBlockedDueToOversizeFrame.
    pub block_oversize: u8,
}

/// Stream filter counters.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct StreamFilterCounters {
    pub matching_frames_count: u64,
    pub passing_frames_count: u64,
    pub not_passing_frames_count: u64,
    pub passing_sdu_count: u64,
    pub not_passing_sdu_count: u64,
    pub red_frames_count: u64,
}

/// Gate control entry, used for both configuration and status.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct GateControlEntry {
    /// StreamGateState.
    pub gate_open: u8,
    /// Enable IPV.
    pub ipv_enable: u8,
    /// Internal priority value.
    pub ipv: u8,
    pub _pad: u8,
    /// TimeInterval in nanoseconds.
    pub time_interval: u32,
    /// IntervalOctetMax, zero disables the check.
    pub octet_max: u32,
}

/// Gate control list parameters (PSFPAdmin* or PSFPOper*).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct GateControlListConfig {
    /// Base time in nanoseconds.
    pub base_time: i64,
    /// Cycle time in nanoseconds.
    pub cycle_time: u32,
    /// Cycle time extension in nanoseconds.
    pub cycle_time_ext: u32,
    /// Control list length.
    pub gcl_length: u32,
    pub _pad: [u8; 4],
}

/// Stream gate configuration.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct StreamGateConfig {
    /// PSFPGateEnabled.
    pub enable: u8,
    /// PSFPAdminGateStates, the initial gate state.
    pub gate_open: u8,
    /// Enable PSFPAdminIPV.
    pub ipv_enable: u8,
    /// PSFPAdminIPV.
    pub ipv: u8,
    /// PSFPGateClosedDueToInvalidRxEnable.
    pub close_invalid_rx_enable: u8,
    /// PSFPGateClosedDueToInvalidRx.
    pub close_invalid_rx: u8,
    /// PSFPGateClosedDueToOctetsExceededEnable.
    pub close_octets_exceeded_enable: u8,
    /// PSFPGateClosedDueOctetsExceeded.
    pub close_octets_exceeded: u8,
    /// PSFPConfigChange, applies the admin list.
    pub config_change: u8,
    pub _pad: [u8; 7],
    /// PSFPAdmin* list parameters.
    pub admin: GateControlListConfig,
}

/// Stream gate status.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct StreamGateStatus {
    /// PSFPOperGateStates.
    pub gate_open: u8,
    /// PSFPOperIPV enabled.
    pub ipv_enable: u8,
    /// PSFPOperIPV.
    pub ipv: u8,
    pub _pad0: [u8; 5],
    /// PSFPConfigChangeTime.
    pub config_change_time: i64,
    /// PSFPCurrentTime.
    pub current_time: i64,
    /// PSFPConfigPending.
    pub config_pending: u8,
    pub _pad1: [u8; 7],
    /// PSFPOper* list parameters.
    pub oper: GateControlListConfig,
}

/// Flow meter configuration.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct FlowMeterConfig {
    /// Enable the flow meter.
    pub enable: u8,
    pub _pad: [u8; 3],
    /// Committed information rate in kbit/s.
    pub cir: u32,
    /// Committed burst size in octets.
    pub cbs: u32,
    /// Excess information rate in kbit/s.
    pub eir: u32,
    /// Excess burst size in octets.
    pub ebs: u32,
    /// Coupling flag.
    pub cf: u8,
    pub drop_on_yellow: u8,
    pub mark_red_enable: u8,
    pub mark_red: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_sizes() {
        assert_eq!(std::mem::size_of::<StreamFilterConfig>(), 6);
        assert_eq!(std::mem::size_of::<StreamFilterCounters>(), 48);
        assert_eq!(std::mem::size_of::<GateControlEntry>(), 12);
        assert_eq!(std::mem::size_of::<GateControlListConfig>(), 24);
        assert_eq!(std::mem::size_of::<StreamGateConfig>(), 40);
        assert_eq!(std::mem::size_of::<StreamGateStatus>(), 56);
        assert_eq!(std::mem::size_of::<FlowMeterConfig>(), 24);
    }

    #[test]
    fn test_gate_config_field_offsets() {
        let config = StreamGateConfig {
            enable: 1,
            config_change: 1,
            admin: GateControlListConfig {
                base_time: 1_000_000_000,
                cycle_time: 200_000,
                cycle_time_ext: 0,
                gcl_length: 2,
                ..Default::default()
            },
            ..Default::default()
        };
        let bytes = zerocopy::IntoBytes::as_bytes(&config);
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[8], 1);
        assert_eq!(
            i64::from_ne_bytes(bytes[16..24].try_into().unwrap()),
            1_000_000_000
        );
        assert_eq!(
            u32::from_ne_bytes(bytes[24..28].try_into().unwrap()),
            200_000
        );
        assert_eq!(u32::from_ne_bytes(bytes[32..36].try_into().unwrap()), 2);
    }
}
