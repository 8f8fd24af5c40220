//! Fixed-layout records exchanged with the QoS family.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Egress mode: ingress classified PCP/DEI is used as tag PCP/DEI.
pub const E_MODE_CLASSIFIED: u32 = 0;
/// Egress mode: default PCP/DEI is used as tag PCP/DEI.
pub const E_MODE_DEFAULT: u32 = 2;
/// Egress mode: mapped priority and DPL are used as tag PCP/DEI.
pub const E_MODE_MAPPED: u32 = 3;

/// Ingress (PCP, DEI) to (priority, DPL) mapping entry.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct PcpDeiMapping {
    pub prio: u8,
    pub dpl: u8,
}

/// Egress (priority, DPL) to (PCP, DEI) mapping entry.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct PrioDplMapping {
    pub pcp: u8,
    pub dei: u8,
}

/// Per-port QoS configuration.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct QosPortConfig {
    /// Default ingress priority.
    pub i_default_prio: u8,
    /// Default ingress drop precedence level.
    pub i_default_dpl: u8,
    /// Default ingress PCP.
    pub i_default_pcp: u8,
    /// Default ingress DEI.
    pub i_default_dei: u8,
    /// Ingress map indexed by [PCP][DEI].
    pub i_pcp_dei_prio_dpl_map: [[PcpDeiMapping; 2]; 8],
    /// Enable tag-based classification.
    pub i_mode_tag_map_enable: u8,
    /// Enable DSCP-based classification.
    pub i_mode_dscp_map_enable: u8,
    /// Default egress PCP.
    pub e_default_pcp: u8,
    /// Default egress DEI.
    pub e_default_dei: u8,
    /// Egress map indexed by [priority][DPL].
    pub e_prio_dpl_pcp_dei_map: [[PrioDplMapping; 2]; 8],
    /// Egress tagging mode.
    pub e_mode: u32,
}

/// Per-DSCP ingress classification.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct QosDscpPrioDpl {
    /// Only trusted DSCP values are used for classification.
    pub trust: u8,
    pub prio: u8,
    pub dpl: u8,
}
