//! Fixed-layout records exchanged with the frame preemption family.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Per-port frame preemption configuration.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct FpPortConfig {
    /// Bitmask of preemptible priorities (802.1Qbu framePreemptionStatusTable).
    pub admin_status: u8,
    /// Enable preemption transmission.
    pub enable_tx: u8,
    /// Disable the verification handshake.
    pub verify_disable_tx: u8,
    /// Verification timeout in milliseconds.
    pub verify_time: u8,
    /// Additional fragment size (addFragSize).
    pub add_frag_size: u8,
}

/// Per-port frame preemption status.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct FpPortStatus {
    /// holdAdvance in nanoseconds.
    pub hold_advance: u32,
    /// releaseAdvance in nanoseconds.
    pub release_advance: u32,
    /// Whether preemption is currently active on the port.
    pub preemption_active: u8,
    /// Whether a hold request is in effect.
    pub hold_request: u8,
    pub _pad: [u8; 2],
    /// Verification state machine state.
    pub status_verify: u32,
}

impl FpPortStatus {
    /// Name of the verification state machine state.
    pub fn status_verify_name(&self) -> &'static str {
        match self.status_verify {
            0 => "Initial",
            1 => "Idle",
            2 => "Send",
            3 => "Wait",
            4 => "Succeeded",
            5 => "Failed",
            6 => "Disabled",
            _ => "Unknown",
        }
    }
}
