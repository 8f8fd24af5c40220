//! Per-stream filtering and policing (IEEE 802.1Qci PSFP) family.

mod connection;
mod types;

pub use connection::PsfpConnection;
pub use types::{
    FlowMeterConfig, GateControlEntry, GateControlListConfig, StreamFilterConfig,
    StreamFilterCounters, StreamGateConfig, StreamGateStatus,
};

/// Generic Netlink family name for PSFP.
pub const PSFP_GENL_NAME: &str = "lan966x_psfp_nl";

/// Family interface version.
pub const PSFP_GENL_VERSION: u8 = 1;

/// PSFP commands.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PsfpCmd {
    SfConfSet = 0,
    SfConfGet = 1,
    SfStatusGet = 2,
    GceConfSet = 3,
    GceConfGet = 4,
    GceStatusGet = 5,
    SgConfSet = 6,
    SgConfGet = 7,
    SgStatusGet = 8,
    FmConfSet = 9,
    FmConfGet = 10,
}

/// PSFP attributes.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PsfpAttr {
    None = 0,
    SfConf = 1,
    SfStatus = 2,
    SfSfi = 3,
    GceConf = 4,
    GceSgi = 5,
    GceGci = 6,
    SgConf = 7,
    SgStatus = 8,
    SgSgi = 9,
    FmConf = 10,
    FmFmi = 11,
}
