//! Frame replication and elimination (IEEE 802.1CB FRER) family.

mod connection;
mod types;

pub use connection::{FrerConnection, FrerIflow};
pub use types::{FrerCounters, FrerIflowConfig, FrerStreamConfig, FrerVlanConfig};

/// Generic Netlink family name for FRER.
pub const FRER_GENL_NAME: &str = "lan966x_frer_nl";

/// Family interface version.
pub const FRER_GENL_VERSION: u8 = 1;

/// FRER commands.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrerCmd {
    CsCfgSet = 0,
    CsCfgGet = 1,
    CsCntGet = 2,
    CsCntClr = 3,
    MsAlloc = 4,
    MsFree = 5,
    MsCfgSet = 6,
    MsCfgGet = 7,
    MsCntGet = 8,
    MsCntClr = 9,
    IflowCfgSet = 10,
    IflowCfgGet = 11,
    VlanCfgSet = 12,
    VlanCfgGet = 13,
}

/// FRER attributes.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrerAttr {
    None = 0,
    Id = 1,
    Dev1 = 2,
    Dev2 = 3,
    StreamCfg = 4,
    StreamCnt = 5,
    IflowCfg = 6,
    VlanCfg = 7,
}
