//! Frame preemption (IEEE 802.1Qbu / 802.3br) family.

mod connection;
mod types;

pub use connection::FpConnection;
pub use types::{FpPortConfig, FpPortStatus};

/// Generic Netlink family name for frame preemption.
pub const FP_GENL_NAME: &str = "lan966x_netlink";

/// Family interface version.
pub const FP_GENL_VERSION: u8 = 1;

/// Frame preemption commands.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpCmd {
    ConfSet = 0,
    ConfGet = 1,
    StatusGet = 2,
}

/// Frame preemption attributes.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpAttr {
    None = 0,
    Conf = 1,
    Status = 2,
    Idx = 3,
}
