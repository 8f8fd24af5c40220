//! Generic Netlink protocol support.
//!
//! The controller family (`nlctrl`) resolves family names to runtime
//! family IDs. The LAN966x TSN families built on top of it live in the
//! [`fp`], [`frer`], [`psfp`] and [`qos`] submodules.

mod connection;
mod header;

pub mod fp;
pub mod frer;
pub mod psfp;
pub mod qos;

pub use connection::{FamilyInfo, GenlConnection};
pub use header::{GENL_HDRLEN, GenlMsgHdr};

/// The well-known family ID of the Generic Netlink controller.
pub const GENL_ID_CTRL: u16 = 0x10;

/// Controller commands.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtrlCmd {
    Unspec = 0,
    NewFamily = 1,
    DelFamily = 2,
    GetFamily = 3,
}

/// Controller attributes.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtrlAttr {
    Unspec = 0,
    FamilyId = 1,
    FamilyName = 2,
    Version = 3,
    HdrSize = 4,
    MaxAttr = 5,
}
