//! QoS classification (priority and drop precedence mapping) family.

mod connection;
mod types;

pub use connection::QosConnection;
pub use types::{
    E_MODE_CLASSIFIED, E_MODE_DEFAULT, E_MODE_MAPPED, PcpDeiMapping, PrioDplMapping,
    QosDscpPrioDpl, QosPortConfig,
};

/// Generic Netlink family name for QoS.
pub const QOS_GENL_NAME: &str = "lan966x_qos_nl";

/// Family interface version.
pub const QOS_GENL_VERSION: u8 = 1;

/// QoS commands.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QosCmd {
    PortCfgSet = 0,
    PortCfgGet = 1,
    DscpPrioDplSet = 2,
    DscpPrioDplGet = 3,
}

/// QoS attributes.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QosAttr {
    None = 0,
    Dev = 1,
    PortCfg = 2,
    Dscp = 3,
    DscpPrioDpl = 4,
}
