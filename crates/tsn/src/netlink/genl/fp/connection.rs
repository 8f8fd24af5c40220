//! Connection to the frame preemption family.

use tracing::debug;

use super::types::{FpPortConfig, FpPortStatus};
use super::{FP_GENL_NAME, FP_GENL_VERSION, FpAttr, FpCmd};
use crate::netlink::attr::{AttrIter, get};
use crate::netlink::error::{Error, Result};
use crate::netlink::genl::connection::{GenlConnection, reply_attrs};

/// Connection to the frame preemption Generic Netlink family.
pub struct FpConnection {
    genl: GenlConnection,
    family_id: u16,
}

impl FpConnection {
    /// Connect and resolve the family ID.
    pub async fn new() -> Result<Self> {
        let genl = GenlConnection::new()?;
        let family = genl.get_family(FP_GENL_NAME).await?;
        debug!("connected to {} (id {})", FP_GENL_NAME, family.id);
        Ok(Self {
            genl,
            family_id: family.id,
        })
    }

    /// Fetch the preemption configuration for a port.
    pub async fn port_config(&self, ifindex: u32) -> Result<FpPortConfig> {
        let replies = self
            .genl
            .transact(self.family_id, FpCmd::ConfGet as u8, FP_GENL_VERSION, |b| {
                b.append_attr_u32(FpAttr::Idx as u16, ifindex);
            })
            .await?;
        decode_config(reply_attrs(&replies)?)
    }

    /// Apply a preemption configuration to a port.
    pub async fn set_port_config(&self, ifindex: u32, config: &FpPortConfig) -> Result<()> {
        self.genl
            .transact(self.family_id, FpCmd::ConfSet as u8, FP_GENL_VERSION, |b| {
                b.append_attr_record(FpAttr::Conf as u16, config);
                b.append_attr_u32(FpAttr::Idx as u16, ifindex);
            })
            .await?;
        Ok(())
    }

    /// Fetch the preemption status for a port.
    pub async fn port_status(&self, ifindex: u32) -> Result<FpPortStatus> {
        let replies = self
            .genl
            .transact(
                self.family_id,
                FpCmd::StatusGet as u8,
                FP_GENL_VERSION,
                |b| {
                    b.append_attr_u32(FpAttr::Idx as u16, ifindex);
                },
            )
            .await?;
        decode_status(reply_attrs(&replies)?)
    }
}

fn decode_config(attrs: &[u8]) -> Result<FpPortConfig> {
    for (attr_type, data) in AttrIter::new(attrs) {
        if attr_type == FpAttr::Conf as u16 {
            return get::record(data);
        }
    }
    Err(Error::MissingAttribute { name: "CONF" })
}

fn decode_status(attrs: &[u8]) -> Result<FpPortStatus> {
    for (attr_type, data) in AttrIter::new(attrs) {
        if attr_type == FpAttr::Status as u16 {
            return get::record(data);
        }
    }
    Err(Error::MissingAttribute { name: "STATUS" })
}
