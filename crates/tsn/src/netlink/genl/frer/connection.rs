//! Connection to the FRER family.

use tracing::debug;

use super::types::{FrerCounters, FrerIflowConfig, FrerStreamConfig, FrerVlanConfig};
use super::{FRER_GENL_NAME, FRER_GENL_VERSION, FrerAttr, FrerCmd};
use crate::netlink::attr::{AttrIter, get};
use crate::netlink::builder::MessageBuilder;
use crate::netlink::error::{Error, Result};
use crate::netlink::genl::connection::{GenlConnection, reply_attrs};

/// Ingress flow configuration together with its split devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrerIflow {
    /// The FRER part of the flow configuration.
    pub config: FrerIflowConfig,
    /// First split device ifindex (0 means none).
    pub dev1: u32,
    /// Second split device ifindex (0 means none).
    pub dev2: u32,
}

/// Connection to the FRER Generic Netlink family.
pub struct FrerConnection {
    genl: GenlConnection,
    family_id: u16,
}

impl FrerConnection {
    /// Connect and resolve the family ID.
    pub async fn new() -> Result<Self> {
        let genl = GenlConnection::new()?;
        let family = genl.get_family(FRER_GENL_NAME).await?;
        debug!("connected to {} (id {})", FRER_GENL_NAME, family.id);
        Ok(Self {
            genl,
            family_id: family.id,
        })
    }

    async fn transact(
        &self,
        cmd: FrerCmd,
        build_attrs: impl FnOnce(&mut MessageBuilder),
    ) -> Result<Vec<Vec<u8>>> {
        self.genl
            .transact(self.family_id, cmd as u8, FRER_GENL_VERSION, build_attrs)
            .await
    }

    /// Fetch a compound stream recovery configuration.
    pub async fn cs_config(&self, cs_id: u32) -> Result<FrerStreamConfig> {
        let replies = self
            .transact(FrerCmd::CsCfgGet, |b| {
                b.append_attr_u32(FrerAttr::Id as u16, cs_id);
            })
            .await?;
        decode_stream_config(reply_attrs(&replies)?)
    }

    /// Apply a compound stream recovery configuration.
    pub async fn set_cs_config(&self, cs_id: u32, config: &FrerStreamConfig) -> Result<()> {
        self.transact(FrerCmd::CsCfgSet, |b| {
            b.append_attr_u32(FrerAttr::Id as u16, cs_id);
            b.append_attr_record(FrerAttr::StreamCfg as u16, config);
        })
        .await?;
        Ok(())
    }

    /// Fetch compound stream recovery counters.
    pub async fn cs_counters(&self, cs_id: u32) -> Result<FrerCounters> {
        let replies = self
            .transact(FrerCmd::CsCntGet, |b| {
                b.append_attr_u32(FrerAttr::Id as u16, cs_id);
            })
            .await?;
        decode_counters(reply_attrs(&replies)?)
    }

    /// Clear compound stream recovery counters.
    pub async fn clear_cs_counters(&self, cs_id: u32) -> Result<()> {
        self.transact(FrerCmd::CsCntClr, |b| {
            b.append_attr_u32(FrerAttr::Id as u16, cs_id);
        })
        .await?;
        Ok(())
    }

    /// Allocate a member stream across one or two ports, returning its ID.
    pub async fn alloc_member_stream(&self, dev1: u32, dev2: u32) -> Result<u32> {
        let replies = self
            .transact(FrerCmd::MsAlloc, |b| {
                b.append_attr_u32(FrerAttr::Dev1 as u16, dev1);
                b.append_attr_u32(FrerAttr::Dev2 as u16, dev2);
            })
            .await?;
        decode_ms_id(reply_attrs(&replies)?)
    }

    /// Free a previously allocated member stream.
    pub async fn free_member_stream(&self, ms_id: u32) -> Result<()> {
        self.transact(FrerCmd::MsFree, |b| {
            b.append_attr_u32(FrerAttr::Id as u16, ms_id);
        })
        .await?;
        Ok(())
    }

    /// Fetch a member stream recovery configuration.
    pub async fn ms_config(&self, ifindex: u32, ms_id: u32) -> Result<FrerStreamConfig> {
        let replies = self
            .transact(FrerCmd::MsCfgGet, |b| {
                b.append_attr_u32(FrerAttr::Id as u16, ms_id);
                b.append_attr_u32(FrerAttr::Dev1 as u16, ifindex);
            })
            .await?;
        decode_stream_config(reply_attrs(&replies)?)
    }

    /// Apply a member stream recovery configuration.
    pub async fn set_ms_config(
        &self,
        ifindex: u32,
        ms_id: u32,
        config: &FrerStreamConfig,
    ) -> Result<()> {
        self.transact(FrerCmd::MsCfgSet, |b| {
            b.append_attr_u32(FrerAttr::Id as u16, ms_id);
            b.append_attr_u32(FrerAttr::Dev1 as u16, ifindex);
            b.append_attr_record(FrerAttr::StreamCfg as u16, config);
        })
        .await?;
        Ok(())
    }

    /// Fetch member stream recovery counters.
    pub async fn ms_counters(&self, ifindex: u32, ms_id: u32) -> Result<FrerCounters> {
        let replies = self
            .transact(FrerCmd::MsCntGet, |b| {
                b.append_attr_u32(FrerAttr::Id as u16, ms_id);
                b.append_attr_u32(FrerAttr::Dev1 as u16, ifindex);
            })
            .await?;
        decode_counters(reply_attrs(&replies)?)
    }

    /// Clear member stream recovery counters.
    pub async fn clear_ms_counters(&self, ifindex: u32, ms_id: u32) -> Result<()> {
        self.transact(FrerCmd::MsCntClr, |b| {
            b.append_attr_u32(FrerAttr::Id as u16, ms_id);
            b.append_attr_u32(FrerAttr::Dev1 as u16, ifindex);
        })
        .await?;
        Ok(())
    }

    /// Fetch an ingress flow configuration.
    pub async fn iflow(&self, id: u32) -> Result<FrerIflow> {
        let replies = self
            .transact(FrerCmd::IflowCfgGet, |b| {
                b.append_attr_u32(FrerAttr::Id as u16, id);
            })
            .await?;
        decode_iflow(reply_attrs(&replies)?)
    }

    /// Apply an ingress flow configuration.
    pub async fn set_iflow(&self, id: u32, flow: &FrerIflow) -> Result<()> {
        self.transact(FrerCmd::IflowCfgSet, |b| {
            b.append_attr_u32(FrerAttr::Id as u16, id);
            b.append_attr_u32(FrerAttr::Dev1 as u16, flow.dev1);
            b.append_attr_u32(FrerAttr::Dev2 as u16, flow.dev2);
            b.append_attr_record(FrerAttr::IflowCfg as u16, &flow.config);
        })
        .await?;
        Ok(())
    }

    /// Fetch a VLAN configuration.
    pub async fn vlan_config(&self, vid: u32) -> Result<FrerVlanConfig> {
        let replies = self
            .transact(FrerCmd::VlanCfgGet, |b| {
                b.append_attr_u32(FrerAttr::Id as u16, vid);
            })
            .await?;
        decode_vlan_config(reply_attrs(&replies)?)
    }

    /// Apply a VLAN configuration.
    pub async fn set_vlan_config(&self, vid: u32, config: &FrerVlanConfig) -> Result<()> {
        self.transact(FrerCmd::VlanCfgSet, |b| {
            b.append_attr_u32(FrerAttr::Id as u16, vid);
            b.append_attr_record(FrerAttr::VlanCfg as u16, config);
        })
        .await?;
        Ok(())
    }
}

fn decode_stream_config(attrs: &[u8]) -> Result<FrerStreamConfig> {
    for (attr_type, data) in AttrIter::new(attrs) {
        if attr_type == FrerAttr::StreamCfg as u16 {
            return get::record(data);
        }
    }
    Err(Error::MissingAttribute { name: "STREAM_CFG" })
}

fn decode_counters(attrs: &[u8]) -> Result<FrerCounters> {
    for (attr_type, data) in AttrIter::new(attrs) {
        if attr_type == FrerAttr::StreamCnt as u16 {
            return get::record(data);
        }
    }
    Err(Error::MissingAttribute { name: "STREAM_CNT" })
}

fn decode_ms_id(attrs: &[u8]) -> Result<u32> {
    for (attr_type, data) in AttrIter::new(attrs) {
        if attr_type == FrerAttr::Id as u16 {
            return get::u32_ne(data);
        }
    }
    Err(Error::MissingAttribute { name: "ID" })
}

fn decode_iflow(attrs: &[u8]) -> Result<FrerIflow> {
    let mut config = None;
    let mut dev1 = None;
    let mut dev2 = None;

    for (attr_type, data) in AttrIter::new(attrs) {
        match attr_type {
            t if t == FrerAttr::IflowCfg as u16 => {
                config = Some(get::record(data)?);
            }
            t if t == FrerAttr::Dev1 as u16 => {
                dev1 = Some(get::u32_ne(data)?);
            }
            t if t == FrerAttr::Dev2 as u16 => {
                dev2 = Some(get::u32_ne(data)?);
            }
            _ => {}
        }
    }

    Ok(FrerIflow {
        config: config.ok_or(Error::MissingAttribute { name: "IFLOW_CFG" })?,
        dev1: dev1.ok_or(Error::MissingAttribute { name: "DEV1" })?,
        dev2: dev2.ok_or(Error::MissingAttribute { name: "DEV2" })?,
    })
}

fn decode_vlan_config(attrs: &[u8]) -> Result<FrerVlanConfig> {
    for (attr_type, data) in AttrIter::new(attrs) {
        if attr_type == FrerAttr::VlanCfg as u16 {
            return get::record(data);
        }
    }
    Err(Error::MissingAttribute { name: "VLAN_CFG" })
}
