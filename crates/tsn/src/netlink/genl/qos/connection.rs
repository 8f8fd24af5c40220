//! Connection to the QoS family.

use tracing::debug;

use super::types::{QosDscpPrioDpl, QosPortConfig};
use super::{QOS_GENL_NAME, QOS_GENL_VERSION, QosAttr, QosCmd};
use crate::netlink::attr::{AttrIter, get};
use crate::netlink::error::{Error, Result};
use crate::netlink::genl::connection::{GenlConnection, reply_attrs};

/// Connection to the QoS Generic Netlink family.
pub struct QosConnection {
    genl: GenlConnection,
    family_id: u16,
}

impl QosConnection {
    /// Connect and resolve the family ID.
    pub async fn new() -> Result<Self> {
        let genl = GenlConnection::new()?;
        let family = genl.get_family(QOS_GENL_NAME).await?;
        debug!("connected to {} (id {})", QOS_GENL_NAME, family.id);
        Ok(Self {
            genl,
            family_id: family.id,
        })
    }

    /// Fetch the QoS configuration for a port.
    pub async fn port_config(&self, ifindex: u32) -> Result<QosPortConfig> {
        let replies = self
            .genl
            .transact(
                self.family_id,
                QosCmd::PortCfgGet as u8,
                QOS_GENL_VERSION,
                |b| {
                    b.append_attr_u32(QosAttr::Dev as u16, ifindex);
                },
            )
            .await?;
        decode_port_config(reply_attrs(&replies)?)
    }

    /// Apply a QoS configuration to a port.
    pub async fn set_port_config(&self, ifindex: u32, config: &QosPortConfig) -> Result<()> {
        self.genl
            .transact(
                self.family_id,
                QosCmd::PortCfgSet as u8,
                QOS_GENL_VERSION,
                |b| {
                    b.append_attr_u32(QosAttr::Dev as u16, ifindex);
                    b.append_attr_record(QosAttr::PortCfg as u16, config);
                },
            )
            .await?;
        Ok(())
    }

    /// Fetch the classification for a DSCP value.
    pub async fn dscp_config(&self, dscp: u32) -> Result<QosDscpPrioDpl> {
        let replies = self
            .genl
            .transact(
                self.family_id,
                QosCmd::DscpPrioDplGet as u8,
                QOS_GENL_VERSION,
                |b| {
                    b.append_attr_u32(QosAttr::Dscp as u16, dscp);
                },
            )
            .await?;
        decode_dscp_config(reply_attrs(&replies)?)
    }

    /// Apply the classification for a DSCP value.
    pub async fn set_dscp_config(&self, dscp: u32, config: &QosDscpPrioDpl) -> Result<()> {
        self.genl
            .transact(
                self.family_id,
                QosCmd::DscpPrioDplSet as u8,
                QOS_GENL_VERSION,
                |b| {
                    b.append_attr_u32(QosAttr::Dscp as u16, dscp);
                    b.append_attr_record(QosAttr::DscpPrioDpl as u16, config);
                },
            )
            .await?;
        Ok(())
    }
}

fn decode_port_config(attrs: &[u8]) -> Result<QosPortConfig> {
    for (attr_type, data) in AttrIter::new(attrs) {
        if attr_type == QosAttr::PortCfg as u16 {
            return get::record(data);
        }
    }
    Err(Error::MissingAttribute { name: "PORT_CFG" })
}

fn decode_dscp_config(attrs: &[u8]) -> Result<QosDscpPrioDpl> {
    for (attr_type, data) in AttrIter::new(attrs) {
        if attr_type == QosAttr::DscpPrioDpl as u16 {
            return get::record(data);
        }
    }
    Err(Error::MissingAttribute {
        name: "DSCP_PRIO_DPL",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlink::attr::{NlAttr, nla_align};
    use zerocopy::IntoBytes;

    fn attr_bytes(attr_type: u16, payload: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(NlAttr::new(attr_type, payload.len()).as_bytes());
        buf.extend_from_slice(payload);
        buf.resize(nla_align(buf.len()), 0);
        buf
    }

    #[test]
    fn test_decode_port_config() {
        let mut config = QosPortConfig::default();
        config.i_default_prio = 3;
        config.e_mode = super::super::E_MODE_DEFAULT;
        let buf = attr_bytes(QosAttr::PortCfg as u16, config.as_bytes());

        let decoded = decode_port_config(&buf).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_decode_dscp_config() {
        let config = QosDscpPrioDpl {
            trust: 1,
            prio: 4,
            dpl: 1,
        };
        let buf = attr_bytes(QosAttr::DscpPrioDpl as u16, config.as_bytes());

        let decoded = decode_dscp_config(&buf).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_decode_port_config_missing() {
        let buf = attr_bytes(QosAttr::Dev as u16, &2u32.to_ne_bytes());
        let err = decode_port_config(&buf).unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { name: "PORT_CFG" }));
    }

    #[test]
    fn test_decode_port_config_truncated() {
        let buf = attr_bytes(QosAttr::PortCfg as u16, &[0u8; 40]);
        let err = decode_port_config(&buf).unwrap_err();
        assert!(matches!(err, Error::Truncated { expected: 76, actual: 40 }));
    }
}
