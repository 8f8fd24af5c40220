//! Connection to the PSFP family.

use tracing::debug;

use super::types::{
    FlowMeterConfig, GateControlEntry, StreamFilterConfig, StreamFilterCounters, StreamGateConfig,
    StreamGateStatus,
};
use super::{PSFP_GENL_NAME, PSFP_GENL_VERSION, PsfpAttr, PsfpCmd};
use crate::netlink::attr::{AttrIter, get};
use crate::netlink::builder::MessageBuilder;
use crate::netlink::error::{Error, Result};
use crate::netlink::genl::connection::{GenlConnection, reply_attrs};

/// Connection to the PSFP Generic Netlink family.
pub struct PsfpConnection {
    genl: GenlConnection,
    family_id: u16,
}

impl PsfpConnection {
    /// Connect and resolve the family ID.
    pub async fn new() -> Result<Self> {
        let genl = GenlConnection::new()?;
        let family = genl.get_family(PSFP_GENL_NAME).await?;
        debug!("connected to {} (id {})", PSFP_GENL_NAME, family.id);
        Ok(Self {
            genl,
            family_id: family.id,
        })
    }

    async fn transact(
        &self,
        cmd: PsfpCmd,
        build_attrs: impl FnOnce(&mut MessageBuilder),
    ) -> Result<Vec<Vec<u8>>> {
        self.genl
            .transact(self.family_id, cmd as u8, PSFP_GENL_VERSION, build_attrs)
            .await
    }

    /// Fetch a stream filter configuration.
    pub async fn filter_config(&self, sfi: u32) -> Result<StreamFilterConfig> {
        let replies = self
            .transact(PsfpCmd::SfConfGet, |b| {
                b.append_attr_u32(PsfpAttr::SfSfi as u16, sfi);
            })
            .await?;
        decode_record(reply_attrs(&replies)?, PsfpAttr::SfConf, "SF_CONF")
    }

    /// Apply a stream filter configuration.
    pub async fn set_filter_config(&self, sfi: u32, config: &StreamFilterConfig) -> Result<()> {
        self.transact(PsfpCmd::SfConfSet, |b| {
            b.append_attr_record(PsfpAttr::SfConf as u16, config);
            b.append_attr_u32(PsfpAttr::SfSfi as u16, sfi);
        })
        .await?;
        Ok(())
    }

    /// Fetch stream filter counters.
    pub async fn filter_counters(&self, sfi: u32) -> Result<StreamFilterCounters> {
        let replies = self
            .transact(PsfpCmd::SfStatusGet, |b| {
                b.append_attr_u32(PsfpAttr::SfSfi as u16, sfi);
            })
            .await?;
        decode_record(reply_attrs(&replies)?, PsfpAttr::SfStatus, "SF_STATUS")
    }

    /// Fetch a stream gate configuration.
    pub async fn gate_config(&self, sgi: u32) -> Result<StreamGateConfig> {
        let replies = self
            .transact(PsfpCmd::SgConfGet, |b| {
                b.append_attr_u32(PsfpAttr::SgSgi as u16, sgi);
            })
            .await?;
        decode_record(reply_attrs(&replies)?, PsfpAttr::SgConf, "SG_CONF")
    }

    /// Apply a stream gate configuration.
    pub async fn set_gate_config(&self, sgi: u32, config: &StreamGateConfig) -> Result<()> {
        self.transact(PsfpCmd::SgConfSet, |b| {
            b.append_attr_record(PsfpAttr::SgConf as u16, config);
            b.append_attr_u32(PsfpAttr::SgSgi as u16, sgi);
        })
        .await?;
        Ok(())
    }

    /// Fetch stream gate status.
    pub async fn gate_status(&self, sgi: u32) -> Result<StreamGateStatus> {
        let replies = self
            .transact(PsfpCmd::SgStatusGet, |b| {
                b.append_attr_u32(PsfpAttr::SgSgi as u16, sgi);
            })
            .await?;
        decode_record(reply_attrs(&replies)?, PsfpAttr::SgStatus, "SG_STATUS")
    }

    /// Fetch a gate control entry configuration.
    pub async fn gce_config(&self, sgi: u32, gci: u32) -> Result<GateControlEntry> {
        let replies = self
            .transact(PsfpCmd::GceConfGet, |b| {
                b.append_attr_u32(PsfpAttr::GceSgi as u16, sgi);
                b.append_attr_u32(PsfpAttr::GceGci as u16, gci);
            })
            .await?;
        decode_record(reply_attrs(&replies)?, PsfpAttr::GceConf, "GCE_CONF")
    }

    /// Apply a gate control entry configuration.
    pub async fn set_gce_config(
        &self,
        sgi: u32,
        gci: u32,
        config: &GateControlEntry,
    ) -> Result<()> {
        self.transact(PsfpCmd::GceConfSet, |b| {
            b.append_attr_record(PsfpAttr::GceConf as u16, config);
            b.append_attr_u32(PsfpAttr::GceSgi as u16, sgi);
            b.append_attr_u32(PsfpAttr::GceGci as u16, gci);
        })
        .await?;
        Ok(())
    }

    /// Fetch the operational state of a gate control entry.
    ///
    /// The status reply carries the entry in the CONF attribute.
    pub async fn gce_status(&self, sgi: u32, gci: u32) -> Result<GateControlEntry> {
        let replies = self
            .transact(PsfpCmd::GceStatusGet, |b| {
                b.append_attr_u32(PsfpAttr::GceSgi as u16, sgi);
                b.append_attr_u32(PsfpAttr::GceGci as u16, gci);
            })
            .await?;
        decode_record(reply_attrs(&replies)?, PsfpAttr::GceConf, "GCE_CONF")
    }

    /// Fetch a flow meter configuration.
    pub async fn meter_config(&self, fmi: u32) -> Result<FlowMeterConfig> {
        let replies = self
            .transact(PsfpCmd::FmConfGet, |b| {
                b.append_attr_u32(PsfpAttr::FmFmi as u16, fmi);
            })
            .await?;
        decode_record(reply_attrs(&replies)?, PsfpAttr::FmConf, "FM_CONF")
    }

    /// Apply a flow meter configuration.
    pub async fn set_meter_config(&self, fmi: u32, config: &FlowMeterConfig) -> Result<()> {
        self.transact(PsfpCmd::FmConfSet, |b| {
            b.append_attr_record(PsfpAttr::FmConf as u16, config);
            b.append_attr_u32(PsfpAttr::FmFmi as u16, fmi);
        })
        .await?;
        Ok(())
    }
}

fn decode_record<T: zerocopy::FromBytes>(
    attrs: &[u8],
    attr: PsfpAttr,
    name: &'static str,
) -> Result<T> {
    for (attr_type, data) in AttrIter::new(attrs) {
        if attr_type == attr as u16 {
            return get::record(data);
        }
    }
    Err(Error::MissingAttribute { name })
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
    fn test_decode_filter_config() {
        let config = StreamFilterConfig {
            enable: 1,
            max_sdu: 1500,
            block_oversize_enable: 1,
            block_oversize: 0,
            ..Default::default()
        };
        let buf = attr_bytes(PsfpAttr::SfConf as u16, config.as_bytes());

        let decoded: StreamFilterConfig =
            decode_record(&buf, PsfpAttr::SfConf, "SF_CONF").unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_decode_filter_counters() {
        let counters = StreamFilterCounters {
            matching_frames_count: 99,
            red_frames_count: 2,
            ..Default::default()
        };
        let buf = attr_bytes(PsfpAttr::SfStatus as u16, counters.as_bytes());

        let decoded: StreamFilterCounters =
            decode_record(&buf, PsfpAttr::SfStatus, "SF_STATUS").unwrap();
        assert_eq!(decoded.matching_frames_count, 99);
        assert_eq!(decoded.red_frames_count, 2);
    }

    #[test]
    fn test_decode_missing_attribute() {
        let buf = attr_bytes(PsfpAttr::SgSgi as u16, &1u32.to_ne_bytes());
        let err = decode_record::<StreamGateConfig>(&buf, PsfpAttr::SgConf, "SG_CONF")
            .unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { name: "SG_CONF" }));
    }

    #[test]
    fn test_decode_gate_status_truncated() {
        let buf = attr_bytes(PsfpAttr::SgStatus as u16, &[0u8; 20]);
        let err = decode_record::<StreamGateStatus>(&buf, PsfpAttr::SgStatus, "SG_STATUS")
            .unwrap_err();
        assert!(matches!(err, Error::Truncated { expected: 56, actual: 20 }));
    }
}
