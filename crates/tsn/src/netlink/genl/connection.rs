//! Generic Netlink connection and request/reply exchange.

use tracing::{debug, trace};

use super::header::{GENL_HDRLEN, GenlMsgHdr};
use super::{CtrlAttr, CtrlCmd, GENL_ID_CTRL};
use crate::netlink::attr::{AttrIter, get};
use crate::netlink::builder::MessageBuilder;
use crate::netlink::error::{Error, Result};
use crate::netlink::message::{MessageIter, NLM_F_ACK, NLM_F_REQUEST, NlMsgError};
use crate::netlink::socket::NetlinkSocket;

/// Resolved Generic Netlink family information.
#[derive(Debug, Clone)]
pub struct FamilyInfo {
    /// Family name.
    pub name: String,
    /// Runtime family ID, used as the netlink message type.
    pub id: u16,
    /// Family interface version.
    pub version: u8,
}

/// Connection to the Generic Netlink bus.
pub struct GenlConnection {
    socket: NetlinkSocket,
}

impl GenlConnection {
    /// Create a new Generic Netlink connection.
    pub fn new() -> Result<Self> {
        Ok(Self {
            socket: NetlinkSocket::new()?,
        })
    }

    /// Resolve a family name to its runtime ID via the controller.
    pub async fn get_family(&self, name: &str) -> Result<FamilyInfo> {
        debug!("resolving generic netlink family {}", name);

        let replies = self
            .transact(GENL_ID_CTRL, CtrlCmd::GetFamily as u8, 1, |builder| {
                builder.append_attr_str(CtrlAttr::FamilyName as u16, name);
            })
            .await
            .map_err(|e| {
                // An unregistered family reports ENOENT
                if e.is_not_found() {
                    Error::FamilyNotFound { name: name.into() }
                } else {
                    e
                }
            })?;

        let attrs = reply_attrs(&replies)?;
        let info = parse_family_attrs(attrs)?;
        debug!("family {} has id {}", info.name, info.id);
        Ok(info)
    }

    /// Send a single request with `NLM_F_ACK` and collect every reply
    /// payload (netlink header stripped) until the ACK or DONE arrives.
    ///
    /// A kernel error terminates the exchange with [`Error::Kernel`],
    /// carrying the extended ACK text when the kernel provides one.
    pub async fn transact(
        &self,
        family_id: u16,
        cmd: u8,
        version: u8,
        build_attrs: impl FnOnce(&mut MessageBuilder),
    ) -> Result<Vec<Vec<u8>>> {
        let seq = self.socket.next_seq();
        let pid = self.socket.pid();

        let mut builder = MessageBuilder::new(family_id, NLM_F_REQUEST | NLM_F_ACK);
        builder.append_bytes(GenlMsgHdr::new(cmd, version).as_bytes());
        build_attrs(&mut builder);
        builder.set_seq(seq);
        builder.set_pid(pid);

        let msg = builder.finish();
        trace!("sending {} byte request, seq {}", msg.len(), seq);
        self.socket.send(&msg).await?;

        let mut replies = Vec::new();
        loop {
            let buf = self.socket.recv_msg().await?;

            for item in MessageIter::new(&buf) {
                let (header, payload) = item?;

                if header.nlmsg_seq != seq {
                    trace!("skipping message with seq {}", header.nlmsg_seq);
                    continue;
                }

                if header.is_error() {
                    let err = NlMsgError::from_bytes(payload)?;
                    if err.is_ack() {
                        return Ok(replies);
                    }
                    return Err(match err.extack_message(payload, header.nlmsg_flags) {
                        Some(text) => Error::Kernel {
                            errno: -err.error,
                            message: text.to_string(),
                        },
                        None => Error::from_errno(err.error),
                    });
                }

                if header.is_done() {
                    return Ok(replies);
                }

                replies.push(payload.to_vec());
            }
        }
    }
}

/// Strip the Generic Netlink header from the first reply, yielding the
/// attribute section.
pub(crate) fn reply_attrs(replies: &[Vec<u8>]) -> Result<&[u8]> {
    let payload = replies
        .first()
        .ok_or_else(|| Error::InvalidMessage("empty reply".into()))?;
    if payload.len() < GENL_HDRLEN {
        return Err(Error::Truncated {
            expected: GENL_HDRLEN,
            actual: payload.len(),
        });
    }
    Ok(&payload[GENL_HDRLEN..])
}

/// Parse the controller's family attributes into a [`FamilyInfo`].
fn parse_family_attrs(data: &[u8]) -> Result<FamilyInfo> {
    let mut name = None;
    let mut id = None;
    let mut version = None;

    for (attr_type, payload) in AttrIter::new(data) {
        match attr_type {
            t if t == CtrlAttr::FamilyName as u16 => {
                name = Some(get::string(payload)?.to_string());
            }
            t if t == CtrlAttr::FamilyId as u16 => {
                id = Some(get::u16_ne(payload)?);
            }
            t if t == CtrlAttr::Version as u16 => {
                version = Some(get::u32_ne(payload)? as u8);
            }
            _ => {}
        }
    }

    Ok(FamilyInfo {
        name: name.ok_or(Error::MissingAttribute {
            name: "FAMILY_NAME",
        })?,
        id: id.ok_or(Error::MissingAttribute { name: "FAMILY_ID" })?,
        version: version.unwrap_or(0),
    })
}
