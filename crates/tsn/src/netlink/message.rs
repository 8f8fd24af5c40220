//! Netlink message header and parsing.

use super::attr::{AttrIter, get};
use super::error::{Error, Result};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Netlink message header alignment.
pub const NLMSG_ALIGNTO: usize = 4;

/// Align a length to NLMSG_ALIGNTO boundary.
#[inline]
pub const fn nlmsg_align(len: usize) -> usize {
    (len + NLMSG_ALIGNTO - 1) & !(NLMSG_ALIGNTO - 1)
}

/// Size of the netlink message header.
pub const NLMSG_HDRLEN: usize = nlmsg_align(std::mem::size_of::<NlMsgHdr>());

/// Netlink message header (mirrors struct nlmsghdr).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct NlMsgHdr {
    /// Length of message including header.
    pub nlmsg_len: u32,
    /// Message type.
    pub nlmsg_type: u16,
    /// Additional flags.
    pub nlmsg_flags: u16,
    /// Sequence number.
    pub nlmsg_seq: u32,
    /// Sending process port ID.
    pub nlmsg_pid: u32,
}

impl NlMsgHdr {
    /// Create a new message header.
    pub fn new(msg_type: u16, flags: u16) -> Self {
        Self {
            nlmsg_len: NLMSG_HDRLEN as u32,
            nlmsg_type: msg_type,
            nlmsg_flags: flags,
            nlmsg_seq: 0,
            nlmsg_pid: 0,
        }
    }

    /// Get the payload length (total length minus header).
    pub fn payload_len(&self) -> usize {
        self.nlmsg_len as usize - NLMSG_HDRLEN
    }

    /// Check if this is an error message.
    pub fn is_error(&self) -> bool {
        self.nlmsg_type == NlMsgType::ERROR
    }

    /// Check if this is a done message.
    pub fn is_done(&self) -> bool {
        self.nlmsg_type == NlMsgType::DONE
    }

    /// Convert header to bytes.
    pub fn as_bytes(&self) -> &[u8] {
        <Self as IntoBytes>::as_bytes(self)
    }

    /// Parse header from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<&Self> {
        Self::ref_from_prefix(data)
            .map(|(r, _)| r)
            .map_err(|_| Error::Truncated {
                expected: std::mem::size_of::<Self>(),
                actual: data.len(),
            })
    }
}

/// Standard netlink message types.
pub struct NlMsgType;

impl NlMsgType {
    /// No operation, message must be discarded.
    pub const NOOP: u16 = 1;
    /// Error message or ACK.
    pub const ERROR: u16 = 2;
    /// End of multipart message.
    pub const DONE: u16 = 3;
    /// Data lost, request resend.
    pub const OVERRUN: u16 = 4;
}

/// Netlink message flags.
pub const NLM_F_REQUEST: u16 = 0x01;
pub const NLM_F_MULTI: u16 = 0x02;
pub const NLM_F_ACK: u16 = 0x04;

/// Error message flags: the echoed request was capped to its header,
/// and extended ACK TLVs follow the echoed request.
pub const NLM_F_CAPPED: u16 = 0x100;
pub const NLM_F_ACK_TLVS: u16 = 0x200;

/// Extended ACK attribute carrying the human-readable error string.
pub const NLMSGERR_ATTR_MSG: u16 = 1;

/// Iterator over netlink messages in a buffer.
pub struct MessageIter<'a> {
    data: &'a [u8],
}

impl<'a> MessageIter<'a> {
    /// Create a new message iterator.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl<'a> Iterator for MessageIter<'a> {
    type Item = Result<(&'a NlMsgHdr, &'a [u8])>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.data.len() < NLMSG_HDRLEN {
            return None;
        }

        let header = match NlMsgHdr::from_bytes(self.data) {
            Ok(h) => h,
            Err(e) => return Some(Err(e)),
        };

        let msg_len = header.nlmsg_len as usize;
        if msg_len < NLMSG_HDRLEN || msg_len > self.data.len() {
            return Some(Err(Error::InvalidMessage(format!(
                "invalid message length: {}",
                msg_len
            ))));
        }

        let payload = &self.data[NLMSG_HDRLEN..msg_len];
        let aligned_len = nlmsg_align(msg_len);

        // Move to next message
        if aligned_len >= self.data.len() {
            self.data = &[];
        } else {
            self.data = &self.data[aligned_len..];
        }

        Some(Ok((header, payload)))
    }
}

/// Netlink error message payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, Immutable, KnownLayout)]
pub struct NlMsgError {
    /// Error code (negative errno or 0 for ACK).
    pub error: i32,
    /// Original message header that caused the error.
    pub msg: NlMsgHdr,
}

impl NlMsgError {
    /// Parse error message from payload.
    pub fn from_bytes(data: &[u8]) -> Result<&Self> {
        Self::ref_from_prefix(data)
            .map(|(r, _)| r)
            .map_err(|_| Error::Truncated {
                expected: std::mem::size_of::<Self>(),
                actual: data.len(),
            })
    }

    /// Check if this is an ACK (no error).
    pub fn is_ack(&self) -> bool {
        self.error == 0
    }

    /// Get the extended ACK attributes following the echoed request.
    ///
    /// `flags` are the flags of the enclosing error message. Without
    /// NLM_F_CAPPED the kernel echoes the full original request, so the
    /// TLVs start at its nlmsg_len, not at the header size.
    pub fn attrs<'a>(&self, payload: &'a [u8], flags: u16) -> AttrIter<'a> {
        if flags & NLM_F_ACK_TLVS == 0 {
            return AttrIter::new(&[]);
        }
        let echoed = if flags & NLM_F_CAPPED != 0 {
            NLMSG_HDRLEN
        } else {
            nlmsg_align(self.msg.nlmsg_len as usize).max(NLMSG_HDRLEN)
        };
        let offset = std::mem::size_of::<i32>() + echoed;
        if payload.len() > offset {
            AttrIter::new(&payload[offset..])
        } else {
            AttrIter::new(&[])
        }
    }

    /// Get the extended ACK message string, if the kernel provided one.
    pub fn extack_message<'a>(&self, payload: &'a [u8], flags: u16) -> Option<&'a str> {
        for (attr_type, data) in self.attrs(payload, flags) {
            if attr_type == NLMSGERR_ATTR_MSG {
                return get::string(data).ok();
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlink::attr::{NLA_HDRLEN, NlAttr, nla_align};

    fn attr_bytes(attr_type: u16, payload: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(NlAttr::new(attr_type, payload.len()).as_bytes());
        buf.extend_from_slice(payload);
        buf.resize(nla_align(buf.len()), 0);
        buf
    }

    #[test]
    fn test_header_size() {
        assert_eq!(NLMSG_HDRLEN, 16);
    }

    #[test]
    fn test_message_iter() {
        let mut buf = Vec::new();
        let mut hdr = NlMsgHdr::new(NlMsgType::DONE, 0);
        hdr.nlmsg_len = (NLMSG_HDRLEN + 4) as u32;
        hdr.nlmsg_seq = 7;
        buf.extend_from_slice(hdr.as_bytes());
        buf.extend_from_slice(&[1, 2, 3, 4]);

        let mut iter = MessageIter::new(&buf);
        let (parsed, payload) = iter.next().unwrap().unwrap();
        assert!(parsed.is_done());
        assert_eq!(parsed.nlmsg_seq, 7);
        assert_eq!(payload, &[1, 2, 3, 4]);
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_message_iter_bad_length() {
        let mut hdr = NlMsgHdr::new(NlMsgType::NOOP, 0);
        hdr.nlmsg_len = 8; // shorter than the header itself
        let buf = hdr.as_bytes().to_vec();

        let mut iter = MessageIter::new(&buf);
        assert!(iter.next().unwrap().is_err());
    }

    #[test]
    fn test_error_ack() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&0i32.to_ne_bytes());
        buf.extend_from_slice(NlMsgHdr::new(0, 0).as_bytes());

        let err = NlMsgError::from_bytes(&buf).unwrap();
        assert!(err.is_ack());
        assert!(err.extack_message(&buf, 0).is_none());
    }

    #[test]
    fn test_error_extack_message_capped() {
        // Only the request header is echoed, TLVs follow directly
        let mut buf = Vec::new();
        buf.extend_from_slice(&(-22i32).to_ne_bytes()); // -EINVAL
        buf.extend_from_slice(NlMsgHdr::new(0, 0).as_bytes());
        buf.extend_from_slice(&attr_bytes(NLMSGERR_ATTR_MSG, b"bad gate id\0"));

        let err = NlMsgError::from_bytes(&buf).unwrap();
        assert!(!err.is_ack());
        assert_eq!(err.error, -22);
        assert_eq!(
            err.extack_message(&buf, NLM_F_ACK_TLVS | NLM_F_CAPPED),
            Some("bad gate id")
        );
    }

    #[test]
    fn test_error_extack_message_uncapped() {
        // The full 28 byte request is echoed before the TLVs
        let mut echoed = NlMsgHdr::new(0x1b, NLM_F_REQUEST | NLM_F_ACK);
        echoed.nlmsg_len = (NLMSG_HDRLEN + 12) as u32;

        let mut buf = Vec::new();
        buf.extend_from_slice(&(-22i32).to_ne_bytes());
        buf.extend_from_slice(echoed.as_bytes());
        buf.extend_from_slice(&[0u8; 12]); // echoed request payload
        buf.extend_from_slice(&attr_bytes(NLMSGERR_ATTR_MSG, b"fm instance out of range\0"));

        let err = NlMsgError::from_bytes(&buf).unwrap();
        assert_eq!(
            err.extack_message(&buf, NLM_F_ACK_TLVS),
            Some("fm instance out of range")
        );
        // Without the TLV flag the trailing bytes are not attributes
        assert!(err.extack_message(&buf, 0).is_none());
    }

    #[test]
    fn test_error_truncated() {
        let buf = [0u8; 8];
        assert!(NlMsgError::from_bytes(&buf).is_err());
    }

    #[test]
    fn test_attr_bytes_aligned() {
        let buf = attr_bytes(1, &[0xaa]);
        assert_eq!(buf.len(), NLA_HDRLEN + 4);
    }
}
