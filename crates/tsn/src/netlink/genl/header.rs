//! Generic Netlink message header.
//!
//! Every Generic Netlink message carries a fixed 4-byte header after the
//! netlink header:
//!
//! ```text
//! +---------+---------+----------+
//! | cmd (1) | ver (1) | res (2)  |
//! +---------+---------+----------+
//! ```

use crate::netlink::error::{Error, Result};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Size of the Generic Netlink header.
pub const GENL_HDRLEN: usize = std::mem::size_of::<GenlMsgHdr>();

/// Generic Netlink message header (mirrors struct genlmsghdr).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct GenlMsgHdr {
    /// Command within the family.
    pub cmd: u8,
    /// Family interface version.
    pub version: u8,
    /// Reserved, must be zero.
    pub reserved: u16,
}

impl GenlMsgHdr {
    /// Create a new Generic Netlink header.
    pub fn new(cmd: u8, version: u8) -> Self {
        Self {
            cmd,
            version,
            reserved: 0,
        }
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
                expected: GENL_HDRLEN,
                actual: data.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_size() {
        assert_eq!(GENL_HDRLEN, 4);
    }

    #[test]
    fn test_roundtrip() {
        let hdr = GenlMsgHdr::new(3, 1);
        let bytes = hdr.as_bytes();
        assert_eq!(bytes, &[3, 1, 0, 0]);

        let parsed = GenlMsgHdr::from_bytes(bytes).unwrap();
        assert_eq!(parsed.cmd, 3);
        assert_eq!(parsed.version, 1);
    }

    #[test]
    fn test_truncated() {
        assert!(GenlMsgHdr::from_bytes(&[3, 1]).is_err());
    }
}
