//! Netlink attribute (nlattr) handling.

use super::error::{Error, Result};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Netlink attribute alignment.
pub const NLA_ALIGNTO: usize = 4;

/// Align a length to NLA_ALIGNTO boundary.
#[inline]
pub const fn nla_align(len: usize) -> usize {
    (len + NLA_ALIGNTO - 1) & !(NLA_ALIGNTO - 1)
}

/// Size of the attribute header.
pub const NLA_HDRLEN: usize = 4; // nla_align(size_of::<NlAttr>())

/// Netlink attribute header (mirrors struct nlattr).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct NlAttr {
    /// Length including header.
    pub nla_len: u16,
    /// Attribute type.
    pub nla_type: u16,
}

impl NlAttr {
    /// Create a new attribute header.
    pub fn new(attr_type: u16, data_len: usize) -> Self {
        Self {
            nla_len: (NLA_HDRLEN + data_len) as u16,
            nla_type: attr_type,
        }
    }

    /// Get the payload length (total length minus header).
    pub fn payload_len(&self) -> usize {
        (self.nla_len as usize).saturating_sub(NLA_HDRLEN)
    }

    /// Convert to bytes.
    pub fn as_bytes(&self) -> &[u8] {
        <Self as IntoBytes>::as_bytes(self)
    }

    /// Parse from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<&Self> {
        Self::ref_from_prefix(data)
            .map(|(r, _)| r)
            .map_err(|_| Error::Truncated {
                expected: std::mem::size_of::<Self>(),
                actual: data.len(),
            })
    }
}

/// Iterator over netlink attributes in a buffer.
pub struct AttrIter<'a> {
    data: &'a [u8],
}

impl<'a> AttrIter<'a> {
    /// Create a new attribute iterator.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl<'a> Iterator for AttrIter<'a> {
    /// Returns (attribute type, payload data).
    type Item = (u16, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.data.len() < NLA_HDRLEN {
            return None;
        }

        let attr = match NlAttr::from_bytes(self.data) {
            Ok(a) => a,
            Err(_) => return None,
        };

        let len = attr.nla_len as usize;
        if len < NLA_HDRLEN || len > self.data.len() {
            return None;
        }

        let payload = &self.data[NLA_HDRLEN..len];
        let aligned_len = nla_align(len);

        // Move to next attribute
        if aligned_len >= self.data.len() {
            self.data = &[];
        } else {
            self.data = &self.data[aligned_len..];
        }

        Some((attr.nla_type, payload))
    }
}

/// Helper functions for extracting typed values from attribute payloads.
pub mod get {
    use super::*;

    /// Extract a u16 value (native endian).
    pub fn u16_ne(data: &[u8]) -> Result<u16> {
        if data.len() < 2 {
            return Err(Error::InvalidAttribute("truncated u16 attribute".into()));
        }
        Ok(u16::from_ne_bytes([data[0], data[1]]))
    }

    /// Extract a u32 value (native endian).
    pub fn u32_ne(data: &[u8]) -> Result<u32> {
        if data.len() < 4 {
            return Err(Error::InvalidAttribute("truncated u32 attribute".into()));
        }
        Ok(u32::from_ne_bytes([data[0], data[1], data[2], data[3]]))
    }

    /// Extract a null-terminated string.
    pub fn string(data: &[u8]) -> Result<&str> {
        // Find null terminator or use whole buffer
        let len = data.iter().position(|&b| b == 0).unwrap_or(data.len());
        std::str::from_utf8(&data[..len])
            .map_err(|e| Error::InvalidAttribute(format!("invalid UTF-8: {}", e)))
    }

    /// Extract a fixed-layout record.
    ///
    /// The payload must hold at least `size_of::<T>()` bytes; a shorter
    /// payload fails with `Error::Truncated` instead of yielding a
    /// partially-filled record.
    pub fn record<T: FromBytes>(data: &[u8]) -> Result<T> {
        T::read_from_prefix(data)
            .map(|(v, _)| v)
            .map_err(|_| Error::Truncated {
                expected: std::mem::size_of::<T>(),
                actual: data.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr_bytes(attr_type: u16, payload: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(NlAttr::new(attr_type, payload.len()).as_bytes());
        buf.extend_from_slice(payload);
        buf.resize(nla_align(buf.len()), 0);
        buf
    }

    #[test]
    fn test_attr_iter() {
        let mut buf = attr_bytes(1, &5u32.to_ne_bytes());
        buf.extend_from_slice(&attr_bytes(3, b"eth0\0"));

        let mut iter = AttrIter::new(&buf);

        let (t, payload) = iter.next().unwrap();
        assert_eq!(t, 1);
        assert_eq!(get::u32_ne(payload).unwrap(), 5);

        let (t, payload) = iter.next().unwrap();
        assert_eq!(t, 3);
        assert_eq!(get::string(payload).unwrap(), "eth0");

        assert!(iter.next().is_none());
    }

    #[test]
    fn test_attr_iter_truncated_stops() {
        // nla_len claims 12 bytes but only 8 are present
        let mut buf = Vec::new();
        buf.extend_from_slice(NlAttr::new(2, 8).as_bytes());
        buf.extend_from_slice(&[0u8; 4]);

        let mut iter = AttrIter::new(&buf);
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_get_record() {
        #[derive(Debug, PartialEq, zerocopy::FromBytes)]
        #[repr(C)]
        struct Pair {
            a: u16,
            b: u16,
        }

        let data = [0x01, 0x00, 0x02, 0x00];
        let pair: Pair = get::record(&data).unwrap();
        assert_eq!(pair, Pair { a: 1, b: 2 });
    }

    #[test]
    fn test_get_record_truncated() {
        #[derive(Debug, zerocopy::FromBytes)]
        #[repr(C)]
        struct Wide {
            a: u64,
        }

        let data = [0u8; 4];
        let err = get::record::<Wide>(&data).unwrap_err();
        match err {
            Error::Truncated { expected, actual } => {
                assert_eq!(expected, 8);
                assert_eq!(actual, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_get_scalars_truncated() {
        assert!(get::u16_ne(&[1]).is_err());
        assert!(get::u32_ne(&[1, 2, 3]).is_err());
    }
}
