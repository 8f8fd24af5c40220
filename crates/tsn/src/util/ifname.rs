//! Interface name and index utilities.

use crate::netlink::{Error, Result};

/// Maximum interface name length (including null terminator).
pub const IFNAMSIZ: usize = 16;

fn valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() < IFNAMSIZ
        && !name.contains('/')
        && !name.contains('\0')
        && !name.chars().any(|c| c.is_whitespace())
}

/// Convert an interface name to its index.
pub fn name_to_index(name: &str) -> Result<u32> {
    if !valid_name(name) {
        return Err(Error::InterfaceNotFound { name: name.into() });
    }

    let path = format!("/sys/class/net/{}/ifindex", name);
    let content = std::fs::read_to_string(&path)
        .map_err(|_| Error::InterfaceNotFound { name: name.into() })?;

    content
        .trim()
        .parse()
        .map_err(|_| Error::InterfaceNotFound { name: name.into() })
}

/// Convert an interface index to its name.
pub fn index_to_name(index: u32) -> Result<String> {
    if index == 0 {
        return Err(Error::InterfaceNotFound {
            name: format!("index {}", index),
        });
    }

    let entries = std::fs::read_dir("/sys/class/net")?;

    for entry in entries.flatten() {
        let path = entry.path().join("ifindex");
        if let Ok(content) = std::fs::read_to_string(&path) {
            if content.trim().parse::<u32>() == Ok(index) {
                return Ok(entry.file_name().to_string_lossy().to_string());
            }
        }
    }

    Err(Error::InterfaceNotFound {
        name: format!("index {}", index),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name() {
        assert!(valid_name("eth0"));
        assert!(valid_name("lo"));
        assert!(!valid_name(""));
        assert!(!valid_name("a/b"));
        assert!(!valid_name("name with space"));
        assert!(!valid_name("thisnameiswaytoolong"));
    }

    #[test]
    fn test_name_to_index_invalid() {
        assert!(name_to_index("").is_err());
        assert!(name_to_index("no/such").is_err());
    }

    #[test]
    fn test_index_to_name_zero() {
        assert!(index_to_name(0).is_err());
    }

    #[test]
    fn test_loopback_roundtrip() {
        // The loopback interface exists on any Linux system
        if let Ok(index) = name_to_index("lo") {
            assert_eq!(index_to_name(index).unwrap(), "lo");
        }
    }
}
