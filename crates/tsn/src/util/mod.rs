//! Shared utilities.

pub mod ifname;
