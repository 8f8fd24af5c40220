//! Generic Netlink client library for LAN966x TSN configuration.
//!
//! The LAN966x switch driver exposes its TSN features (frame preemption,
//! FRER, PSFP and QoS classification) through per-feature Generic Netlink
//! families. This crate provides the netlink plumbing and a typed
//! connection per family.
//!
//! # Example
//!
//! ```ignore
//! use tsn::netlink::genl::psfp::PsfpConnection;
//!
//! #[tokio::main]
//! async fn main() -> tsn::Result<()> {
//!     let conn = PsfpConnection::new().await?;
//!
//!     let mut cfg = conn.meter_config(3).await?;
//!     cfg.cir = 1000;
//!     conn.set_meter_config(3, &cfg).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod netlink;
pub mod util;

// Re-export common types at crate root for convenience
pub use netlink::{Error, Result};
