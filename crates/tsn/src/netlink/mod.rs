//! Async netlink protocol implementation.
//!
//! This module provides the netlink plumbing used by the LAN966x TSN
//! tools: a non-blocking NETLINK_GENERIC socket, message and attribute
//! codecs, and Generic Netlink family resolution.
//!
//! # Quick Start
//!
//! ```ignore
//! use tsn::netlink::genl::frer::FrerConnection;
//!
//! let conn = FrerConnection::new().await?;
//! let cfg = conn.cs_config(5).await?;
//! println!("enable: {}", cfg.enable);
//! ```

pub mod attr;
mod builder;
mod error;
pub mod genl;
pub mod message;
mod socket;

pub use attr::{AttrIter, NlAttr};
pub use builder::MessageBuilder;
pub use error::{Error, Result};
pub use message::{MessageIter, NLMSG_HDRLEN, NlMsgHdr, NlMsgType};
pub use socket::NetlinkSocket;
