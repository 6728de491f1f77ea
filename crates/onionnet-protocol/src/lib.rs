//! # OnionNet Protocol
//!
//! Everything the registry, the relays and the originating client have to
//! agree on:
//!
//! - [`message`]: the onion wire layout and per-hop peeling
//! - [`builder`]: building a layered message for a circuit of relays
//! - [`types`]: JSON request/response bodies and route paths
//! - [`config`]: ports and addressing conventions
//!
//! ## Wire layout
//!
//! ```text
//! +-------------------------------+----------------------------------+
//! | RSA-OAEP(one-time key), b64   | AES-GCM(dest:10 chars || payload) |
//! | 344 characters                | variable                          |
//! +-------------------------------+----------------------------------+
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod builder;
pub mod config;
pub mod error;
pub mod message;
pub mod types;

pub use config::NetworkConfig;
pub use error::{ProtocolError, Result};
pub use message::{PeeledLayer, DESTINATION_WIDTH, KEY_SEGMENT_LEN};

/// Identifier of a relay node
pub type NodeId = u32;

/// Liveness body returned by every `/status` route
pub const STATUS_LIVE: &str = "live";
