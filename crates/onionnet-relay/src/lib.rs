//! # OnionNet Relay
//!
//! A relay owns one RSA keypair, announces the public half to the registry
//! and then serves a single job: take an onion message, remove the outer
//! layer, remember what it saw, and pass the remainder to the next hop.
//!
//! ## Lifecycle
//!
//! ```text
//! KeyGenerated -> RegisteredWithDirectory -> Listening
//! ```
//!
//! Each step is a precondition for the next. A relay that cannot register
//! never starts listening.
//!
//! ## Per-message state
//!
//! The relay keeps one [`message_log::MessageLogEntry`] describing the last message
//! it processed. The entry is replaced as a whole, so readers never observe a
//! mix of two messages.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod api;
pub mod error;
pub mod forward;
pub mod identity;
pub mod message_log;
pub mod node;
pub mod server;

pub use error::{RelayError, Result};
pub use forward::{ChannelForwarder, Forwarder, HttpForwarder};
pub use node::{RelayNode, RelayState};
pub use server::{launch_relay, serve_relay, RunningRelay};
