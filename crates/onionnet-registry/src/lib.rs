//! # OnionNet Registry
//!
//! The directory every relay announces itself to and every originating
//! client reads circuits from. It maps relay identifiers to exported public
//! keys and nothing else: entries are never authenticated, never expire and
//! the first registration of an identifier wins.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod api;
pub mod client;
pub mod directory;
pub mod error;
pub mod server;

pub use client::RegistryClient;
pub use directory::NodeDirectory;
pub use error::{RegistryError, Result};
pub use server::{launch_registry, serve_registry};
