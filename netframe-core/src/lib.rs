//! netframe core library
//!
//! This crate provides the error taxonomy and the address primitives shared
//! by the netframe layer codecs and the command-line front end.

pub mod address;
pub mod error;

// Re-export commonly used types
pub use address::{ipv4_to_string, parse_ipv4, parse_mac, MacAddress};
pub use error::{Error, Result};
