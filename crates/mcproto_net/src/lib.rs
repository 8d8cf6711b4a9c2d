#![doc = include_str!("../README.md")]
#![warn(
    trivial_casts,
    trivial_numeric_casts,
    unused_lifetimes,
    unused_import_braces,
    unreachable_pub,
    clippy::dbg_macro
)]

pub mod blocking;
pub mod config;
pub mod connection;
pub mod packet_io;

pub use config::{ConnectionConfig, ServerConfig};
pub use connection::ConnectionState;
