//! Common modules of the gateway.

pub mod config;
pub mod device;
pub mod paging;
pub mod xml;
