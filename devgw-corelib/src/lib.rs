//! Common libraries of devgw gateway modules.

pub mod constants;
pub mod err;
pub mod http;
pub mod logger;
pub mod server_config;
