//! Program configurations.

use std::env;

use clap::{builder::RangedU64ValueParser, Arg, ArgMatches, Command};
use serde::Deserialize;

/// Configuration file object.
#[derive(Default, Deserialize)]
pub struct Config {
    pub device: Option<Device>,
}

/// Southbound device configuration object.
#[derive(Default, Deserialize)]
pub struct Device {
    /// Device host name or IP address.
    pub host: Option<String>,
    /// Device HTTP port.
    pub port: Option<u16>,
    /// Path of the device telemetry resource.
    #[serde(rename = "dataEndpoint")]
    pub data_endpoint: Option<String>,
    /// Path of the device command resource.
    #[serde(rename = "commandEndpoint")]
    pub command_endpoint: Option<String>,
    /// TCP connect timeout in milliseconds.
    #[serde(rename = "connectTimeoutMs")]
    pub connect_timeout_ms: Option<u64>,
    /// Whole-request timeout in milliseconds.
    #[serde(rename = "requestTimeoutMs")]
    pub request_timeout_ms: Option<u64>,
}

pub const DEF_HOST: &'static str = "127.0.0.1";
pub const DEF_PORT: u16 = 80;
pub const DEF_DATA_ENDPOINT: &'static str = "/data";
pub const DEF_COMMAND_ENDPOINT: &'static str = "/command";
pub const DEF_CONNECT_TIMEOUT_MS: u64 = 5000;
pub const DEF_REQUEST_TIMEOUT_MS: u64 = 5000;

/// To register Clap arguments.
pub fn reg_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("gateway.device.host")
            .long("gateway.device.host")
            .help("device host (ex: 192.168.1.10)")
            .num_args(1),
    )
    .arg(
        Arg::new("gateway.device.port")
            .long("gateway.device.port")
            .help("device HTTP port")
            .num_args(1)
            .value_parser(RangedU64ValueParser::<u64>::new().range(1..=65535)),
    )
    .arg(
        Arg::new("gateway.device.data-endpoint")
            .long("gateway.device.data-endpoint")
            .help("device telemetry path (ex: /data)")
            .num_args(1),
    )
    .arg(
        Arg::new("gateway.device.command-endpoint")
            .long("gateway.device.command-endpoint")
            .help("device command path (ex: /command)")
            .num_args(1),
    )
    .arg(
        Arg::new("gateway.device.connect-timeout-ms")
            .long("gateway.device.connect-timeout-ms")
            .help("device connect timeout in milliseconds")
            .num_args(1)
            .value_parser(RangedU64ValueParser::<u64>::new().range(1..)),
    )
    .arg(
        Arg::new("gateway.device.request-timeout-ms")
            .long("gateway.device.request-timeout-ms")
            .help("device request timeout in milliseconds")
            .num_args(1)
            .value_parser(RangedU64ValueParser::<u64>::new().range(1..)),
    )
}

/// To read input arguments from command-line arguments and environment variables.
///
/// This function will call [`apply_default()`] to fill missing values so you do not need call it
/// again.
pub fn read_args(args: &ArgMatches) -> Config {
    apply_default(&Config {
        device: Some(Device {
            host: match args.get_one::<String>("gateway.device.host") {
                None => match env::var("GATEWAY_DEVICE_HOST") {
                    Err(_) => None,
                    Ok(v) => Some(v),
                },
                Some(v) => Some(v.clone()),
            },
            port: match args.get_one::<u64>("gateway.device.port") {
                None => match env::var("GATEWAY_DEVICE_PORT") {
                    Err(_) => None,
                    Ok(v) => match v.parse::<u16>() {
                        Err(_) => None,
                        Ok(v) => Some(v),
                    },
                },
                Some(v) => Some(*v as u16),
            },
            data_endpoint: match args.get_one::<String>("gateway.device.data-endpoint") {
                None => match env::var("GATEWAY_DEVICE_DATA_ENDPOINT") {
                    Err(_) => None,
                    Ok(v) => Some(v),
                },
                Some(v) => Some(v.clone()),
            },
            command_endpoint: match args.get_one::<String>("gateway.device.command-endpoint") {
                None => match env::var("GATEWAY_DEVICE_COMMAND_ENDPOINT") {
                    Err(_) => None,
                    Ok(v) => Some(v),
                },
                Some(v) => Some(v.clone()),
            },
            connect_timeout_ms: match args.get_one::<u64>("gateway.device.connect-timeout-ms") {
                None => match env::var("GATEWAY_DEVICE_CONNECT_TIMEOUT_MS") {
                    Err(_) => None,
                    Ok(v) => match v.parse::<u64>() {
                        Err(_) => None,
                        Ok(v) => Some(v),
                    },
                },
                Some(v) => Some(*v),
            },
            request_timeout_ms: match args.get_one::<u64>("gateway.device.request-timeout-ms") {
                None => match env::var("GATEWAY_DEVICE_REQUEST_TIMEOUT_MS") {
                    Err(_) => None,
                    Ok(v) => match v.parse::<u64>() {
                        Err(_) => None,
                        Ok(v) => Some(v),
                    },
                },
                Some(v) => Some(*v),
            },
        }),
    })
}

/// Fill missing configuration with default values.
pub fn apply_default(config: &Config) -> Config {
    let def_device = Device {
        ..Default::default()
    };
    let device = match config.device.as_ref() {
        None => &def_device,
        Some(device) => device,
    };
    Config {
        device: Some(Device {
            host: match device.host.as_ref() {
                None => Some(DEF_HOST.to_string()),
                Some(v) => Some(v.clone()),
            },
            port: match device.port {
                None => Some(DEF_PORT),
                Some(v) => Some(v),
            },
            data_endpoint: match device.data_endpoint.as_ref() {
                None => Some(DEF_DATA_ENDPOINT.to_string()),
                Some(v) => Some(normalize_path(v.as_str())),
            },
            command_endpoint: match device.command_endpoint.as_ref() {
                None => Some(DEF_COMMAND_ENDPOINT.to_string()),
                Some(v) => Some(normalize_path(v.as_str())),
            },
            connect_timeout_ms: match device.connect_timeout_ms {
                None => Some(DEF_CONNECT_TIMEOUT_MS),
                Some(v) => Some(v),
            },
            request_timeout_ms: match device.request_timeout_ms {
                None => Some(DEF_REQUEST_TIMEOUT_MS),
                Some(v) => Some(v),
            },
        }),
    }
}

/// Endpoint paths are joined to `http://host:port` so they must start with `/`.
fn normalize_path(path: &str) -> String {
    match path.starts_with('/') {
        false => format!("/{}", path),
        true => path.to_string(),
    }
}
