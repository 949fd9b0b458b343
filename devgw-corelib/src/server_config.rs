//! The top level configuration `server`.

use std::env;

use clap::{builder::RangedU64ValueParser, Arg, ArgMatches, Command};
use serde::Deserialize;

/// Server configuration object.
#[derive(Default, Deserialize)]
pub struct Config {
    /// Bind address.
    ///
    /// Default is `0.0.0.0`.
    pub host: Option<String>,
    /// HTTP port.
    ///
    /// Default is `8080`.
    #[serde(rename = "httpPort")]
    pub http_port: Option<u16>,
}

pub const DEF_HOST: &'static str = "0.0.0.0";
pub const DEF_HTTP_PORT: u16 = 8080;
pub const DEF_HTTP_PORT_STR: &'static str = "8080";

/// To register Clap arguments.
pub fn reg_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("server.host")
            .long("server.host")
            .help("bind address")
            .num_args(1),
    )
    .arg(
        Arg::new("server.httpport")
            .long("server.httpport")
            .help("HTTP port")
            .num_args(1)
            .value_parser(RangedU64ValueParser::<u64>::new().range(1..=65535)),
    )
}

/// To read input arguments from command-line arguments and environment variables.
///
/// This function will call [`apply_default()`] to fill missing values so you do not need call it
/// again.
pub fn read_args(args: &ArgMatches) -> Config {
    apply_default(&Config {
        host: match args.get_one::<String>("server.host") {
            None => match env::var("SERVER_HOST") {
                Err(_) => None,
                Ok(v) => Some(v),
            },
            Some(v) => Some(v.clone()),
        },
        http_port: match args.get_one::<u64>("server.httpport") {
            None => match env::var("SERVER_HTTP_PORT") {
                Err(_) => Some(DEF_HTTP_PORT),
                Ok(v) => match v.parse::<u16>() {
                    Err(_) => Some(DEF_HTTP_PORT),
                    Ok(v) => Some(v),
                },
            },
            Some(v) => Some(*v as u16),
        },
    })
}

/// Fill missing configuration with default values.
pub fn apply_default(config: &Config) -> Config {
    Config {
        host: match config.host.as_ref() {
            None => Some(DEF_HOST.to_string()),
            Some(v) => Some(v.clone()),
        },
        http_port: match config.http_port {
            None => Some(DEF_HTTP_PORT),
            Some(v) => Some(v),
        },
    }
}
