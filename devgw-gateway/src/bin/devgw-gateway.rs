use std::{error::Error as StdError, fs, time::Duration};

use axum::{routing, Router};
use clap::{Arg as ClapArg, Command};
use json5;
use log::{error, info};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer};

use devgw_corelib::{logger, server_config};
use devgw_gateway::{libs, routes};

#[derive(Deserialize)]
struct AppConfig {
    log: logger::Config,
    server: server_config::Config,
    gateway: libs::config::Config,
}

const PROJ_NAME: &'static str = env!("CARGO_BIN_NAME");
const PROJ_VER: &'static str = env!("CARGO_PKG_VERSION");
const REQ_TIMEOUT_SECS: u64 = 60;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    const FN_NAME: &'static str = "main";

    let conf = match init_config() {
        Err(e) => {
            let conf = logger::Config {
                ..Default::default()
            };
            logger::init(PROJ_NAME, &conf);
            error!("[{}] read config error: {}", FN_NAME, e);
            return Ok(());
        }
        Ok(conf) => conf,
    };

    logger::init(PROJ_NAME, &conf.log);

    let state = match routes::new_state("", &conf.gateway) {
        Err(e) => {
            error!("[{}] new routes state error: {}", FN_NAME, e);
            return Ok(());
        }
        Ok(state) => state,
    };

    let app = Router::new()
        .merge(routes::new_service(&state))
        .route("/version", routing::get(routes::get_version))
        .layer(TimeoutLayer::new(Duration::from_secs(REQ_TIMEOUT_SECS)))
        .layer(CorsLayer::permissive());

    let host = match conf.server.host.as_ref() {
        None => server_config::DEF_HOST,
        Some(host) => host.as_str(),
    };
    let port = match conf.server.http_port {
        None => server_config::DEF_HTTP_PORT,
        Some(port) => port,
    };
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(addr.as_str()).await?;
    info!("[{}] {} {} listening on {}", FN_NAME, PROJ_NAME, PROJ_VER, addr);
    axum::serve(listener, app).await
}

fn init_config() -> Result<AppConfig, Box<dyn StdError>> {
    let mut args = Command::new(PROJ_NAME).version(PROJ_VER).arg(
        ClapArg::new("file")
            .short('f')
            .long("file")
            .help("config file")
            .num_args(1),
    );
    args = logger::reg_args(args);
    args = server_config::reg_args(args);
    args = libs::config::reg_args(args);
    let args = args.get_matches();

    if let Some(v) = args.get_one::<String>("file") {
        let conf_str = fs::read_to_string(v)?;
        let conf: AppConfig = json5::from_str(conf_str.as_str())?;
        return Ok(AppConfig {
            log: logger::apply_default(&conf.log),
            server: server_config::apply_default(&conf.server),
            gateway: libs::config::apply_default(&conf.gateway),
        });
    }

    Ok(AppConfig {
        log: logger::read_args(&args),
        server: server_config::read_args(&args),
        gateway: libs::config::read_args(&args),
    })
}
