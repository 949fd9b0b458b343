use std::error::Error as StdError;

use axum::{response::IntoResponse, Router};
use serde::{Deserialize, Serialize};

use devgw_corelib::http::{Json, Query};

use crate::libs::{
    config::{self, Config},
    device::DeviceClient,
};

mod v1;

/// The resources used by this service.
#[derive(Clone)]
pub struct State {
    /// The scope root path for the service.
    ///
    /// For example `/gw`, the APIs are
    /// - `http://host:port/gw/points`
    /// - `http://host:port/gw/datapoints`
    /// - `http://host:port/gw/commands`
    pub scope_path: &'static str,
    /// The southbound device client.
    pub device: DeviceClient,
}

/// Query parameters for `GET /version`
#[derive(Deserialize)]
pub struct GetVersionQuery {
    q: Option<String>,
}

#[derive(Serialize)]
struct GetVersionRes<'a> {
    data: GetVersionResData<'a>,
}

#[derive(Serialize)]
struct GetVersionResData<'a> {
    name: &'a str,
    version: &'a str,
}

const SERV_NAME: &'static str = env!("CARGO_PKG_NAME");
const SERV_VER: &'static str = env!("CARGO_PKG_VERSION");

/// To create resources for the service.
pub fn new_state(scope_path: &'static str, conf: &Config) -> Result<State, Box<dyn StdError>> {
    let conf = config::apply_default(conf);
    let device = DeviceClient::new(conf.device.as_ref().unwrap())?;
    Ok(State { scope_path, device })
}

/// To register service URIs in the specified root path.
pub fn new_service(state: &State) -> Router {
    let router = Router::new()
        .merge(v1::telemetry::new_service("/datapoints", state))
        .merge(v1::telemetry::new_service("/points", state))
        .merge(v1::command::new_service("/commands", state));
    match state.scope_path {
        "" | "/" => router,
        _ => Router::new().nest(state.scope_path, router),
    }
}

pub async fn get_version(Query(query): Query<GetVersionQuery>) -> impl IntoResponse {
    if let Some(q) = query.q.as_ref() {
        match q.as_str() {
            "name" => return SERV_NAME.into_response(),
            "version" => return SERV_VER.into_response(),
            _ => (),
        }
    }

    Json(GetVersionRes {
        data: GetVersionResData {
            name: SERV_NAME,
            version: SERV_VER,
        },
    })
    .into_response()
}
