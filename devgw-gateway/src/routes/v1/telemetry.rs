use std::str;

use axum::{
    extract::{RawQuery, State},
    http::header,
    response::{IntoResponse, Response},
    routing, Router,
};
use log::{error, warn};

use devgw_corelib::{
    constants::ContentType,
    err::ErrResp,
    http::{self, Json},
};

use super::super::State as AppState;
use crate::libs::{
    device::DeviceError,
    paging::{self, PageRequest},
    xml,
};

pub fn new_service(scope_path: &str, state: &AppState) -> Router {
    Router::new().route(
        scope_path,
        routing::get(get_telemetry).with_state(state.clone()),
    )
}

/// `GET /{base}/points` and `GET /{base}/datapoints`
async fn get_telemetry(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, ErrResp> {
    const FN_NAME: &'static str = "get_telemetry";

    let query = match query.as_ref() {
        None => "",
        Some(query) => query.as_str(),
    };
    let pairs = http::parse_query_pairs(query)?;
    let mut page = None;
    let mut limit = None;
    let mut passthrough = vec![];
    for (key, value) in pairs {
        match key.as_str() {
            "page" => page = Some(value),
            "limit" => limit = Some(value),
            _ => passthrough.push((key, value)),
        }
    }
    let window = PageRequest::new(page.as_ref(), limit.as_ref());

    let resp = match state.device.fetch_telemetry(&passthrough).await {
        Err(DeviceError::Unreachable(e)) => {
            error!("[{}] device unreachable: {}", FN_NAME, e);
            return Err(ErrResp::ErrDeviceUnreach(Some(e)));
        }
        Ok(resp) => resp,
    };
    if !resp.status.is_success() {
        warn!("[{}] device responds status {}", FN_NAME, resp.status);
        let message = match str::from_utf8(resp.body.as_ref()) {
            Err(_) => format!("device responds status {}", resp.status.as_u16()),
            Ok("") => format!("device responds status {}", resp.status.as_u16()),
            Ok(body) => body.to_string(),
        };
        return Err(ErrResp::ErrDeviceProto(Some(message)));
    }

    let body = match str::from_utf8(resp.body.as_ref()) {
        Err(e) => {
            warn!("[{}] non UTF-8 device payload: {}", FN_NAME, e);
            return Err(ErrResp::ErrDeviceProto(Some(
                "non UTF-8 device payload".to_string(),
            )));
        }
        Ok(body) => body,
    };
    let root = match xml::parse(body) {
        Err(e) => {
            warn!("[{}] parse device payload error: {}", FN_NAME, e);
            return Err(ErrResp::ErrDeviceProto(Some(e.to_string())));
        }
        Ok(root) => root,
    };
    let doc = xml::to_json(&root);
    let result = paging::slice(&window, paging::entries_of(&doc));
    Ok((
        [(header::CONTENT_TYPE, ContentType::JSON_UTF8)],
        Json(result),
    )
        .into_response())
}
