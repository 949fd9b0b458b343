use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Router,
};
use log::error;

use devgw_corelib::{constants::ContentType, err::ErrResp};

use super::super::State as AppState;
use crate::libs::device::DeviceError;

pub fn new_service(scope_path: &str, state: &AppState) -> Router {
    Router::new().route(
        scope_path,
        routing::post(post_command).with_state(state.clone()),
    )
}

/// `POST /{base}/commands`
///
/// The gateway is a transparent proxy here. The device status code and body
/// are relayed as-is.
async fn post_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ErrResp> {
    const FN_NAME: &'static str = "post_command";

    if body.is_empty() {
        return Err(ErrResp::ErrParam(Some("Empty request body".to_string())));
    }
    let content_type = match headers.get(header::CONTENT_TYPE) {
        None => None,
        Some(v) => match v.to_str() {
            Err(_) => None,
            Ok(v) => Some(v),
        },
    };

    let resp = match state.device.send_command(content_type, body).await {
        Err(DeviceError::Unreachable(e)) => {
            error!("[{}] device unreachable: {}", FN_NAME, e);
            return Err(ErrResp::ErrSink(Some(e)));
        }
        Ok(resp) => resp,
    };
    let status = match StatusCode::from_u16(resp.status.as_u16()) {
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
        Ok(status) => status,
    };
    Ok((
        status,
        [(header::CONTENT_TYPE, ContentType::JSON_UTF8)],
        resp.body,
    )
        .into_response())
}
