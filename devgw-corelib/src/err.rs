//! To generate HTTP error responses.
//!
//! ```
//! use devgw_corelib::err::ErrResp;
//! // To generate an HTTP request body format error.
//! let err = ErrResp::ErrParam(Some("Empty request body".to_string()));
//! assert_eq!(format!("{}", err), "{\"error\":\"Empty request body\"}");
//! ```
//!
//! Every error is rendered as the JSON envelope `{"error": "<message>"}` so
//! callers never have to special-case failure bodies.

use std::{error::Error, fmt};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json;

/// The standard error definitions.
#[derive(Debug)]
pub enum ErrResp {
    /// 400, request parameter/body format error.
    ErrParam(Option<String>),
    /// 404, resource (in path) not found.
    ErrNotFound(Option<String>),
    /// 502, the device cannot be reached (timeout, refused, DNS).
    ErrDeviceUnreach(Option<String>),
    /// 502, the device answered but violated the expected protocol.
    ErrDeviceProto(Option<String>),
    /// 500, forwarding a command to the device failed.
    ErrSink(Option<String>),
    /// 500, unknown error.
    ErrUnknown(Option<String>),
    /// Relay an arbitrary status code with a message.
    Custom(u16, Option<String>),
}

/// Used for generating the HTTP body for errors.
#[derive(Serialize)]
struct RespJson<'a> {
    error: &'a str,
}

/// Default message for [`ErrResp::ErrParam`].
pub const E_PARAM: &'static str = "invalid parameter";
/// Default message for [`ErrResp::ErrNotFound`].
pub const E_NOT_FOUND: &'static str = "not found";
/// Default message for [`ErrResp::ErrDeviceUnreach`].
pub const E_DEVICE_UNREACH: &'static str = "device unreachable";
/// Default message for [`ErrResp::ErrDeviceProto`].
pub const E_DEVICE_PROTO: &'static str = "device protocol error";
/// Default message for [`ErrResp::ErrSink`].
pub const E_SINK: &'static str = "command forwarding error";
/// Default message for [`ErrResp::ErrUnknown`].
pub const E_UNKNOWN: &'static str = "unknown error";

/// To generate the error JSON string for an HTTP body.
pub fn to_json(message: &str) -> String {
    serde_json::to_string(&RespJson { error: message }).unwrap()
}

impl ErrResp {
    fn resp_json(&'_ self) -> RespJson<'_> {
        match *self {
            ErrResp::ErrParam(ref desc) => RespJson {
                error: match desc.as_ref() {
                    None => E_PARAM,
                    Some(desc) => desc.as_str(),
                },
            },
            ErrResp::ErrNotFound(ref desc) => RespJson {
                error: match desc.as_ref() {
                    None => E_NOT_FOUND,
                    Some(desc) => desc.as_str(),
                },
            },
            ErrResp::ErrDeviceUnreach(ref desc) => RespJson {
                error: match desc.as_ref() {
                    None => E_DEVICE_UNREACH,
                    Some(desc) => desc.as_str(),
                },
            },
            ErrResp::ErrDeviceProto(ref desc) => RespJson {
                error: match desc.as_ref() {
                    None => E_DEVICE_PROTO,
                    Some(desc) => desc.as_str(),
                },
            },
            ErrResp::ErrSink(ref desc) => RespJson {
                error: match desc.as_ref() {
                    None => E_SINK,
                    Some(desc) => desc.as_str(),
                },
            },
            ErrResp::ErrUnknown(ref desc) => RespJson {
                error: match desc.as_ref() {
                    None => E_UNKNOWN,
                    Some(desc) => desc.as_str(),
                },
            },
            ErrResp::Custom(_, ref desc) => RespJson {
                error: match desc.as_ref() {
                    None => E_UNKNOWN,
                    Some(desc) => desc.as_str(),
                },
            },
        }
    }
}

impl fmt::Display for ErrResp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", serde_json::to_string(&self.resp_json()).unwrap())
    }
}

impl Error for ErrResp {}

impl IntoResponse for ErrResp {
    fn into_response(self) -> Response {
        match self {
            ErrResp::ErrParam(_) => (StatusCode::BAD_REQUEST, Json(self.resp_json())),
            ErrResp::ErrNotFound(_) => (StatusCode::NOT_FOUND, Json(self.resp_json())),
            ErrResp::ErrDeviceUnreach(_) => (StatusCode::BAD_GATEWAY, Json(self.resp_json())),
            ErrResp::ErrDeviceProto(_) => (StatusCode::BAD_GATEWAY, Json(self.resp_json())),
            ErrResp::ErrSink(_) => (StatusCode::INTERNAL_SERVER_ERROR, Json(self.resp_json())),
            ErrResp::ErrUnknown(_) => (StatusCode::INTERNAL_SERVER_ERROR, Json(self.resp_json())),
            ErrResp::Custom(code, _) => (
                match StatusCode::from_u16(code) {
                    Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
                    Ok(code) => code,
                },
                Json(self.resp_json()),
            ),
        }
        .into_response()
    }
}
