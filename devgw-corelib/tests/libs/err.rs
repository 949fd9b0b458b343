use axum::{http::StatusCode, response::IntoResponse};
use laboratory::{expect, SpecContext};

use devgw_corelib::err::{self, ErrResp};

use crate::TestState;

/// Test [`err::to_json`].
pub fn to_json(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    expect(err::to_json("text")).to_equal("{\"error\":\"text\"}".to_string())?;
    expect(err::to_json("with \"quote\""))
        .to_equal("{\"error\":\"with \\\"quote\\\"\"}".to_string())
}

/// Test `err::ErrResp::fmt` implementations.
pub fn fmt(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    expect(format!("{}", ErrResp::ErrParam(None)))
        .to_equal(format!("{{\"error\":\"{}\"}}", err::E_PARAM))?;
    expect(format!("{}", ErrResp::ErrParam(Some("param".to_string()))))
        .to_equal("{\"error\":\"param\"}".to_string())?;
    expect(format!("{}", ErrResp::ErrNotFound(None)))
        .to_equal(format!("{{\"error\":\"{}\"}}", err::E_NOT_FOUND))?;
    expect(format!("{}", ErrResp::ErrDeviceUnreach(None)))
        .to_equal(format!("{{\"error\":\"{}\"}}", err::E_DEVICE_UNREACH))?;
    expect(format!(
        "{}",
        ErrResp::ErrDeviceUnreach(Some("timed out".to_string()))
    ))
    .to_equal("{\"error\":\"timed out\"}".to_string())?;
    expect(format!("{}", ErrResp::ErrDeviceProto(None)))
        .to_equal(format!("{{\"error\":\"{}\"}}", err::E_DEVICE_PROTO))?;
    expect(format!("{}", ErrResp::ErrSink(None)))
        .to_equal(format!("{{\"error\":\"{}\"}}", err::E_SINK))?;
    expect(format!("{}", ErrResp::ErrUnknown(None)))
        .to_equal(format!("{{\"error\":\"{}\"}}", err::E_UNKNOWN))?;
    expect(format!("{}", ErrResp::Custom(418, None)))
        .to_equal(format!("{{\"error\":\"{}\"}}", err::E_UNKNOWN))?;
    expect(format!(
        "{}",
        ErrResp::Custom(418, Some("custom".to_string()))
    ))
    .to_equal("{\"error\":\"custom\"}".to_string())
}

/// Test `err::ErrResp::into_response` implementations.
pub fn into_response(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    expect(ErrResp::ErrParam(None).into_response().status()).to_equal(StatusCode::BAD_REQUEST)?;
    expect(ErrResp::ErrNotFound(None).into_response().status()).to_equal(StatusCode::NOT_FOUND)?;
    expect(ErrResp::ErrDeviceUnreach(None).into_response().status())
        .to_equal(StatusCode::BAD_GATEWAY)?;
    expect(ErrResp::ErrDeviceProto(None).into_response().status())
        .to_equal(StatusCode::BAD_GATEWAY)?;
    expect(ErrResp::ErrSink(None).into_response().status())
        .to_equal(StatusCode::INTERNAL_SERVER_ERROR)?;
    expect(ErrResp::ErrUnknown(None).into_response().status())
        .to_equal(StatusCode::INTERNAL_SERVER_ERROR)?;
    expect(ErrResp::Custom(418, None).into_response().status())
        .to_equal(StatusCode::from_u16(418).unwrap())?;
    expect(ErrResp::Custom(99, None).into_response().status())
        .to_equal(StatusCode::INTERNAL_SERVER_ERROR)
}
