use axum::{body::Bytes, http::StatusCode, Router};
use axum_test::TestServer;
use laboratory::{expect, SpecContext};
use serde_json::{json, Value};

use devgw_gateway::routes;

use super::super::STATE;
use crate::TestState;

pub fn post_command(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let routes_state = state.routes_state.as_ref().unwrap();

    let server = new_server(routes_state)?;

    // The body and Content-Type reach the device unmodified and the device
    // answer is relayed back.
    let req = server
        .post("/commands")
        .content_type("application/json")
        .bytes(Bytes::from_static(b"{\"cmd\":\"set\",\"value\":\"1\"}"));
    let resp = runtime.block_on(async { req.await });
    expect(resp.status_code()).to_equal(StatusCode::OK)?;
    let content_type = resp.header("content-type");
    expect(content_type.to_str().unwrap_or("")).to_equal("application/json; charset=utf-8")?;
    let body: Value = resp.json();
    expect(body["echo"] == json!({"cmd": "set", "value": "1"})).to_equal(true)?;
    expect(body["contentType"] == json!("application/json")).to_equal(true)
}

pub fn post_command_relay_status(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let routes_state = state.routes_state.as_ref().unwrap();

    let server = new_server(routes_state)?;

    let req = server
        .post("/commands")
        .content_type("application/json")
        .bytes(Bytes::from_static(b"{\"cmd\":\"reject\"}"));
    let resp = runtime.block_on(async { req.await });
    expect(resp.status_code()).to_equal(StatusCode::SERVICE_UNAVAILABLE)?;
    let body = resp.text();
    expect(body.as_str()).to_equal("{\"error\":\"rejected\"}")
}

pub fn post_command_empty_body(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let routes_state = state.routes_state.as_ref().unwrap();

    let server = new_server(routes_state)?;

    let req = server.post("/commands");
    let resp = runtime.block_on(async { req.await });
    expect(resp.status_code()).to_equal(StatusCode::BAD_REQUEST)?;
    let body = resp.text();
    expect(body.as_str()).to_equal("{\"error\":\"Empty request body\"}")
}

pub fn post_command_unreachable(context: &mut SpecContext<TestState>) -> Result<(), String> {
    let state = context.state.borrow();
    let state = state.get(STATE).unwrap();
    let runtime = state.runtime.as_ref().unwrap();
    let unreach_state = state.unreach_state.as_ref().unwrap();

    let server = new_server(unreach_state)?;

    let req = server
        .post("/commands")
        .content_type("application/json")
        .bytes(Bytes::from_static(b"{\"cmd\":\"set\"}"));
    let resp = runtime.block_on(async { req.await });
    expect(resp.status_code()).to_equal(StatusCode::INTERNAL_SERVER_ERROR)?;
    let body: Value = resp.json();
    match body["error"].as_str() {
        None => Err("error is not a string".to_string()),
        Some("") => Err("error should not be empty".to_string()),
        Some(_) => Ok(()),
    }
}

fn new_server(state: &routes::State) -> Result<TestServer, String> {
    let app = Router::new().merge(routes::new_service(state));
    match TestServer::new(app) {
        Err(e) => Err(format!("new server error: {}", e)),
        Ok(server) => Ok(server),
    }
}
