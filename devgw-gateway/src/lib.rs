//! The devgw gateway translates a northbound HTTP/JSON API into southbound
//! HTTP/XML device calls.
//!
//! This module provides:
//!
//! - Telemetry reads: `GET /points` and `GET /datapoints` fetch the device
//!   data resource, convert the XML answer to JSON and page the result.
//! - Command writes: `POST /commands` relays the body to the device command
//!   resource and relays the device answer back.
//!
//! # Mount devgw-gateway in your axum App
//!
//! ```no_run
//! use axum::Router;
//! use clap::Command;
//! use devgw_gateway::{libs, routes};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let args = libs::config::reg_args(Command::new("your-project-name")).get_matches();
//!
//!     let conf = libs::config::read_args(&args);
//!     let state = match routes::new_state("/gw", &conf) {
//!         Err(e) => {
//!             println!("Error: {}", e);
//!             return Ok(());
//!         }
//!         Ok(state) => state,
//!     };
//!     let app = Router::new().merge(routes::new_service(&state));
//!     let listener = TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, app).await
//! }
//! ```
//!
//! Please see `bin/devgw-gateway.rs` to get the real world example.

pub mod libs;
pub mod routes;
