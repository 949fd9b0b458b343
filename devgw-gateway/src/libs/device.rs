//! Southbound HTTP client of the field device.

use std::time::Duration;

use bytes::Bytes;
use log::warn;
use reqwest::{header, Client, StatusCode};

use super::config;

/// The client holds resolved device URLs and a connection pool with the
/// configured timeouts.
#[derive(Clone)]
pub struct DeviceClient {
    client: Client,
    data_url: String,
    command_url: String,
}

/// A relayed device answer. Non-2xx statuses are not errors because the
/// northbound side forwards them as-is.
pub struct DeviceResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

#[derive(Debug)]
pub enum DeviceError {
    /// Connect failures and timeouts.
    Unreachable(String),
}

/// Wait between the first try and the single retry of an idempotent read.
const RETRY_WAIT_MS: u64 = 100;

impl DeviceClient {
    /// To create the client from (defaulted) device configurations.
    pub fn new(conf: &config::Device) -> Result<Self, reqwest::Error> {
        let host = match conf.host.as_ref() {
            None => config::DEF_HOST,
            Some(v) => v.as_str(),
        };
        let port = match conf.port {
            None => config::DEF_PORT,
            Some(v) => v,
        };
        let data_endpoint = match conf.data_endpoint.as_ref() {
            None => config::DEF_DATA_ENDPOINT,
            Some(v) => v.as_str(),
        };
        let command_endpoint = match conf.command_endpoint.as_ref() {
            None => config::DEF_COMMAND_ENDPOINT,
            Some(v) => v.as_str(),
        };
        let connect_timeout = match conf.connect_timeout_ms {
            None => config::DEF_CONNECT_TIMEOUT_MS,
            Some(v) => v,
        };
        let request_timeout = match conf.request_timeout_ms {
            None => config::DEF_REQUEST_TIMEOUT_MS,
            Some(v) => v,
        };

        let client = Client::builder()
            .connect_timeout(Duration::from_millis(connect_timeout))
            .timeout(Duration::from_millis(request_timeout))
            .build()?;
        Ok(DeviceClient {
            client,
            data_url: format!("http://{}:{}{}", host, port, data_endpoint),
            command_url: format!("http://{}:{}{}", host, port, command_endpoint),
        })
    }

    /// GET the telemetry resource with the relayed query pairs.
    ///
    /// The read is idempotent so an unreachable device is retried once after a
    /// short wait.
    pub async fn fetch_telemetry(
        &self,
        query: &[(String, String)],
    ) -> Result<DeviceResponse, DeviceError> {
        const FN_NAME: &'static str = "fetch_telemetry";

        let first = self.get_once(query).await;
        let e = match first {
            Err(e) => e,
            Ok(resp) => return Ok(resp),
        };
        let DeviceError::Unreachable(msg) = &e;
        warn!("[{}] device unreachable, retry once: {}", FN_NAME, msg);
        tokio::time::sleep(Duration::from_millis(RETRY_WAIT_MS)).await;
        self.get_once(query).await
    }

    /// POST the command body to the device without touching it. The command
    /// may not be idempotent so there is no retry.
    pub async fn send_command(
        &self,
        content_type: Option<&str>,
        body: Bytes,
    ) -> Result<DeviceResponse, DeviceError> {
        let mut builder = self.client.post(self.command_url.as_str());
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let resp = match builder.body(body).send().await {
            Err(e) => return Err(DeviceError::Unreachable(e.to_string())),
            Ok(resp) => resp,
        };
        read_response(resp).await
    }

    async fn get_once(&self, query: &[(String, String)]) -> Result<DeviceResponse, DeviceError> {
        let mut builder = self.client.get(self.data_url.as_str());
        if !query.is_empty() {
            builder = builder.query(query);
        }
        let resp = match builder.send().await {
            Err(e) => return Err(DeviceError::Unreachable(e.to_string())),
            Ok(resp) => resp,
        };
        read_response(resp).await
    }
}

async fn read_response(resp: reqwest::Response) -> Result<DeviceResponse, DeviceError> {
    let status = resp.status();
    let body = match resp.bytes().await {
        Err(e) => return Err(DeviceError::Unreachable(e.to_string())),
        Ok(body) => body,
    };
    Ok(DeviceResponse { status, body })
}
