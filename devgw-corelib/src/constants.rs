//! Common constants for devgw gateway modules.

pub struct ContentType;

impl ContentType {
    pub const JSON: &'static str = "application/json";
    /// The gateway always answers JSON with an explicit charset.
    pub const JSON_UTF8: &'static str = "application/json; charset=utf-8";
    pub const XML: &'static str = "application/xml";
}
