//! Page window arithmetic for list responses.

use serde::Serialize;
use serde_json::Value;

/// A validated page request. Missing, non-numeric or non-positive parameters
/// fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

/// A page of entries with the window echo and the total entry count.
#[derive(Serialize)]
pub struct PageResult {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub data: Vec<Value>,
}

pub const DEF_PAGE: usize = 1;
pub const DEF_LIMIT: usize = 10;

impl PageRequest {
    /// Build a request from raw query parameter strings.
    pub fn new(page: Option<&String>, limit: Option<&String>) -> Self {
        PageRequest {
            page: parse_param(page, DEF_PAGE),
            limit: parse_param(limit, DEF_LIMIT),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: DEF_PAGE,
            limit: DEF_LIMIT,
        }
    }
}

fn parse_param(value: Option<&String>, default: usize) -> usize {
    match value {
        None => default,
        Some(v) => match v.parse::<usize>() {
            Err(_) => default,
            Ok(0) => default,
            Ok(v) => v,
        },
    }
}

/// Split a converted document into pageable entries.
///
/// A document whose root value is an object with exactly one field holding an
/// array of objects is treated as a list of entries. Any other shape is one
/// entry of its own. This keeps scalar arrays such as `<sensor>` value lists
/// intact inside a single entry.
pub fn entries_of(doc: &Value) -> Vec<Value> {
    if let Value::Object(root) = doc {
        if root.len() == 1 {
            if let Some(Value::Object(inner)) = root.values().next() {
                if inner.len() == 1 {
                    if let Some(Value::Array(list)) = inner.values().next() {
                        if !list.is_empty() && list.iter().all(|v| v.is_object()) {
                            return list.clone();
                        }
                    }
                }
            }
        }
    }
    vec![doc.clone()]
}

/// Apply the page window to the entries.
pub fn slice(request: &PageRequest, entries: Vec<Value>) -> PageResult {
    let total = entries.len();
    let start = request.page.saturating_sub(1).saturating_mul(request.limit);
    let data = match start >= total {
        true => vec![],
        false => {
            let end = match start.checked_add(request.limit) {
                None => total,
                Some(end) => end.min(total),
            };
            entries[start..end].to_vec()
        }
    };
    PageResult {
        page: request.page,
        limit: request.limit,
        total,
        data,
    }
}
