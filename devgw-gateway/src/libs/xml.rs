//! Parse device XML payloads and convert them to JSON values.

use quick_xml::{events::Event, Reader};
use serde_json::{Map, Value};
use thiserror::Error;

/// One parsed XML element. Attributes are dropped because device payloads
/// carry data in element text only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    pub name: String,
    pub text: String,
    pub children: Vec<XmlNode>,
}

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("empty document")]
    Empty,
    #[error("malformed XML: {0}")]
    Malformed(String),
    #[error("document deeper than {0} levels")]
    TooDeep(usize),
}

/// Maximum element nesting accepted from a device.
pub const MAX_DEPTH: usize = 64;

/// Parse an XML document into its root element tree.
pub fn parse(xml: &str) -> Result<XmlNode, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<XmlNode> = vec![];
    let mut root: Option<XmlNode> = None;
    loop {
        match reader.read_event() {
            Err(e) => return Err(XmlError::Malformed(e.to_string())),
            Ok(Event::Start(e)) => {
                if root.is_some() && stack.is_empty() {
                    return Err(XmlError::Malformed("multiple root elements".to_string()));
                } else if stack.len() >= MAX_DEPTH {
                    return Err(XmlError::TooDeep(MAX_DEPTH));
                }
                stack.push(XmlNode {
                    name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    text: String::new(),
                    children: vec![],
                });
            }
            Ok(Event::Empty(e)) => {
                if root.is_some() && stack.is_empty() {
                    return Err(XmlError::Malformed("multiple root elements".to_string()));
                } else if stack.len() >= MAX_DEPTH {
                    return Err(XmlError::TooDeep(MAX_DEPTH));
                }
                let node = XmlNode {
                    name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    text: String::new(),
                    children: vec![],
                };
                match stack.last_mut() {
                    None => root = Some(node),
                    Some(parent) => parent.children.push(node),
                }
            }
            Ok(Event::End(_)) => {
                // The reader rejects mismatched tags so the stack cannot be empty here.
                let node = match stack.pop() {
                    None => return Err(XmlError::Malformed("unexpected end tag".to_string())),
                    Some(node) => node,
                };
                match stack.last_mut() {
                    None => root = Some(node),
                    Some(parent) => parent.children.push(node),
                }
            }
            Ok(Event::Text(e)) => {
                let text = match e.unescape() {
                    Err(e) => return Err(XmlError::Malformed(e.to_string())),
                    Ok(text) => text,
                };
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(text.as_ref());
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(node) = stack.last_mut() {
                    node.text
                        .push_str(String::from_utf8_lossy(e.as_ref()).as_ref());
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => (),
        }
    }
    match root {
        None => Err(XmlError::Empty),
        Some(root) => match stack.is_empty() {
            false => Err(XmlError::Malformed("unclosed element".to_string())),
            true => Ok(root),
        },
    }
}

/// Convert a parsed document into a one-key JSON object `{root_name: value}`.
pub fn to_json(root: &XmlNode) -> Value {
    let mut map = Map::new();
    map.insert(root.name.clone(), convert(root));
    Value::Object(map)
}

/// Convert one element to its JSON value.
///
/// A leaf element becomes its text as a JSON string without type inference.
/// A container element becomes an object keyed by child tag name in first
/// occurrence order. A tag that repeats among siblings becomes an array that
/// keeps document order.
pub fn convert(node: &XmlNode) -> Value {
    if node.children.is_empty() {
        return Value::String(node.text.trim().to_string());
    }

    let mut map = Map::new();
    for child in node.children.iter() {
        let value = convert(child);
        match map.get_mut(child.name.as_str()) {
            None => {
                map.insert(child.name.clone(), value);
            }
            Some(existing) => match existing {
                Value::Array(list) => list.push(value),
                _ => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
            },
        }
    }
    Value::Object(map)
}
