//! Decoder implementations
//!
//! Each decoder handles one wire format and produces the generic view.

use super::types::BodyDecoder;
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self
    }
}

impl BodyDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Value> {
        serde_json::from_str(body).map_err(|e| Error::Decode {
            message: format!("Failed to parse JSON: {e}"),
        })
    }
}

// ============================================================================
// XML Decoder
// ============================================================================

/// Key under which element text is kept when the element also has
/// attributes or child elements
pub const TEXT_KEY: &str = "$value";

/// XML decoder producing the same tree shape as the JSON serialisation.
///
/// - the root element's content becomes the top-level object
/// - namespace prefixes are dropped, so `gtr:title` becomes `title`
/// - attributes become string fields; `xmlns` declarations are skipped
/// - repeated child elements collapse into an array
/// - leaf text is kept as a string, empty elements become `null`
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDecoder;

impl XmlDecoder {
    /// Create a new XML decoder
    pub fn new() -> Self {
        Self
    }
}

impl BodyDecoder for XmlDecoder {
    fn decode(&self, body: &str) -> Result<Value> {
        xml_to_value(body)
    }
}

/// An element whose end tag has not been seen yet
struct OpenElement {
    name: String,
    fields: Map<String, Value>,
    text: String,
}

impl OpenElement {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let mut fields = Map::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| Error::xml(format!("Malformed attribute: {e}")))?;
            let key = attr.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let name = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| Error::xml(format!("Bad attribute value: {e}")))?;
            fields.insert(name, Value::String(value.into_owned()));
        }

        Ok(Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            fields,
            text: String::new(),
        })
    }

    fn into_value(self) -> (String, Value) {
        let value = if self.fields.is_empty() {
            if self.text.is_empty() {
                Value::Null
            } else {
                Value::String(self.text)
            }
        } else {
            let mut fields = self.fields;
            if !self.text.is_empty() {
                fields.insert(TEXT_KEY.to_string(), Value::String(self.text));
            }
            Value::Object(fields)
        };
        (self.name, value)
    }
}

/// Convert an XML document into the generic view
fn xml_to_value(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(Error::xml(format!(
                    "{e} at position {}",
                    reader.buffer_position()
                )))
            }
        };

        match event {
            Event::Start(start) => stack.push(OpenElement::open(&start)?),
            Event::Empty(start) => {
                let element = OpenElement::open(&start)?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| Error::xml(format!("Bad text content: {e}")))?;
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::xml("Closing tag without opening tag"))?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctypes
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::xml(format!("Missing closing tag for {}", open.name)));
    }

    root.ok_or_else(|| Error::xml("Document has no root element"))
}

/// Attach a finished element to its parent, or make it the document root
fn close_element(
    element: OpenElement,
    stack: &mut [OpenElement],
    root: &mut Option<Value>,
) -> Result<()> {
    let (name, value) = element.into_value();

    match stack.last_mut() {
        Some(parent) => {
            insert_child(&mut parent.fields, name, value);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(value);
            Ok(())
        }
        None => Err(Error::xml(format!("Second root element: {name}"))),
    }
}

/// Insert a child value, turning repeated names into arrays
fn insert_child(fields: &mut Map<String, Value>, name: String, value: Value) {
    match fields.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            fields.insert(name, value);
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Look up a value by dot-separated path, e.g. `fund.funder.name`
pub fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for part in path.split('.').filter(|p| !p.is_empty()) {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// View a value as a list.
///
/// XML collapses a single repeated element into a plain object, and the JSON
/// serialisation omits empty lists, so both an absent value and a lone object
/// are accepted.
pub fn as_list(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(other) => vec![other],
    }
}

/// Render a scalar as text; objects carrying element text yield that text
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(map) => map.get(TEXT_KEY).and_then(value_text),
        _ => None,
    }
}
