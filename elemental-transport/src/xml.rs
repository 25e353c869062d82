//! Conversion between XML documents and `serde_json::Value` trees
//!
//! The appliance speaks XML. Request bodies are plain key/value trees that
//! get rendered to a compact document, and XML responses are decoded into
//! the same kind of tree so callers can walk them without a schema.
//!
//! Decoding follows these rules:
//!
//! - the result is an object with a single key, the root element name
//! - an element holding only text becomes a string, an empty one `""`
//! - attributes are collected under `$`
//! - text next to attributes or child elements is stored under `_`
//! - a child seen once is stored directly, a repeated child becomes an array
//! - text is trimmed and whitespace-only text is dropped
//!
//! Encoding uses the same `$` / `_` conventions in reverse.

use std::borrow::Cow;

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde_json::{Map, Value};

use crate::error::XmlError;

/// Key holding an element's attributes
pub const ATTR_KEY: &str = "$";
/// Key holding an element's text when it also has attributes or children
pub const TEXT_KEY: &str = "_";
/// Root element used when a body does not have exactly one top-level key
pub const DEFAULT_ROOT: &str = "root";

struct Frame {
    name: String,
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let mut attributes = Map::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.insert(key, Value::String(value));
        }

        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attributes,
            children: Map::new(),
            text: String::new(),
        })
    }

    fn add_child(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }

    fn close(self) -> (String, Value) {
        let text = self.text.trim();

        if self.attributes.is_empty() && self.children.is_empty() {
            return (self.name, Value::String(text.to_string()));
        }

        let mut object = Map::new();
        if !text.is_empty() {
            object.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
        }
        if !self.attributes.is_empty() {
            object.insert(ATTR_KEY.to_string(), Value::Object(self.attributes));
        }
        object.extend(self.children);

        (self.name, Value::Object(object))
    }
}

/// Decode an XML document into a value tree
///
/// A blank document decodes to `Value::Null`.
pub fn parse_document(xml: &str) -> Result<Value, XmlError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(XmlError::TrailingContent);
                }
                stack.push(Frame::open(&start)?);
            }
            Event::Empty(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(XmlError::TrailingContent);
                }
                let (name, value) = Frame::open(&start)?.close();
                attach(&mut stack, &mut root, name, value)?;
            }
            Event::End(_) => {
                let frame = stack.pop().ok_or(XmlError::TrailingContent)?;
                let (name, value) = frame.close();
                attach(&mut stack, &mut root, name, value)?;
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(data) => {
                let data = data.into_inner();
                push_text(&mut stack, &String::from_utf8_lossy(&data))?;
            }
            Event::Eof => break,
            // declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::UnexpectedEof(open.name));
    }

    Ok(root.unwrap_or(Value::Null))
}

fn push_text(stack: &mut [Frame], text: &str) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(frame) => {
            frame.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(XmlError::TrailingContent),
    }
}

fn attach(
    stack: &mut [Frame],
    root: &mut Option<Value>,
    name: String,
    value: Value,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.add_child(name, value);
            Ok(())
        }
        None if root.is_some() => Err(XmlError::TrailingContent),
        None => {
            let mut object = Map::new();
            object.insert(name, value);
            *root = Some(Value::Object(object));
            Ok(())
        }
    }
}

/// Render a value tree as a compact XML document with declaration
///
/// An object with a single key uses that key as the root element,
/// anything else is wrapped in `<root>`.
pub fn build_document(value: &Value) -> Result<String, XmlError> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    match value {
        Value::Object(map) if map.len() == 1 => {
            for (name, child) in map {
                write_element(&mut writer, name, child)?;
            }
        }
        other => write_element(&mut writer, DEFAULT_ROOT, other)?,
    }

    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

fn write_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> Result<(), XmlError> {
    match value {
        Value::Array(items) => {
            for item in items {
                write_element(writer, name, item)?;
            }
        }
        Value::Object(map) => {
            let mut start = BytesStart::new(name);
            if let Some(Value::Object(attributes)) = map.get(ATTR_KEY) {
                for (key, attr) in attributes {
                    start.push_attribute((key.as_str(), &*scalar_text(attr)));
                }
            }

            let text = map.get(TEXT_KEY).map(scalar_text).unwrap_or_default();
            let mut children = map
                .iter()
                .filter(|(key, _)| key.as_str() != ATTR_KEY && key.as_str() != TEXT_KEY)
                .peekable();

            if text.is_empty() && children.peek().is_none() {
                writer.write_event(Event::Empty(start))?;
                return Ok(());
            }

            writer.write_event(Event::Start(start))?;
            if !text.is_empty() {
                writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(&*text))))?;
            }
            for (key, child) in children {
                write_element(writer, key, child)?;
            }
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
        scalar => {
            let text = scalar_text(scalar);
            if text.is_empty() {
                writer.write_event(Event::Empty(BytesStart::new(name)))?;
            } else {
                writer.write_event(Event::Start(BytesStart::new(name)))?;
                writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(&*text))))?;
                writer.write_event(Event::End(BytesEnd::new(name)))?;
            }
        }
    }

    Ok(())
}

fn scalar_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}
