//! Parsed view over publisher xml responses.
use std::fmt::Write;

use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};
use yudu_publisher_core::{Error, Result};

/// A parsed xml element.
///
/// Text is trimmed and concatenated, so mixed content keeps its text but
/// not its interleaving with child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Parse a document and return its root element.
    pub fn parse(input: &str) -> Result<XmlElement> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                Error::response_invalid(format!(
                    "invalid xml at position {}",
                    reader.error_position()
                ))
                .with_source(e)
            })?;

            match event {
                Event::Start(e) => stack.push(XmlElement::from_start(&e)?),
                Event::Empty(e) => {
                    let elem = XmlElement::from_start(&e)?;
                    attach(&mut stack, &mut root, elem)?;
                }
                Event::End(_) => {
                    let elem = stack
                        .pop()
                        .ok_or_else(|| Error::response_invalid("unexpected closing tag"))?;
                    attach(&mut stack, &mut root, elem)?;
                }
                Event::Text(e) => {
                    let text = e.unescape().map_err(|err| {
                        Error::response_invalid("invalid xml text").with_source(err)
                    })?;
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&text);
                    }
                }
                Event::CData(e) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions and doctypes.
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::response_invalid(format!(
                "element <{}> is never closed",
                open.name
            )));
        }
        root.ok_or_else(|| Error::response_invalid("xml document has no root element"))
    }

    fn from_start(e: &BytesStart<'_>) -> Result<XmlElement> {
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr
                .map_err(|err| Error::response_invalid("invalid xml attribute").with_source(err))?;
            let value = attr.unescape_value().map_err(|err| {
                Error::response_invalid("invalid xml attribute value").with_source(err)
            })?;
            attributes.push((
                String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                value.into_owned(),
            ));
        }

        Ok(XmlElement {
            name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
            attributes,
            ..Default::default()
        })
    }

    /// Qualified element name, prefix included.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element name without namespace prefix.
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Attributes in document order, namespace declarations included.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Get attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Trimmed text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// First child with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.local_name() == name)
    }

    /// All children with the given local name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.local_name() == name)
    }

    /// Serialize back to a standalone document.
    ///
    /// The output is compact, with an xml declaration on its own line.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut s = String::from("<?xml version=\"1.0\"?>\n");
        self.write_xml(&mut s)?;
        s.push('\n');
        Ok(s)
    }

    fn write_xml(&self, s: &mut String) -> Result<()> {
        write!(s, "<{}", self.name)?;
        for (k, v) in &self.attributes {
            write!(s, " {}=\"{}\"", k, escape(v.as_str()))?;
        }
        if self.text.is_empty() && self.children.is_empty() {
            s.push_str("/>");
            return Ok(());
        }

        s.push('>');
        s.push_str(&partial_escape(self.text.as_str()));
        for child in &self.children {
            child.write_xml(s)?;
        }
        write!(s, "</{}>", self.name)?;
        Ok(())
    }

    /// Convert into a plain json value.
    ///
    /// - a leaf without attributes becomes its text
    /// - attributes go into an `@attributes` object, namespace declarations are skipped
    /// - a leaf with attributes keeps its text under `#text`
    /// - children are keyed by local name, repeated names collapse into arrays
    pub fn to_json_value(&self) -> Value {
        let attributes: Map<String, Value> = self
            .attributes
            .iter()
            .filter(|(k, _)| k != "xmlns" && !k.starts_with("xmlns:"))
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();

        if attributes.is_empty() && self.children.is_empty() {
            return Value::String(self.text.clone());
        }

        let mut object = Map::new();
        if !attributes.is_empty() {
            object.insert("@attributes".to_string(), Value::Object(attributes));
        }
        if !self.text.is_empty() {
            object.insert("#text".to_string(), Value::String(self.text.clone()));
        }
        for child in &self.children {
            let value = child.to_json_value();
            match object.get_mut(child.local_name()) {
                Some(Value::Array(values)) => values.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    object.insert(child.local_name().to_string(), value);
                }
            }
        }
        Value::Object(object)
    }

    /// Convert into a json string, see [`XmlElement::to_json_value`].
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(&self.to_json_value())
            .map_err(|e| Error::unexpected("failed to serialize json").with_source(e))
    }
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    elem: XmlElement,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(elem);
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::response_invalid(
            "xml document has more than one root element",
        ));
    }
    *root = Some(elem);
    Ok(())
}
