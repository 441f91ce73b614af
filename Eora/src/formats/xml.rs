//! Generic XML element tree
//!
//! The flowchart formats are plain `XmlSerializer` output: nested elements,
//! text leaves and an occasional `xsi:type` attribute selecting a subclass.
//! This reader turns a document into an owned [`XmlElement`] tree that the
//! conversation and string table readers then interpret.

use crate::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// One element of a parsed XML document.
///
/// Element and attribute names are stored without their namespace prefix,
/// so `xsi:type` is looked up as `type`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Local element name.
    pub name: String,
    /// Attributes in document order, keyed by local name.
    pub attributes: Vec<(String, String)>,
    /// Concatenated, unescaped text content.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an empty element with the given name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Get an attribute value by local name
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The `xsi:type` attribute, naming the serialized subclass
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.attribute("type")
    }

    /// First child with the given name
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children with the given name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First child with the given name, or [`Error::MissingElement`]
    pub fn require(&self, name: &'static str) -> Result<&XmlElement> {
        self.child(name).ok_or_else(|| Error::MissingElement {
            element: name,
            parent: self.name.clone(),
        })
    }

    /// Text of the first child with the given name
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }

    /// Parse this element's text as an integer
    pub fn as_i32(&self) -> Result<i32> {
        self.text.trim().parse().map_err(|_| Error::InvalidNumber {
            element: self.name.clone(),
            value: self.text.clone(),
        })
    }

    /// Parse a required integer child
    pub fn child_i32(&self, name: &'static str) -> Result<i32> {
        self.require(name)?.as_i32()
    }

    /// Parse an optional boolean child; absent means `false`
    pub fn child_bool(&self, name: &str) -> Result<bool> {
        let Some(child) = self.child(name) else {
            return Ok(false);
        };
        match child.text.trim() {
            "true" | "True" | "1" => Ok(true),
            "false" | "False" | "0" | "" => Ok(false),
            other => Err(Error::InvalidBool {
                element: child.name.clone(),
                value: other.to_string(),
            }),
        }
    }
}

/// Parse an XML document into its root element
///
/// # Errors
/// Returns an error if the XML is malformed or has no root element.
pub fn parse_xml(content: &str) -> Result<XmlElement> {
    let content = content.trim_start_matches('\u{feff}');
    let mut reader = Reader::from_str(content);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                stack.push(open_element(&e)?);
            }
            Ok(Event::Empty(e)) => {
                let element = open_element(&e)?;
                attach(element, &mut stack, &mut root)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::MalformedXml("closing tag without opening tag".to_string()))?;
                attach(element, &mut stack, &mut root)?;
            }
            Ok(Event::Text(t)) => {
                // Indentation between elements is dropped, leaf values are kept verbatim
                let text = t.unescape()?;
                if let (Some(current), false) = (stack.last_mut(), text.trim().is_empty()) {
                    current.text.push_str(&text);
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(Error::MalformedXml(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| Error::MalformedXml("document has no root element".to_string()))
}

fn open_element(e: &BytesStart<'_>) -> Result<XmlElement> {
    let mut element = XmlElement::new(String::from_utf8_lossy(e.local_name().as_ref()));
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(element: XmlElement, stack: &mut [XmlElement], root: &mut Option<XmlElement>) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(Error::MalformedXml(format!("second root element <{}>", element.name)));
    }
    Ok(())
}
