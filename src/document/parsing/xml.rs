//! Raw document XML parsing
//!
//! This module turns the bytes of `word/document.xml` into an [`XmlNode`]
//! tree using the quick-xml event reader. Namespace prefixes are dropped,
//! so `w:p` and a prefix-less `p` are the same node.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::super::models::XmlNode;
use crate::error::{ConvertError, Result};

/// An element whose end tag has not been seen yet
struct OpenElement {
    name: String,
    text: String,
    children: Vec<XmlNode>,
}

impl OpenElement {
    fn new(start: &BytesStart) -> Self {
        let local = start.local_name();
        OpenElement {
            name: String::from_utf8_lossy(local.as_ref()).into_owned(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    fn close(self) -> XmlNode {
        match XmlNode::from_local_name(&self.name, self.children) {
            XmlNode::Text(_) => XmlNode::Text(self.text),
            node => node,
        }
    }

    fn collects_text(&self) -> bool {
        self.name == "t"
    }
}

/// Parse document XML into a node tree rooted at the document element.
pub fn parse_document_xml(xml: &[u8]) -> Result<XmlNode> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false); // Keep spacing inside w:t

    let mut buf = Vec::new();
    let mut open: Vec<OpenElement> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Err(e) => {
                return Err(ConvertError::MalformedDocument(format!(
                    "at byte {}: {e}",
                    reader.error_position()
                )));
            }
            Ok(Event::Start(ref e)) => open.push(OpenElement::new(e)),
            Ok(Event::Empty(ref e)) => {
                let node = OpenElement::new(e).close();
                attach(node, &mut open, &mut root)?;
            }
            Ok(Event::End(_)) => {
                let element = open.pop().ok_or_else(|| {
                    ConvertError::MalformedDocument("unexpected closing tag".to_string())
                })?;
                attach(element.close(), &mut open, &mut root)?;
            }
            Ok(Event::Text(ref e)) => {
                if let Some(current) = open.last_mut().filter(|el| el.collects_text()) {
                    current.text.push_str(&e.unescape()?);
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(current) = open.last_mut().filter(|el| el.collects_text()) {
                    current.text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::Eof) => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(unclosed) = open.last() {
        return Err(ConvertError::MalformedDocument(format!(
            "unexpected end of document inside <{}>",
            unclosed.name
        )));
    }

    root.ok_or_else(|| ConvertError::MalformedDocument("no root element".to_string()))
}

fn attach(node: XmlNode, open: &mut [OpenElement], root: &mut Option<XmlNode>) -> Result<()> {
    if let Some(parent) = open.last_mut() {
        parent.children.push(node);
        return Ok(());
    }

    if root.is_some() {
        return Err(ConvertError::MalformedDocument(
            "more than one root element".to_string(),
        ));
    }
    *root = Some(node);
    Ok(())
}

/// The children of `w:body`, or of the root when there is no body element.
pub fn body_children(root: &XmlNode) -> &[XmlNode] {
    root.find("body").unwrap_or(root).children()
}
