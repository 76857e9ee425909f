//! Core data structures for document extraction
//!
//! This module defines the node tree both extraction strategies produce,
//! and the per-input outcome consumed by the conversion report.

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

/// A node of the document XML tree with its namespace prefix stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// `w:p`
    Paragraph { children: Vec<XmlNode> },
    /// `w:t`, holding its text content (empty if the element had none)
    Text(String),
    /// `w:br`
    Break,
    /// `w:tbl`
    Table { children: Vec<XmlNode> },
    /// Any other element, kept for its local name and children
    Other { name: String, children: Vec<XmlNode> },
}

impl XmlNode {
    /// Build a node from an element's local name.
    pub fn from_local_name(name: &str, children: Vec<XmlNode>) -> Self {
        match name {
            "p" => XmlNode::Paragraph { children },
            "t" => XmlNode::Text(String::new()),
            "br" => XmlNode::Break,
            "tbl" => XmlNode::Table { children },
            _ => XmlNode::Other {
                name: name.to_string(),
                children,
            },
        }
    }

    pub fn children(&self) -> &[XmlNode] {
        match self {
            XmlNode::Paragraph { children }
            | XmlNode::Table { children }
            | XmlNode::Other { children, .. } => children,
            XmlNode::Text(_) | XmlNode::Break => &[],
        }
    }

    /// Iterate over all descendants in document order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(self.children())
    }

    /// Find the first element with the given local name, depth-first.
    pub fn find(&self, name: &str) -> Option<&XmlNode> {
        std::iter::once(self)
            .chain(self.descendants())
            .find(|node| matches!(node, XmlNode::Other { name: n, .. } if n == name))
    }
}

/// Pre-order traversal over a node list driven by an explicit stack.
pub struct Descendants<'a> {
    stack: Vec<&'a XmlNode>,
}

impl<'a> Descendants<'a> {
    pub fn new(nodes: &'a [XmlNode]) -> Self {
        Descendants {
            stack: nodes.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Result of processing one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// Markdown written to this path
    Converted(PathBuf),
    /// The input path does not exist
    Missing,
    /// The input is not named `*.docx`
    SkippedNotDocx,
    /// Conversion failed with this message
    Failed(String),
}

impl ConversionOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ConversionOutcome::Failed(_))
    }
}

impl fmt::Display for ConversionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionOutcome::Converted(path) => write!(f, "{}", path.display()),
            ConversionOutcome::Missing => f.write_str("MISSING"),
            ConversionOutcome::SkippedNotDocx => f.write_str("SKIPPED (not .docx)"),
            ConversionOutcome::Failed(message) => write!(f, "ERROR: {message}"),
        }
    }
}

impl Serialize for ConversionOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One row of the conversion report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub input: PathBuf,
    #[serde(rename = "status")]
    pub outcome: ConversionOutcome,
}
