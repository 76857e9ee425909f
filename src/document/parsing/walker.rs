//! Reading-order text collection
//!
//! This module walks the body of a document tree and produces one text
//! fragment per paragraph and one per table cell text, in the order they
//! appear in the document. Tables are flattened: row and column structure
//! is dropped and an empty fragment follows the last cell so a blank line
//! separates the table from what comes next.

use super::super::models::{Descendants, XmlNode};

/// Collect the text fragments of a document body.
///
/// Only body-level paragraphs and tables start a fragment, so a paragraph
/// inside a table cell is consumed by its table and never emitted again.
/// Other containers (content controls, custom XML) are looked through.
pub fn collect_fragments(body: &[XmlNode]) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut pending: Vec<&XmlNode> = body.iter().rev().collect();

    while let Some(node) = pending.pop() {
        match node {
            XmlNode::Paragraph { children } => fragments.push(paragraph_text(children)),
            XmlNode::Table { children } => {
                fragments.extend(table_cell_texts(children));
                fragments.push(String::new());
            }
            XmlNode::Other { children, .. } => pending.extend(children.iter().rev()),
            // Stray runs outside any paragraph carry no readable text
            XmlNode::Text(_) | XmlNode::Break => {}
        }
    }

    fragments
}

/// Concatenate the text and breaks of a paragraph, trimmed.
pub(crate) fn paragraph_text(children: &[XmlNode]) -> String {
    let mut text = String::new();

    for node in Descendants::new(children) {
        match node {
            XmlNode::Text(t) => text.push_str(t),
            XmlNode::Break => text.push('\n'),
            _ => {}
        }
    }

    text.trim().to_string()
}

/// Every text leaf of a table as its own trimmed fragment.
fn table_cell_texts(children: &[XmlNode]) -> impl Iterator<Item = String> + '_ {
    Descendants::new(children).filter_map(|node| match node {
        XmlNode::Text(t) => Some(t.trim().to_string()),
        _ => None,
    })
}
