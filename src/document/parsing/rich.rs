//! Structured extraction through docx-rs
//!
//! docx-rs parses the whole package into its object model. This module
//! lowers that model into the same [`XmlNode`] tree the raw XML path builds,
//! so both strategies share one walker.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

use super::super::models::XmlNode;

/// An escaped ampersand followed by an entity name. docx-rs decodes run
/// text once while parsing and again when building the run, so `&amp;lt;`
/// comes out as `<` instead of `&lt;`.
static DOUBLE_ESCAPED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&amp;(?:amp|lt|gt|quot|apos|nbsp|#39);").unwrap()
});

/// True when docx-rs would decode some of the document's text twice.
pub(crate) fn has_double_escaped_text(xml: &[u8]) -> bool {
    DOUBLE_ESCAPED.is_match(xml)
}

/// Lower a parsed docx-rs document into the children of its body.
pub(crate) fn lower_document(document: &docx_rs::Document) -> Vec<XmlNode> {
    let mut body = Vec::new();

    for child in &document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(para) => body.push(lower_paragraph(para)),
            docx_rs::DocumentChild::Table(table) => body.push(lower_table(table)),
            docx_rs::DocumentChild::StructuredDataTag(sdt) => body.push(lower_sdt(sdt)),
            _ => {
                // Bookmarks, section breaks and friends hold no text
            }
        }
    }

    body
}

fn lower_paragraph(para: &docx_rs::Paragraph) -> XmlNode {
    let mut children = Vec::new();
    for child in &para.children {
        lower_paragraph_child(child, &mut children);
    }
    XmlNode::Paragraph { children }
}

fn lower_paragraph_child(child: &docx_rs::ParagraphChild, out: &mut Vec<XmlNode>) {
    match child {
        docx_rs::ParagraphChild::Run(run) => out.push(lower_run(run)),
        docx_rs::ParagraphChild::Insert(insert) => {
            for child in &insert.children {
                if let docx_rs::InsertChild::Run(run) = child {
                    out.push(lower_run(run));
                }
            }
        }
        docx_rs::ParagraphChild::Hyperlink(link) => {
            for child in &link.children {
                lower_paragraph_child(child, out);
            }
        }
        docx_rs::ParagraphChild::MoveTo(moved) => {
            for child in &moved.children {
                if let docx_rs::MoveToChild::Run(run) = child {
                    out.push(lower_run(run));
                }
            }
        }
        docx_rs::ParagraphChild::StructuredDataTag(sdt) => out.push(lower_sdt(sdt)),
        docx_rs::ParagraphChild::Delete(_) => {
            // Deleted text lives in w:delText, which is not a text run
        }
        _ => {}
    }
}

fn lower_run(run: &docx_rs::Run) -> XmlNode {
    let children = run
        .children
        .iter()
        .filter_map(|child| match child {
            docx_rs::RunChild::Text(text) => Some(XmlNode::Text(text.text.clone())),
            docx_rs::RunChild::Break(_) => Some(XmlNode::Break),
            _ => None,
        })
        .collect();

    XmlNode::Other {
        name: "r".to_string(),
        children,
    }
}

/// Content controls become a transparent `sdt` wrapper; the walker looks
/// through it the same way it does for a raw `w:sdt`.
fn lower_sdt(sdt: &docx_rs::StructuredDataTag) -> XmlNode {
    let mut children = Vec::new();

    for child in &sdt.children {
        match child {
            docx_rs::StructuredDataTagChild::Run(run) => children.push(lower_run(run)),
            docx_rs::StructuredDataTagChild::Paragraph(para) => {
                children.push(lower_paragraph(para))
            }
            docx_rs::StructuredDataTagChild::Table(table) => children.push(lower_table(table)),
            docx_rs::StructuredDataTagChild::StructuredDataTag(nested) => {
                children.push(lower_sdt(nested))
            }
            _ => {}
        }
    }

    XmlNode::Other {
        name: "sdt".to_string(),
        children,
    }
}

fn lower_table(table: &docx_rs::Table) -> XmlNode {
    let mut rows = Vec::new();

    for table_child in &table.rows {
        let docx_rs::TableChild::TableRow(row) = table_child;
        let mut cells = Vec::new();

        for row_child in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = row_child;
            let mut contents = Vec::new();

            for content in &cell.children {
                match content {
                    docx_rs::TableCellContent::Paragraph(para) => {
                        contents.push(lower_paragraph(para))
                    }
                    docx_rs::TableCellContent::Table(nested) => contents.push(lower_table(nested)),
                    docx_rs::TableCellContent::StructuredDataTag(sdt) => {
                        contents.push(lower_sdt(sdt))
                    }
                    _ => {}
                }
            }

            cells.push(XmlNode::Other {
                name: "tc".to_string(),
                children: contents,
            });
        }

        rows.push(XmlNode::Other {
            name: "tr".to_string(),
            children: cells,
        });
    }

    XmlNode::Table { children: rows }
}
