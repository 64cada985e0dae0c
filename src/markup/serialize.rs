//! Writing a [`Document`] back to markup text.

use quick_xml::escape::{escape, partial_escape};

use super::{Document, NodeId, NodeKind};

/// Serializes the whole document, without an XML declaration.
///
/// Childless elements are written self-closed as `<name />`.
pub fn to_string(doc: &Document) -> String {
    let mut out = String::new();
    write_node(doc, doc.root(), &mut out);
    out
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    match doc.kind(id) {
        NodeKind::Text(text) => out.push_str(&partial_escape(text.as_str())),
        NodeKind::Element(element) => {
            out.push('<');
            out.push_str(&element.name);
            for (key, value) in &element.attributes {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                out.push_str(&escape(value.as_str()));
                out.push('"');
            }

            let children = doc.children(id);
            if children.is_empty() {
                out.push_str(" />");
                return;
            }

            out.push('>');
            for &child in children {
                write_node(doc, child, out);
            }
            out.push_str("</");
            out.push_str(&element.name);
            out.push('>');
        }
    }
}
