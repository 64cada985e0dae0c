//! Parsing markup text into a [`Document`].

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{Document, Element, MarkupError, MarkupResult, NodeId};

/// Parses a single-rooted markup fragment.
///
/// Declarations, doctypes, comments and processing instructions are
/// dropped. Whitespace outside the root element is allowed; any other
/// content outside it is an error, as is a missing or unclosed root.
pub fn parse(input: &str) -> MarkupResult<Document> {
    let mut reader = Reader::from_str(input);
    let mut builder = TreeBuilder::default();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let element = element_from(&start)?;
                let id = builder.open(element)?;
                builder.stack.push(id);
            }
            Event::Empty(start) => {
                let element = element_from(&start)?;
                builder.open(element)?;
                if builder.stack.is_empty() {
                    builder.closed = true;
                }
            }
            Event::End(end) => {
                if builder.stack.pop().is_none() {
                    return Err(MarkupError::UnexpectedEnd {
                        name: String::from_utf8_lossy(end.name().as_ref()).into_owned(),
                    });
                }
                if builder.stack.is_empty() {
                    builder.closed = true;
                }
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                builder.text(&text)?;
            }
            Event::CData(cdata) => {
                let text = String::from_utf8_lossy(&cdata);
                builder.text(&text)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    builder.finish()
}

fn element_from(start: &BytesStart<'_>) -> MarkupResult<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok(Element::new(name, attributes))
}

#[derive(Default)]
struct TreeBuilder {
    doc: Option<Document>,
    stack: Vec<NodeId>,
    closed: bool,
}

impl TreeBuilder {
    fn open(&mut self, element: Element) -> MarkupResult<NodeId> {
        if let Some(doc) = self.doc.as_mut() {
            return match self.stack.last() {
                Some(&parent) => Ok(doc.append_element(parent, element)),
                None => Err(MarkupError::MultipleRoots { name: element.name }),
            };
        }
        let doc = Document::new(element);
        let root = doc.root();
        self.doc = Some(doc);
        Ok(root)
    }

    fn text(&mut self, text: &str) -> MarkupResult<()> {
        match (self.stack.last(), self.doc.as_mut()) {
            (Some(&parent), Some(doc)) => {
                doc.append_text(parent, text);
                Ok(())
            }
            _ if text.trim().is_empty() => Ok(()),
            _ => Err(MarkupError::TextOutsideRoot),
        }
    }

    fn finish(self) -> MarkupResult<Document> {
        if let Some(&open) = self.stack.last() {
            let name = self
                .doc
                .as_ref()
                .and_then(|doc| doc.name(open))
                .unwrap_or_default()
                .to_string();
            return Err(MarkupError::Unclosed { name });
        }
        match self.doc {
            Some(doc) if self.closed => Ok(doc),
            _ => Err(MarkupError::Empty),
        }
    }
}
