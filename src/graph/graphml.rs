//! GraphML export of a [`LinkGraph`].

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use std::collections::{HashMap, HashSet};

use super::{GraphResult, LinkGraph};
use crate::domain::NoteGuid;

const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str = "http://graphml.graphdrawing.org/xmlns \
     http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd";

/// Renders `graph` as a directed GraphML document.
///
/// Nodes are keyed by guid. Every edge is written, so parallel links
/// between the same pair of notes stay distinct; each gets an `id` counting
/// up from 0 per `(source, target)` pair. When `keep` is given, only those
/// nodes and the edges between them are written.
pub(super) fn render(graph: &LinkGraph, keep: Option<&HashSet<NoteGuid>>) -> GraphResult<Vec<u8>> {
    let kept = |guid: &NoteGuid| keep.is_none_or(|k| k.contains(guid));
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    let mut root = BytesStart::new("graphml");
    root.push_attribute(("xmlns", GRAPHML_NS));
    root.push_attribute(("xmlns:xsi", XSI_NS));
    root.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
    writer.write_event(Event::Start(root))?;

    let mut body = BytesStart::new("graph");
    body.push_attribute(("edgedefault", "directed"));
    writer.write_event(Event::Start(body))?;

    for idx in graph.graph.node_indices() {
        let guid = &graph.graph[idx];
        if !kept(guid) {
            continue;
        }
        let mut node = BytesStart::new("node");
        node.push_attribute(("id", guid.as_str()));
        writer.write_event(Event::Empty(node))?;
    }

    let mut keys: HashMap<(&str, &str), usize> = HashMap::new();
    for edge in graph.graph.edge_indices() {
        let Some((from, to)) = graph.graph.edge_endpoints(edge) else {
            continue;
        };
        let (source, target) = (&graph.graph[from], &graph.graph[to]);
        if !kept(source) || !kept(target) {
            continue;
        }
        let key = keys.entry((source.as_str(), target.as_str())).or_default();
        let id = key.to_string();
        *key += 1;

        let mut element = BytesStart::new("edge");
        element.push_attribute(("source", source.as_str()));
        element.push_attribute(("target", target.as_str()));
        element.push_attribute(("id", id.as_str()));
        writer.write_event(Event::Empty(element))?;
    }

    writer.write_event(Event::End(BytesEnd::new("graph")))?;
    writer.write_event(Event::End(BytesEnd::new("graphml")))?;
    Ok(writer.into_inner())
}
