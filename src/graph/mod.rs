//! Link graph derived from migrated notes and their link audit.
//!
//! Nodes are notes, edges are resolved links. The graph is exported as D3
//! force-layout JSON or as GraphML, optionally restricted to its largest
//! weakly connected component.

mod graphml;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::unionfind::UnionFind;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{LinkAuditEntry, Note, NoteGuid};

/// Errors that can occur while exporting a graph.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("failed to serialize graph: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write GraphML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("failed to write GraphML: {0}")]
    Write(#[from] std::io::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Directed multigraph of notes linked by resolved links.
pub struct LinkGraph {
    graph: DiGraph<NoteGuid, ()>,
    nodes: HashMap<NoteGuid, NodeIndex>,
}

impl LinkGraph {
    /// Builds the graph from every note and every resolved audit entry.
    ///
    /// Unresolved entries are ignored. Edge endpoints missing from `notes`
    /// are added as nodes.
    pub fn build(notes: &[Note], audit: &[LinkAuditEntry]) -> Self {
        let mut graph = Self {
            graph: DiGraph::new(),
            nodes: HashMap::new(),
        };
        for note in notes {
            graph.node(note.guid());
        }
        for entry in audit {
            if let Some(target) = &entry.target_note_id {
                let from = graph.node(&entry.source_note_id);
                let to = graph.node(target);
                graph.graph.add_edge(from, to, ());
            }
        }
        graph
    }

    fn node(&mut self, guid: &NoteGuid) -> NodeIndex {
        if let Some(&idx) = self.nodes.get(guid) {
            return idx;
        }
        let idx = self.graph.add_node(guid.clone());
        self.nodes.insert(guid.clone(), idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns the guids of the largest weakly connected component.
    ///
    /// Ties go to the component holding the earliest-added node.
    pub fn main_component(&self) -> HashSet<NoteGuid> {
        let mut components = UnionFind::<usize>::new(self.graph.node_count());
        for edge in self.graph.edge_indices() {
            if let Some((a, b)) = self.graph.edge_endpoints(edge) {
                components.union(a.index(), b.index());
            }
        }

        let labels = components.into_labeling();
        let mut sizes: HashMap<usize, usize> = HashMap::new();
        for &label in &labels {
            *sizes.entry(label).or_default() += 1;
        }

        let mut best: Option<(usize, usize)> = None;
        for &label in &labels {
            let size = sizes[&label];
            if best.is_none_or(|(_, best_size)| size > best_size) {
                best = Some((label, size));
            }
        }

        let Some((main, _)) = best else {
            return HashSet::new();
        };
        self.graph
            .node_indices()
            .filter(|idx| labels[idx.index()] == main)
            .map(|idx| self.graph[idx].clone())
            .collect()
    }

    /// Writes the graph as GraphML, keeping only the main component if `main_only`.
    pub fn write_graphml(&self, path: &Path, main_only: bool) -> GraphResult<()> {
        let main = main_only.then(|| self.main_component());
        let xml = graphml::render(self, main.as_ref())?;
        fs::write(path, xml).map_err(|e| GraphError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Builds the D3 export, keeping only the main component if `main_only`.
    pub fn to_d3(&self, notes: &[Note], audit: &[LinkAuditEntry], main_only: bool) -> D3Graph {
        let keep: HashSet<NoteGuid> = if main_only {
            self.main_component()
        } else {
            self.nodes.keys().cloned().collect()
        };

        let nodes = notes
            .iter()
            .filter(|n| keep.contains(n.guid()))
            .map(|n| D3Node {
                id: n.title().to_string(),
                group: 1,
            })
            .collect();

        let links = audit
            .iter()
            .filter_map(|entry| {
                let target = entry.target_note_id.as_ref()?;
                if !keep.contains(&entry.source_note_id) || !keep.contains(target) {
                    return None;
                }
                Some(D3Link {
                    source: entry.source_note_title.clone(),
                    target: entry.display_text().unwrap_or_default().to_string(),
                    value: 1,
                })
            })
            .collect();

        D3Graph { nodes, links }
    }
}

/// D3 force-layout document.
#[derive(Debug, Serialize, PartialEq)]
pub struct D3Graph {
    pub nodes: Vec<D3Node>,
    pub links: Vec<D3Link>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct D3Node {
    pub id: String,
    pub group: u32,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct D3Link {
    pub source: String,
    pub target: String,
    pub value: u32,
}

impl D3Graph {
    /// Writes the graph as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> GraphResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| GraphError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn note(guid: &str, title: &str) -> Note {
        Note::new(NoteGuid::new(guid).unwrap(), title, "NB", "<en-note/>")
    }

    fn link(from: &Note, to: &Note) -> LinkAuditEntry {
        LinkAuditEntry::resolved(from, to, Some("old".to_string()))
    }

    fn sample() -> (Vec<Note>, Vec<LinkAuditEntry>) {
        let a = note("A", "Alpha");
        let b = note("B", "Beta");
        let c = note("C", "Gamma");
        let d = note("D", "Delta");
        let e = note("E", "Epsilon");
        let audit = vec![
            link(&a, &b),
            link(&b, &c),
            link(&a, &b),
            link(&d, &e),
            LinkAuditEntry::unresolved(&a, Some("ghost".to_string())),
        ];
        (vec![a, b, c, d, e], audit)
    }

    #[test]
    fn build_counts_resolved_edges_only() {
        let (notes, audit) = sample();
        let graph = LinkGraph::build(&notes, &audit);
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn main_component_is_largest() {
        let (notes, audit) = sample();
        let graph = LinkGraph::build(&notes, &audit);
        let main = graph.main_component();

        let mut guids: Vec<&str> = main.iter().map(|g| g.as_str()).collect();
        guids.sort();
        assert_eq!(guids, vec!["A", "B", "C"]);
    }

    #[test]
    fn main_component_tie_goes_to_first_node() {
        let a = note("A", "Alpha");
        let b = note("B", "Beta");
        let graph = LinkGraph::build(&[a.clone(), b.clone()], &[]);
        let main = graph.main_component();
        assert_eq!(main.len(), 1);
        assert!(main.contains("A"));
    }

    #[test]
    fn empty_graph_has_empty_main_component() {
        let graph = LinkGraph::build(&[], &[]);
        assert!(graph.main_component().is_empty());
    }

    #[test]
    fn d3_export_restricted_to_main_component() {
        let (notes, audit) = sample();
        let graph = LinkGraph::build(&notes, &audit);
        let d3 = graph.to_d3(&notes, &audit, true);

        let ids: Vec<&str> = d3.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(d3.links.len(), 3);
        assert_eq!(
            d3.links[0],
            D3Link {
                source: "Alpha".to_string(),
                target: "Beta".to_string(),
                value: 1
            }
        );
    }

    #[test]
    fn d3_export_all_nodes() {
        let (notes, audit) = sample();
        let graph = LinkGraph::build(&notes, &audit);
        let d3 = graph.to_d3(&notes, &audit, false);
        assert_eq!(d3.nodes.len(), 5);
        assert_eq!(d3.links.len(), 4);
    }

    #[test]
    fn write_json_produces_nodes_and_links() {
        let (notes, audit) = sample();
        let d3 = LinkGraph::build(&notes, &audit).to_d3(&notes, &audit, true);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("d3.json");

        d3.write_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["nodes"][0]["id"], "Alpha");
        assert_eq!(value["nodes"][0]["group"], 1);
        assert_eq!(value["links"][0]["value"], 1);
    }

    fn read_graphml(path: &Path) -> (Vec<String>, Vec<(String, String, String)>) {
        let doc = crate::markup::parse(&fs::read_to_string(path).unwrap()).unwrap();
        let root = doc.root();
        assert_eq!(doc.name(root), Some("graphml"));
        let nodes = doc
            .select(root, &["graph", "node"])
            .into_iter()
            .map(|n| doc.attribute(n, "id").unwrap().to_string())
            .collect();
        let edges = doc
            .select(root, &["graph", "edge"])
            .into_iter()
            .map(|e| {
                (
                    doc.attribute(e, "source").unwrap().to_string(),
                    doc.attribute(e, "target").unwrap().to_string(),
                    doc.attribute(e, "id").unwrap().to_string(),
                )
            })
            .collect();
        (nodes, edges)
    }

    fn edge(source: &str, target: &str, id: &str) -> (String, String, String) {
        (source.to_string(), target.to_string(), id.to_string())
    }

    #[test]
    fn graphml_keeps_every_node_and_parallel_edge() {
        let (notes, audit) = sample();
        let graph = LinkGraph::build(&notes, &audit);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.graphml");

        graph.write_graphml(&path, false).unwrap();

        let (nodes, edges) = read_graphml(&path);
        assert_eq!(nodes, vec!["A", "B", "C", "D", "E"]);
        assert_eq!(
            edges,
            vec![
                edge("A", "B", "0"),
                edge("B", "C", "0"),
                edge("A", "B", "1"),
                edge("D", "E", "0"),
            ]
        );
    }

    #[test]
    fn graphml_main_component_only() {
        let (notes, audit) = sample();
        let graph = LinkGraph::build(&notes, &audit);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes_main.graphml");

        graph.write_graphml(&path, true).unwrap();

        let (nodes, edges) = read_graphml(&path);
        assert_eq!(nodes, vec!["A", "B", "C"]);
        assert_eq!(edges.len(), 3);
        assert!(!edges.iter().any(|(s, _, _)| s == "D"));
    }

    #[test]
    fn graphml_is_directed_and_escapes_ids() {
        let a = note("a&b", "Amp");
        let b = note("<c>", "Angle");
        let graph = LinkGraph::build(&[a.clone(), b.clone()], &[link(&a, &b)]);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("g.graphml");

        graph.write_graphml(&path, false).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(text.contains(r#"edgedefault="directed""#));
        let (nodes, edges) = read_graphml(&path);
        assert_eq!(nodes, vec!["a&b", "<c>"]);
        assert_eq!(edges, vec![edge("a&b", "<c>", "0")]);
    }

    #[test]
    fn write_json_reports_bad_path() {
        let d3 = D3Graph {
            nodes: vec![],
            links: vec![],
        };
        let dir = TempDir::new().unwrap();
        let err = d3.write_json(&dir.path().join("missing").join("d3.json")).unwrap_err();
        assert!(matches!(err, GraphError::Io { .. }));
    }
}
