//! Arena-backed markup tree.
//!
//! Nodes live in a single `Vec` and refer to each other by index. Detaching
//! a node only unlinks it from its parent; the slot stays in the arena, so
//! `NodeId`s handed out earlier never dangle.

/// Index of a node within its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// An element's tag name and attributes, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl Element {
    pub fn new(name: impl Into<String>, attributes: Vec<(String, String)>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    /// Returns the value of the attribute `key`, if present.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// An owned markup document with a single root element.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    /// Creates a document containing only its root element.
    pub fn new(root: Element) -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Element(root),
            }],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// Returns the element data, or `None` for text nodes.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].kind {
            NodeKind::Element(element) => Some(element),
            NodeKind::Text(_) => None,
        }
    }

    /// Returns the tag name, or `None` for text nodes.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.name.as_str())
    }

    pub fn attribute(&self, id: NodeId, key: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attribute(key))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Iterates over the direct child elements named `name`, in document order.
    pub fn child_elements<'a>(
        &'a self,
        id: NodeId,
        name: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(id)
            .iter()
            .copied()
            .filter(move |&child| self.name(child) == Some(name))
    }

    /// Returns true if the node has at least one element child.
    pub fn has_child_elements(&self, id: NodeId) -> bool {
        self.children(id)
            .iter()
            .any(|&child| self.element(child).is_some())
    }

    /// Returns the text that precedes the node's first child element.
    ///
    /// `None` means there is no such text at all, which is different from
    /// text that happens to be whitespace.
    pub fn leading_text(&self, id: NodeId) -> Option<String> {
        let mut text: Option<String> = None;
        for &child in self.children(id) {
            match &self.nodes[child.0].kind {
                NodeKind::Text(t) => text.get_or_insert_with(String::new).push_str(t),
                NodeKind::Element(_) => break,
            }
        }
        text
    }

    /// Collects the elements reached by following `path` one child level at
    /// a time from `from`.
    ///
    /// `select(root, &["div", "a"])` returns every `a` that is a direct child
    /// of a `div` that is a direct child of `root`.
    pub fn select(&self, from: NodeId, path: &[&str]) -> Vec<NodeId> {
        let mut current = vec![from];
        for step in path {
            current = current
                .into_iter()
                .flat_map(|node| self.child_elements(node, step).collect::<Vec<_>>())
                .collect();
        }
        current
    }

    /// Appends a new element under `parent` and returns its id.
    pub fn append_element(&mut self, parent: NodeId, element: Element) -> NodeId {
        self.push_child(parent, NodeKind::Element(element))
    }

    /// Appends text under `parent`, merging with a trailing text child.
    ///
    /// Empty text is ignored.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(&last) = self.nodes[parent.0].children.last()
            && let NodeKind::Text(existing) = &mut self.nodes[last.0].kind
        {
            existing.push_str(text);
            return;
        }
        self.push_child(parent, NodeKind::Text(text.to_string()));
    }

    /// Detaches every child of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    /// Replaces all children of `id` with a single text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.clear_children(id);
        self.append_text(id, text);
    }

    fn push_child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        self.nodes[parent.0].children.push(id);
        id
    }
}
