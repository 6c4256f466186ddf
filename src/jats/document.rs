//! Arena-based document tree.
//!
//! A parsed article is an immutable, ordered, labeled tree. Nodes are stored
//! in a flat arena indexed by [`NodeId`]; each node keeps a parent link, so
//! containment questions (is this section inside an abstract? is it a
//! descendant of an already-accepted candidate?) are O(depth) parent-chain
//! walks rather than repeated full-tree scans.
//!
//! Text placement follows the text/tail model: a node's `text` is the
//! character data before its first child, and its `tail` is the character
//! data between its end tag and the next sibling's start tag.

/// Unique identifier for a node within a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single element in the document tree.
///
/// Tag and attribute names are stored with namespace prefixes stripped
/// (`xlink:href` becomes `href`), so lookups match on local names only.
#[derive(Debug, Clone)]
pub struct Node {
    /// Local tag name.
    pub tag: String,
    /// Attribute name/value pairs, names collapsed to local names.
    pub attrs: Vec<(String, String)>,
    /// Character data before the first child element.
    pub text: String,
    /// Character data between this node's end tag and the next sibling.
    pub tail: String,
    /// Parent node (None for the document root).
    pub parent: Option<NodeId>,
    /// Child elements in document order.
    pub children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(tag: String, attrs: Vec<(String, String)>, parent: Option<NodeId>) -> Self {
        Self {
            tag,
            attrs,
            text: String::new(),
            tail: String::new(),
            parent,
            children: Vec::new(),
        }
    }

    /// Look up an attribute value by local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A parsed article document.
///
/// Read-only for the duration of extraction; every query borrows the tree.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    pub(crate) fn from_arena(nodes: Vec<Node>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    /// The root element (typically `article`).
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Local tag name of a node.
    pub fn tag(&self, id: NodeId) -> &str {
        &self.node(id).tag
    }

    /// Attribute lookup by local name.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).attr(name)
    }

    /// Child elements of a node, in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Pre-order traversal of the subtree rooted at `id`, including `id`.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![id],
        }
    }

    /// Whether any ancestor of `id` (excluding `id` itself) has the given tag.
    pub fn is_inside(&self, id: NodeId, tag: &str) -> bool {
        let mut cur = self.node(id).parent;
        while let Some(p) = cur {
            if self.tag(p) == tag {
                return true;
            }
            cur = self.node(p).parent;
        }
        false
    }

    /// Whether `id` is a strict descendant of `ancestor`.
    pub fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut cur = self.node(id).parent;
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.node(p).parent;
        }
        false
    }

    /// Number of `sec` ancestors above `id` (nesting depth among sections).
    pub fn sec_depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cur = self.node(id).parent;
        while let Some(p) = cur {
            if self.tag(p) == "sec" {
                depth += 1;
            }
            cur = self.node(p).parent;
        }
        depth
    }

    /// First direct child of `id` with the given tag.
    pub fn first_child_tagged(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&c| self.tag(c) == tag)
    }

    /// All raw character data in the subtree, in document order.
    ///
    /// Equivalent of `itertext()`: own text first, then each child's subtree
    /// text followed by that child's tail. Fragments are joined with single
    /// spaces; no normalization is applied.
    pub fn collect_text(&self, id: NodeId) -> String {
        let mut parts: Vec<&str> = Vec::new();
        self.collect_text_into(id, &mut parts);
        parts.join(" ")
    }

    /// Raw character data in the subtree, concatenated with no inserted
    /// separators.
    ///
    /// Markup-split runs reassemble exactly as typeset: a small-caps title
    /// `M<sc>ETHODS</sc>` yields `"METHODS"`, where [`collect_text`] would
    /// yield `"M ETHODS"`. Use this wherever substring matching must see
    /// the text as the reader does.
    ///
    /// [`collect_text`]: Document::collect_text
    pub fn collect_text_raw(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text_raw_into(id, &mut out);
        out
    }

    fn collect_text_raw_into(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        out.push_str(&node.text);
        for &child in &node.children {
            self.collect_text_raw_into(child, out);
            out.push_str(&self.node(child).tail);
        }
    }

    fn collect_text_into<'a>(&'a self, id: NodeId, parts: &mut Vec<&'a str>) {
        let node = self.node(id);
        let own = node.text.trim();
        if !own.is_empty() {
            parts.push(own);
        }
        for &child in &node.children {
            self.collect_text_into(child, parts);
            let tail = self.node(child).tail.trim();
            if !tail.is_empty() {
                parts.push(tail);
            }
        }
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // Push children reversed so the leftmost child is visited next.
        for &child in self.doc.children(id).iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use crate::jats::parse_document;

    #[test]
    fn test_containment_queries() {
        let doc = parse_document(
            r#"<article>
                 <abstract><sec sec-type="methods"><p>summary</p></sec></abstract>
                 <body><sec sec-type="methods"><p>full</p></sec></body>
               </article>"#,
        )
        .unwrap();

        let secs: Vec<_> = doc
            .descendants(doc.root())
            .filter(|&n| doc.tag(n) == "sec")
            .collect();
        assert_eq!(secs.len(), 2);
        assert!(doc.is_inside(secs[0], "abstract"));
        assert!(!doc.is_inside(secs[1], "abstract"));
        assert!(!doc.is_inside(doc.root(), "article"));
    }

    #[test]
    fn test_sec_depth() {
        let doc = parse_document(
            r#"<article><body>
                 <sec id="a"><title>Outer</title>
                   <sec id="b"><title>Inner</title>
                     <sec id="c"><p>deep</p></sec>
                   </sec>
                 </sec>
               </body></article>"#,
        )
        .unwrap();

        let secs: Vec<_> = doc
            .descendants(doc.root())
            .filter(|&n| doc.tag(n) == "sec")
            .collect();
        assert_eq!(doc.sec_depth(secs[0]), 0);
        assert_eq!(doc.sec_depth(secs[1]), 1);
        assert_eq!(doc.sec_depth(secs[2]), 2);
        assert!(doc.is_descendant_of(secs[2], secs[0]));
        assert!(!doc.is_descendant_of(secs[0], secs[2]));
    }

    #[test]
    fn test_collect_text_raw_has_no_separators() {
        let doc = parse_document("<title>M<sc>ETHODS</sc> and more</title>").unwrap();
        assert_eq!(doc.collect_text_raw(doc.root()), "METHODS and more");
        assert_eq!(doc.collect_text(doc.root()), "M ETHODS and more");
    }

    #[test]
    fn test_collect_text_document_order() {
        let doc = parse_document(
            "<sec>intro <p>first <italic>emphasis</italic> rest</p> outro</sec>",
        )
        .unwrap();
        assert_eq!(
            doc.collect_text(doc.root()),
            "intro first emphasis rest outro"
        );
    }
}
