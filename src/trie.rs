//! Arena-backed prediction trie.
//!
//! Every vocabulary the scanner consults (month names, weekday names, date
//! shapes, time shapes) is stored as one of these. Nodes live in a flat `Vec`
//! and refer to their children by index, so a trie is plain data: it can be
//! built once, shared behind a `&'static` reference and walked from any number
//! of threads without locking.
//!
//! ```text
//! insert("DD*DD")   insert("DD*D")
//!
//!   root ── D ── D ── * ── D^ ── D^
//!                             (terminal after "DD*D" and "DD*DD")
//! ```
//!
//! Literals that share a prefix share nodes; the node closing a complete
//! literal is flagged `terminal`. A failed `child` lookup means the running
//! match cannot be extended.

/// Index of a node inside a [`Trie`].
pub type NodeId = usize;

/// Marker printed after terminal nodes by [`Trie::render`] and [`Trie::pattern`].
const TERMINAL_MARK: char = '^';

/// A single trie node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieNode {
    /// Character on the edge leading into this node (`'\0'` for the root).
    pub ch: char,
    /// Distance from the root.
    pub depth: usize,
    /// Whether a complete literal ends here.
    pub terminal: bool,
    /// Children in insertion order.
    pub children: Vec<NodeId>,
}

/// Prefix tree over a fixed literal set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trie {
    nodes: Vec<TrieNode>,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// The root node of every trie.
    pub const ROOT: NodeId = 0;

    /// Create a trie holding only the root sentinel.
    pub fn new() -> Self {
        Trie { nodes: vec![TrieNode { ch: '\0', depth: 0, terminal: false, children: Vec::new() }] }
    }

    /// Build a trie from `literals`, inserting each one verbatim.
    pub fn build<'a>(literals: impl IntoIterator<Item = &'a str>) -> Self {
        let mut trie = Trie::new();
        for literal in literals {
            trie.insert(literal);
        }
        trie
    }

    /// Insert `literal`, reusing any existing prefix path.
    ///
    /// The empty literal is ignored: the root never becomes terminal.
    pub fn insert(&mut self, literal: &str) {
        let mut current = Self::ROOT;
        for ch in literal.chars() {
            current = match self.child(current, ch) {
                Some(id) => id,
                None => {
                    let id = self.nodes.len();
                    let depth = self.nodes[current].depth + 1;
                    self.nodes.push(TrieNode { ch, depth, terminal: false, children: Vec::new() });
                    self.nodes[current].children.push(id);
                    id
                }
            };
        }
        if current != Self::ROOT {
            self.nodes[current].terminal = true;
        }
    }

    /// Return the child of `id` reached through `ch`, if any.
    pub fn child(&self, id: NodeId, ch: char) -> Option<NodeId> {
        self.nodes[id].children.iter().copied().find(|&child| self.nodes[child].ch == ch)
    }

    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id]
    }

    pub fn is_terminal(&self, id: NodeId) -> bool {
        self.nodes[id].terminal
    }

    /// Follow `chars` starting at `from`. Returns `None` as soon as a step fails.
    pub fn walk(&self, from: NodeId, chars: impl IntoIterator<Item = char>) -> Option<NodeId> {
        chars.into_iter().try_fold(from, |id, ch| self.child(id, ch))
    }

    /// Whether `word` is one of the inserted literals.
    pub fn contains(&self, word: &str) -> bool {
        self.walk(Self::ROOT, word.chars()).is_some_and(|id| self.is_terminal(id))
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Length of the longest inserted literal.
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Render the trie as an indented tree, one node per line.
    ///
    /// ```text
    /// ·
    /// └── D
    ///     ├── D
    ///     │   └── *^
    ///     └── *
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::from("·\n");
        let children = &self.nodes[Self::ROOT].children;
        for (idx, &child) in children.iter().enumerate() {
            self.render_node(child, "", idx + 1 == children.len(), &mut out);
        }
        out
    }

    fn render_node(&self, id: NodeId, prefix: &str, last: bool, out: &mut String) {
        let node = &self.nodes[id];
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(&display_char(node.ch));
        if node.terminal {
            out.push(TERMINAL_MARK);
        }
        out.push('\n');

        let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
        for (idx, &child) in node.children.iter().enumerate() {
            self.render_node(child, &child_prefix, idx + 1 == node.children.len(), out);
        }
    }

    /// Compact alternation string describing every path in the trie.
    ///
    /// A node with one child is written inline, a node whose children are all
    /// leaves as a character class, anything else as a group:
    ///
    /// ```text
    /// {"DD*D", "DD*DD", "D*D"}  ->  D(D*D^D^|*D^)
    /// ```
    pub fn pattern(&self) -> String {
        let root = &self.nodes[Self::ROOT];
        match root.children.len() {
            0 => String::new(),
            1 => self.pattern_node(root.children[0]),
            _ => {
                let parts: Vec<String> = root.children.iter().map(|&c| self.pattern_node(c)).collect();
                format!("({})", parts.join("|"))
            }
        }
    }

    fn pattern_node(&self, id: NodeId) -> String {
        let node = &self.nodes[id];
        let mut out = display_char(node.ch);
        if node.terminal {
            out.push(TERMINAL_MARK);
        }

        match node.children.as_slice() {
            [] => {}
            [only] => out.push_str(&self.pattern_node(*only)),
            kids if kids.iter().all(|&k| self.nodes[k].children.is_empty()) => {
                out.push('[');
                for &kid in kids {
                    out.push_str(&display_char(self.nodes[kid].ch));
                }
                out.push(']');
            }
            kids => {
                let parts: Vec<String> = kids.iter().map(|&k| self.pattern_node(k)).collect();
                out.push('(');
                out.push_str(&parts.join("|"));
                out.push(')');
            }
        }
        out
    }
}

fn display_char(ch: char) -> String {
    match ch {
        ' ' => "␠".to_string(),
        '\0' => "·".to_string(),
        other => other.to_string(),
    }
}
