//! The menu tree arena.
//!
//! Nodes live in a flat arena and are addressed by [`NodeId`]; each node
//! holds the ordered ids of its children. Insertion order is preserved all
//! the way through to the rendered menu. Within one level, titles are
//! unique: inserting a duplicate is a silent no-op and the first insertion
//! wins, which makes re-declaring the same structure idempotent. Separators
//! are keyed by their arena id and excluded from title lookup, so they can
//! never collide with a user title.

use tracing::debug;

use crate::error::Error;
use crate::menu::entry::MenuEntry;
use crate::menu::node::MenuNode;

/// Stable identifier of a node within its [`MenuTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// An ordered tree of menu items, built once from a declaration.
///
/// After building, only individual node attributes (title, icon, state)
/// may change; the shape is fixed.
#[derive(Debug, Default)]
pub struct MenuTree {
    nodes: Vec<MenuNode>,
    roots: Vec<NodeId>,
}

impl MenuTree {
    /// Compiles a declaration into a tree.
    ///
    /// Fails with [`Error::InvalidMenuShape`] if any entry carries an empty
    /// title, which would leave the node unaddressable.
    pub fn build(entries: Vec<MenuEntry>) -> Result<Self, Error> {
        let mut tree = Self::default();
        tree.parse(None, entries)?;
        Ok(tree)
    }

    fn parse(&mut self, parent: Option<NodeId>, entries: Vec<MenuEntry>) -> Result<(), Error> {
        for entry in entries {
            self.check_shape(&entry)?;
            match entry {
                MenuEntry::Leaf(title) => {
                    self.insert(parent, MenuNode::new(title));
                }
                MenuEntry::Node(node) => {
                    self.insert(parent, node);
                }
                MenuEntry::Sub(title, children) => {
                    let id = self.insert(parent, MenuNode::new(title));
                    self.parse(Some(id), children)?;
                }
                MenuEntry::Separator => {
                    self.insert(parent, MenuNode::separator());
                }
                MenuEntry::Nested(nested) => {
                    self.parse(parent, nested)?;
                }
            }
        }
        Ok(())
    }

    fn check_shape(&self, entry: &MenuEntry) -> Result<(), Error> {
        let titled = match entry {
            MenuEntry::Leaf(title) | MenuEntry::Sub(title, _) => !title.is_empty(),
            MenuEntry::Node(node) => !node.title().is_empty(),
            MenuEntry::Separator | MenuEntry::Nested(_) => true,
        };
        if titled {
            Ok(())
        } else {
            Err(Error::InvalidMenuShape { element: entry.describe() })
        }
    }

    /// Inserts a node under `parent` (or at the top level for `None`).
    ///
    /// A non-separator whose title already exists at that level is dropped
    /// and the surviving node's id is returned, so a duplicate submenu
    /// declaration merges its children into the first occurrence.
    fn insert(&mut self, parent: Option<NodeId>, node: MenuNode) -> NodeId {
        if !node.is_separator() {
            if let Some(existing) = self.child_by_title(parent, node.title()) {
                debug!(title = node.title(), "duplicate menu title ignored");
                return existing;
            }
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        match parent {
            None => self.roots.push(id),
            Some(p) => {
                let parent_node = &mut self.nodes[p.0];
                parent_node.children.push(id);
                parent_node.submenu = true;
            }
        }
        id
    }

    fn child_by_title(&self, parent: Option<NodeId>, title: &str) -> Option<NodeId> {
        let level = match parent {
            None => &self.roots,
            Some(p) => &self.nodes[p.0].children,
        };
        level.iter().copied().find(|id| {
            let node = &self.nodes[id.0];
            !node.is_separator() && node.title() == title
        })
    }

    /// Resolves a sequence of titles from the top level down to a node.
    ///
    /// Any missing step fails with [`Error::PathNotFound`] carrying the
    /// complete attempted path.
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Result<NodeId, Error> {
        let mut parent = None;
        for part in path {
            parent = Some(self.child_by_title(parent, part.as_ref()).ok_or_else(|| {
                Error::PathNotFound {
                    path: path.iter().map(|s| s.as_ref().to_string()).collect(),
                }
            })?);
        }
        parent.ok_or(Error::PathNotFound { path: Vec::new() })
    }

    pub fn get(&self, id: NodeId) -> Option<&MenuNode> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut MenuNode> {
        self.nodes.get_mut(id.0)
    }

    /// Top-level node ids in declaration order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Ordered child ids of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first traversal in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MenuNode)> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        order.into_iter().map(move |id| (id, &self.nodes[id.0]))
    }
}
