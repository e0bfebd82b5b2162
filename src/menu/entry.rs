//! Declarative menu entries.
//!
//! A menu is declared as a `Vec<MenuEntry>`. The forms mirror the shapes a
//! status-bar menu is naturally written in: bare titles for leaves, a
//! title/children pair for submenus, `Separator` for a dividing line, a
//! pre-built [`MenuNode`] when an item needs an icon or state up front, and
//! a nested sequence that is spliced into the current level.

use crate::menu::node::MenuNode;

/// One element of a menu declaration.
#[derive(Debug)]
pub enum MenuEntry {
    /// A leaf item titled by the string.
    Leaf(String),
    /// A pre-built node, used as-is.
    Node(MenuNode),
    /// A container item with recursively declared children.
    Sub(String, Vec<MenuEntry>),
    /// A visual separator line.
    Separator,
    /// A nested sequence merged into the current level.
    Nested(Vec<MenuEntry>),
}

impl MenuEntry {
    /// Declares a container item with the given children.
    pub fn sub(title: impl Into<String>, children: Vec<MenuEntry>) -> Self {
        MenuEntry::Sub(title.into(), children)
    }

    /// Short description of the entry for structural error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            MenuEntry::Leaf(title) => format!("leaf {title:?}"),
            MenuEntry::Node(node) => format!("node {:?}", node.title()),
            MenuEntry::Sub(title, children) => {
                format!("submenu {title:?} with {} children", children.len())
            }
            MenuEntry::Separator => "separator".to_string(),
            MenuEntry::Nested(entries) => format!("nested sequence of {}", entries.len()),
        }
    }
}

impl From<&str> for MenuEntry {
    fn from(title: &str) -> Self {
        MenuEntry::Leaf(title.to_string())
    }
}

impl From<String> for MenuEntry {
    fn from(title: String) -> Self {
        MenuEntry::Leaf(title)
    }
}

impl From<MenuNode> for MenuEntry {
    fn from(node: MenuNode) -> Self {
        MenuEntry::Node(node)
    }
}

impl From<Vec<MenuEntry>> for MenuEntry {
    fn from(entries: Vec<MenuEntry>) -> Self {
        MenuEntry::Nested(entries)
    }
}
