//! A single addressable menu item.

use crate::menu::tree::NodeId;

/// Check state of a menu item.
///
/// Maps onto the three states a native menu item can display. The tray
/// renderer shows [`Unchecked`](MenuState::Unchecked) nodes as plain items
/// and anything else as a checkmark item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    /// No check indicator.
    #[default]
    Unchecked,
    /// Checked indicator.
    Checked,
    /// Indeterminate indicator.
    Mixed,
}

/// One item in the menu tree.
///
/// The title doubles as the node's key among its siblings. Title, icon, and
/// state stay mutable after the tree is built; the tree shape does not.
#[derive(Clone, Debug)]
pub struct MenuNode {
    title: String,
    icon_name: Option<String>,
    state: MenuState,
    separator: bool,
    // Child ids are owned by the tree; a detached node always starts empty.
    pub(crate) children: Vec<NodeId>,
    // Set when the first child is inserted, never cleared afterwards, so an
    // emptied submenu still renders as a submenu.
    pub(crate) submenu: bool,
}

impl MenuNode {
    /// Creates a leaf node with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon_name: None,
            state: MenuState::default(),
            separator: false,
            children: Vec::new(),
            submenu: false,
        }
    }

    pub(crate) fn separator() -> Self {
        let mut node = Self::new("");
        node.separator = true;
        node
    }

    /// Sets the icon, builder style.
    pub fn icon(mut self, icon_name: impl Into<String>) -> Self {
        self.icon_name = Some(icon_name.into());
        self
    }

    /// Sets the initial check state, builder style.
    pub fn state(mut self, state: MenuState) -> Self {
        self.state = state;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Freedesktop icon name, if one was assigned.
    pub fn icon_name(&self) -> Option<&str> {
        self.icon_name.as_deref()
    }

    pub fn set_icon(&mut self, icon_name: impl Into<String>) {
        self.icon_name = Some(icon_name.into());
    }

    pub fn check_state(&self) -> MenuState {
        self.state
    }

    pub fn set_state(&mut self, state: MenuState) {
        self.state = state;
    }

    /// Whether this node is a visual separator rather than an item.
    pub fn is_separator(&self) -> bool {
        self.separator
    }

    /// Whether this node has ever gained a submenu.
    pub fn has_submenu(&self) -> bool {
        self.submenu
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_attributes() {
        let node = MenuNode::new("Mute").icon("audio-volume-muted").state(MenuState::Checked);
        assert_eq!(node.title(), "Mute");
        assert_eq!(node.icon_name(), Some("audio-volume-muted"));
        assert_eq!(node.check_state(), MenuState::Checked);
        assert!(!node.is_separator());
        assert!(!node.has_submenu());
    }

    #[test]
    fn separators_are_flagged_not_titled() {
        let sep = MenuNode::separator();
        assert!(sep.is_separator());
        assert_eq!(sep.title(), "");
    }
}
