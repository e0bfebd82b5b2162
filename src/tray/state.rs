//! Shared application state rendered by the tray service.
//!
//! One [`TrayState`] sits behind an `Arc<Mutex<_>>` shared by the
//! application handle and the ksni bridge. The bridge re-reads it on every
//! menu build, so attribute mutations become visible to the toolkit as soon
//! as an update is requested.

use std::sync::mpsc::Sender;

use ksni::menu::{CheckmarkItem, MenuItem, StandardItem, SubMenu};

use crate::event::Event;
use crate::menu::{MenuState, MenuTree, NodeId};
use crate::tray::ksni_impl::StatusTray;

pub(crate) struct TrayState {
    /// Immutable application identity; also the storage namespace.
    pub(crate) name: String,
    /// Status-bar title; the name is shown when unset.
    pub(crate) title: Option<String>,
    /// Freedesktop icon name for the status bar.
    pub(crate) icon_name: Option<String>,
    /// The live menu tree, if one was configured.
    pub(crate) tree: Option<MenuTree>,
    /// Channel into the application loop; set once at startup.
    pub(crate) events: Option<Sender<Event>>,
}

impl TrayState {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            title: None,
            icon_name: None,
            tree: None,
            events: None,
        }
    }

    /// Builds the ksni menu: the declared tree in declaration order,
    /// followed by the standing Quit item.
    pub(crate) fn build_menu_items(&self) -> Vec<MenuItem<StatusTray>> {
        let mut items = Vec::new();
        if let Some(tree) = &self.tree {
            for &id in tree.roots() {
                items.push(self.build_item(tree, id));
            }
            if !tree.roots().is_empty() {
                items.push(MenuItem::Separator);
            }
        }
        items.push(self.quit_item());
        items
    }

    fn build_item(&self, tree: &MenuTree, id: NodeId) -> MenuItem<StatusTray> {
        let Some(node) = tree.get(id) else {
            return MenuItem::Separator;
        };
        if node.is_separator() {
            return MenuItem::Separator;
        }

        let icon_name = node.icon_name().unwrap_or_default().to_string();

        if node.has_submenu() {
            return SubMenu {
                label: node.title().to_string(),
                icon_name,
                submenu: tree
                    .children(id)
                    .iter()
                    .map(|&child| self.build_item(tree, child))
                    .collect(),
                ..Default::default()
            }
            .into();
        }

        let sender = self.events.clone();
        let title = node.title().to_string();
        let activate = Box::new(move |_this: &mut StatusTray| {
            if let Some(tx) = &sender {
                let _ = tx.send(Event::Click { node: id, title: title.clone() });
            }
        });

        match node.check_state() {
            MenuState::Unchecked => StandardItem {
                label: node.title().to_string(),
                icon_name,
                activate,
                ..Default::default()
            }
            .into(),
            // ksni has no indeterminate state; Mixed renders as checked.
            MenuState::Checked | MenuState::Mixed => CheckmarkItem {
                label: node.title().to_string(),
                icon_name,
                checked: true,
                activate,
                ..Default::default()
            }
            .into(),
        }
    }

    fn quit_item(&self) -> MenuItem<StatusTray> {
        let sender = self.events.clone();
        StandardItem {
            label: "Quit".to_string(),
            icon_name: "application-exit".to_string(),
            activate: Box::new(move |_this: &mut StatusTray| {
                if let Some(tx) = &sender {
                    let _ = tx.send(Event::Quit);
                }
            }),
            ..Default::default()
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuEntry;
    use std::sync::mpsc::{self, Receiver};

    fn state_with(entries: Vec<MenuEntry>) -> (TrayState, Receiver<Event>) {
        let (tx, rx) = mpsc::channel();
        let mut state = TrayState::new("test".to_string());
        state.tree = Some(MenuTree::build(entries).unwrap());
        state.events = Some(tx);
        (state, rx)
    }

    #[test]
    fn renders_declaration_order_plus_quit() {
        let (state, _rx) = state_with(vec![
            MenuEntry::sub("Preferences", vec!["General".into(), "Advanced".into()]),
            MenuEntry::Separator,
            "Hello".into(),
        ]);
        let items = state.build_menu_items();

        // Preferences, separator, Hello, trailing separator, Quit.
        assert_eq!(items.len(), 5);
        assert!(matches!(items[1], MenuItem::Separator));
        assert!(matches!(items[3], MenuItem::Separator));
    }

    #[test]
    fn unconfigured_menu_still_offers_quit() {
        let state = TrayState::new("test".to_string());
        assert_eq!(state.build_menu_items().len(), 1);
    }

    #[test]
    fn click_reports_node_identity() {
        let (state, rx) = state_with(vec!["Hello".into()]);
        let expected = state.tree.as_ref().unwrap().roots()[0];

        // Fire the activation closure directly; no tray service needed.
        let items = state.build_menu_items();
        let mut bridge = StatusTray::test_double();
        if let MenuItem::Standard(item) = items.into_iter().next().unwrap() {
            (item.activate)(&mut bridge);
        } else {
            panic!("expected a standard item");
        }

        match rx.try_recv().unwrap() {
            Event::Click { node, title } => {
                assert_eq!(node, expected);
                assert_eq!(title, "Hello");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
