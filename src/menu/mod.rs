//! Menu declaration and the menu tree.
//!
//! A menu is declared as plain data ([`MenuEntry`]) and compiled once into a
//! [`MenuTree`], an arena of [`MenuNode`] addressed by stable [`NodeId`].

pub mod entry;
pub mod node;
pub mod tree;

pub use entry::MenuEntry;
pub use node::{MenuNode, MenuState};
pub use tree::{MenuTree, NodeId};
