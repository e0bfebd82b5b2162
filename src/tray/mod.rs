//! The render boundary.
//!
//! Everything that actually draws on screen lives behind the
//! StatusNotifierItem service provided by ksni. This module holds the
//! shared application state the service renders from and the bridge type
//! implementing [`ksni::Tray`].

pub mod ksni_impl;
pub mod state;

pub use ksni_impl::StatusTray;
pub(crate) use state::TrayState;
