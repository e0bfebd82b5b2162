//! # traybar
//!
//! Declarative status-bar applications for Linux desktop environments using
//! the StatusNotifierItem (SNI) specification via the
//! [ksni](https://crates.io/crates/ksni) library.
//!
//! ## Overview
//!
//! An application is declared as plain data: a name, a title, an icon, and a
//! nested menu declaration that is compiled into an ordered, uniquely-keyed
//! tree. Behavior is attached through an explicit [`AppConfig`]: click
//! callbacks addressed by title paths into the tree, repeating timers, and a
//! notification handler. Registration happens before the application runs;
//! paths are resolved against the live tree at startup, and an unresolvable
//! path aborts startup rather than dangling.
//!
//! Callbacks declare their shape when registered: [`Callback::free`] for a
//! plain `f(event)` function, [`Callback::bound`] for one that also receives
//! the live [`AppHandle`]. Both shapes receive the same [`Event`] value.
//!
//! ## Example
//!
//! ```no_run
//! use std::time::Duration;
//! use traybar::{App, AppConfig, Callback, MenuEntry, Notice};
//!
//! fn main() -> Result<(), traybar::Error> {
//!     let app = App::new("demo")
//!         .title("Demo")
//!         .icon("applications-utilities")
//!         .menu(vec![
//!             MenuEntry::sub("Preferences", vec!["General".into(), "Advanced".into()]),
//!             MenuEntry::Separator,
//!             "Say hi".into(),
//!         ])?;
//!
//!     let config = AppConfig::new()
//!         .on_click(["Say hi"], Callback::bound(|app, _event| {
//!             let _ = app.notify(Notice::new("Hi!").message("You clicked the menu."));
//!         }))
//!         .on_click(["Preferences", "General"], Callback::free(|event| {
//!             println!("activated: {event:?}");
//!         }))
//!         .every(Duration::from_secs(60), Callback::bound(|app, _event| {
//!             app.set_title("still here");
//!         }));
//!
//!     app.run(config)
//! }
//! ```
//!
//! A `Quit` item is always appended after the declared menu; activating it
//! (or calling [`AppHandle::quit`]) ends [`App::run`].

pub mod app;
pub mod callback;
pub mod config;
pub mod error;
pub mod event;
pub mod menu;
pub mod notify;
pub mod storage;
pub mod timer;
pub mod tray;

pub use app::{App, AppHandle};
pub use callback::Callback;
pub use config::AppConfig;
pub use error::Error;
pub use event::Event;
pub use menu::{MenuEntry, MenuNode, MenuState, MenuTree, NodeId};
pub use notify::Notice;
pub use storage::support_dir;
pub use timer::TimerLoop;
pub use tray::StatusTray;
