//! Application orchestration.
//!
//! [`App`] collects the declarative configuration (name, title, icon, menu
//! declaration); [`App::run`] spawns the tray service, binds the deferred
//! callback registrations against the live tree, starts the timers, and
//! blocks on the event loop. [`AppHandle`] is the live, cloneable handle
//! that bound callbacks receive; mutations made through it propagate to the
//! status bar via a ksni update.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, OnceLock};

use ksni::blocking::TrayMethods;
use tracing::{debug, info, warn};

use crate::callback::Callback;
use crate::config::{AppConfig, ClickBinding};
use crate::error::Error;
use crate::event::Event;
use crate::menu::{MenuEntry, MenuNode, MenuTree, NodeId};
use crate::notify::{self, Notice};
use crate::storage;
use crate::timer::TimerLoop;
use crate::tray::{StatusTray, TrayState};

/// A configured, not yet running status-bar application.
pub struct App {
    state: TrayState,
}

impl App {
    /// Creates an application with the given name.
    ///
    /// The name is the application's identity: it becomes the tray id, the
    /// fallback title, and the storage namespace. It cannot change later.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            state: TrayState::new(name.into()),
        }
    }

    /// Sets the status-bar title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.state.title = Some(title.into());
        self
    }

    /// Sets the status-bar icon (a freedesktop icon name).
    pub fn icon(mut self, icon_name: impl Into<String>) -> Self {
        self.state.icon_name = Some(icon_name.into());
        self
    }

    /// Declares the menu. The tree is built here, once; structural errors
    /// surface immediately.
    pub fn menu(mut self, entries: Vec<MenuEntry>) -> Result<Self, Error> {
        self.state.tree = Some(MenuTree::build(entries)?);
        Ok(self)
    }

    /// The application's support directory, created on first use.
    pub fn support_dir(&self) -> Result<PathBuf, Error> {
        storage::support_dir(&self.state.name)
    }

    /// Opens a file inside the support directory for reading.
    pub fn open(&self, file: impl AsRef<Path>) -> Result<File, Error> {
        Ok(File::open(self.support_dir()?.join(file))?)
    }

    /// Creates (or truncates) a file inside the support directory.
    pub fn create(&self, file: impl AsRef<Path>) -> Result<File, Error> {
        Ok(File::create(self.support_dir()?.join(file))?)
    }

    /// Starts the application and blocks until it quits.
    ///
    /// In order: the tray service is spawned (rendering the menu), the live
    /// handle is created, timers start, click bindings are drained and
    /// resolved against the live tree, then the event loop runs until the
    /// Quit item is activated or [`AppHandle::quit`] is called. A click
    /// binding whose path does not resolve aborts startup.
    pub fn run(self, mut config: AppConfig) -> Result<(), Error> {
        let (events, inbox) = mpsc::channel();
        let mut tray_state = self.state;
        tray_state.events = Some(events.clone());
        let state = Arc::new(Mutex::new(tray_state));
        let tray = StatusTray { state: state.clone() };

        info!("spawning tray service");
        let service = tray.spawn()?;

        let handle = AppHandle {
            state,
            events,
            ksni: Arc::new(OnceLock::new()),
        };
        let _ = handle.ksni.set(service);

        let mut timers: Vec<TimerLoop> = config
            .take_timers()
            .into_iter()
            .map(|spec| TimerLoop::new(handle.clone(), spec.interval, spec.callback))
            .collect();
        for timer in &mut timers {
            timer.start();
        }

        let callbacks = match bind_clicks(&handle, config.take_clicks()) {
            Ok(callbacks) => callbacks,
            Err(err) => {
                // Fatal at startup; unwind what already started.
                for timer in &mut timers {
                    timer.stop();
                }
                handle.shutdown_tray();
                return Err(err);
            }
        };
        let notification_handler = config.take_notification();

        info!(name = %handle.name(), "entering event loop");
        for event in &inbox {
            match &event {
                Event::Click { node, .. } => match callbacks.get(node) {
                    Some(callback) => callback.invoke(&handle, &event),
                    None => debug!(?node, "click on item without a callback"),
                },
                Event::Notification { .. } => match &notification_handler {
                    Some(callback) => callback.invoke(&handle, &event),
                    None => warn!(
                        "notification activated but no handler is registered; \
                         register one with AppConfig::on_notification"
                    ),
                },
                // Ticks are dispatched on their timer threads and never
                // travel through this channel.
                Event::Tick { .. } => {}
                Event::Quit => break,
            }
        }

        for timer in &mut timers {
            timer.stop();
        }
        handle.shutdown_tray();
        info!("application stopped");
        Ok(())
    }
}

/// Resolves every registered click path against the live tree.
///
/// Later registrations for the same node replace earlier ones. With no menu
/// configured, any registration at all is a programming error and fails with
/// [`Error::MissingMenuRoot`].
fn bind_clicks(
    handle: &AppHandle,
    bindings: Vec<ClickBinding>,
) -> Result<HashMap<NodeId, Callback>, Error> {
    let mut callbacks = HashMap::new();
    if bindings.is_empty() {
        return Ok(callbacks);
    }
    let state = handle.state.lock().unwrap();
    let tree = state.tree.as_ref().ok_or(Error::MissingMenuRoot)?;
    for binding in bindings {
        let node = tree.resolve(&binding.path)?;
        debug!(path = ?binding.path, ?node, "bound click callback");
        callbacks.insert(node, binding.callback);
    }
    Ok(callbacks)
}

/// Live handle to a running application.
///
/// Cheap to clone and safe to move across threads; timer callbacks receive
/// a clone. All mutations are immediately visible to the tray service.
#[derive(Clone)]
pub struct AppHandle {
    state: Arc<Mutex<TrayState>>,
    events: Sender<Event>,
    ksni: Arc<OnceLock<ksni::blocking::Handle<StatusTray>>>,
}

impl AppHandle {
    pub fn name(&self) -> String {
        self.state.lock().unwrap().name.clone()
    }

    pub fn title(&self) -> Option<String> {
        self.state.lock().unwrap().title.clone()
    }

    /// Changes the status-bar title and refreshes the tray.
    pub fn set_title(&self, title: impl Into<String>) {
        self.state.lock().unwrap().title = Some(title.into());
        self.refresh();
    }

    pub fn icon(&self) -> Option<String> {
        self.state.lock().unwrap().icon_name.clone()
    }

    /// Changes the status-bar icon and refreshes the tray.
    pub fn set_icon(&self, icon_name: impl Into<String>) {
        self.state.lock().unwrap().icon_name = Some(icon_name.into());
        self.refresh();
    }

    /// Resolves a title path against the live menu.
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Result<NodeId, Error> {
        let state = self.state.lock().unwrap();
        let tree = state.tree.as_ref().ok_or(Error::MissingMenuRoot)?;
        tree.resolve(path)
    }

    /// Mutates one menu node (title, icon, state) and refreshes the tray.
    ///
    /// Returns `false` if the node does not exist or no menu is configured.
    pub fn update_node(&self, id: NodeId, f: impl FnOnce(&mut MenuNode)) -> bool {
        let updated = {
            let mut state = self.state.lock().unwrap();
            match state.tree.as_mut().and_then(|tree| tree.get_mut(id)) {
                Some(node) => {
                    f(node);
                    true
                }
                None => false,
            }
        };
        if updated {
            self.refresh();
        }
        updated
    }

    /// Sends a desktop notification.
    pub fn notify(&self, notice: Notice) -> Result<(), Error> {
        notify::deliver(&self.name(), notice, self.events.clone())
    }

    /// Asks the application loop to exit.
    pub fn quit(&self) {
        let _ = self.events.send(Event::Quit);
    }

    /// The application's support directory, created on first use.
    pub fn support_dir(&self) -> Result<PathBuf, Error> {
        storage::support_dir(&self.name())
    }

    /// Opens a file inside the support directory for reading.
    pub fn open(&self, file: impl AsRef<Path>) -> Result<File, Error> {
        Ok(File::open(self.support_dir()?.join(file))?)
    }

    /// Creates (or truncates) a file inside the support directory.
    pub fn create(&self, file: impl AsRef<Path>) -> Result<File, Error> {
        Ok(File::create(self.support_dir()?.join(file))?)
    }

    /// Asks the tray service to re-read the shared state.
    fn refresh(&self) {
        if let Some(service) = self.ksni.get() {
            let _ = service.update(|_tray| {});
        }
    }

    fn shutdown_tray(&self) {
        if let Some(service) = self.ksni.get() {
            let _ = service.shutdown();
        }
    }

    #[cfg(test)]
    pub(crate) fn detached(name: &str) -> Self {
        let (events, _inbox) = mpsc::channel();
        Self {
            state: Arc::new(Mutex::new(TrayState::new(name.to_string()))),
            events,
            ksni: Arc::new(OnceLock::new()),
        }
    }

    #[cfg(test)]
    pub(crate) fn detached_with_menu(name: &str, entries: Vec<MenuEntry>) -> Self {
        let handle = Self::detached(name);
        handle.state.lock().unwrap().tree = Some(MenuTree::build(entries).unwrap());
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuState;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn scenario_handle() -> AppHandle {
        AppHandle::detached_with_menu(
            "test",
            vec![
                MenuEntry::sub("Preferences", vec!["General".into(), "Advanced".into()]),
                MenuEntry::Separator,
                "Quit".into(),
            ],
        )
    }

    fn binding(path: &[&str], callback: Callback) -> ClickBinding {
        ClickBinding {
            path: path.iter().map(|s| s.to_string()).collect(),
            callback,
        }
    }

    #[test]
    fn binds_paths_to_their_exact_nodes() {
        let handle = scenario_handle();
        let general = handle.resolve(&["Preferences", "General"]).unwrap();
        let quit = handle.resolve(&["Quit"]).unwrap();

        let callbacks = bind_clicks(
            &handle,
            vec![
                binding(&["Preferences", "General"], Callback::free(|_| {})),
                binding(&["Quit"], Callback::free(|_| {})),
            ],
        )
        .unwrap();

        assert_eq!(callbacks.len(), 2);
        assert!(callbacks.contains_key(&general));
        assert!(callbacks.contains_key(&quit));
    }

    #[test]
    fn dangling_path_aborts_binding_with_the_full_path() {
        let handle = scenario_handle();
        let err = bind_clicks(
            &handle,
            vec![binding(&["Preferences", "Missing"], Callback::free(|_| {}))],
        )
        .unwrap_err();
        match err {
            Error::PathNotFound { path } => assert_eq!(path, ["Preferences", "Missing"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn click_binding_without_a_menu_is_fatal() {
        let handle = AppHandle::detached("test");
        let err = bind_clicks(&handle, vec![binding(&["Quit"], Callback::free(|_| {}))])
            .unwrap_err();
        assert!(matches!(err, Error::MissingMenuRoot));
    }

    #[test]
    fn no_bindings_and_no_menu_is_fine() {
        let handle = AppHandle::detached("test");
        assert!(bind_clicks(&handle, Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn draining_a_config_twice_cannot_double_bind() {
        let handle = scenario_handle();
        let invocations = Arc::new(AtomicUsize::new(0));
        let seen = invocations.clone();

        let mut config = AppConfig::new().on_click(
            ["Quit"],
            Callback::free(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            }),
        );

        let first = bind_clicks(&handle, config.take_clicks()).unwrap();
        let second = bind_clicks(&handle, config.take_clicks()).unwrap();
        assert!(second.is_empty());

        let quit = handle.resolve(&["Quit"]).unwrap();
        let event = Event::Click { node: quit, title: "Quit".to_string() };
        first[&quit].invoke(&handle, &event);
        assert_eq!(invocations.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn later_registration_for_the_same_node_wins() {
        let handle = scenario_handle();
        let callbacks = bind_clicks(
            &handle,
            vec![
                binding(&["Quit"], Callback::free(|_| panic!("replaced callback must not run"))),
                binding(&["Quit"], Callback::free(|_| {})),
            ],
        )
        .unwrap();

        let quit = handle.resolve(&["Quit"]).unwrap();
        assert_eq!(callbacks.len(), 1);
        callbacks[&quit].invoke(&handle, &Event::Click { node: quit, title: "Quit".into() });
    }

    #[test]
    fn free_and_bound_callbacks_see_the_same_click() {
        let handle = scenario_handle();
        let node = handle.resolve(&["Preferences", "Advanced"]).unwrap();
        let event = Event::Click { node, title: "Advanced".to_string() };

        let titles: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

        let free_titles = titles.clone();
        Callback::free(move |event| {
            if let Event::Click { title, .. } = event {
                free_titles.lock().unwrap().push(title.clone());
            }
        })
        .invoke(&handle, &event);

        let bound_titles = titles.clone();
        Callback::bound(move |app, event| {
            assert_eq!(app.name(), "test");
            if let Event::Click { title, .. } = event {
                bound_titles.lock().unwrap().push(title.clone());
            }
        })
        .invoke(&handle, &event);

        assert_eq!(*titles.lock().unwrap(), ["Advanced", "Advanced"]);
    }

    #[test]
    fn node_mutations_are_visible_through_the_handle() {
        let handle = scenario_handle();
        let general = handle.resolve(&["Preferences", "General"]).unwrap();

        assert!(handle.update_node(general, |node| {
            node.set_state(MenuState::Checked);
            node.set_icon("preferences-system");
        }));

        let state = handle.state.lock().unwrap();
        let node = state.tree.as_ref().unwrap().get(general).unwrap();
        assert_eq!(node.check_state(), MenuState::Checked);
        assert_eq!(node.icon_name(), Some("preferences-system"));
    }

    #[test]
    fn retitled_nodes_resolve_under_their_new_title() {
        let handle = scenario_handle();
        let general = handle.resolve(&["Preferences", "General"]).unwrap();
        assert!(handle.update_node(general, |node| node.set_title("Basics")));

        assert_eq!(handle.resolve(&["Preferences", "Basics"]).unwrap(), general);
        assert!(handle.resolve(&["Preferences", "General"]).is_err());
    }

    #[test]
    fn title_and_icon_mutations_are_recorded() {
        let handle = AppHandle::detached("test");
        assert_eq!(handle.title(), None);
        handle.set_title("Working…");
        handle.set_icon("emblem-synchronizing");
        assert_eq!(handle.title().as_deref(), Some("Working…"));
        assert_eq!(handle.icon().as_deref(), Some("emblem-synchronizing"));
    }
}
