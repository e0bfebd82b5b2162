//! Application configuration: explicit callback registration.
//!
//! An [`AppConfig`] accumulates click-path bindings, timer specs, and the
//! notification handler before the application starts. Registration never
//! touches the menu tree; paths are resolved once, inside
//! [`App::run`](crate::App::run), when the live tree exists. The specs are
//! moved out of the config at that point, so a config can only ever be
//! drained once and no callback can be bound twice.

use std::time::Duration;

use crate::callback::Callback;

/// A click callback waiting to be bound to the node its path names.
#[derive(Debug)]
pub(crate) struct ClickBinding {
    pub(crate) path: Vec<String>,
    pub(crate) callback: Callback,
}

/// A timer waiting to be materialized at startup.
#[derive(Debug)]
pub(crate) struct TimerSpec {
    pub(crate) interval: Duration,
    pub(crate) callback: Callback,
}

/// Deferred callback registrations for one application.
#[derive(Debug, Default)]
pub struct AppConfig {
    clicks: Vec<ClickBinding>,
    timers: Vec<TimerSpec>,
    notification: Option<Callback>,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback for clicks on the menu item at `path`.
    ///
    /// The path is a sequence of titles walked from the top level of the
    /// menu. Resolution is deferred to startup; an unresolvable path aborts
    /// startup with [`Error::PathNotFound`](crate::Error::PathNotFound).
    /// If two registrations resolve to the same node, the later one wins.
    pub fn on_click<P, S>(mut self, path: P, callback: Callback) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clicks.push(ClickBinding {
            path: path.into_iter().map(Into::into).collect(),
            callback,
        });
        self
    }

    /// Registers a callback fired repeatedly at `interval` once the
    /// application runs. Fractional intervals are expressed through
    /// [`Duration`].
    pub fn every(mut self, interval: Duration, callback: Callback) -> Self {
        self.timers.push(TimerSpec { interval, callback });
        self
    }

    /// Registers the handler for notification activations.
    ///
    /// At most one handler exists; a later registration silently replaces
    /// the earlier one.
    pub fn on_notification(mut self, callback: Callback) -> Self {
        self.notification = Some(callback);
        self
    }

    pub(crate) fn take_clicks(&mut self) -> Vec<ClickBinding> {
        std::mem::take(&mut self.clicks)
    }

    pub(crate) fn take_timers(&mut self) -> Vec<TimerSpec> {
        std::mem::take(&mut self.timers)
    }

    pub(crate) fn take_notification(&mut self) -> Option<Callback> {
        self.notification.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;

    #[test]
    fn registrations_keep_their_order() {
        let mut config = AppConfig::new()
            .on_click(["Quit"], Callback::free(|_| {}))
            .on_click(["Preferences", "General"], Callback::free(|_| {}))
            .every(Duration::from_millis(100), Callback::free(|_| {}));

        let clicks = config.take_clicks();
        assert_eq!(clicks[0].path, ["Quit"]);
        assert_eq!(clicks[1].path, ["Preferences", "General"]);
        assert_eq!(config.take_timers().len(), 1);
    }

    #[test]
    fn draining_twice_yields_nothing() {
        let mut config = AppConfig::new().on_click(["Quit"], Callback::free(|_| {}));
        assert_eq!(config.take_clicks().len(), 1);
        assert!(config.take_clicks().is_empty());
    }

    #[test]
    fn last_notification_handler_wins() {
        let app = crate::app::AppHandle::detached("test");
        let mut config = AppConfig::new()
            .on_notification(Callback::free(|_| panic!("replaced handler must not run")))
            .on_notification(Callback::free(|_| {}));

        let handler = config.take_notification().unwrap();
        handler.invoke(&app, &Event::Notification { data: Default::default() });
        assert!(config.take_notification().is_none());
    }
}
