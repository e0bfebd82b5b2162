//! Desktop notifications.
//!
//! Notifications are fire-and-forget: [`Notice`] describes one, delivery
//! goes through the desktop notification daemon via `notify-rust`, and a
//! detached waiter thread turns a user activation into
//! [`Event::Notification`] carrying the attached data map back to the
//! application loop.

use std::collections::HashMap;
use std::sync::mpsc::Sender;

use notify_rust::{Hint, Notification};
use tracing::debug;

use crate::error::Error;
use crate::event::Event;

/// A notification waiting to be delivered.
#[derive(Clone, Debug, Default)]
pub struct Notice {
    title: String,
    subtitle: Option<String>,
    message: Option<String>,
    data: HashMap<String, String>,
    silent: bool,
}

impl Notice {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches a key/value pair handed back to the notification handler
    /// when the user activates the notification.
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Suppresses the notification sound.
    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }
}

/// Delivers a notice and spawns the activation waiter.
pub(crate) fn deliver(app_name: &str, notice: Notice, events: Sender<Event>) -> Result<(), Error> {
    let mut notification = Notification::new();
    notification
        .appname(app_name)
        .summary(&notice.title)
        .action("default", "Open");
    if let Some(subtitle) = &notice.subtitle {
        notification.subtitle(subtitle);
    }
    if let Some(message) = &notice.message {
        notification.body(message);
    }
    if !notice.silent {
        notification.hint(Hint::SoundName("message-new-instant".to_string()));
    }

    let handle = notification.show()?;
    debug!(title = %notice.title, "notification delivered");

    // wait_for_action blocks until the daemon reports the outcome, so it
    // gets its own thread; a dismissed notification just ends the thread.
    let data = notice.data;
    std::thread::spawn(move || {
        handle.wait_for_action(move |action| {
            if action == "default" {
                let _ = events.send(Event::Notification { data });
            }
        });
    });
    Ok(())
}
