//! Events delivered to user callbacks.

use std::collections::HashMap;
use std::time::Duration;

use crate::menu::NodeId;

/// Payload handed to a callback when it fires.
///
/// The same value also travels over the internal event channel between the
/// tray service and the application loop.
#[derive(Clone, Debug)]
pub enum Event {
    /// A menu item was activated.
    Click {
        /// Id of the activated node.
        node: NodeId,
        /// Title of the node at the moment of activation.
        title: String,
    },
    /// A timer fired.
    Tick {
        /// The timer's configured interval.
        interval: Duration,
        /// How many times this timer has fired so far, starting at 1.
        count: u64,
    },
    /// The user activated a previously delivered notification.
    Notification {
        /// The user-information map attached when the notification was sent.
        data: HashMap<String, String>,
    },
    /// Internal loop control; never dispatched to a user callback.
    Quit,
}
