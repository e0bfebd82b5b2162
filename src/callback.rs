//! Callback variants and dispatch.
//!
//! A callback declares its shape when it is registered: a free callback
//! receives only the event, a bound callback additionally receives the
//! application handle. Dispatch is a plain match on the variant, so there is
//! no runtime probing and no error masking; whatever a user callback panics
//! with propagates untouched.

use std::fmt;

use tracing::debug;

use crate::app::AppHandle;
use crate::event::Event;

/// A registered callback, tagged with the shape it expects.
pub enum Callback {
    /// Invoked as `f(event)`.
    Free(Box<dyn Fn(&Event) + Send>),
    /// Invoked as `f(app, event)` with the live application handle.
    Bound(Box<dyn Fn(&AppHandle, &Event) + Send>),
}

impl Callback {
    /// Wraps a callback that only needs the event.
    pub fn free(f: impl Fn(&Event) + Send + 'static) -> Self {
        Callback::Free(Box::new(f))
    }

    /// Wraps a callback that also needs the application handle.
    pub fn bound(f: impl Fn(&AppHandle, &Event) + Send + 'static) -> Self {
        Callback::Bound(Box::new(f))
    }

    /// Invokes the callback with the shape it declared.
    ///
    /// Both variants receive the same event value; the handle is simply not
    /// forwarded to a free callback.
    pub fn invoke(&self, app: &AppHandle, event: &Event) {
        match self {
            Callback::Free(f) => {
                debug!(?event, "dispatching free callback");
                f(event);
            }
            Callback::Bound(f) => {
                debug!(?event, "dispatching bound callback");
                f(app, event);
            }
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Free(_) => f.write_str("Callback::Free"),
            Callback::Bound(_) => f.write_str("Callback::Bound"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[test]
    fn both_variants_receive_the_same_event() {
        let seen: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));
        let event = Event::Tick { interval: Duration::from_millis(100), count: 7 };
        let app = AppHandle::detached("test");

        let free_seen = seen.clone();
        let free = Callback::free(move |event| {
            if let Event::Tick { count, .. } = event {
                free_seen.lock().unwrap().push(*count);
            }
        });

        let bound_seen = seen.clone();
        let bound = Callback::bound(move |app, event| {
            assert_eq!(app.name(), "test");
            if let Event::Tick { count, .. } = event {
                bound_seen.lock().unwrap().push(*count);
            }
        });

        free.invoke(&app, &event);
        bound.invoke(&app, &event);
        assert_eq!(*seen.lock().unwrap(), [7, 7]);
    }
}
