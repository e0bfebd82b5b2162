//! ksni bridge.
//!
//! [`StatusTray`] implements [`ksni::Tray`] over the shared application
//! state. Menu item activations are forwarded over the event channel; the
//! application loop owns the callbacks and does the dispatching.

use std::sync::{Arc, Mutex};

use ksni::menu::MenuItem;

use crate::tray::state::TrayState;

pub struct StatusTray {
    pub(crate) state: Arc<Mutex<TrayState>>,
}

impl ksni::Tray for StatusTray {
    fn id(&self) -> String {
        let state = self.state.lock().unwrap();
        state.name.clone()
    }

    fn title(&self) -> String {
        let state = self.state.lock().unwrap();
        state.title.clone().unwrap_or_else(|| state.name.clone())
    }

    fn icon_name(&self) -> String {
        let state = self.state.lock().unwrap();
        state.icon_name.clone().unwrap_or_default()
    }

    fn menu(&self) -> Vec<MenuItem<Self>> {
        let state = self.state.lock().unwrap();
        state.build_menu_items()
    }
}

#[cfg(test)]
impl StatusTray {
    pub(crate) fn test_double() -> Self {
        Self {
            state: Arc::new(Mutex::new(TrayState::new("test".to_string()))),
        }
    }
}
