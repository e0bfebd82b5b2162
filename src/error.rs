//! Error types.
//!
//! Structural errors in a menu declaration are reported while the tree is
//! built; dangling click paths are reported when the application binds its
//! configuration, which is the earliest point a live tree exists.

use std::fmt;

/// Errors raised by menu construction, binding, and the external
/// collaborators (tray service, notification daemon, filesystem).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A declaration entry cannot serve as an addressable menu item.
    #[error("invalid menu entry {element:?}: an item must have a non-empty title")]
    InvalidMenuShape {
        /// Description of the offending declaration element.
        element: String,
    },

    /// A click-binding path did not resolve against the live menu tree.
    #[error("no menu item exists for path {}", PathDisplay(.path))]
    PathNotFound {
        /// The full path that was attempted, never truncated.
        path: Vec<String>,
    },

    /// A click callback was registered but the application has no menu.
    #[error("a click callback was registered but no menu was configured")]
    MissingMenuRoot,

    /// The platform home directory could not be located for per-app storage.
    #[error("no home directory is available for application storage")]
    NoHomeDirectory,

    /// The StatusNotifierItem service could not be spawned or reached.
    #[error("tray service error: {0}")]
    Tray(#[from] ksni::Error),

    /// The desktop notification daemon rejected a notification.
    #[error("notification error: {0}")]
    Notification(#[from] notify_rust::error::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

struct PathDisplay<'a>(&'a [String]);

impl fmt::Display for PathDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(part)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_not_found_reports_the_full_path() {
        let err = Error::PathNotFound {
            path: vec!["Preferences".into(), "Advanced".into(), "Logging".into()],
        };
        assert_eq!(
            err.to_string(),
            "no menu item exists for path Preferences -> Advanced -> Logging"
        );
    }
}
