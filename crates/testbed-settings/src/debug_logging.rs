//! Applying the debug-logging setting to a client's global log switch.

use tracing::info;

/// A client's global debug-logging switch.
pub trait DebugLoggingSink {
    /// Turns debug logging on or off.
    fn set_logging_enabled(&self, enabled: bool);
}

/// The outcome of [`apply_debug_logging`], used to undo it after a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedDebugLogging {
    /// The value applied, if any.
    pub applied: Option<bool>,
    /// The value to restore, if any.
    pub restore: Option<bool>,
}

/// Applies `setting` to `sink`. Nothing is applied when the setting is absent.
pub fn apply_debug_logging(
    setting: Option<bool>,
    sink: &dyn DebugLoggingSink,
) -> AppliedDebugLogging {
    match setting {
        None => AppliedDebugLogging {
            applied: None,
            restore: None,
        },
        Some(enabled) => {
            info!(enabled, "applying debug logging setting");
            sink.set_logging_enabled(enabled);
            // The previous state of the switch cannot be queried.
            AppliedDebugLogging {
                applied: Some(enabled),
                restore: Some(false),
            }
        }
    }
}

impl AppliedDebugLogging {
    /// Restores the switch to its pre-application state, if anything was applied.
    pub fn restore(&self, sink: &dyn DebugLoggingSink) {
        if let Some(enabled) = self.restore {
            info!(enabled, "restoring debug logging setting");
            sink.set_logging_enabled(enabled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        calls: RefCell<Vec<bool>>,
    }

    impl DebugLoggingSink for RecordingSink {
        fn set_logging_enabled(&self, enabled: bool) {
            self.calls.borrow_mut().push(enabled);
        }
    }

    #[test]
    fn test_absent_setting_touches_nothing() {
        let sink = RecordingSink::default();
        let applied = apply_debug_logging(None, &sink);
        applied.restore(&sink);
        assert!(sink.calls.borrow().is_empty());
        assert_eq!(applied.applied, None);
    }

    #[test]
    fn test_apply_then_restore() {
        let sink = RecordingSink::default();
        let applied = apply_debug_logging(Some(true), &sink);
        assert_eq!(applied.applied, Some(true));
        applied.restore(&sink);
        assert_eq!(*sink.calls.borrow(), vec![true, false]);
    }
}
