//! # Logging tap for debugging and demos.
//!
//! [`LogWriter`] installs a handler that writes every event of a `Debug` type
//! through `tracing`, then bubbles it to the handler it shadows. With bubbling
//! on (the default) the tap is invisible to the rest of the stack.
//!
//! ## Output format
//! ```text
//! INFO eventscope::subscribers::log: event label="ui" event_type="app::Click" payload=Click { x: 3, y: 4 }
//! ```
//!
//! ## Example
//! ```rust
//! # #[cfg(feature = "logging")]
//! # {
//! use eventscope::{LogWriter, emit};
//!
//! #[derive(Debug)]
//! struct Click { x: i32, y: i32 }
//!
//! let _tap = LogWriter::new("ui").attach::<Click>();
//! emit(&Click { x: 3, y: 4 });
//! # }
//! ```

use std::any::type_name;
use std::fmt;

use tracing::Level;

use crate::events::bubble;

use super::scoped::{ScopedSubscription, subscribe};

/// Settings for a logging tap.
///
/// - `label`: free-form tag attached to every record (default `"event"`)
/// - `level`: `tracing` level of the records (default `INFO`)
/// - `bubble`: forward events to the shadowed handler (default `true`)
#[derive(Clone, Debug)]
pub struct LogWriter {
    label: &'static str,
    level: Level,
    bubble: bool,
}

impl Default for LogWriter {
    fn default() -> Self {
        Self {
            label: "event",
            level: Level::INFO,
            bubble: true,
        }
    }
}

impl LogWriter {
    /// Creates a tap with the given label and default settings.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            ..Self::default()
        }
    }

    /// Sets the `tracing` level used for records.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Controls whether logged events continue down the stack.
    pub fn with_bubble(mut self, bubble: bool) -> Self {
        self.bubble = bubble;
        self
    }

    /// Installs the tap for events of type `E`.
    pub fn attach<E: fmt::Debug + 'static>(&self) -> ScopedSubscription<E> {
        let writer = self.clone();
        subscribe(move |event: &E| {
            writer.write(event);
            if !writer.bubble {
                return;
            }
            if let Err(err) = bubble(event) {
                tracing::debug!(label = err.as_label(), "{}", err.as_message());
            }
        })
    }

    fn write<E: fmt::Debug>(&self, event: &E) {
        let label = self.label;
        let event_type = type_name::<E>();
        if self.level == Level::ERROR {
            tracing::error!(label, event_type, payload = ?event, "event");
        } else if self.level == Level::WARN {
            tracing::warn!(label, event_type, payload = ?event, "event");
        } else if self.level == Level::INFO {
            tracing::info!(label, event_type, payload = ?event, "event");
        } else if self.level == Level::DEBUG {
            tracing::debug!(label, event_type, payload = ?event, "event");
        } else {
            tracing::trace!(label, event_type, payload = ?event, "event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::emit;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug)]
    struct Click(i32);

    #[test]
    fn test_tap_is_transparent_by_default() {
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let _app = subscribe(move |c: &Click| sink.set(c.0));
        let _tap = LogWriter::new("test").attach::<Click>();

        emit(&Click(8));
        assert_eq!(seen.get(), 8);
    }

    #[test]
    fn test_tap_without_bubble_swallows() {
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let _app = subscribe(move |c: &Click| sink.set(c.0));
        let _tap = LogWriter::new("test")
            .with_bubble(false)
            .with_level(Level::DEBUG)
            .attach::<Click>();

        emit(&Click(8));
        assert_eq!(seen.get(), 0);
    }

    #[test]
    fn test_tap_alone_is_harmless() {
        let tap = LogWriter::default().attach::<Click>();
        emit(&Click(1));
        assert!(tap.is_tail());
    }
}
