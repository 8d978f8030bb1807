//! Error types used by the event dispatcher.
//!
//! Emitting into an empty stack, bubbling past the bottom of a stack and
//! releasing an inactive subscription are all silent no-ops, not errors.
//! The only reported failure is calling a bubbling operation from outside
//! a running handler of the matching type.

use thiserror::Error;

/// # Errors produced by the event dispatcher.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// `bubble()` / `bubble_request()` was called while no handler for the
    /// event type is running on the current thread.
    #[error("bubble of '{event}' outside of a running handler for that type")]
    NotInHandler {
        /// Type name of the event that was bubbled.
        event: &'static str,
    },
}

impl EventError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventscope::EventError;
    ///
    /// let err = EventError::NotInHandler { event: "i32" };
    /// assert_eq!(err.as_label(), "bubble_not_in_handler");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EventError::NotInHandler { .. } => "bubble_not_in_handler",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            EventError::NotInHandler { event } => {
                format!("no running handler for event type {event}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_and_message() {
        let err = EventError::NotInHandler { event: "my::Event" };
        assert_eq!(err.as_label(), "bubble_not_in_handler");
        assert_eq!(err.as_message(), "no running handler for event type my::Event");
        assert_eq!(
            err.to_string(),
            "bubble of 'my::Event' outside of a running handler for that type"
        );
    }
}
