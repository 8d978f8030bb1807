//! # Events that expect a reply.
//!
//! A [`Query`] is an event whose handlers return a value back to the emitter.
//! Query responders live on their own stacks, keyed by `(Q, Answer<Q::Reply>)`,
//! so a plain [`subscribe`](crate::subscribe) on the same type never answers a
//! [`request`](crate::request), even when the reply type is `()`.
//!
//! ## Example
//! ```rust
//! use eventscope::{Query, request, subscribe_query};
//!
//! struct Confirm(&'static str);
//!
//! impl Query for Confirm {
//!     type Reply = bool;
//!     fn default_reply(&self) -> bool { false }
//! }
//!
//! assert!(!request(&Confirm("delete?")));
//!
//! let _yes = subscribe_query(|_: &Confirm| true);
//! assert!(request(&Confirm("delete?")));
//! ```

/// An event type whose handlers produce a reply.
pub trait Query: 'static {
    /// The value handlers hand back to the emitter.
    type Reply: 'static;

    /// Reply used when nobody is listening, or when a responder bubbles past
    /// the bottom of the stack.
    fn default_reply(&self) -> Self::Reply;
}

/// Reply as stored on a query stack.
///
/// Wrapping the reply keeps query stacks apart from plain event stacks of the
/// same type: `Fn(&Q) -> Answer<()>` and `Fn(&Q)` never share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Answer<R>(pub R);

impl<R> Answer<R> {
    /// Unwraps the reply.
    #[inline]
    pub fn into_inner(self) -> R {
        self.0
    }
}
