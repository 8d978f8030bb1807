//! # Scope-bound subscriptions.
//!
//! [`ScopedSubscription`] pushes its handler onto the stack for its event type
//! when created and pops it when dropped. Nesting subscriptions for the same
//! type shadows the outer handler until the inner one goes out of scope.
//!
//! ## Lifecycle
//! ```text
//! let a = subscribe(h1);      stack: [h1]
//! {
//!     let b = subscribe(h2);  stack: [h1, h2]   emit ─► h2
//! }                           stack: [h1]       emit ─► h1
//! drop(a);                    stack: []         emit ─► (nothing)
//! ```
//!
//! ## Rules
//! - Drop subscriptions in reverse order of creation. An out-of-order drop
//!   still removes the right entry but logs a warning.
//! - Moving a subscription does not touch the stack: the handler lives in its
//!   own `Rc` allocation, which stays put.
//! - The handler must be `'static`; share state through `Rc<Cell<_>>` and the
//!   like.

use std::any::type_name;
use std::fmt;
use std::rc::Rc;

use crate::events::registry::{self, Handler, SlotId};
use crate::events::{Answer, Query};

/// An active handler registration that ends when this value is dropped.
#[must_use = "dropping a ScopedSubscription unsubscribes its handler immediately"]
pub struct ScopedSubscription<E: 'static, R: 'static = ()> {
    handler: Rc<Handler<E, R>>,
    slot: SlotId,
}

impl<E: 'static, R: 'static> ScopedSubscription<E, R> {
    /// Pushes `handler` onto the tail of its stack.
    pub(crate) fn activate(handler: Rc<Handler<E, R>>) -> Self {
        let slot = registry::push::<E, R>(Rc::downgrade(&handler));
        Self { handler, slot }
    }

    /// Identifier of this subscription's stack entry.
    #[inline]
    pub fn slot(&self) -> SlotId {
        self.slot
    }

    /// True if this handler receives the next emission.
    pub fn is_tail(&self) -> bool {
        registry::is_tail::<E, R>(self.slot)
    }

    /// True if this handler is executing right now.
    pub fn is_running(&self) -> bool {
        registry::running::<E, R>() == Some(self.slot)
    }

    /// Calls the handler directly, bypassing the stack.
    pub fn call(&self, event: &E) -> R {
        (self.handler)(event)
    }
}

impl<E: 'static, R: 'static> Drop for ScopedSubscription<E, R> {
    fn drop(&mut self) {
        registry::pop::<E, R>(self.slot);
    }
}

impl<E: 'static, R: 'static> fmt::Debug for ScopedSubscription<E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedSubscription")
            .field("event", &type_name::<E>())
            .field("slot", &self.slot)
            .field("running", &self.is_running())
            .field("tail", &self.is_tail())
            .finish()
    }
}

/// Installs `handler` for events of type `E` until the returned guard drops.
///
/// Shadows any handler already installed for `E` on this thread.
pub fn subscribe<E: 'static>(handler: impl Fn(&E) + 'static) -> ScopedSubscription<E> {
    ScopedSubscription::activate(Rc::new(handler) as Rc<Handler<E, ()>>)
}

/// Like [`subscribe`], for handlers that take the event by value.
///
/// Each delivery hands the handler a clone of the emitted value.
pub fn subscribe_cloned<E: Clone + 'static>(
    handler: impl Fn(E) + 'static,
) -> ScopedSubscription<E> {
    subscribe(move |event: &E| handler(event.clone()))
}

/// Registration of a responder for query `Q`.
pub type QuerySubscription<Q> = ScopedSubscription<Q, Answer<<Q as Query>::Reply>>;

/// Installs a responder for query `Q` until the returned guard drops.
pub fn subscribe_query<Q: Query>(
    handler: impl Fn(&Q) -> Q::Reply + 'static,
) -> QuerySubscription<Q> {
    ScopedSubscription::activate(Rc::new(move |query: &Q| Answer(handler(query)))
        as Rc<Handler<Q, Answer<Q::Reply>>>)
}

/// Installs a query handler that only observes; the emitter gets
/// [`Query::default_reply`].
pub fn observe_query<Q: Query>(handler: impl Fn(&Q) + 'static) -> QuerySubscription<Q> {
    subscribe_query(move |query: &Q| {
        handler(query);
        query.default_reply()
    })
}
