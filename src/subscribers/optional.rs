//! # Manually toggled subscriptions.
//!
//! [`OptionalSubscription`] owns a handler but only installs it while
//! subscribed. It can be switched on and off any number of times; each switch
//! pushes or pops exactly one stack entry.
//!
//! ## States
//! ```text
//! new() ──► Inactive ──subscribe()──► Active ──unsubscribe()──► Inactive
//!              ▲  └─unsubscribe() (no-op)  └─subscribe() (no-op)    │
//!              └────────────────────────────────────────────────────┘
//! drop while Active ─► unsubscribe
//! ```

use std::any::type_name;
use std::fmt;
use std::rc::Rc;

use crate::events::{Answer, Query};
use crate::events::registry::Handler;

use super::scoped::ScopedSubscription;

/// A handler that can be subscribed and unsubscribed repeatedly.
pub struct OptionalSubscription<E: 'static, R: 'static = ()> {
    handler: Rc<Handler<E, R>>,
    active: Option<ScopedSubscription<E, R>>,
}

impl<E: 'static> OptionalSubscription<E> {
    /// Wraps `handler` without installing it.
    pub fn new(handler: impl Fn(&E) + 'static) -> Self {
        Self::from_handler(Rc::new(handler))
    }
}

impl<Q: Query> OptionalSubscription<Q, Answer<Q::Reply>> {
    /// Wraps a query responder without installing it.
    pub fn new_query(handler: impl Fn(&Q) -> Q::Reply + 'static) -> Self {
        Self::from_handler(Rc::new(move |query: &Q| Answer(handler(query))))
    }
}

impl<E: 'static, R: 'static> OptionalSubscription<E, R> {
    fn from_handler(handler: Rc<Handler<E, R>>) -> Self {
        Self {
            handler,
            active: None,
        }
    }

    /// Installs the handler on top of its stack. No-op if already subscribed.
    pub fn subscribe(&mut self) {
        if self.active.is_none() {
            self.active = Some(ScopedSubscription::activate(Rc::clone(&self.handler)));
        }
    }

    /// Removes the handler from its stack. No-op if not subscribed.
    pub fn unsubscribe(&mut self) {
        self.active = None;
    }

    /// True while the handler is installed.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.active.is_some()
    }

    /// The live registration, if subscribed.
    pub fn subscription(&self) -> Option<&ScopedSubscription<E, R>> {
        self.active.as_ref()
    }
}

impl<E: 'static, R: 'static> fmt::Debug for OptionalSubscription<E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.active {
            Some(sub) => f
                .debug_tuple("OptionalSubscription")
                .field(sub)
                .finish(),
            None => write!(f, "OptionalSubscription<{}> [disabled]", type_name::<E>()),
        }
    }
}
