//! # Event dispatch and bubbling.
//!
//! Routes an emitted value to the tail handler of its type's stack.
//!
//! ## Flow
//! ```text
//! emit(&E) ──► registry::tail::<E>() ──► None      ─► no-op
//!                                    └─► Some(h)   ─► mark running ─► h(&E)
//!                                                                      │
//!                                          bubble(&E) ◄────────────────┘
//!                                              └─► registry::below(running) ─► h'(&E)
//! ```
//!
//! ## Rules
//! - Dispatch is keyed by the static type only; unrelated types never meet.
//! - Everything runs synchronously on the caller's thread; `emit` returns
//!   once the handler and any bubble chain it started have returned.
//! - Factories passed to [`emit_with`] run only if a handler exists, and at
//!   most once per call. The value is shared by reference down the chain.

use std::any::type_name;
use std::marker::PhantomData;

use crate::error::EventError;

use super::emit_as::EmitAs;
use super::query::{Answer, Query};
use super::registry::{self, Handler, SlotId};

/// Restores the previous running marker on scope exit (including unwind).
struct RunningGuard<E: 'static, R: 'static> {
    prev: Option<SlotId>,
    _marker: PhantomData<fn(&E) -> R>,
}

impl<E: 'static, R: 'static> Drop for RunningGuard<E, R> {
    fn drop(&mut self) {
        registry::replace_running::<E, R>(self.prev);
    }
}

fn invoke<E: 'static, R: 'static>(slot: SlotId, handler: &Handler<E, R>, event: &E) -> R {
    let prev = registry::replace_running::<E, R>(Some(slot));
    let _guard = RunningGuard::<E, R> {
        prev,
        _marker: PhantomData,
    };
    tracing::trace!(event = type_name::<E>(), %slot, "dispatching event");
    handler(event)
}

/// Emits an event to the current handler for `E`, if there is one.
///
/// With no handler installed this is a silent no-op.
///
/// # Example
/// ```rust
/// use std::{cell::Cell, rc::Rc};
/// use eventscope::{emit, subscribe};
///
/// let seen = Rc::new(Cell::new(0));
/// let sink = Rc::clone(&seen);
/// let _sub = subscribe(move |v: &i32| sink.set(*v));
///
/// emit(&12);
/// assert_eq!(seen.get(), 12);
/// ```
pub fn emit<E: 'static>(event: &E) {
    match registry::tail::<E, ()>() {
        Some((slot, handler)) => invoke(slot, &*handler, event),
        None => {
            tracing::trace!(event = type_name::<E>(), "no listener, event dropped");
        }
    }
}

/// Emits an event produced by `factory`, calling it only if someone listens.
pub fn emit_with<E: 'static>(factory: impl FnOnce() -> E) {
    if has_listener::<E>() {
        emit(&factory());
    }
}

/// Emits `event` on the stack of the type it dispatches under.
///
/// Handlers subscribed to [`EmitAs::Target`] receive the projected value.
pub fn emit_as<E: EmitAs>(event: &E) {
    emit(event.as_target());
}

/// Lazy form of [`emit_as`]: `factory` runs only if the target type has a
/// listener.
pub fn emit_as_with<E: EmitAs>(factory: impl FnOnce() -> E) {
    if has_listener::<E::Target>() {
        emit_as(&factory());
    }
}

/// Emits the value of an expression, evaluating it only if someone listens.
///
/// ```rust
/// use eventscope::emit_lazy;
///
/// // Nobody listens for `String`, so the `format!` never runs.
/// emit_lazy!(format!("{}", 42));
/// ```
#[macro_export]
macro_rules! emit_lazy {
    ($event:expr) => {
        $crate::emit_with(|| $event)
    };
}

/// Passes `event` to the handler shadowed by the one currently running.
///
/// Must be called from inside a handler for `E`. If the running handler is
/// the bottom of the stack the event is dropped and `Ok(())` is returned.
///
/// # Errors
/// [`EventError::NotInHandler`] if no handler for `E` is running.
pub fn bubble<E: 'static>(event: &E) -> Result<(), EventError> {
    let current = registry::running::<E, ()>().ok_or(EventError::NotInHandler {
        event: type_name::<E>(),
    })?;
    match registry::below::<E, ()>(current) {
        Some((slot, handler)) => invoke(slot, &*handler, event),
        None => {
            tracing::trace!(event = type_name::<E>(), from = %current, "bubbled past bottom of stack");
        }
    }
    Ok(())
}

/// Sends a query to the current responder and returns its reply.
///
/// Returns [`Query::default_reply`] when nobody is listening.
pub fn request<Q: Query>(query: &Q) -> Q::Reply {
    match registry::tail::<Q, Answer<Q::Reply>>() {
        Some((slot, handler)) => invoke(slot, &*handler, query).into_inner(),
        None => query.default_reply(),
    }
}

/// Sends a lazily built query; `None` (factory untouched) when nobody listens.
pub fn request_with<Q: Query>(factory: impl FnOnce() -> Q) -> Option<Q::Reply> {
    if has_responder::<Q>() {
        Some(request(&factory()))
    } else {
        None
    }
}

/// Passes `query` to the responder shadowed by the one currently running.
///
/// Falls back to [`Query::default_reply`] at the bottom of the stack.
///
/// # Errors
/// [`EventError::NotInHandler`] if no responder for `Q` is running.
pub fn bubble_request<Q: Query>(query: &Q) -> Result<Q::Reply, EventError> {
    let current = registry::running::<Q, Answer<Q::Reply>>().ok_or(EventError::NotInHandler {
        event: type_name::<Q>(),
    })?;
    Ok(match registry::below::<Q, Answer<Q::Reply>>(current) {
        Some((slot, handler)) => invoke(slot, &*handler, query).into_inner(),
        None => query.default_reply(),
    })
}

/// True if a handler for `E` is installed on this thread.
#[must_use]
pub fn has_listener<E: 'static>() -> bool {
    registry::tail::<E, ()>().is_some()
}

/// True if a responder for `Q` is installed on this thread.
#[must_use]
pub fn has_responder<Q: Query>() -> bool {
    registry::tail::<Q, Answer<Q::Reply>>().is_some()
}

/// Number of handlers stacked for `E` on this thread (shadowed ones included).
#[must_use]
pub fn listener_count<E: 'static>() -> usize {
    registry::depth::<E, ()>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscribers::{subscribe, subscribe_query};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    struct Ping(i32);

    struct Price(u32);

    impl Query for Price {
        type Reply = u32;
        fn default_reply(&self) -> u32 {
            self.0
        }
    }

    struct Ack;

    impl Query for Ack {
        type Reply = ();
        fn default_reply(&self) {}
    }

    struct Wrapped {
        inner: Ping,
    }

    impl EmitAs for Wrapped {
        type Target = Ping;
        fn as_target(&self) -> &Ping {
            &self.inner
        }
    }

    #[test]
    fn test_emit_without_listener_is_noop() {
        emit(&Ping(1));
        assert!(!has_listener::<Ping>());
        assert_eq!(listener_count::<Ping>(), 0);
    }

    #[test]
    fn test_factory_not_called_without_listener() {
        let called = Cell::new(false);
        emit_with(|| {
            called.set(true);
            Ping(1)
        });
        assert!(!called.get());
    }

    #[test]
    fn test_factory_called_once_across_bubble_chain() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let outer_seen = Rc::clone(&seen);
        let _outer = subscribe(move |p: &Ping| outer_seen.borrow_mut().push(("outer", p.0)));
        let inner_seen = Rc::clone(&seen);
        let _inner = subscribe(move |p: &Ping| {
            inner_seen.borrow_mut().push(("inner", p.0));
            bubble(p).unwrap();
        });

        let counter = Rc::clone(&calls);
        emit_with(move || {
            counter.set(counter.get() + 1);
            Ping(5)
        });

        assert_eq!(calls.get(), 1);
        assert_eq!(*seen.borrow(), vec![("inner", 5), ("outer", 5)]);
    }

    #[test]
    fn test_emit_lazy_macro() {
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let evaluated = Cell::new(false);
        let build = |v: i32| {
            evaluated.set(true);
            Ping(v)
        };

        emit_lazy!(build(1));
        assert!(!evaluated.get());

        let _sub = subscribe(move |p: &Ping| sink.set(p.0));
        emit_lazy!(Ping(6 * 7));
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn test_bubble_outside_handler_fails() {
        let err = bubble(&Ping(1)).unwrap_err();
        assert_eq!(
            err,
            EventError::NotInHandler {
                event: type_name::<Ping>()
            }
        );
    }

    #[test]
    fn test_bubble_at_bottom_is_noop() {
        let result = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&result);
        let _only = subscribe(move |p: &Ping| *sink.borrow_mut() = Some(bubble(p)));

        emit(&Ping(3));
        assert_eq!(*result.borrow(), Some(Ok(())));
    }

    #[test]
    fn test_running_marker_cleared_after_dispatch() {
        let _sub = subscribe(|_: &Ping| {});
        emit(&Ping(0));
        assert!(bubble(&Ping(0)).is_err());
    }

    #[test]
    fn test_bubble_of_other_type_fails_inside_handler() {
        let result = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&result);
        let _sub = subscribe(move |_: &Ping| *sink.borrow_mut() = Some(bubble(&7_u8)));

        emit(&Ping(0));
        assert!(matches!(
            *result.borrow(),
            Some(Err(EventError::NotInHandler { .. }))
        ));
    }

    #[test]
    fn test_nested_emit_of_same_type_restores_running() {
        let seen = Rc::new(RefCell::new(Vec::new()));

        let outer_seen = Rc::clone(&seen);
        let _outer = subscribe(move |p: &Ping| outer_seen.borrow_mut().push(p.0));

        let inner_seen = Rc::clone(&seen);
        let _inner = subscribe(move |p: &Ping| {
            if p.0 > 0 {
                emit(&Ping(p.0 - 1));
            }
            inner_seen.borrow_mut().push(-p.0);
            bubble(p).unwrap();
        });

        emit(&Ping(1));
        // inner(1) -> inner(0) -> outer(0), then inner(1) bubbles -> outer(1)
        assert_eq!(*seen.borrow(), vec![0, 0, -1, 1]);
    }

    #[test]
    fn test_request_default_and_reply() {
        assert_eq!(request(&Price(10)), 10);
        assert!(!has_responder::<Price>());

        let _double = subscribe_query(|p: &Price| p.0 * 2);
        assert_eq!(request(&Price(10)), 20);
    }

    #[test]
    fn test_request_with_is_lazy() {
        let called = Cell::new(false);
        let reply = request_with(|| {
            called.set(true);
            Price(1)
        });
        assert_eq!(reply, None);
        assert!(!called.get());

        let _sub = subscribe_query(|p: &Price| p.0 + 1);
        assert_eq!(request_with(|| Price(1)), Some(2));
    }

    #[test]
    fn test_bubble_request_chains_and_defaults() {
        let _base = subscribe_query(|p: &Price| bubble_request(p).unwrap() + 100);
        let _top = subscribe_query(|p: &Price| bubble_request(p).unwrap() * 2);

        // top: (base: default 5 + 100) * 2
        assert_eq!(request(&Price(5)), 210);
    }

    #[test]
    fn test_queries_and_events_use_separate_stacks() {
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let _plain = subscribe(move |p: &Price| sink.set(p.0));

        assert_eq!(request(&Price(3)), 3);
        assert_eq!(seen.get(), 0);

        emit(&Price(9));
        assert_eq!(seen.get(), 9);
    }

    #[test]
    fn test_unit_reply_query_does_not_share_plain_stack() {
        let plain_hits = Rc::new(Cell::new(0));
        let responder_hits = Rc::new(Cell::new(0));

        let plain_sink = Rc::clone(&plain_hits);
        let _plain = subscribe(move |_: &Ack| plain_sink.set(plain_sink.get() + 1));
        request(&Ack);
        assert_eq!(plain_hits.get(), 0);
        assert!(!has_responder::<Ack>());

        let responder_sink = Rc::clone(&responder_hits);
        let _responder = subscribe_query(move |_: &Ack| responder_sink.set(responder_sink.get() + 1));
        emit(&Ack);
        assert_eq!(plain_hits.get(), 1);
        assert_eq!(responder_hits.get(), 0);

        request(&Ack);
        assert_eq!(responder_hits.get(), 1);
        assert_eq!(listener_count::<Ack>(), 1);
    }

    #[test]
    fn test_unit_reply_bubbling_stays_on_its_own_chain() {
        let plain_hits = Rc::new(Cell::new(0));
        let plain_sink = Rc::clone(&plain_hits);
        let _plain = subscribe(move |_: &Ack| plain_sink.set(plain_sink.get() + 1));

        let bubbled = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&bubbled);
        let _responder = subscribe_query(move |a: &Ack| *sink.borrow_mut() = Some(bubble_request(a)));

        request(&Ack);
        assert_eq!(*bubbled.borrow(), Some(Ok(())));
        assert_eq!(plain_hits.get(), 0);
        assert!(bubble(&Ack).is_err());
    }

    #[test]
    fn test_emit_as_reaches_target_handlers() {
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let _sub = subscribe(move |p: &Ping| sink.set(p.0));

        emit_as(&Wrapped { inner: Ping(17) });
        assert_eq!(seen.get(), 17);
        assert!(!has_listener::<Wrapped>());
    }

    #[test]
    fn test_emit_as_target_handler_can_bubble() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let outer_seen = Rc::clone(&seen);
        let _outer = subscribe(move |p: &Ping| outer_seen.borrow_mut().push(p.0));
        let _inner = subscribe(|p: &Ping| bubble(p).unwrap());

        emit_as(&Wrapped { inner: Ping(3) });
        assert_eq!(*seen.borrow(), vec![3]);
    }

    #[test]
    fn test_emit_as_with_is_lazy() {
        let built = Cell::new(0);
        emit_as_with(|| {
            built.set(built.get() + 1);
            Wrapped { inner: Ping(1) }
        });
        assert_eq!(built.get(), 0);

        let _sub = subscribe(|_: &Ping| {});
        emit_as_with(|| {
            built.set(built.get() + 1);
            Wrapped { inner: Ping(1) }
        });
        assert_eq!(built.get(), 1);
    }

    #[test]
    fn test_panicking_handler_restores_running_marker() {
        let sub = subscribe(|p: &Ping| {
            if p.0 < 0 {
                panic!("negative ping");
            }
        });

        let result = std::panic::catch_unwind(|| emit(&Ping(-1)));
        assert!(result.is_err());

        assert!(matches!(
            bubble(&Ping(0)),
            Err(EventError::NotInHandler { .. })
        ));
        assert_eq!(listener_count::<Ping>(), 1);
        assert!(!sub.is_running());
        assert!(sub.is_tail());
    }

    #[test]
    fn test_panic_in_inner_handler_restores_outer_marker() {
        let result = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&result);
        let _outer = subscribe(move |p: &Ping| {
            if p.0 == 0 {
                let caught = std::panic::catch_unwind(|| emit(&Ping(1)));
                *sink.borrow_mut() = Some((caught.is_err(), bubble(p)));
            }
        });
        let _inner = subscribe(|p: &Ping| {
            if p.0 == 1 {
                panic!("inner failure");
            }
            bubble(p).unwrap();
        });

        emit(&Ping(0));
        assert_eq!(*result.borrow(), Some((true, Ok(()))));
    }
}
