//! # Per-type subscription stacks.
//!
//! The registry keeps, for every `(event, reply)` type pair, an ordered stack
//! of handler entries. The tail of a stack is the handler that receives the
//! next emission; everything beneath it is shadowed until the tail is popped.
//!
//! ## Architecture
//! ```text
//! thread_local STACKS: TypeId ──► Stack<E, R>
//!                                   ├─ entries: [slot 3, slot 7, slot 9] ◄── tail
//!                                   └─ running: Some(slot 7)
//! ```
//!
//! ## Rules
//! - Stacks are created lazily on the first `push` and never torn down
//!   explicitly; after thread-local teardown every operation is a no-op.
//! - Entries hold a [`Weak`] to the handler. The subscription object owns
//!   the `Rc`; the registry never keeps a handler alive.
//! - The `RefCell` borrow is released before any handler runs, so handlers
//!   may push, pop and emit re-entrantly.
//! - `pop` expects the tail. A non-tail pop removes the entry where it sits
//!   and logs a warning.

use std::any::{Any, TypeId, type_name};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Type-erased handler signature stored in a stack.
pub(crate) type Handler<E, R> = dyn Fn(&E) -> R;

/// Identifier of one entry in a subscription stack.
///
/// Ids are unique per thread and increase monotonically, so an id never
/// refers to two different entries of the same registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u64);

impl SlotId {
    fn next() -> Self {
        SLOT_SEQ
            .try_with(|seq| {
                let id = seq.get();
                seq.set(id.wrapping_add(1));
                SlotId(id)
            })
            .unwrap_or(SlotId(u64::MAX))
    }

    /// Returns the raw sequence number.
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Entry<E: 'static, R: 'static> {
    slot: SlotId,
    handler: Weak<Handler<E, R>>,
}

struct Stack<E: 'static, R: 'static> {
    entries: Vec<Entry<E, R>>,
    running: Option<SlotId>,
}

impl<E: 'static, R: 'static> Stack<E, R> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            running: None,
        }
    }

    /// Topmost live entry at or below `end` (exclusive).
    fn live_below(&self, end: usize) -> Option<(SlotId, Rc<Handler<E, R>>)> {
        self.entries[..end]
            .iter()
            .rev()
            .find_map(|e| e.handler.upgrade().map(|h| (e.slot, h)))
    }
}

thread_local! {
    /// Sequence counter for slot identifiers.
    static SLOT_SEQ: Cell<u64> = const { Cell::new(0) };
    static STACKS: RefCell<HashMap<TypeId, Box<dyn Any>>> = RefCell::new(HashMap::new());
}

/// Runs `f` against the stack for `(E, R)`, creating it if needed.
fn with_stack<E: 'static, R: 'static, T>(f: impl FnOnce(&mut Stack<E, R>) -> T) -> Option<T> {
    STACKS
        .try_with(|stacks| {
            let mut stacks = stacks.borrow_mut();
            stacks
                .entry(TypeId::of::<Stack<E, R>>())
                .or_insert_with(|| Box::new(Stack::<E, R>::new()) as Box<dyn Any>)
                .downcast_mut::<Stack<E, R>>()
                .map(f)
        })
        .ok()
        .flatten()
}

/// Runs `f` against the stack for `(E, R)` only if it already exists.
fn with_existing<E: 'static, R: 'static, T>(
    f: impl FnOnce(&mut Stack<E, R>) -> T,
) -> Option<T> {
    STACKS
        .try_with(|stacks| {
            let mut stacks = stacks.borrow_mut();
            stacks
                .get_mut(&TypeId::of::<Stack<E, R>>())
                .and_then(|s| s.downcast_mut::<Stack<E, R>>())
                .map(f)
        })
        .ok()
        .flatten()
}

/// Appends a handler to the tail of its stack.
pub(crate) fn push<E: 'static, R: 'static>(handler: Weak<Handler<E, R>>) -> SlotId {
    let slot = SlotId::next();
    let depth = with_stack::<E, R, _>(|stack| {
        stack.entries.push(Entry { slot, handler });
        stack.entries.len()
    });
    tracing::trace!(event = type_name::<E>(), %slot, ?depth, "listener pushed");
    slot
}

/// Removes the entry for `slot` from its stack.
pub(crate) fn pop<E: 'static, R: 'static>(slot: SlotId) {
    let outcome = with_existing::<E, R, _>(|stack| {
        let pos = stack.entries.iter().rposition(|e| e.slot == slot)?;
        let was_tail = pos + 1 == stack.entries.len();
        stack.entries.remove(pos);
        Some((was_tail, stack.entries.len()))
    })
    .flatten();

    match outcome {
        Some((true, depth)) => {
            tracing::trace!(event = type_name::<E>(), %slot, depth, "listener popped");
        }
        Some((false, depth)) => {
            tracing::warn!(
                event = type_name::<E>(),
                %slot,
                depth,
                label = "out_of_order_release",
                "subscription released out of stack order"
            );
        }
        None => {}
    }
}

/// Returns the handler that currently receives emissions.
pub(crate) fn tail<E: 'static, R: 'static>() -> Option<(SlotId, Rc<Handler<E, R>>)> {
    with_existing::<E, R, _>(|stack| stack.live_below(stack.entries.len())).flatten()
}

/// Returns the handler directly shadowed by `slot`.
pub(crate) fn below<E: 'static, R: 'static>(slot: SlotId) -> Option<(SlotId, Rc<Handler<E, R>>)> {
    with_existing::<E, R, _>(|stack| {
        let pos = stack.entries.iter().rposition(|e| e.slot == slot)?;
        stack.live_below(pos)
    })
    .flatten()
}

/// Returns the slot whose handler is executing right now, if any.
pub(crate) fn running<E: 'static, R: 'static>() -> Option<SlotId> {
    with_existing::<E, R, _>(|stack| stack.running).flatten()
}

/// Marks `slot` as running and returns the previous marker.
pub(crate) fn replace_running<E: 'static, R: 'static>(slot: Option<SlotId>) -> Option<SlotId> {
    with_existing::<E, R, _>(|stack| std::mem::replace(&mut stack.running, slot)).flatten()
}

/// Number of entries in the stack.
pub(crate) fn depth<E: 'static, R: 'static>() -> usize {
    with_existing::<E, R, _>(|stack| stack.entries.len()).unwrap_or(0)
}

/// True if `slot` is the tail of its stack.
pub(crate) fn is_tail<E: 'static, R: 'static>(slot: SlotId) -> bool {
    with_existing::<E, R, _>(|stack| stack.entries.last().map(|e| e.slot) == Some(slot))
        .unwrap_or(false)
}
