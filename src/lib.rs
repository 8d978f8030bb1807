//! # eventscope
//!
//! **eventscope** is a typed, scope-bound event dispatcher for Rust.
//!
//! Producers emit plain values; the most recently installed handler for
//! exactly that type receives them. Handlers are installed for the lifetime of
//! a guard value, shadow whatever was installed before them, and can pass an
//! event down to the handler they shadow.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  emit(&E)    │   │ emit_with(f) │   │ request(&Q)  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Dispatcher                                                       │
//! │  - resolves the stack by TypeId of the static type                │
//! │  - marks the running slot, calls the tail handler                 │
//! │  - bubble() walks one slot down from the running one              │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Registry (thread-local)                                          │
//! │    TypeId(E) ─► [h1, h2, h3 ◄ tail]                               │
//! │    TypeId(F) ─► [g1 ◄ tail]                                       │
//! └──────▲──────────────────▲──────────────────▲──────────────────────┘
//!        │ push/pop         │ push/pop         │ push/pop
//!  ScopedSubscription  OptionalSubscription   LogWriter
//! ```
//!
//! ### Lifecycle
//! ```text
//! subscribe(h) ──► push(weak h) ──► ... emit ─► h ... ──► drop ──► pop
//!
//! emit(&e) {
//!   ├─► tail of stack for E?
//!   │       ├─ none ─► return (no-op)
//!   │       └─ h    ─► running = h; h(&e); running = previous
//!   │
//!   └─ inside h: bubble(&e)
//!          ├─ entry below h ─► call it (same call stack)
//!          └─ none          ─► drop event
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / functions                          |
//! |-------------------|---------------------------------------------------------------|------------------------------------------------|
//! | **Dispatch**      | Emit values or lazy factories to the current handler.         | [`emit`], [`emit_with`], [`emit_lazy!`]        |
//! | **Subscriptions** | Scope-bound or manually toggled handler registration.         | [`subscribe`], [`OptionalSubscription`]        |
//! | **Bubbling**      | Hand an event to the shadowed handler.                        | [`bubble`], [`bubble_request`]                 |
//! | **Queries**       | Events whose handlers reply to the emitter.                   | [`Query`], [`request`], [`subscribe_query`]    |
//! | **Projection**    | Events delivered to the handlers of another type.             | [`EmitAs`], [`emit_as`]                        |
//! | **Errors**        | Typed misuse reporting.                                       | [`EventError`]                                 |
//!
//! ## Optional features
//! - `logging`: exports a built-in `LogWriter` tap that logs events via `tracing`.
//!
//! ## Threading
//! Stacks are thread-local and every call runs synchronously on the calling
//! thread. Subscriptions hold `Rc`s and are `!Send`.
//!
//! ## Example
//! ```rust
//! use std::{cell::Cell, rc::Rc};
//! use eventscope::{emit, subscribe};
//!
//! #[derive(Debug)]
//! struct Saved { bytes: usize }
//!
//! let total = Rc::new(Cell::new(0));
//! {
//!     let sink = Rc::clone(&total);
//!     let _sub = subscribe(move |ev: &Saved| sink.set(sink.get() + ev.bytes));
//!     emit(&Saved { bytes: 10 });
//!     emit(&Saved { bytes: 5 });
//! }
//! // Subscription dropped: nobody listens anymore.
//! emit(&Saved { bytes: 100 });
//! assert_eq!(total.get(), 15);
//! ```
mod error;
mod events;
mod subscribers;

// ---- Public re-exports ----

pub use error::EventError;
pub use events::{
    Answer, EmitAs, Query, SlotId, bubble, bubble_request, emit, emit_as, emit_as_with, emit_with,
    has_listener, has_responder, listener_count, request, request_with,
};
pub use subscribers::{
    OptionalSubscription, QuerySubscription, ScopedSubscription, observe_query, subscribe,
    subscribe_cloned, subscribe_query,
};

// Optional: expose a built-in logging tap.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
