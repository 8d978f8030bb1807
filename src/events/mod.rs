//! Event stacks, dispatch and bubbling.
//!
//! This module groups the per-type **registry** of subscription stacks and the
//! **dispatcher** that routes emitted values through them.
//!
//! ## Contents
//! - `registry` thread-local `TypeId`-keyed stacks of weak handler refs
//! - [`emit`], [`emit_with`], [`bubble`] plain events
//! - [`EmitAs`], [`emit_as`], [`emit_as_with`] events delivered under another type
//! - [`Query`], [`request`], [`request_with`], [`bubble_request`] events with replies
//!
//! ## Quick reference
//! - **Producers** call `emit` / `request` from anywhere on the thread.
//! - **Consumers** install handlers via [`crate::subscribe`] or
//!   [`crate::OptionalSubscription`]; this module never owns a handler.

mod dispatch;
mod emit_as;
mod query;
pub(crate) mod registry;

pub use dispatch::{
    bubble, bubble_request, emit, emit_as, emit_as_with, emit_with, has_listener, has_responder,
    listener_count, request, request_with,
};
pub use emit_as::EmitAs;
pub use query::{Answer, Query};
pub use registry::SlotId;
