//! # Handler registrations.
//!
//! This module provides the two ways to install a handler on an event stack
//! and a built-in logging tap.
//!
//! ## Architecture
//! ```text
//! subscribe(h) ──► ScopedSubscription ── push on create / pop on drop ──┐
//!                                                                       ▼
//! OptionalSubscription ── subscribe() / unsubscribe() ──────────► registry stack
//!                                                                       ▲
//! LogWriter::attach() ──► ScopedSubscription (log + bubble) ────────────┘
//! ```
//!
//! ## Subscription types
//! - **Scoped** - lifetime of the registration is the lifetime of the guard.
//! - **Optional** - owns the handler, registration toggled by hand.
//!
//! ## Writing handlers
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//! use eventscope::{bubble, emit, subscribe};
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&log);
//! let _app = subscribe(move |n: &u32| sink.borrow_mut().push(*n));
//!
//! // Only odd numbers get through to the app handler.
//! let _filter = subscribe(|n: &u32| {
//!     if n % 2 == 1 {
//!         bubble(n).unwrap();
//!     }
//! });
//!
//! emit(&2_u32);
//! emit(&3_u32);
//! assert_eq!(*log.borrow(), vec![3]);
//! ```

#[cfg(feature = "logging")]
mod log;
mod optional;
mod scoped;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use optional::OptionalSubscription;
pub use scoped::{
    QuerySubscription, ScopedSubscription, observe_query, subscribe, subscribe_cloned,
    subscribe_query,
};
