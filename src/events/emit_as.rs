//! # Dispatching under another type.
//!
//! An event type can opt into being delivered to the handlers of a different
//! type by implementing [`EmitAs`]. The projection borrows: handlers see a
//! `&Target` that lives inside the emitted value.
//!
//! ## Example
//! ```rust
//! use std::{cell::Cell, rc::Rc};
//! use eventscope::{EmitAs, emit_as, subscribe};
//!
//! struct Saved { path: String }
//!
//! struct AutoSaved { inner: Saved, attempt: u32 }
//!
//! impl EmitAs for AutoSaved {
//!     type Target = Saved;
//!     fn as_target(&self) -> &Saved { &self.inner }
//! }
//!
//! let hits = Rc::new(Cell::new(0));
//! let sink = Rc::clone(&hits);
//! let _sub = subscribe(move |_: &Saved| sink.set(sink.get() + 1));
//!
//! emit_as(&AutoSaved { inner: Saved { path: "a.txt".into() }, attempt: 2 });
//! assert_eq!(hits.get(), 1);
//! ```

/// An event that is dispatched on the stack of [`EmitAs::Target`].
pub trait EmitAs: 'static {
    /// The type whose handlers receive this event.
    type Target: 'static;

    /// Borrows the part of `self` that handlers of `Target` receive.
    fn as_target(&self) -> &Self::Target;
}
