//! # Basic Example
//!
//! Shows scoped subscriptions shadowing each other.
//!
//! The example emits `Progress` events while handlers come and go:
//! - Without a handler the events vanish
//! - A nested handler temporarily takes over
//! - Dropping it hands control back to the outer handler
//!
//! ## Run
//! ```bash
//! cargo run --example basic
//! ```

use std::cell::Cell;
use std::rc::Rc;

use eventscope::{emit, emit_with, has_listener, subscribe};

#[derive(Debug)]
struct Progress {
    done: u32,
    total: u32,
}

fn work(steps: u32) {
    for done in 1..=steps {
        emit(&Progress { done, total: steps });
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Nobody listens yet.
    work(3);
    println!("listening: {}", has_listener::<Progress>());

    let last = Rc::new(Cell::new(0));
    let sink = Rc::clone(&last);
    let _bar = subscribe(move |p: &Progress| {
        sink.set(p.done);
        println!("[bar] {}/{}", p.done, p.total);
    });
    work(3);

    {
        let _quiet = subscribe(|p: &Progress| {
            if p.done == p.total {
                println!("[quiet] finished {} steps", p.total);
            }
        });
        work(4);
    }

    // The bar handler is visible again.
    work(2);
    println!("last seen by bar: {}", last.get());

    // Factories only run when someone listens.
    emit_with(|| {
        println!("[factory] building event");
        Progress { done: 0, total: 0 }
    });
}
