//! # Query Example
//!
//! Shows events that collect a reply from the handler chain.
//!
//! ## Run
//! ```bash
//! cargo run --example query
//! ```

use eventscope::{OptionalSubscription, Query, bubble_request, request, subscribe_query};

struct CanClose {
    unsaved: bool,
}

impl Query for CanClose {
    type Reply = bool;
    fn default_reply(&self) -> bool {
        !self.unsaved
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("default: {}", request(&CanClose { unsaved: true }));

    let _autosave = subscribe_query(|_: &CanClose| true);
    println!("with autosave: {}", request(&CanClose { unsaved: true }));

    let mut lock = OptionalSubscription::new_query(|q: &CanClose| {
        let below = bubble_request(q).unwrap_or(false);
        println!("[lock] handler below says {below}, refusing anyway");
        false
    });

    lock.subscribe();
    println!("locked: {}", request(&CanClose { unsaved: false }));

    lock.unsubscribe();
    println!("unlocked: {}", request(&CanClose { unsaved: false }));
}
