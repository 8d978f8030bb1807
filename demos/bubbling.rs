//! # Bubbling Example
//!
//! Shows a filter handler that forwards only some events to the handler it shadows.
//!
//! ## Run
//! ```bash
//! cargo run --example bubbling
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use eventscope::{bubble, emit, subscribe};

#[derive(Debug, Clone, Copy)]
enum Key {
    Char(char),
    Escape,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let typed = Rc::new(RefCell::new(String::new()));

    let buffer = Rc::clone(&typed);
    let _editor = subscribe(move |k: &Key| {
        if let Key::Char(c) = k {
            buffer.borrow_mut().push(*c);
        }
    });

    {
        // A modal dialog swallows everything but Escape.
        let _dialog = subscribe(|k: &Key| match k {
            Key::Escape => println!("[dialog] closing"),
            Key::Char(c) if c.is_ascii_digit() => {
                if let Err(err) = bubble(k) {
                    eprintln!("[dialog] {}", err.as_message());
                }
            }
            Key::Char(c) => println!("[dialog] swallowed {c:?}"),
        });

        for k in [Key::Char('a'), Key::Char('1'), Key::Char('b'), Key::Char('2'), Key::Escape] {
            emit(&k);
        }
    }

    emit(&Key::Char('z'));
    println!("editor buffer: {}", typed.borrow());

    // Outside a handler there is nothing to bubble to.
    match bubble(&Key::Escape) {
        Err(err) => println!("[{}] {}", err.as_label(), err.as_message()),
        Ok(()) => println!("unexpected"),
    }
}
