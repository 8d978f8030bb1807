//! # Log Tap Example
//!
//! Shows the built-in `LogWriter` tap sitting on top of an application handler.
//!
//! ## Run
//! ```bash
//! RUST_LOG=info cargo run --example log_tap --features logging
//! ```

use eventscope::{LogWriter, emit, subscribe};

#[derive(Debug)]
struct Resize {
    width: u32,
    height: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let _layout = subscribe(|r: &Resize| println!("[layout] {}x{}", r.width, r.height));
    let _tap = LogWriter::new("window").attach::<Resize>();

    emit(&Resize { width: 800, height: 600 });
    emit(&Resize { width: 1024, height: 768 });
}
