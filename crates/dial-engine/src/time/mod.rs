//! Time subsystem.
//!
//! Provides stable, testable redraw scheduling without coupling to the runtime.
//! Intended usage:
//! - one `Ticker` per window
//! - `poll(now)` from the event loop's idle hook decides whether to request a redraw
//! - `deadline()` tells the loop how long it may sleep

mod ticker;

pub use ticker::Ticker;
