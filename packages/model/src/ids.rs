//! Identifier generation
//!
//! Ids combine the clock's millisecond timestamp with a monotonic counter,
//! so two ids minted inside the same millisecond still differ.

use crate::clock::Clock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Mints `<prefix>-<millis>-<counter>` identifiers
#[derive(Debug)]
pub struct IdGenerator {
    prefix: &'static str,
    counter: AtomicU64,
}

impl IdGenerator {
    pub const fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            counter: AtomicU64::new(0),
        }
    }

    /// Generator for section ids
    pub const fn sections() -> Self {
        Self::new("section")
    }

    /// Generator for error record ids
    pub const fn errors() -> Self {
        Self::new("err")
    }

    pub fn next_id(&self, clock: &dyn Clock) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}-{}", self.prefix, clock.now().timestamp_millis(), seq)
    }
}

/// Fresh opaque page id
pub fn new_page_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
