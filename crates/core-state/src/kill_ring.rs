//! Bounded last-in/first-out kill ring.
//!
//! Successive kills coalesce into the top entry until it is sealed, so `dw`
//! followed by another `dw` in the same edit builds one entry; paste seals the
//! ring so the next kill opens a fresh entry. Oldest entries rotate out once
//! the ring is at capacity.

use tracing::trace;

pub const DEFAULT_CAPACITY: usize = 16;

#[derive(Debug, Clone)]
pub struct KillRing {
    entries: Vec<String>, // newest at index 0
    capacity: usize,
    sealed: bool,
    rotations: u64,
}

impl Default for KillRing {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl KillRing {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
            sealed: true,
            rotations: 0,
        }
    }

    /// Add killed text. An open top entry grows at its end (`forward`) or its
    /// start (backward); a sealed ring opens a new entry.
    pub fn push(&mut self, text: &str, forward: bool) {
        if text.is_empty() {
            return;
        }
        match self.entries.first_mut() {
            Some(top) if !self.sealed => {
                if forward {
                    top.push_str(text);
                } else {
                    top.insert_str(0, text);
                }
                trace!(target: "state.kill_ring", len = top.len(), forward, "kill_append");
            }
            _ => {
                if self.entries.len() == self.capacity {
                    self.entries.pop();
                    self.rotations += 1;
                }
                self.entries.insert(0, text.to_string());
                trace!(target: "state.kill_ring", entries = self.entries.len(), "kill_push");
            }
        }
        self.sealed = false;
    }

    /// Close the top entry; the next push opens a new one.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn top(&self) -> Option<&str> {
        self.entries.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries newest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn rotations(&self) -> u64 {
        self.rotations
    }
}
