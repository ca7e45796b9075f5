// Platkit - platform/memory.rs
//
// Checked heap buffers. Allocation failure is never returned to the caller:
// it is rendered as a `MemoryError` and escalated to `Diagnostics::fatal`.
//
// Releasing a missing buffer is unrepresentable; `release` consumes `self`.

use super::diagnostics::Diagnostics;
use crate::util::error::MemoryError;
use std::cell::Cell;

thread_local! {
    static LIVE_BUFFERS: Cell<usize> = const { Cell::new(0) };
}

/// Number of `HeapBuffer`s currently alive on this thread.
pub fn live_allocations() -> usize {
    LIVE_BUFFERS.with(Cell::get)
}

/// An exclusively-owned, zero-initialised block of bytes.
#[derive(Debug)]
pub struct HeapBuffer {
    bytes: Vec<u8>,
}

impl HeapBuffer {
    /// Allocate `size` zeroed bytes. `size` must be positive.
    pub fn allocate(size: usize, diag: &Diagnostics) -> Self {
        debug_assert!(size > 0, "allocate: size must be positive");

        let mut bytes = Vec::new();
        if let Err(source) = bytes.try_reserve_exact(size) {
            let err = MemoryError::Exhausted {
                requested: size,
                source,
            };
            diag.fatal(&format!("allocate(): {err}\n"));
        }
        bytes.resize(size, 0);

        LIVE_BUFFERS.with(|n| n.set(n.get() + 1));
        Self { bytes }
    }

    /// Resize to `size` bytes, keeping the common prefix. New bytes are zero.
    ///
    /// Consumes the old handle whether or not the storage moves.
    pub fn reallocate(mut self, size: usize, diag: &Diagnostics) -> Self {
        debug_assert!(size > 0, "reallocate: size must be positive");

        let current = self.bytes.len();
        if size > current {
            if let Err(source) = self.bytes.try_reserve_exact(size - current) {
                let err = MemoryError::Exhausted {
                    requested: size,
                    source,
                };
                diag.fatal(&format!("reallocate(): {err}\n"));
            }
            self.bytes.resize(size, 0);
        } else {
            self.bytes.truncate(size);
            self.bytes.shrink_to_fit();
        }
        self
    }

    /// Return the storage to the allocator.
    pub fn release(self) {
        drop(self);
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false for a live buffer; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl Drop for HeapBuffer {
    fn drop(&mut self) {
        LIVE_BUFFERS.with(|n| n.set(n.get().saturating_sub(1)));
    }
}
