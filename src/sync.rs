// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Word-sized atomic slots shared between interrupt handlers and the foreground loop.

use core::sync::atomic::{AtomicU32, Ordering};

/// `f32` stored as its bit pattern in an `AtomicU32`.
///
/// Each slot has exactly one writer. Readers may observe a value up to one update old, never a torn
/// one.
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub const fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

impl Default for AtomicF32 {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_exact_bit_pattern() {
        let slot = AtomicF32::new(1.5);
        assert_eq!(slot.load(), 1.5);
        slot.store(-0.25);
        assert_eq!(slot.load(), -0.25);
        slot.store(f32::INFINITY);
        assert!(slot.load().is_infinite());
    }
}
