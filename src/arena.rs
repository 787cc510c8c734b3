//! Two-region activation arena.
//!
//! Activations ping-pong between two fixed scratch regions: each stage reads
//! the region holding the previous stage's output and writes the other one.
//! Each region is sized, at compile time, to the largest tensor that can ever
//! occupy its slot (see `graph::scratch_elems`), so peak RAM is bounded by
//! the two largest co-existing shapes instead of the sum of all layer
//! outputs. No stage reads and writes the same region, so a region's stale
//! contents are always fully overwritten before the next read.

use crate::quant::Q;

/// Fixed scratch storage for one in-flight inference. `A` and `B` are region
/// capacities in values. An arena is exclusively owned by one call chain;
/// concurrent callers hold one arena each.
pub struct Arena<const A: usize, const B: usize> {
    a: [Q; A],
    b: [Q; B],
}

impl<const A: usize, const B: usize> Arena<A, B> {
    pub const fn new() -> Self {
        Self {
            a: [0; A],
            b: [0; B],
        }
    }

    /// Borrow both regions at once, so a stage can read one while writing
    /// the other.
    pub fn split(&mut self) -> (&mut [Q; A], &mut [Q; B]) {
        (&mut self.a, &mut self.b)
    }

    pub const fn capacity_a(&self) -> usize {
        A
    }

    pub const fn capacity_b(&self) -> usize {
        B
    }
}

impl<const A: usize, const B: usize> Default for Arena<A, B> {
    fn default() -> Self {
        Self::new()
    }
}
