//! Pipeline descriptors and scratch-region sizing.
//!
//! A model is a strictly linear sequence of operators. The sequence is
//! described by a const table of [`LayerDesc`] values; the table is enough to
//! regenerate the stage order, name stages in logs, and compute the two
//! scratch-region capacities at compile time.

use crate::quant::Q;

/// Operator kind with its call-site parameters.
#[derive(Debug, Clone, Copy)]
pub enum Op {
    MaxPool { window: usize, stride: usize },
    AvgPool { window: usize, stride: usize },
    Conv { kernel: usize, stride: usize, pad_left: usize, pad_right: usize },
    Flatten,
    Dense,
}

impl Op {
    pub const fn name(self) -> &'static str {
        match self {
            Op::MaxPool { .. } => "max_pool",
            Op::AvgPool { .. } => "avg_pool",
            Op::Conv { .. } => "conv",
            Op::Flatten => "flatten",
            Op::Dense => "dense",
        }
    }
}

/// One pipeline stage: operator kind plus its exact input and output shape.
#[derive(Debug, Clone, Copy)]
pub struct LayerDesc {
    pub op: Op,
    pub in_ch: usize,
    pub in_len: usize,
    pub out_ch: usize,
    pub out_len: usize,
}

impl LayerDesc {
    pub const fn in_elems(&self) -> usize {
        self.in_ch * self.in_len
    }

    pub const fn out_elems(&self) -> usize {
        self.out_ch * self.out_len
    }

    /// Bytes this stage's output occupies in its scratch region.
    pub const fn out_bytes(&self) -> usize {
        self.out_elems() * core::mem::size_of::<Q>()
    }
}

/// The two scratch slots activations alternate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    A,
    B,
}

/// Capacity in values that `region` needs for the given pipeline: the
/// maximum over all activations assigned to that slot.
///
/// Assignment walks the table front to back, alternating regions starting at
/// A. Flatten reinterprets its input in place, so it occupies the region the
/// previous stage wrote and does not flip the slot. The final stage writes
/// the caller's output buffer and occupies neither region.
pub const fn scratch_elems(layers: &[LayerDesc], region: Region) -> usize {
    let want_a = matches!(region, Region::A);
    let mut max = 0;
    let mut next_is_a = true;
    let mut i = 0;
    while i < layers.len() {
        let desc = &layers[i];
        let last = i + 1 == layers.len();
        match desc.op {
            Op::Flatten => {
                let in_a = !next_is_a;
                if in_a == want_a && desc.out_elems() > max {
                    max = desc.out_elems();
                }
            }
            _ => {
                if !last {
                    if next_is_a == want_a && desc.out_elems() > max {
                        max = desc.out_elems();
                    }
                    next_is_a = !next_is_a;
                }
            }
        }
        i += 1;
    }
    max
}
