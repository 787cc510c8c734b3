//! The packaged keyword-spotting model.
//!
//! A fixed ten-stage pipeline over one channel of 16000 audio samples,
//! producing one score per keyword class:
//!
//! ```text
//! [1][16000] max_pool(20/20) [1][800]
//!            conv(8x[1][40], relu)   [8][761]
//!            max_pool(4/4)           [8][190]
//!            conv(16x[8][3], relu)   [16][188]
//!            max_pool(4/4)           [16][47]
//!            conv(32x[16][3], relu)  [32][45]
//!            max_pool(4/4)           [32][11]
//!            avg_pool(8/8)           [32][1]
//!            flatten                 [32]
//!            dense(3x[32])           [3]
//! ```
//!
//! The call sequence is hardcoded: no dynamic graph construction, every shape
//! a compile-time constant. [`LAYERS`] is the descriptor table the sequence
//! and the scratch-region capacities are derived from.

pub mod weights;

use crate::arena::Arena;
use crate::error::ModelError;
use crate::graph::{scratch_elems, LayerDesc, Op, Region};
use crate::ops::{self, Activation};
use crate::quant::Q;
use log::{debug, trace};

pub const INPUT_CHANNELS: usize = 1;
pub const INPUT_SAMPLES: usize = 16000;
pub const INPUT_LEN: usize = INPUT_CHANNELS * INPUT_SAMPLES;
pub const CLASSES: usize = 3;

// Stage parameters. Window/kernel constants appear both in the descriptor
// table and as const generic arguments in `run`; keep them in one place.
const POOL1_W: usize = 20;
const POOL1_S: usize = 20;
const CONV1_CH: usize = 8;
const CONV1_K: usize = 40;
const POOL_W: usize = 4;
const POOL_S: usize = 4;
const CONV2_CH: usize = 16;
const CONV2_K: usize = 3;
const CONV3_CH: usize = 32;
const CONV3_K: usize = 3;
const AVG_W: usize = 8;
const AVG_S: usize = 8;

// Stage widths, each derived from the previous one.
const POOL1_LEN: usize = ops::pool_out_len(INPUT_SAMPLES, POOL1_W, POOL1_S); // 800
const CONV1_LEN: usize = ops::conv_out_len(POOL1_LEN, CONV1_K, 1, 0, 0); // 761
const POOL2_LEN: usize = ops::pool_out_len(CONV1_LEN, POOL_W, POOL_S); // 190
const CONV2_LEN: usize = ops::conv_out_len(POOL2_LEN, CONV2_K, 1, 0, 0); // 188
const POOL3_LEN: usize = ops::pool_out_len(CONV2_LEN, POOL_W, POOL_S); // 47
const CONV3_LEN: usize = ops::conv_out_len(POOL3_LEN, CONV3_K, 1, 0, 0); // 45
const POOL4_LEN: usize = ops::pool_out_len(CONV3_LEN, POOL_W, POOL_S); // 11
const AVG_LEN: usize = ops::pool_out_len(POOL4_LEN, AVG_W, AVG_S); // 1
const FLAT_LEN: usize = CONV3_CH * AVG_LEN; // 32

/// The fixed pipeline, one descriptor per stage.
pub const LAYERS: [LayerDesc; 10] = [
    LayerDesc {
        op: Op::MaxPool { window: POOL1_W, stride: POOL1_S },
        in_ch: INPUT_CHANNELS,
        in_len: INPUT_SAMPLES,
        out_ch: INPUT_CHANNELS,
        out_len: POOL1_LEN,
    },
    LayerDesc {
        op: Op::Conv { kernel: CONV1_K, stride: 1, pad_left: 0, pad_right: 0 },
        in_ch: INPUT_CHANNELS,
        in_len: POOL1_LEN,
        out_ch: CONV1_CH,
        out_len: CONV1_LEN,
    },
    LayerDesc {
        op: Op::MaxPool { window: POOL_W, stride: POOL_S },
        in_ch: CONV1_CH,
        in_len: CONV1_LEN,
        out_ch: CONV1_CH,
        out_len: POOL2_LEN,
    },
    LayerDesc {
        op: Op::Conv { kernel: CONV2_K, stride: 1, pad_left: 0, pad_right: 0 },
        in_ch: CONV1_CH,
        in_len: POOL2_LEN,
        out_ch: CONV2_CH,
        out_len: CONV2_LEN,
    },
    LayerDesc {
        op: Op::MaxPool { window: POOL_W, stride: POOL_S },
        in_ch: CONV2_CH,
        in_len: CONV2_LEN,
        out_ch: CONV2_CH,
        out_len: POOL3_LEN,
    },
    LayerDesc {
        op: Op::Conv { kernel: CONV3_K, stride: 1, pad_left: 0, pad_right: 0 },
        in_ch: CONV2_CH,
        in_len: POOL3_LEN,
        out_ch: CONV3_CH,
        out_len: CONV3_LEN,
    },
    LayerDesc {
        op: Op::MaxPool { window: POOL_W, stride: POOL_S },
        in_ch: CONV3_CH,
        in_len: CONV3_LEN,
        out_ch: CONV3_CH,
        out_len: POOL4_LEN,
    },
    LayerDesc {
        op: Op::AvgPool { window: AVG_W, stride: AVG_S },
        in_ch: CONV3_CH,
        in_len: POOL4_LEN,
        out_ch: CONV3_CH,
        out_len: AVG_LEN,
    },
    LayerDesc {
        op: Op::Flatten,
        in_ch: CONV3_CH,
        in_len: AVG_LEN,
        out_ch: 1,
        out_len: FLAT_LEN,
    },
    LayerDesc {
        op: Op::Dense,
        in_ch: 1,
        in_len: FLAT_LEN,
        out_ch: 1,
        out_len: CLASSES,
    },
];

/// Scratch capacities derived from the table: 1520 and 6088 values.
pub const SCRATCH_A: usize = scratch_elems(&LAYERS, Region::A);
pub const SCRATCH_B: usize = scratch_elems(&LAYERS, Region::B);

pub type GscArena = Arena<SCRATCH_A, SCRATCH_B>;

/// The model facade: weight tables plus one exclusively-owned arena.
///
/// `infer` takes `&mut self`, so the borrow checker enforces one in-flight
/// inference per instance. Concurrent callers create one instance each; the
/// weight tables are `static` and shared.
pub struct GscModel {
    arena: GscArena,
}

impl GscModel {
    pub fn new() -> Self {
        debug!(
            "scratch regions: A={} values, B={} values",
            SCRATCH_A, SCRATCH_B
        );
        Self {
            arena: GscArena::new(),
        }
    }

    /// Run one inference over a channel-major input tensor. Shape safety is
    /// in the types, so this entry point cannot fail.
    pub fn infer(&mut self, input: &[Q; INPUT_LEN]) -> [Q; CLASSES] {
        let mut scores: [Q; CLASSES] = [0; CLASSES];
        self.run(input, &mut scores);
        scores
    }

    /// Checked entry point for callers holding plain slices: input must hold
    /// exactly [`INPUT_LEN`] values and output exactly [`CLASSES`].
    pub fn infer_slice(&mut self, input: &[Q], output: &mut [Q]) -> Result<(), ModelError> {
        if input.len() != INPUT_LEN {
            return Err(ModelError::InputLength {
                expected: INPUT_LEN,
                actual: input.len(),
            });
        }
        if output.len() != CLASSES {
            return Err(ModelError::OutputLength {
                expected: CLASSES,
                actual: output.len(),
            });
        }
        self.run(input, output);
        Ok(())
    }

    // The hardcoded stage sequence. Stages alternate scratch regions: pool
    // outputs land in A, conv/avg outputs in B. Flatten is the identity here
    // (region B already stores the [32][1] tensor channel-major), and the
    // dense head writes the caller's buffer.
    fn run(&mut self, input: &[Q], output: &mut [Q]) {
        trace!("running {}-stage pipeline", LAYERS.len());
        let (a, b) = self.arena.split();

        ops::max_pool1d::<INPUT_CHANNELS, INPUT_SAMPLES, POOL1_LEN, POOL1_W, POOL1_S>(
            input,
            Activation::Linear,
            &mut a[..POOL1_LEN],
        );
        ops::conv1d::<INPUT_CHANNELS, POOL1_LEN, CONV1_CH, CONV1_LEN, CONV1_K, 1, 0, 0>(
            &a[..POOL1_LEN],
            &weights::CONV1_KERNEL,
            &weights::CONV1_BIAS,
            Activation::Relu,
            &mut b[..CONV1_CH * CONV1_LEN],
        );
        ops::max_pool1d::<CONV1_CH, CONV1_LEN, POOL2_LEN, POOL_W, POOL_S>(
            &b[..CONV1_CH * CONV1_LEN],
            Activation::Linear,
            &mut a[..CONV1_CH * POOL2_LEN],
        );
        ops::conv1d::<CONV1_CH, POOL2_LEN, CONV2_CH, CONV2_LEN, CONV2_K, 1, 0, 0>(
            &a[..CONV1_CH * POOL2_LEN],
            &weights::CONV2_KERNEL,
            &weights::CONV2_BIAS,
            Activation::Relu,
            &mut b[..CONV2_CH * CONV2_LEN],
        );
        ops::max_pool1d::<CONV2_CH, CONV2_LEN, POOL3_LEN, POOL_W, POOL_S>(
            &b[..CONV2_CH * CONV2_LEN],
            Activation::Linear,
            &mut a[..CONV2_CH * POOL3_LEN],
        );
        ops::conv1d::<CONV2_CH, POOL3_LEN, CONV3_CH, CONV3_LEN, CONV3_K, 1, 0, 0>(
            &a[..CONV2_CH * POOL3_LEN],
            &weights::CONV3_KERNEL,
            &weights::CONV3_BIAS,
            Activation::Relu,
            &mut b[..CONV3_CH * CONV3_LEN],
        );
        ops::max_pool1d::<CONV3_CH, CONV3_LEN, POOL4_LEN, POOL_W, POOL_S>(
            &b[..CONV3_CH * CONV3_LEN],
            Activation::Linear,
            &mut a[..CONV3_CH * POOL4_LEN],
        );
        ops::avg_pool1d::<CONV3_CH, POOL4_LEN, AVG_LEN, AVG_W, AVG_S>(
            &a[..CONV3_CH * POOL4_LEN],
            Activation::Linear,
            &mut b[..FLAT_LEN],
        );
        // flatten: no-op, b[..FLAT_LEN] is already the channel-major vector
        ops::dense::<FLAT_LEN, CLASSES>(
            &b[..FLAT_LEN],
            &weights::DENSE_KERNEL,
            &weights::DENSE_BIAS,
            Activation::Linear,
            output,
        );
    }
}

impl Default for GscModel {
    fn default() -> Self {
        Self::new()
    }
}
