//! Max and average pooling over non-overlapping or overlapping windows.

use super::Activation;
use crate::quant::{clamp, Acc, Q};

/// Max-pool `[C][L_IN]` into `[C][L_OUT]` with window `W` and stride `S`.
///
/// Windows lie fully inside the input; no padding. The maximum is taken in
/// storage precision, so no rescale or saturation happens here. With `Relu`
/// the running maximum starts at zero, i.e. the result is
/// `max(0, window max)`.
pub fn max_pool1d<
    const C: usize,
    const L_IN: usize,
    const L_OUT: usize,
    const W: usize,
    const S: usize,
>(
    input: &[Q],
    activation: Activation,
    output: &mut [Q],
) {
    assert_eq!(input.len(), C * L_IN);
    assert_eq!(output.len(), C * L_OUT);
    assert_eq!(L_OUT, super::pool_out_len(L_IN, W, S));

    for c in 0..C {
        let row = &input[c * L_IN..(c + 1) * L_IN];
        for pos in 0..L_OUT {
            let window = &row[pos * S..pos * S + W];
            let mut best: Q = match activation {
                Activation::Linear => window[0],
                Activation::Relu => 0,
            };
            for &v in window {
                if v > best {
                    best = v;
                }
            }
            output[c * L_OUT + pos] = best;
        }
    }
}

/// Average-pool `[C][L_IN]` into `[C][L_OUT]` with window `W` and stride `S`.
///
/// The window is summed in the accumulator; with `Relu` a negative sum clamps
/// to zero before the division. The division by `W` truncates toward zero,
/// which is a distinct rounding rule from `scale`'s floor shift and must not
/// be unified with it. The quotient is saturating-cast to storage.
pub fn avg_pool1d<
    const C: usize,
    const L_IN: usize,
    const L_OUT: usize,
    const W: usize,
    const S: usize,
>(
    input: &[Q],
    activation: Activation,
    output: &mut [Q],
) {
    assert_eq!(input.len(), C * L_IN);
    assert_eq!(output.len(), C * L_OUT);
    assert_eq!(L_OUT, super::pool_out_len(L_IN, W, S));

    for c in 0..C {
        let row = &input[c * L_IN..(c + 1) * L_IN];
        for pos in 0..L_OUT {
            let mut sum: Acc = 0;
            for &v in &row[pos * S..pos * S + W] {
                sum += v as Acc;
            }
            if activation == Activation::Relu && sum < 0 {
                sum = 0;
            }
            let avg = sum / W as Acc;
            output[c * L_OUT + pos] = clamp(avg);
        }
    }
}
