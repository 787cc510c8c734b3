//! Strided 1-D convolution over multiple channels with zero padding.

use super::Activation;
use crate::quant::{scale, Acc, Q};

/// Convolve `[C_IN][L_IN]` with `C_OUT` kernels of `K` taps per input channel,
/// producing `[C_OUT][L_OUT]` where `L_OUT = (L_IN - K + PL + PR)/S + 1`.
///
/// Padding is never materialized: a tap whose input index falls outside
/// `[0, L_IN)` contributes zero. Per output element the full cross-channel
/// sum is taken in the accumulator, then rescaled, biased, activated and
/// saturated, in exactly that order.
pub fn conv1d<
    const C_IN: usize,
    const L_IN: usize,
    const C_OUT: usize,
    const L_OUT: usize,
    const K: usize,
    const S: usize,
    const PL: usize,
    const PR: usize,
>(
    input: &[Q],
    kernel: &[[[Q; K]; C_IN]; C_OUT],
    bias: &[Q; C_OUT],
    activation: Activation,
    output: &mut [Q],
) {
    assert_eq!(input.len(), C_IN * L_IN);
    assert_eq!(output.len(), C_OUT * L_OUT);
    assert_eq!(L_OUT, super::conv_out_len(L_IN, K, S, PL, PR));

    for k in 0..C_OUT {
        let taps = &kernel[k];
        for pos in 0..L_OUT {
            let mut acc: Acc = 0;
            for z in 0..C_IN {
                let row = &input[z * L_IN..(z + 1) * L_IN];
                let mut mac: Acc = 0;
                for x in 0..K {
                    let ix = (pos * S + x) as isize - PL as isize;
                    if ix >= 0 && (ix as usize) < L_IN {
                        mac += row[ix as usize] as Acc * taps[z][x] as Acc;
                    }
                }
                acc += mac;
            }
            let acc = scale(acc) + bias[k] as Acc;
            output[k * L_OUT + pos] = activation.apply(acc);
        }
    }
}
