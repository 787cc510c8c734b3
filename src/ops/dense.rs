//! Fully-connected layer.

use super::Activation;
use crate::quant::{scale, Acc, Q};

/// Matrix-vector product: `[N]` input against `UNITS` weight rows of `N`
/// values each, producing `[UNITS]` scores.
///
/// Each unit's dot product accumulates in the wide type, then
/// rescale → +bias → activation → saturate, same ordering contract as the
/// convolution.
pub fn dense<const N: usize, const UNITS: usize>(
    input: &[Q],
    kernel: &[[Q; N]; UNITS],
    bias: &[Q; UNITS],
    activation: Activation,
    output: &mut [Q],
) {
    assert_eq!(input.len(), N);
    assert_eq!(output.len(), UNITS);

    for u in 0..UNITS {
        let row = &kernel[u];
        let mut acc: Acc = 0;
        for i in 0..N {
            acc += row[i] as Acc * input[i] as Acc;
        }
        let acc = scale(acc) + bias[u] as Acc;
        output[u] = activation.apply(acc);
    }
}
