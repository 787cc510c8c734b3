use kwspot::ops::{conv1d, Activation};
use kwspot::quant::{Q, FRAC_BITS, ONE};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// K=1 / stride 1 / no padding reduces to a per-position weighted channel sum;
// check it against a dot product taken in arbitrary precision and
// scaled/clamped once at the end.
#[test]
fn pointwise_conv_matches_reference_dot_product() {
    const C_IN: usize = 3;
    const L: usize = 5;
    const C_OUT: usize = 2;

    let mut rng = SmallRng::seed_from_u64(7);
    let mut input = [0 as Q; C_IN * L];
    for v in input.iter_mut() {
        *v = rng.gen_range(-2048..=2047);
    }
    let mut kernel = [[[0 as Q; 1]; C_IN]; C_OUT];
    let mut bias = [0 as Q; C_OUT];
    for k in 0..C_OUT {
        for z in 0..C_IN {
            kernel[k][z][0] = rng.gen_range(-512..=511);
        }
        bias[k] = rng.gen_range(-100..=100);
    }

    let mut output = [0 as Q; C_OUT * L];
    conv1d::<C_IN, L, C_OUT, L, 1, 1, 0, 0>(
        &input,
        &kernel,
        &bias,
        Activation::Linear,
        &mut output,
    );

    for k in 0..C_OUT {
        for pos in 0..L {
            let mut wide: i64 = 0;
            for z in 0..C_IN {
                wide += kernel[k][z][0] as i64 * input[z * L + pos] as i64;
            }
            let scaled = (wide >> FRAC_BITS) + bias[k] as i64;
            let expected = scaled.clamp(Q::MIN as i64, Q::MAX as i64) as Q;
            assert_eq!(output[k * L + pos], expected, "channel {k} position {pos}");
        }
    }
}

#[test]
fn zero_padding_contributes_nothing_at_the_edges() {
    // All-ones kernel over [1, 2, 3, 4] with one pad on each side: edge
    // positions only see the in-range taps.
    let input: [Q; 4] = [ONE, 2 * ONE, 3 * ONE, 4 * ONE];
    let kernel = [[[ONE; 3]; 1]; 1];
    let bias = [0 as Q; 1];
    let mut output = [0 as Q; 4];
    conv1d::<1, 4, 1, 4, 3, 1, 1, 1>(&input, &kernel, &bias, Activation::Linear, &mut output);
    assert_eq!(output, [3 * ONE, 6 * ONE, 9 * ONE, 7 * ONE]);
}

#[test]
fn stride_skips_positions() {
    let input: [Q; 5] = [ONE, 2 * ONE, 3 * ONE, 4 * ONE, 5 * ONE];
    let kernel = [[[ONE; 2]; 1]; 1];
    let bias = [0 as Q; 1];
    let mut output = [0 as Q; 2];
    conv1d::<1, 5, 1, 2, 2, 2, 0, 0>(&input, &kernel, &bias, Activation::Linear, &mut output);
    assert_eq!(output, [3 * ONE, 7 * ONE]);
}

#[test]
fn relu_clamps_negative_accumulators_to_zero() {
    let input: [Q; 2] = [ONE, -ONE];
    let kernel = [[[ONE; 1]; 1]; 1];
    let bias = [0 as Q; 1];
    let mut output = [0 as Q; 2];
    conv1d::<1, 2, 1, 2, 1, 1, 0, 0>(&input, &kernel, &bias, Activation::Relu, &mut output);
    assert_eq!(output, [ONE, 0]);
}

#[test]
fn bias_is_added_after_rescaling() {
    // Zero kernel leaves only the bias, which must land unscaled.
    let input: [Q; 3] = [ONE; 3];
    let kernel = [[[0 as Q; 1]; 1]; 1];
    let bias: [Q; 1] = [-42];
    let mut output = [0 as Q; 3];
    conv1d::<1, 3, 1, 3, 1, 1, 0, 0>(&input, &kernel, &bias, Activation::Linear, &mut output);
    assert_eq!(output, [-42, -42, -42]);
}

#[test]
fn out_of_range_result_saturates_instead_of_wrapping() {
    // Four taps of 1.0 against Q::MAX: the rescaled sum is 4 * Q::MAX, far
    // past storage range, while still comfortably inside the accumulator.
    let input: [Q; 4] = [Q::MAX; 4];
    let kernel = [[[ONE; 4]; 1]; 1];
    let bias = [0 as Q; 1];
    let mut output = [0 as Q; 1];
    conv1d::<1, 4, 1, 1, 4, 1, 0, 0>(&input, &kernel, &bias, Activation::Linear, &mut output);
    assert_eq!(output, [Q::MAX]);
}
