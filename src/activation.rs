//! Activation engine: the three pure update rules every pool composes.
//!
//! One tick of an IA unit is:
//!
//! ```text
//! net    = Σ_i max(0, input_i) · W_i  +  max(0, a) · M        (M: -s off-diagonal, 0 diagonal)
//! effect = net · (max - a)   if net > 0
//!          net · (a - min)   otherwise
//! a'     = clamp(a - decay · (a - rest) + effect, min, max)
//! ```
//!
//! Units at or below zero are inactive: they neither excite downstream pools
//! nor inhibit their neighbours. The effect term shrinks as a unit approaches
//! the bound it is being pushed toward. The final clamp is the only thing that
//! enforces the bounds invariant and is applied on every update.

use ndarray::{Array1, Array2, ArrayView1, Zip};

use crate::error::{IaError, IaResult};

#[inline]
fn check_len(expected: usize, actual: usize) -> IaResult<()> {
    if expected != actual {
        return Err(IaError::StateShape { expected, actual });
    }
    Ok(())
}

/// Lateral inhibition received by each unit from every *other* unit.
///
/// Equivalent to `max(0, current) · inhibition_matrix(n, strength)` but
/// computed in O(n): each unit sees `-strength` times the summed positive
/// activation of the pool minus its own.
pub fn lateral_inhibition(current: ArrayView1<'_, f64>, inhibition_strength: f64) -> Array1<f64> {
    let clamped = current.mapv(|v| v.max(0.0));
    let total = clamped.sum();
    clamped.mapv(|own| -inhibition_strength * (total - own))
}

/// Explicit all-to-all inhibition matrix: `-strength` everywhere except a zero diagonal.
pub fn inhibition_matrix(size: usize, inhibition_strength: f64) -> Array2<f64> {
    Array2::from_shape_fn((size, size), |(i, j)| {
        if i == j { 0.0 } else { -inhibition_strength }
    })
}

/// Combined bottom-up/top-down excitation plus within-pool inhibition.
///
/// `inputs[i]` is contracted against `weights[i]` (shape `(inputs[i].len(), n)`).
/// Negative input values are clamped to zero before contraction.
pub fn compute_net_input(
    inputs: &[ArrayView1<'_, f64>],
    weights: &[Array2<f64>],
    inhibition_strength: f64,
    current: ArrayView1<'_, f64>,
) -> IaResult<Array1<f64>> {
    let n = current.len();
    check_len(weights.len(), inputs.len())?;
    for (input, w) in inputs.iter().zip(weights) {
        check_len(w.nrows(), input.len())?;
        check_len(n, w.ncols())?;
    }

    let mut total = Array1::<f64>::zeros(n);
    for (input, w) in inputs.iter().zip(weights) {
        let clipped = input.mapv(|v| v.max(0.0));
        total += &clipped.dot(w);
    }

    total += &lateral_inhibition(current, inhibition_strength);
    Ok(total)
}

/// Bounded response to net input, scaled by distance to the bound being approached.
///
/// Non-positive net input can only lower activation, even below rest.
pub fn compute_effect(
    net_input: ArrayView1<'_, f64>,
    current: ArrayView1<'_, f64>,
    min_value: f64,
    max_value: f64,
) -> IaResult<Array1<f64>> {
    check_len(current.len(), net_input.len())?;
    Ok(Zip::from(&net_input)
        .and(&current)
        .map_collect(|&net, &a| {
            if net > 0.0 {
                net * (max_value - a)
            } else {
                net * (a - min_value)
            }
        }))
}

/// Integrate effect and decay toward rest, then clamp into `[min_value, max_value]`.
pub fn compute_activation(
    effect: ArrayView1<'_, f64>,
    current: ArrayView1<'_, f64>,
    decay_rate: f64,
    resting_state: ArrayView1<'_, f64>,
    min_value: f64,
    max_value: f64,
) -> IaResult<Array1<f64>> {
    let n = current.len();
    check_len(n, effect.len())?;
    check_len(n, resting_state.len())?;
    Ok(Zip::from(&effect)
        .and(&current)
        .and(&resting_state)
        .map_collect(|&e, &a, &rest| {
            let decay = decay_rate * (a - rest);
            (a - decay + e).max(min_value).min(max_value)
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn net_input_clips_negative_sources() {
        let input = array![1.0, -5.0];
        let w = array![[0.5, 0.25], [10.0, 10.0]];
        let current = array![0.0, 0.0];
        let net = compute_net_input(&[input.view()], &[w], 0.0, current.view()).unwrap();
        assert_eq!(net, array![0.5, 0.25], "negative source unit must contribute nothing");
    }

    #[test]
    fn net_input_sums_all_sources() {
        let a = array![1.0];
        let b = array![2.0, 1.0];
        let wa = array![[0.1, 0.2, 0.3]];
        let wb = array![[0.0, 1.0, 0.0], [1.0, 0.0, 0.0]];
        let current = array![0.0, 0.0, 0.0];
        let net = compute_net_input(&[a.view(), b.view()], &[wa, wb], 0.0, current.view()).unwrap();
        for (got, want) in net.iter().zip([1.1, 2.2, 0.3]) {
            assert!((got - want).abs() < 1e-12, "got {got}, want {want}");
        }
    }

    #[test]
    fn self_inhibition_excludes_own_unit() {
        let s = 0.3;
        let current = array![0.0, 0.8, -0.4, 0.0];
        let inh = lateral_inhibition(current.view(), s);
        assert_eq!(inh[1], 0.0, "active unit must not inhibit itself");
        for u in [0usize, 2, 3] {
            assert!((inh[u] - (-s * 0.8)).abs() < 1e-12, "unit {u} got {}", inh[u]);
        }
    }

    #[test]
    fn closed_form_inhibition_matches_matrix() {
        let current: Array1<f64> = array![0.2, -0.1, 0.7, 0.05, 0.0];
        let m = inhibition_matrix(current.len(), 0.21);
        let via_matrix = current.mapv(|v| v.max(0.0)).dot(&m);
        let closed = lateral_inhibition(current.view(), 0.21);
        for (a, b) in via_matrix.iter().zip(closed.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
        assert!(m.diag().iter().all(|&d| d == 0.0));
    }

    #[test]
    fn effect_uses_bound_on_push_side() {
        let net = array![0.5, -0.5, 0.0];
        let current = array![0.2, 0.2, 0.2];
        let e = compute_effect(net.view(), current.view(), -0.2, 1.0).unwrap();
        assert!((e[0] - 0.5 * 0.8).abs() < 1e-12);
        assert!((e[1] - (-0.5 * 0.4)).abs() < 1e-12);
        assert_eq!(e[2], 0.0);
    }

    #[test]
    fn inhibitory_effect_never_raises_activation() {
        // Below rest and below zero: negative net input still pushes down.
        let net = array![-0.3];
        let current = array![-0.1];
        let e = compute_effect(net.view(), current.view(), -0.2, 1.0).unwrap();
        assert!(e[0] <= 0.0);
    }

    #[test]
    fn activation_decays_and_clamps() {
        let effect = array![0.0, 5.0, -5.0];
        let current = array![0.5, 0.9, -0.1];
        let rest = array![0.0, 0.0, 0.0];
        let a = compute_activation(effect.view(), current.view(), 0.1, rest.view(), -0.2, 1.0)
            .unwrap();
        assert!((a[0] - 0.45).abs() < 1e-12);
        assert_eq!(a[1], 1.0, "clamped to max");
        assert_eq!(a[2], -0.2, "clamped to min");
    }

    #[test]
    fn clamp_applies_even_when_rest_is_out_of_range() {
        let effect = array![0.0];
        let current = array![0.0];
        let rest = array![-10.0];
        let a = compute_activation(effect.view(), current.view(), 1.0, rest.view(), -0.2, 1.0)
            .unwrap();
        assert_eq!(a[0], -0.2);
    }

    #[test]
    fn shape_mismatches_are_rejected() {
        let current = array![0.0, 0.0];
        let w = array![[1.0, 1.0, 1.0]];
        let input = array![1.0];
        assert!(compute_net_input(&[input.view()], &[w], 0.0, current.view()).is_err());
        assert!(compute_net_input(&[], &[array![[1.0, 1.0]]], 0.0, current.view()).is_err());
        let short = array![0.0];
        assert!(compute_effect(short.view(), current.view(), -1.0, 1.0).is_err());
        let short_rest =
            compute_activation(current.view(), current.view(), 0.1, short.view(), -1.0, 1.0);
        assert!(short_rest.is_err());
    }
}
