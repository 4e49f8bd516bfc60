//! Vector math behind the Coulomb-like growth direction.
//!
//! Same-species residents push each other apart; the resulting direction
//! decides which neighbors receive new candidates.

use std::f64::consts::SQRT_2;

/// Pairwise repulsion on `coord` from other same-species residents:
/// `f_self * f_other * (coord - other) / |coord - other|^2`, summed.
pub fn coulomb<'a, I>(coord: &[usize], fitness: f64, others: I) -> Vec<f64>
where
    I: IntoIterator<Item = (&'a [usize], f64)>,
{
    let mut push = vec![0.0; coord.len()];
    for (other, other_fitness) in others {
        let offset: Vec<f64> = coord.iter().zip(other).map(|(&a, &b)| a as f64 - b as f64).collect();
        let dist_sq: f64 = offset.iter().map(|d| d * d).sum();
        if dist_sq == 0.0 {
            continue;
        }
        let scale = fitness * other_fitness / dist_sq;
        for (p, d) in push.iter_mut().zip(&offset) {
            *p += scale * d;
        }
    }
    push
}

/// Scale `v` to unit length in place. A zero or non-finite norm zeroes the
/// vector and returns `false`: there is no growth direction.
pub fn normalize(v: &mut [f64]) -> bool {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm == 0.0 || !norm.is_finite() {
        v.iter_mut().for_each(|x| *x = 0.0);
        return false;
    }
    v.iter_mut().for_each(|x| *x /= norm);
    true
}

/// Grid step (-1, 0 or +1) matching the sign of a repulsion component.
#[inline]
pub fn direction(component: f64) -> i32 {
    if component > 0.0 {
        1
    } else if component < 0.0 {
        -1
    } else {
        0
    }
}

/// Weight of a two-axis diagonal spread: the projection of `|unit|` onto the
/// all-45° vector `v = (1/√2, ..)`, divided by `√2`.
pub fn diagonal_weight(unit: &[f64]) -> f64 {
    let v = 1.0 / SQRT_2;
    let along: f64 = unit.iter().map(|c| c.abs() * v).sum();
    let v_dot_v = unit.len() as f64 * v * v;
    along / v_dot_v / SQRT_2
}

/// Growth fitness across a local gradient: strong fitness on the opposite
/// side dampens growth. A non-finite result (opposite fitness of exactly
/// zero) conveys nothing.
#[inline]
pub fn gradient_fitness(component: f64, own: f64, opposite: f64) -> f64 {
    let grown = component.abs() * own / opposite;
    if grown.is_finite() {
        grown
    } else {
        0.0
    }
}
