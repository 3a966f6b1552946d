//! Entropy and mutual information over discrete empirical distributions.
//!
//! Unlike the dense, continuous-valued entropy of an `ArrayBase` of
//! probabilities, these operate on the sparse `CoordMap<f64>`
//! distributions produced by [`crate::marginal`], and report results in
//! bits (`log` base 2) rather than nats.
use crate::coord::CoordMap;

/// Computes `H(p) = - Σ p·log₂(p)`, with the convention `0·log₂(0) = 0`.
///
/// Returns `0.0` for an empty distribution (`N = 0`).
///
/// Summation walks `p` in its own iteration order; `p`'s fixed-seed hasher
/// (see [`CoordMap`]) keeps that order — and so this sum's bit pattern —
/// stable across processes.
#[must_use]
pub fn entropy(p: &CoordMap<f64>) -> f64 {
    -p.values()
        .map(|&pi| if pi == 0.0 { 0.0 } else { pi * pi.log2() })
        .sum::<f64>()
}

/// Computes `I(X;Y) = Σ p(x,y)·log₂(p(x,y) / (p(x)·p(y)))` over occupied
/// joint keys. `joint` is keyed by the full `(X, Y)` coordinate; `px` and
/// `py` are the corresponding marginals, keyed by the `X`- and `Y`-only
/// sub-coordinates of that same joint key (see
/// [`crate::marginal::local_positions`] /
/// [`crate::marginal::derive_marginal`] for how to build them without
/// re-scanning the histogram).
///
/// Bins with zero joint probability contribute `0`.
#[must_use]
pub fn mutual_information(
    joint: &CoordMap<f64>,
    local_x: &[usize],
    local_y: &[usize],
    px: &CoordMap<f64>,
    py: &CoordMap<f64>,
) -> f64 {
    joint
        .iter()
        .map(|(xy, &pxy)| {
            if pxy == 0.0 {
                return 0.0;
            }
            let x = xy.select(local_x);
            let y = xy.select(local_y);
            let denom = px.get(&x).copied().unwrap_or(0.0) * py.get(&y).copied().unwrap_or(0.0);
            if denom == 0.0 {
                0.0
            } else {
                pxy * (pxy / denom).log2()
            }
        })
        .sum()
}
