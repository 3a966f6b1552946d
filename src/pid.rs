//! The Williams–Beer Partial Information Decomposition: redundant, unique,
//! and synergistic information, built on the specific-information
//! redundancy measure `Imin`.
use crate::coord::{CoordMap, SmallCoord};
use crate::entropy::mutual_information;
use crate::histogram::SparseHistogram;
use crate::marginal::{derive_marginal, local_positions, marginal};
use itertools::Itertools;

/// Merges two ascending, disjoint axis-position lists into one ascending
/// list, the way role-tag positions (each axis belongs to at most one tag)
/// combine into a joint projection mask.
fn merge_sorted(a: &[usize], b: &[usize]) -> Vec<usize> {
    a.iter().copied().merge(b.iter().copied()).collect()
}

/// Per-source lookup tables used to evaluate specific information for every
/// target outcome without re-scanning the histogram.
struct SourceTable {
    /// `p(t, a)` grouped by `t`, as a list of `(a, p(t, a))` pairs.
    by_target: CoordMap<Vec<(SmallCoord, f64)>>,
    /// `p(a)`.
    p_source: CoordMap<f64>,
}

impl SourceTable {
    fn build(joint: &CoordMap<f64>, t_local: &[usize], a_local: &[usize]) -> Self {
        let mut by_target: CoordMap<Vec<(SmallCoord, f64)>> = CoordMap::default();
        for (coord, &p) in joint {
            let t = coord.select(t_local);
            let a = coord.select(a_local);
            by_target.entry(t).or_default().push((a, p));
        }
        let p_source = derive_marginal(joint, a_local);
        SourceTable {
            by_target,
            p_source,
        }
    }

    /// `I(T=t ; A) = Σ_a p(a|t) · [log₂(1/p(t)) − log₂(1/p(t|a))]`, rewritten
    /// as `Σ_a (p(t,a)/p(t)) · log₂( p(t,a) / (p(t)·p(a)) )`.
    fn specific_information(&self, t: &SmallCoord, p_t: f64) -> f64 {
        let entries = match self.by_target.get(t) {
            Some(entries) => entries,
            None => return 0.0,
        };
        entries
            .iter()
            .map(|(a, &p_ta)| {
                if p_ta <= 0.0 {
                    return 0.0;
                }
                let p_a = self.p_source.get(a).copied().unwrap_or(0.0);
                if p_a <= 0.0 {
                    return 0.0;
                }
                (p_ta / p_t) * (p_ta / (p_t * p_a)).log2()
            })
            .sum()
    }
}

/// Builds, in a single pass over `hist`, the joint over `target ∪ all
/// sources` plus the per-source lookup tables [`SourceTable`] and the
/// target marginal `p(t)` — one shared projection pass instead of one per
/// source.
fn build_tables(
    hist: &SparseHistogram,
    t_positions: &[usize],
    source_positions: &[&[usize]],
) -> (CoordMap<f64>, Vec<SourceTable>) {
    let mut combined = t_positions.to_vec();
    for s in source_positions {
        combined = merge_sorted(&combined, s);
    }
    let joint = marginal(hist, &combined);
    let t_local = local_positions(t_positions, &combined);
    let p_t = derive_marginal(&joint, &t_local);

    let tables = source_positions
        .iter()
        .map(|s| {
            let s_local = local_positions(s, &combined);
            SourceTable::build(&joint, &t_local, &s_local)
        })
        .collect();
    (p_t, tables)
}

/// `Imin(T ; S₁,…,S_k) = Σ_t p(t) · min_j I(T=t ; S_j)`, over target
/// outcomes with non-zero probability. `source_positions[j]` gives the
/// ascending axis positions of source `j`.
///
/// If some specific informations are negative (small-sample noise), the
/// minimum is taken as defined and is not clamped.
#[must_use]
pub fn redundant_info(
    hist: &SparseHistogram,
    t_positions: &[usize],
    source_positions: &[&[usize]],
) -> f64 {
    let (p_t, tables) = build_tables(hist, t_positions, source_positions);
    p_t.iter()
        .filter(|(_, &p)| p > 0.0)
        .map(|(t, &p)| {
            let min_si = tables
                .iter()
                .map(|table| table.specific_information(t, p))
                .fold(f64::INFINITY, f64::min);
            p * min_si
        })
        .sum()
}

/// `I(T ; S)`, ordinary mutual information between the target and a single
/// source, used as the base quantity for [`unique_info`] and [`synergy`].
#[must_use]
pub fn mutual_info_of(hist: &SparseHistogram, t_positions: &[usize], y_positions: &[usize]) -> f64 {
    let combined = merge_sorted(t_positions, y_positions);
    let joint = marginal(hist, &combined);
    let t_local = local_positions(t_positions, &combined);
    let y_local = local_positions(y_positions, &combined);
    let p_t = derive_marginal(&joint, &t_local);
    let p_y = derive_marginal(&joint, &y_local);
    mutual_information(&joint, &t_local, &y_local, &p_t, &p_y)
}

/// `U(S₁) = I(T ; S₁) − Imin(T ; S₁,…,S_k)`.
///
/// `sources[0]` is the "of" source (the one unique information is
/// attributed to); the full `sources` slice (including `sources[0]`) is
/// used to compute the shared `Imin` term: the first source is "of", the
/// rest are "with respect to".
#[must_use]
pub fn unique_info(
    hist: &SparseHistogram,
    t_positions: &[usize],
    sources: &[&[usize]],
) -> f64 {
    let mi = mutual_info_of(hist, t_positions, sources[0]);
    let imin = redundant_info(hist, t_positions, sources);
    mi - imin
}

/// Synergy for exactly two sources:
/// `Syn = I(T ; S₁, S₂) − Imin(T ; S₁, S₂) − U(S₁) − U(S₂)`.
///
/// Generalises to `k` sources as
/// `I(T ; S₁,…,S_k) − Imin(T ; S₁,…,S_k) − Σᵢ U(Sᵢ)`, each unique term
/// computed against the full source set.
#[must_use]
pub fn synergy(hist: &SparseHistogram, t_positions: &[usize], sources: &[&[usize]]) -> f64 {
    let joint_sources = sources
        .iter()
        .fold(Vec::new(), |acc, s| merge_sorted(&acc, s));
    let mi_joint = mutual_info_of(hist, t_positions, &joint_sources);
    let imin = redundant_info(hist, t_positions, sources);
    let unique_sum: f64 = (0..sources.len())
        .map(|i| {
            let mut rotated: Vec<&[usize]> = Vec::with_capacity(sources.len());
            rotated.push(sources[i]);
            for (j, s) in sources.iter().enumerate() {
                if j != i {
                    rotated.push(s);
                }
            }
            unique_info(hist, t_positions, &rotated)
        })
        .sum();
    mi_joint - imin - unique_sum
}
