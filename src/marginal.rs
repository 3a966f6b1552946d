//! Deriving empirical marginal distributions from a [`SparseHistogram`] for
//! an arbitrary, role-tagged subset of dimensions.
use crate::coord::CoordMap;
use crate::histogram::SparseHistogram;

/// Walks `hist` once, accumulating one count map per entry of `tag_sets`.
///
/// `tag_sets[i]` is the ascending list of axis positions to project onto
/// for the `i`-th marginal of interest. A single walk computing several
/// marginals at once is what the PID estimator needs: the joint over
/// `{target} ∪ sources` and every lower-order marginal derived from it
/// without re-scanning the histogram.
#[must_use]
pub fn accumulate_counts(
    hist: &SparseHistogram,
    tag_sets: &[&[usize]],
) -> Vec<CoordMap<u64>> {
    let mut maps: Vec<CoordMap<u64>> = tag_sets.iter().map(|_| CoordMap::default()).collect();
    for (coord, count) in hist.iter() {
        for (map, positions) in maps.iter_mut().zip(tag_sets.iter()) {
            let key = coord.select(positions);
            *map.entry(key).or_insert(0) += count;
        }
    }
    maps
}

/// Normalises a count map into an empirical probability distribution,
/// dividing every count by `n` — never by the marginal's own total, so that
/// bins occupied only in ignored dimensions are aggregated rather than
/// excluded. Returns an empty map if `n == 0`.
#[must_use]
pub fn to_probabilities(counts: &CoordMap<u64>, n: u64) -> CoordMap<f64> {
    if n == 0 {
        return CoordMap::default();
    }
    counts
        .iter()
        .map(|(k, &c)| (k.clone(), c as f64 / n as f64))
        .collect()
}

/// Convenience wrapper: projects `hist` onto `positions` and returns the
/// resulting distribution directly as probabilities.
#[must_use]
pub fn marginal(hist: &SparseHistogram, positions: &[usize]) -> CoordMap<f64> {
    let counts = accumulate_counts(hist, &[positions]).remove(0);
    to_probabilities(&counts, hist.total())
}

/// Given a subset `sub` of axis positions and the (ascending) `combined`
/// list those positions were drawn from, returns the index each element of
/// `sub` occupies within `combined`.
///
/// Used to re-derive a lower-order marginal from an already-built joint
/// distribution by summation, instead of re-walking the histogram: if
/// `combined` is the projection positions used to build a joint
/// [`SmallCoord`], `local_positions(sub, combined)` tells
/// [`SmallCoord::select`] which components of that joint coordinate make up
/// the `sub` marginal.
///
/// # Panics
///
/// Panics if any element of `sub` is not present in `combined`.
#[must_use]
pub fn local_positions(sub: &[usize], combined: &[usize]) -> Vec<usize> {
    sub.iter()
        .map(|p| {
            combined
                .iter()
                .position(|c| c == p)
                .expect("sub must be a subset of combined")
        })
        .collect()
}

/// Derives a lower-order marginal from an already-accumulated joint
/// distribution by summation over the components not in `local_sub`.
#[must_use]
pub fn derive_marginal(
    joint: &CoordMap<f64>,
    local_sub: &[usize],
) -> CoordMap<f64> {
    let mut out: CoordMap<f64> = CoordMap::default();
    for (coord, &p) in joint {
        let key = coord.select(local_sub);
        *out.entry(key).or_insert(0.0) += p;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::SmallCoord;

    fn fixture() -> SparseHistogram {
        let mut hist = SparseHistogram::new(vec![2, 2]);
        hist.insert(SmallCoord::from(vec![0, 0])).unwrap();
        hist.insert(SmallCoord::from(vec![0, 1])).unwrap();
        hist.insert(SmallCoord::from(vec![1, 0])).unwrap();
        hist.insert(SmallCoord::from(vec![1, 0])).unwrap();
        hist
    }

    #[test]
    fn marginal_probabilities_sum_to_one() {
        let hist = fixture();
        let p = marginal(&hist, &[0]);
        let total: f64 = p.values().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn joint_marginal_matches_full_coordinate() {
        let hist = fixture();
        let p = marginal(&hist, &[0, 1]);
        assert_eq!(p.len(), 3);
        assert!((p[&SmallCoord::from(vec![1, 0])] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn degenerate_empty_mask_yields_single_key_with_probability_one() {
        let hist = fixture();
        let p = marginal(&hist, &[]);
        assert_eq!(p.len(), 1);
        assert!((p[&SmallCoord::from(vec![])] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn accumulate_counts_computes_several_marginals_in_one_pass() {
        let hist = fixture();
        let maps = accumulate_counts(&hist, &[&[0], &[1], &[0, 1]]);
        assert_eq!(maps[0].values().sum::<u64>(), hist.total());
        assert_eq!(maps[1].values().sum::<u64>(), hist.total());
        assert_eq!(maps[2].values().sum::<u64>(), hist.total());
    }

    #[test]
    fn local_positions_maps_sub_into_combined_indices() {
        let combined = vec![1, 3, 5];
        assert_eq!(local_positions(&[3], &combined), vec![1]);
        assert_eq!(local_positions(&[1, 5], &combined), vec![0, 2]);
    }

    #[test]
    fn derive_marginal_matches_direct_projection() {
        let hist = fixture();
        let combined = vec![0, 1];
        let joint = marginal(&hist, &combined);
        let local_x = local_positions(&[0], &combined);
        let derived = derive_marginal(&joint, &local_x);
        let direct = marginal(&hist, &[0]);
        for (k, v) in &direct {
            assert!((derived[k] - v).abs() < 1e-12);
        }
    }

    #[test]
    fn empty_histogram_yields_empty_probabilities() {
        let hist = SparseHistogram::new(vec![2]);
        let p = marginal(&hist, &[0]);
        assert!(p.is_empty());
    }
}
