//! Sorted boundary collections for the explicit-boundary binning scheme.
use noisy_float::types::{n64, N64};

/// A sorted, deduplicated collection of per-axis interior boundaries.
///
/// **Note** bins under this scheme are open at both ends: a value below the
/// first boundary falls in bin 0, a value above the last boundary falls in
/// the last bin. This differs from a partition built from *all* edges of a
/// bounded region (see [`crate::binning::AxisBinSpec::EqualInterval`]) where
/// every bin is closed on the left and open on the right.
///
/// # Examples
///
/// ```
/// use infotheory_hist::binning::Edges;
///
/// // boundaries 0.3 and 0.7 define three bins: (-inf, 0.3), [0.3, 0.7), [0.7, inf)
/// let edges = Edges::from(vec![0.3, 0.7]);
/// assert_eq!(edges.bin_of(0.1), 0);
/// assert_eq!(edges.bin_of(0.5), 1);
/// assert_eq!(edges.bin_of(0.9), 2);
/// assert_eq!(edges.n_bins(), 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Edges {
    boundaries: Vec<N64>,
}

impl From<Vec<f64>> for Edges {
    /// Converts a `Vec<f64>` into `Edges`, consuming it.
    ///
    /// The vector is sorted in increasing order and deduplicated. `f64` is
    /// not `Ord` (NaN has no total order), so boundaries are carried as
    /// `noisy_float::N64` internally.
    fn from(mut boundaries: Vec<f64>) -> Self {
        let mut wrapped: Vec<N64> = boundaries.drain(..).map(n64).collect();
        wrapped.sort_unstable();
        wrapped.dedup();
        Edges { boundaries: wrapped }
    }
}

impl Edges {
    /// Returns the number of interior boundaries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    /// Returns `true` if there are no boundaries (a single, all-encompassing bin).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Returns the number of bins this collection of boundaries induces:
    /// `L` boundaries partition the real line into `L + 1` bins.
    #[must_use]
    pub fn n_bins(&self) -> usize {
        self.boundaries.len() + 1
    }

    /// Returns the index of the bin containing `value`: the count of
    /// boundaries that are `<= value`. Ties at a boundary go to the higher
    /// bin.
    #[must_use]
    pub fn bin_of(&self, value: f64) -> i64 {
        let value = n64(value);
        self.boundaries
            .iter()
            .filter(|&&b| b <= value)
            .count() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::Edges;

    #[test]
    fn sorts_and_dedups_input() {
        let edges = Edges::from(vec![0.5, 0.1, 0.5, 0.9]);
        assert_eq!(edges.len(), 3);
    }

    #[test]
    fn empty_boundaries_yield_a_single_bin() {
        let edges = Edges::from(vec![]);
        assert_eq!(edges.n_bins(), 1);
        assert_eq!(edges.bin_of(-100.0), 0);
        assert_eq!(edges.bin_of(100.0), 0);
    }

    #[test]
    fn boundary_ties_go_to_the_higher_bin() {
        let edges = Edges::from(vec![1.0, 2.0]);
        assert_eq!(edges.bin_of(1.0), 1);
        assert_eq!(edges.bin_of(2.0), 2);
        assert_eq!(edges.bin_of(0.999), 0);
    }
}
