//! Integer bin coordinates, the keys of a [`SparseHistogram`](crate::histogram::SparseHistogram).
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// A `SmallCoord`-keyed map using a fixed-seed FNV hasher instead of the
/// default `RandomState`.
///
/// `std`'s default hasher reseeds per process, so its iteration order (and
/// therefore the order `f64` probabilities get summed in) differs run to
/// run. Every table this crate sums over — histogram counts, marginals,
/// PID source tables — goes through this alias instead, so that two runs
/// over the same samples produce bit-identical results.
pub type CoordMap<V> = HashMap<SmallCoord, V, fnv::FnvBuildHasher>;

/// An integer coordinate into a `D`-dimensional bin grid.
///
/// Wraps a `Vec<i64>` rather than re-deriving coordinates from floats after
/// insertion: once a sample has been binned, only its integer coordinate is
/// ever stored or compared. `Hash` is derived from every component (the
/// default `Vec<i64>` hash impl folds each element into the hasher state in
/// turn), which is sufficient for high-dimensional uniform data; a
/// component-wise XOR would not be, since XOR-ing permutable equal values
/// cancels out.
///
/// # Examples
///
/// ```
/// use infotheory_hist::coord::SmallCoord;
///
/// let a = SmallCoord::from(vec![1, 2, 3]);
/// let b = SmallCoord::from(vec![1, 2, 3]);
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct SmallCoord(Vec<i64>);

impl SmallCoord {
    /// Builds a coordinate from its per-axis indices.
    #[must_use]
    pub fn new(indices: Vec<i64>) -> Self {
        SmallCoord(indices)
    }

    /// Returns the number of axes (dimensions) of this coordinate.
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Returns the coordinate's components as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    /// Builds the projected sub-coordinate retaining only the components at
    /// `positions`, in the order given.
    ///
    /// This is the core of [`project`](crate::histogram::SparseHistogram::project):
    /// `positions` is the (ascending) list of axis indices whose role tag
    /// matches the tag of interest.
    #[must_use]
    pub fn select(&self, positions: &[usize]) -> SmallCoord {
        SmallCoord(positions.iter().map(|&i| self.0[i]).collect())
    }
}

impl From<Vec<i64>> for SmallCoord {
    fn from(indices: Vec<i64>) -> Self {
        SmallCoord(indices)
    }
}

impl Hash for SmallCoord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
