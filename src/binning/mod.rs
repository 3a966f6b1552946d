//! Binning: mapping a real vector to an integer [`SmallCoord`], under
//! either of two per-axis schemes, optionally averaged over several
//! shifted grids.
pub use self::edges::Edges;

mod edges;

use crate::coord::SmallCoord;
use crate::errors::SessionError;
use ndarray::{ArrayBase, Data, Ix1};

/// The binning scheme installed on a single axis.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisBinSpec {
    /// `n` equal-width bins spanning `[lo, hi)`, with out-of-range values
    /// clamped to the nearest boundary bin.
    EqualInterval { n: usize, lo: f64, hi: f64 },
    /// Bins defined by an ordered set of interior boundaries; the extreme
    /// bins are unbounded. Shifting is not defined for this scheme.
    Boundaries(Edges),
}

impl AxisBinSpec {
    /// Returns the number of bins along this axis.
    #[must_use]
    pub fn n_bins(&self) -> usize {
        match self {
            AxisBinSpec::EqualInterval { n, .. } => *n,
            AxisBinSpec::Boundaries(edges) => edges.n_bins(),
        }
    }

    fn validate(&self) -> Result<(), SessionError> {
        match self {
            AxisBinSpec::EqualInterval { n, lo, hi } => {
                if *n < 1 {
                    return Err(SessionError::InvalidArg(format!(
                        "bin count must be >= 1, found {}",
                        n
                    )));
                }
                if !(lo < hi) {
                    return Err(SessionError::InvalidArg(format!(
                        "lo ({}) must be < hi ({})",
                        lo, hi
                    )));
                }
                Ok(())
            }
            AxisBinSpec::Boundaries(_) => Ok(()),
        }
    }

    /// Maps `x` to an axis-local integer bin index under grid shift `r` out
    /// of `R` total shifted grids.
    ///
    /// For the equal-interval scheme, the grid is translated by a fraction
    /// `s = r/R` of a bin width; the index is `floor((x - lo)/w + s)`,
    /// clamped to `[0, n-1]`. For the boundaries scheme, `r` is ignored
    /// (shifting is rejected at configuration time if `R > 1`).
    fn bin_index(&self, x: f64, r: usize, total_grids: usize) -> i64 {
        match self {
            AxisBinSpec::EqualInterval { n, lo, hi } => {
                let n = *n as i64;
                let w = (hi - lo) / (n as f64);
                let s = (r as f64) / (total_grids as f64);
                let raw = ((x - lo) / w + s).floor() as i64;
                raw.clamp(0, n - 1)
            }
            AxisBinSpec::Boundaries(edges) => edges.bin_of(x),
        }
    }
}

/// The binning scheme for all `D` axes of a [`crate::session::Session`].
#[derive(Clone, Debug, PartialEq)]
pub struct BinSpec {
    axes: Vec<AxisBinSpec>,
}

impl BinSpec {
    /// Builds an equal-interval `BinSpec` from per-axis bin counts and
    /// ranges. Returns `InvalidArg` if any axis is misconfigured or the
    /// three vectors have mismatched lengths.
    pub fn equal_interval(
        nbins: &[usize],
        los: &[f64],
        his: &[f64],
    ) -> Result<Self, SessionError> {
        if nbins.len() != los.len() || los.len() != his.len() {
            return Err(SessionError::InvalidArg(
                "nbins, los and his must have the same length".into(),
            ));
        }
        let axes: Vec<AxisBinSpec> = nbins
            .iter()
            .zip(los.iter())
            .zip(his.iter())
            .map(|((&n, &lo), &hi)| AxisBinSpec::EqualInterval { n, lo, hi })
            .collect();
        for axis in &axes {
            axis.validate()?;
        }
        Ok(BinSpec { axes })
    }

    /// Builds a `BinSpec` from a `D`-length vector of already-constructed
    /// per-axis specs (used by [`crate::session::Session::set_boundaries`]
    /// to replace a single axis in place).
    #[must_use]
    pub fn from_axes(axes: Vec<AxisBinSpec>) -> Self {
        BinSpec { axes }
    }

    /// Returns the per-axis specs.
    #[must_use]
    pub fn axes(&self) -> &[AxisBinSpec] {
        &self.axes
    }

    /// Returns the dimensionality (number of axes).
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    /// Returns `true` if any axis uses the explicit-boundaries scheme.
    #[must_use]
    pub fn has_boundaries_axis(&self) -> bool {
        self.axes
            .iter()
            .any(|a| matches!(a, AxisBinSpec::Boundaries(_)))
    }
}

/// Maps sample vectors to [`SmallCoord`]s under a [`BinSpec`] and a given
/// shifted-grid index.
///
/// Accepts any storage backing an `ArrayBase<_, Ix1>` of `f64`, the same
/// generic-point idiom `ndarray`-based grid code uses throughout.
pub struct Binner<'a> {
    spec: &'a BinSpec,
    total_grids: usize,
}

impl<'a> Binner<'a> {
    /// Builds a `Binner` for `spec`, with `total_grids` shifted replicas
    /// (`R`, already normalised so that `R = 0` has been turned into `R = 1`
    /// by the caller).
    #[must_use]
    pub fn new(spec: &'a BinSpec, total_grids: usize) -> Self {
        Binner { spec, total_grids }
    }

    /// Maps `x` to a [`SmallCoord`] under shifted grid `r`.
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != self.spec.ndim()`; callers validate
    /// dimensionality before binning (see
    /// [`crate::session::Session::add_point`]).
    pub fn bin_point<S>(&self, x: &ArrayBase<S, Ix1>, r: usize) -> SmallCoord
    where
        S: Data<Elem = f64>,
    {
        assert_eq!(
            x.len(),
            self.spec.ndim(),
            "dimension mismatch: point has {} dimensions, binner expected {}",
            x.len(),
            self.spec.ndim()
        );
        let indices: Vec<i64> = x
            .iter()
            .zip(self.spec.axes.iter())
            .map(|(&v, axis)| axis.bin_index(v, r, self.total_grids))
            .collect();
        SmallCoord::new(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn equal_interval_clamps_out_of_range_values() {
        let spec = BinSpec::equal_interval(&[2], &[0.0], &[1.0]).unwrap();
        let binner = Binner::new(&spec, 1);
        assert_eq!(binner.bin_point(&array![-5.0], 0).as_slice(), &[0]);
        assert_eq!(binner.bin_point(&array![5.0], 0).as_slice(), &[1]);
    }

    #[test]
    fn equal_interval_left_closed_right_open() {
        let spec = BinSpec::equal_interval(&[2], &[0.0], &[1.0]).unwrap();
        let binner = Binner::new(&spec, 1);
        assert_eq!(binner.bin_point(&array![0.0], 0).as_slice(), &[0]);
        assert_eq!(binner.bin_point(&array![0.49], 0).as_slice(), &[0]);
        assert_eq!(binner.bin_point(&array![0.5], 0).as_slice(), &[1]);
    }

    #[test]
    fn shifted_grid_translates_the_bin_edges() {
        let spec = BinSpec::equal_interval(&[4], &[0.0], &[1.0]).unwrap();
        // R = 4, shift r = 1 => s = 0.25 of a bin width (0.25) => edges move left by 0.0625
        let binner = Binner::new(&spec, 4);
        let unshifted = binner.bin_point(&array![0.24], 0).as_slice()[0];
        let shifted = binner.bin_point(&array![0.24], 1).as_slice()[0];
        assert_eq!(unshifted, 0);
        assert_eq!(shifted, 1);
    }

    #[test]
    fn invalid_equal_interval_spec_is_rejected() {
        assert!(BinSpec::equal_interval(&[0], &[0.0], &[1.0]).is_err());
        assert!(BinSpec::equal_interval(&[2], &[1.0], &[0.0]).is_err());
        assert!(BinSpec::equal_interval(&[2, 2], &[0.0], &[1.0]).is_err());
    }

    #[test]
    fn boundaries_scheme_ignores_shift() {
        let axis = AxisBinSpec::Boundaries(Edges::from(vec![0.5]));
        let spec = BinSpec::from_axes(vec![axis]);
        let binner = Binner::new(&spec, 1);
        assert_eq!(binner.bin_point(&array![0.1], 0).as_slice(), &[0]);
        assert_eq!(binner.bin_point(&array![0.9], 0).as_slice(), &[1]);
    }
}
