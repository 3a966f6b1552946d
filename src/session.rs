//! `Session`: the top-level object owning binning configuration and the
//! shifted-grid histogram replicas, and dispatching entropy/MI/PID queries
//! over them.
use crate::binning::{AxisBinSpec, Binner};
use crate::errors::SessionError;
use crate::histogram::SparseHistogram;
use crate::marginal::marginal;
use crate::pid;
use crate::role::{self, Query};
use ndarray::{ArrayBase, Data, Ix1};

/// A read-only snapshot of a [`Session`]'s binning configuration, for
/// inspection/diagnostics. Mirrors `display_config` in the original
/// `infotheory` implementation this crate's design was distilled from.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Dimensionality.
    pub d: usize,
    /// Number of shifted grids actually in use (`R = 0` normalised to `1`).
    pub r: usize,
    /// Per-axis binning scheme, or `None` for an axis not yet configured.
    pub axes: Vec<Option<AxisBinSpec>>,
}

/// A read-only snapshot of one shifted-grid replica's occupancy, for
/// inspection/diagnostics. Mirrors `display_snapshot` in the original
/// `infotheory` implementation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplicaSnapshot {
    /// Total number of points inserted into this replica.
    pub n: u64,
    /// Number of distinct occupied bins.
    pub occupied_bins: usize,
}

/// The top-level object: owns `D` per-axis bin specs and `R` shifted-grid
/// histogram replicas, accepts streaming samples, and answers
/// entropy/mutual-information/PID queries as the mean estimate across
/// replicas.
pub struct Session {
    d: usize,
    r: usize,
    axes: Vec<Option<AxisBinSpec>>,
    histograms: Vec<SparseHistogram>,
    n: u64,
    locked: bool,
}

impl Session {
    /// Creates an empty `Session` with dimensionality `d` and `r` shifted
    /// grids (`r = 0` is treated as `r = 1`).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidArg`] if `d < 1`.
    pub fn new(d: usize, r: usize) -> Result<Self, SessionError> {
        if d < 1 {
            return Err(SessionError::InvalidArg(
                "dimensionality must be >= 1".into(),
            ));
        }
        Ok(Session {
            d,
            r: r.max(1),
            axes: vec![None; d],
            histograms: Vec::new(),
            n: 0,
            locked: false,
        })
    }

    /// Installs an equal-interval `BinSpec` on every axis.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyConfigured`] if samples have already been
    /// added. [`SessionError::InvalidArg`] if the input vectors are
    /// mismatched in length or any axis is misconfigured.
    pub fn set_equal_interval(
        &mut self,
        nbins: &[usize],
        los: &[f64],
        his: &[f64],
    ) -> Result<(), SessionError> {
        if self.locked {
            return Err(SessionError::AlreadyConfigured);
        }
        if nbins.len() != self.d || los.len() != self.d || his.len() != self.d {
            return Err(SessionError::InvalidArg(format!(
                "expected length-{} vectors, found nbins={}, los={}, his={}",
                self.d,
                nbins.len(),
                los.len(),
                his.len()
            )));
        }
        let spec = crate::binning::BinSpec::equal_interval(nbins, los, his)?;
        self.axes = spec.axes().iter().cloned().map(Some).collect();
        Ok(())
    }

    /// Installs explicit per-axis boundaries on `axis`.
    ///
    /// # Errors
    ///
    /// [`SessionError::RequiresR1`] if `R > 1`.
    /// [`SessionError::AlreadyConfigured`] if samples have already been
    /// added. [`SessionError::InvalidArg`] if `axis >= D`.
    pub fn set_boundaries(&mut self, axis: usize, boundaries: Vec<f64>) -> Result<(), SessionError> {
        if self.r > 1 {
            return Err(SessionError::RequiresR1);
        }
        if self.locked {
            return Err(SessionError::AlreadyConfigured);
        }
        if axis >= self.d {
            return Err(SessionError::InvalidArg(format!(
                "axis {} out of range for dimensionality {}",
                axis, self.d
            )));
        }
        self.axes[axis] = Some(AxisBinSpec::Boundaries(crate::binning::Edges::from(
            boundaries,
        )));
        Ok(())
    }

    fn configured_axes(&self) -> Result<Vec<AxisBinSpec>, SessionError> {
        self.axes
            .iter()
            .cloned()
            .collect::<Option<Vec<_>>>()
            .ok_or(SessionError::NotConfigured)
    }

    /// Adds one sample. For each of the `R` shifted grids, bins `x` and
    /// inserts the resulting coordinate into that grid's histogram.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotConfigured`] if a `BinSpec` is missing on any
    /// axis. [`SessionError::DimMismatch`] if `x.len() != D`.
    pub fn add_point<S>(&mut self, x: &ArrayBase<S, Ix1>) -> Result<(), SessionError>
    where
        S: Data<Elem = f64>,
    {
        if x.len() != self.d {
            return Err(SessionError::DimMismatch {
                expected: self.d,
                found: x.len(),
            });
        }
        let axes = self.configured_axes()?;
        if self.histograms.is_empty() {
            let spec = crate::binning::BinSpec::from_axes(axes.clone());
            let shape: Vec<usize> = spec.axes().iter().map(AxisBinSpec::n_bins).collect();
            self.histograms = (0..self.r)
                .map(|_| SparseHistogram::new(shape.clone()))
                .collect();
        }
        self.locked = true;
        let spec = crate::binning::BinSpec::from_axes(axes);
        let binner = Binner::new(&spec, self.r);
        for (r, hist) in self.histograms.iter_mut().enumerate() {
            let coord = binner.bin_point(x, r);
            hist.insert(coord)?;
        }
        self.n += 1;
        Ok(())
    }

    /// Adds every sample in `batch`, in order, via [`Session::add_point`].
    pub fn add_data<I>(&mut self, batch: I) -> Result<(), SessionError>
    where
        I: IntoIterator<Item = ndarray::Array1<f64>>,
    {
        for point in batch {
            self.add_point(&point)?;
        }
        Ok(())
    }

    /// Clears all accumulated counts and resets `N` to zero, keeping the
    /// installed `BinSpec`.
    pub fn clear(&mut self) {
        for hist in &mut self.histograms {
            hist.clear();
        }
        self.n = 0;
    }

    /// Returns the current binning configuration, for inspection.
    #[must_use]
    pub fn config(&self) -> SessionConfig {
        SessionConfig {
            d: self.d,
            r: self.r,
            axes: self.axes.clone(),
        }
    }

    /// Returns, per shifted-grid replica, the number of points added and
    /// the number of distinct occupied bins.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ReplicaSnapshot> {
        self.histograms
            .iter()
            .map(|h| ReplicaSnapshot {
                n: h.total(),
                occupied_bins: h.occupied_bins(),
            })
            .collect()
    }

    fn mean_over_replicas<F>(&self, f: F) -> f64
    where
        F: Fn(&SparseHistogram) -> f64,
    {
        if self.histograms.is_empty() || self.n == 0 {
            return 0.0;
        }
        let sum: f64 = self.histograms.iter().map(f).sum();
        sum / (self.histograms.len() as f64)
    }

    /// Computes the mean (over shifted grids) entropy of the random
    /// variable formed by the dimensions tagged `0` in `rv`.
    ///
    /// # Errors
    ///
    /// [`SessionError::BadRoleVector`] if `rv` is malformed for this query; see [`crate::role::validate`].
    pub fn entropy(&self, rv: &[i32]) -> Result<f64, SessionError> {
        let positions = role::validate(rv, self.d, Query::Entropy)?;
        Ok(self.mean_over_replicas(|hist| {
            let p = marginal(hist, &positions[0]);
            crate::entropy::entropy(&p)
        }))
    }

    /// Computes the mean mutual information `I(X;Y)` between the
    /// dimensions tagged `0` and `1` in `rv`.
    ///
    /// # Errors
    ///
    /// [`SessionError::BadRoleVector`] if `rv` is malformed for this query; see [`crate::role::validate`].
    pub fn mutual_info(&self, rv: &[i32]) -> Result<f64, SessionError> {
        let positions = role::validate(rv, self.d, Query::MutualInfo)?;
        Ok(self.mean_over_replicas(|hist| pid::mutual_info_of(hist, &positions[0], &positions[1])))
    }

    fn pid_positions(&self, rv: &[i32]) -> Result<Vec<Vec<usize>>, SessionError> {
        let max_tag = rv.iter().copied().filter(|&t| t >= 0).max().unwrap_or(-1);
        let n_sources = if max_tag >= 3 { 3 } else { 2 };
        role::validate(rv, self.d, Query::Pid { n_sources })
    }

    /// Computes the mean redundant information `Imin(T ; S₁,…,S_k)`, where
    /// `T` is tagged `0` and `S_1..k` are tagged `1..=k` in `rv`.
    ///
    /// # Errors
    ///
    /// [`SessionError::BadRoleVector`] if `rv` is malformed for this query; see [`crate::role::validate`].
    pub fn redundant_info(&self, rv: &[i32]) -> Result<f64, SessionError> {
        let positions = self.pid_positions(rv)?;
        let t = &positions[0];
        let sources: Vec<&[usize]> = positions[1..].iter().map(Vec::as_slice).collect();
        Ok(self.mean_over_replicas(|hist| pid::redundant_info(hist, t, &sources)))
    }

    /// Computes the mean unique information `U(S₁) = I(T;S₁) − Imin`, where
    /// `S_1` (tag `1`) is the "of" source and the remaining tagged sources
    /// are "with respect to".
    ///
    /// # Errors
    ///
    /// [`SessionError::BadRoleVector`] if `rv` is malformed for this query; see [`crate::role::validate`].
    pub fn unique_info(&self, rv: &[i32]) -> Result<f64, SessionError> {
        let positions = self.pid_positions(rv)?;
        let t = &positions[0];
        let sources: Vec<&[usize]> = positions[1..].iter().map(Vec::as_slice).collect();
        Ok(self.mean_over_replicas(|hist| pid::unique_info(hist, t, &sources)))
    }

    /// Computes the mean synergistic information.
    ///
    /// # Errors
    ///
    /// [`SessionError::BadRoleVector`] if `rv` is malformed for this query; see [`crate::role::validate`].
    pub fn synergy(&self, rv: &[i32]) -> Result<f64, SessionError> {
        let positions = self.pid_positions(rv)?;
        let t = &positions[0];
        let sources: Vec<&[usize]> = positions[1..].iter().map(Vec::as_slice).collect();
        Ok(self.mean_over_replicas(|hist| pid::synergy(hist, t, &sources)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn configured(d: usize, r: usize, n: usize, lo: f64, hi: f64) -> Session {
        let mut s = Session::new(d, r).unwrap();
        s.set_equal_interval(&vec![n; d], &vec![lo; d], &vec![hi; d])
            .unwrap();
        s
    }

    #[test]
    fn add_point_before_configuration_is_rejected() {
        let mut s = Session::new(2, 1).unwrap();
        assert_eq!(
            s.add_point(&array![0.5, 0.5]),
            Err(SessionError::NotConfigured)
        );
    }

    #[test]
    fn add_point_dim_mismatch_is_rejected() {
        let mut s = configured(2, 1, 2, 0.0, 1.0);
        assert_eq!(
            s.add_point(&array![0.5]),
            Err(SessionError::DimMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn configuring_after_samples_added_is_rejected() {
        let mut s = configured(1, 1, 2, 0.0, 1.0);
        s.add_point(&array![0.5]).unwrap();
        assert_eq!(
            s.set_equal_interval(&[2], &[0.0], &[1.0]),
            Err(SessionError::AlreadyConfigured)
        );
    }

    #[test]
    fn boundaries_with_r_greater_than_one_is_rejected() {
        let mut s = Session::new(1, 2).unwrap();
        assert_eq!(
            s.set_boundaries(0, vec![0.5]),
            Err(SessionError::RequiresR1)
        );
    }

    #[test]
    fn empty_session_queries_return_zero() {
        let s = configured(1, 1, 2, 0.0, 1.0);
        assert_eq!(s.entropy(&[0]).unwrap(), 0.0);
    }

    #[test]
    fn single_bin_entropy_is_exactly_zero() {
        let mut s = configured(1, 1, 2, 0.0, 1.0);
        for _ in 0..10 {
            s.add_point(&array![0.1]).unwrap();
        }
        assert_eq!(s.entropy(&[0]).unwrap(), 0.0);
    }

    #[test]
    fn fair_coin_entropy_is_about_one_bit() {
        let mut s = configured(1, 1, 2, 0.0, 1.0);
        for _ in 0..500 {
            s.add_point(&array![0.1]).unwrap();
        }
        for _ in 0..500 {
            s.add_point(&array![0.9]).unwrap();
        }
        assert!((s.entropy(&[0]).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn clear_resets_n_and_histograms_but_keeps_bin_spec() {
        let mut s = configured(1, 1, 2, 0.0, 1.0);
        s.add_point(&array![0.1]).unwrap();
        s.clear();
        assert_eq!(s.snapshot()[0].n, 0);
        assert!(s.config().axes[0].is_some());
        s.add_point(&array![0.1]).unwrap();
        assert_eq!(s.snapshot()[0].n, 1);
    }

    #[test]
    fn clear_then_readd_same_samples_reproduces_results() {
        let mut s = configured(1, 1, 2, 0.0, 1.0);
        s.add_point(&array![0.1]).unwrap();
        s.add_point(&array![0.9]).unwrap();
        let before = s.entropy(&[0]).unwrap();
        s.clear();
        s.add_point(&array![0.1]).unwrap();
        s.add_point(&array![0.9]).unwrap();
        let after = s.entropy(&[0]).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn invalid_dimensionality_is_rejected() {
        assert_eq!(
            Session::new(0, 1).unwrap_err(),
            SessionError::InvalidArg("dimensionality must be >= 1".into())
        );
    }

    #[test]
    fn redundant_unique_and_synergy_sum_to_joint_mutual_info() {
        let mut s = configured(3, 1, 2, 0.0, 1.0);
        for row in [[0., 0., 0.], [0., 1., 0.], [1., 0., 0.], [1., 1., 1.]] {
            for _ in 0..25 {
                s.add_point(&ndarray::Array1::from_vec(row.to_vec())).unwrap();
            }
        }
        let rv = [1, 2, 0];
        let r = s.redundant_info(&rv).unwrap();
        let u1 = s.unique_info(&rv).unwrap();
        let u2 = s.unique_info(&[2, 1, 0]).unwrap();
        let syn = s.synergy(&rv).unwrap();
        let mi_joint = s.mutual_info(&[1, 1, 0]).unwrap();
        assert!((mi_joint - 0.8112781244591328).abs() < 1e-6);
        assert!((r + u1 + u2 + syn - mi_joint).abs() < 1e-6);
    }
}
