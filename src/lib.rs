//! Nonparametric estimation of discrete entropy, mutual information, and
//! Partial Information Decomposition (redundant, unique, and synergistic
//! information) from streaming multi-dimensional real-valued samples.
//!
//! Samples are binned into a sparse multidimensional histogram — see
//! [`binning`] for the two supported binning schemes and [`histogram`] for
//! the storage itself — and every query is answered as the mean estimate
//! over `R` independently shifted grids, to dampen quantisation bias. The
//! [`session`] module ties this together into [`Session`], the single
//! entry point applications use.
pub mod binning;
pub mod coord;
pub mod entropy;
pub mod errors;
pub mod histogram;
pub mod marginal;
pub mod pid;
pub mod role;
pub mod session;

pub use binning::{AxisBinSpec, BinSpec, Edges};
pub use errors::SessionError;
pub use session::{ReplicaSnapshot, Session, SessionConfig};
