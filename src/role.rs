//! Role vectors: per-axis tags assigning sample dimensions to the random
//! variables of a query.
use crate::errors::SessionError;

/// The random-variable role a query assigns to each dimension.
///
/// A query is described by which tags it allows (besides `-1`, "ignore")
/// and which of those tags are *required* to appear at least once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Query {
    /// Entropy of the single variable tagged `0`.
    Entropy,
    /// Mutual information between the variables tagged `0` and `1`.
    MutualInfo,
    /// A PID query (redundant/unique/synergistic information) over a
    /// target (tag `0`) and `n_sources` sources (tags `1..=n_sources`).
    /// `n_sources` is `2` or `3`.
    Pid { n_sources: u8 },
}

impl Query {
    fn required_tags(self) -> Vec<i32> {
        match self {
            Query::Entropy => vec![0],
            Query::MutualInfo => vec![0, 1],
            Query::Pid { n_sources } => (0..=n_sources as i32).collect(),
        }
    }
}

/// Validates `rv` (a role vector of length `d`) against `query`, returning
/// the required tags' axis positions (ascending) on success.
///
/// The returned `Vec<Vec<usize>>` is indexed the same way as
/// `query.required_tags()` would be: entry `0` is the axis positions tagged
/// `0`, entry `1` the positions tagged `1`, and so on.
///
/// # Errors
///
/// Returns [`SessionError::BadRoleVector`] if:
/// - `rv.len() != d`;
/// - any entry is not `-1` and not one of the tags `query` allows;
/// - a tag `query` requires appears nowhere in `rv`.
pub fn validate(rv: &[i32], d: usize, query: Query) -> Result<Vec<Vec<usize>>, SessionError> {
    if rv.len() != d {
        return Err(SessionError::BadRoleVector(format!(
            "role vector has length {}, expected {}",
            rv.len(),
            d
        )));
    }
    let required = query.required_tags();
    for &tag in rv {
        if tag != -1 && !required.contains(&tag) {
            return Err(SessionError::BadRoleVector(format!(
                "tag {} is not allowed for this query",
                tag
            )));
        }
    }
    let mut positions: Vec<Vec<usize>> = vec![Vec::new(); required.len()];
    for (axis, &tag) in rv.iter().enumerate() {
        if tag != -1 {
            let slot = required
                .iter()
                .position(|&t| t == tag)
                .expect("tag already checked to be in `required`");
            positions[slot].push(axis);
        }
    }
    for (tag, axis_positions) in required.iter().zip(positions.iter()) {
        if axis_positions.is_empty() {
            return Err(SessionError::BadRoleVector(format!(
                "required tag {} does not appear in the role vector",
                tag
            )));
        }
    }
    Ok(positions)
}
