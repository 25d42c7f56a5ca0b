//! Clustering engine: standardization followed by k-means.
//!
//! Raw profile vectors mix scales (codes up to 10, one-hot flags, ratings in
//! 1–5), so the batch is standardized per feature before clustering. The
//! centroids that come back live in that standardized space and are only
//! meaningful together with the [`Standardizer`] that produced them.
//!
//! ## Small batches
//!
//! | Batch size `n` vs `k` | Behaviour |
//! |-----------------------|-----------|
//! | `n == 0` | [`Error::EmptyInput`] |
//! | `n < k` | `k` reduced to `n` |
//! | effective `k == 1` | every row in cluster 0, sse 0, no centroids, no scaling |
//! | otherwise | standardize + seeded k-means |
//!
//! ## Usage
//!
//! ```rust
//! use major_match::cluster::{cluster, KmeansParams};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! let out = cluster(&data, 2, &KmeansParams::default()).unwrap();
//! assert_eq!(out.assignment[0], out.assignment[1]);
//! assert_ne!(out.assignment[0], out.assignment[2]);
//! assert_eq!(out.centroids.nrows(), 2);
//! ```

mod kmeans;
mod standardize;
mod traits;

pub use kmeans::{Kmeans, KmeansFit, KmeansParams};
pub use standardize::Standardizer;
pub use traits::Clustering;

use crate::error::{Error, Result};
use ndarray::Array2;

/// Outcome of clustering one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterOutcome {
    /// Cluster id per input row, in input order.
    pub assignment: Vec<usize>,
    /// k × d centroids in standardized space (0 × d when short-circuited).
    pub centroids: Array2<f64>,
    /// Total within-cluster squared distance, in standardized space.
    pub sse: f64,
    /// Number of clusters actually used.
    pub k: usize,
    /// Scaling fitted on the batch; `None` when short-circuited.
    pub standardizer: Option<Standardizer>,
}

impl ClusterOutcome {
    /// Standardized centroid of a cluster.
    pub fn centroid(&self, id: usize) -> Option<Vec<f64>> {
        (id < self.centroids.nrows()).then(|| self.centroids.row(id).to_vec())
    }

    /// Centroid of a cluster mapped back to raw feature units.
    pub fn centroid_raw(&self, id: usize) -> Option<Vec<f64>> {
        let z = self.centroid(id)?;
        self.standardizer.as_ref()?.inverse_transform(&z).ok()
    }

    /// Row indices assigned to a cluster.
    pub fn members(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        self.assignment
            .iter()
            .enumerate()
            .filter(move |&(_, &c)| c == id)
            .map(|(i, _)| i)
    }
}

/// Standardize `vectors` and partition them into at most `k` clusters.
///
/// Requesting more clusters than rows is not an error: `k` is reduced to the
/// row count. `k == 0` is rejected.
pub fn cluster(vectors: &[Vec<f64>], k: usize, params: &KmeansParams) -> Result<ClusterOutcome> {
    let data = to_matrix(vectors)?;
    let n = data.nrows();

    if k == 0 {
        return Err(Error::InvalidClusterCount {
            requested: k,
            n_items: n,
        });
    }

    let k_eff = k.min(n);
    if k_eff < k {
        log::debug!("reducing k from {k} to {k_eff} for a batch of {n} rows");
    }

    if k_eff == 1 {
        return Ok(ClusterOutcome {
            assignment: vec![0; n],
            centroids: Array2::zeros((0, data.ncols())),
            sse: 0.0,
            k: 1,
            standardizer: None,
        });
    }

    let standardizer = Standardizer::fit(&data)?;
    let scaled = standardizer.transform_matrix(&data)?;

    params.validate()?;
    let fit = Kmeans::new(k_eff).with_params(*params).fit_matrix(&scaled)?;

    Ok(ClusterOutcome {
        assignment: fit.labels,
        centroids: fit.centroids,
        sse: fit.inertia,
        k: k_eff,
        standardizer: Some(standardizer),
    })
}

/// Pack rows into a matrix, checking that every row has the same length.
pub(crate) fn to_matrix(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let first = rows.first().ok_or(Error::EmptyInput)?;
    let n = rows.len();
    let d = first.len();

    let mut flat: Vec<f64> = Vec::with_capacity(n * d);
    for row in rows {
        if row.len() != d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: row.len(),
            });
        }
        flat.extend(row);
    }
    let found = flat.len();
    Array2::from_shape_vec((n, d), flat).map_err(|_| Error::DimensionMismatch {
        expected: n * d,
        found,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use proptest::prelude::*;

    fn params() -> KmeansParams {
        KmeansParams::default()
    }

    #[test]
    fn test_empty_batch_is_invalid_input() {
        let err = cluster(&[], 3, &params()).unwrap_err();
        assert_eq!(err, Error::EmptyInput);
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_single_row_short_circuits() {
        for k in [1, 2, 3, 7] {
            let out = cluster(&[vec![1.0, 2.0, 3.0]], k, &params()).unwrap();
            assert_eq!(out.assignment, vec![0]);
            assert_eq!(out.sse, 0.0);
            assert_eq!(out.centroids.nrows(), 0);
            assert!(out.standardizer.is_none());
            assert!(out.centroid(0).is_none());
        }
    }

    #[test]
    fn test_k_reduced_to_batch_size() {
        let data = vec![vec![0.0, 1.0], vec![5.0, 2.0], vec![9.0, 0.0]];
        let out = cluster(&data, 5, &params()).unwrap();
        assert_eq!(out.k, 3);
        assert_eq!(out.centroids.nrows(), 3);
        let mut ids = out.assignment.clone();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(out.sse.abs() < 1e-12);
    }

    #[test]
    fn test_zero_k_rejected() {
        let err = cluster(&[vec![1.0]], 0, &params()).unwrap_err();
        assert!(matches!(err, Error::InvalidClusterCount { requested: 0, .. }));
    }

    #[test]
    fn test_ragged_batch_rejected() {
        let err = cluster(&[vec![1.0, 2.0], vec![1.0]], 2, &params()).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_constant_feature_does_not_poison_result() {
        let data = vec![
            vec![1.0, 0.0, 3.0],
            vec![1.0, 0.2, 3.0],
            vec![1.0, 9.0, 3.0],
            vec![1.0, 9.1, 3.0],
        ];
        let out = cluster(&data, 2, &params()).unwrap();
        assert!(out.sse.is_finite());
        assert!(out.centroids.iter().all(|v| v.is_finite()));
        assert_eq!(out.assignment[0], out.assignment[1]);
        assert_ne!(out.assignment[0], out.assignment[2]);
    }

    #[test]
    fn test_centroid_raw_is_member_mean() {
        let data = vec![
            vec![0.0, 10.0],
            vec![2.0, 10.0],
            vec![100.0, 50.0],
            vec![102.0, 50.0],
        ];
        let out = cluster(&data, 2, &params()).unwrap();
        let id = out.assignment[0];
        let raw = out.centroid_raw(id).unwrap();
        assert!((raw[0] - 1.0).abs() < 1e-9);
        assert!((raw[1] - 10.0).abs() < 1e-9);
        assert_eq!(out.members(id).collect::<Vec<_>>(), vec![0, 1]);
    }

    fn batch() -> impl Strategy<Value = (Vec<Vec<f64>>, usize)> {
        (2usize..6, 1usize..5).prop_flat_map(|(k, extra)| {
            (
                proptest::collection::vec(
                    proptest::collection::vec(-20.0f64..20.0, 4),
                    k + extra - 1..k + extra + 8,
                ),
                Just(k),
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn assignment_covers_input_within_range((data, k) in batch()) {
            let out = cluster(&data, k, &params()).unwrap();
            prop_assert_eq!(out.assignment.len(), data.len());
            prop_assert!(out.assignment.iter().all(|&c| c < k));
            prop_assert_eq!(out.centroids.dim(), (k, 4));
        }

        #[test]
        fn repeated_calls_are_identical((data, k) in batch()) {
            let a = cluster(&data, k, &params()).unwrap();
            let b = cluster(&data, k, &params()).unwrap();
            prop_assert_eq!(a.assignment, b.assignment);
            prop_assert_eq!(a.sse.to_bits(), b.sse.to_bits());
        }
    }
}
