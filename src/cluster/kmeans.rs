//! K-means clustering.
//!
//! Partitions data into k clusters by minimizing **within-cluster sum of squares**
//! (WCSS, "inertia"):
//!
//! ```text
//! WCSS = Σₖ Σᵢ∈Cₖ ||xᵢ - μₖ||²
//! ```
//!
//! # Lloyd's Algorithm
//!
//! 1. Initialize k centroids via k-means++
//! 2. **Assign**: Each point → nearest centroid
//! 3. **Update**: Each centroid → mean of assigned points
//! 4. Repeat until the assignment stops changing (or `max_iter`)
//!
//! Lloyd only finds a local minimum, so the whole procedure is restarted
//! `n_init` times and the lowest-inertia run is kept.
//!
//! # Determinism
//!
//! Restart `r` draws from `StdRng::seed_from_u64(seed + r)`. The winning run is
//! the one with the smallest inertia, the lowest restart index on ties. A point
//! equidistant to several centroids goes to the lowest centroid index. Together
//! these make the result a pure function of `(data, k, params)`, with or
//! without the `parallel` feature.

use super::traits::Clustering;
use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView1};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Tunables shared by every k-means run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KmeansParams {
    /// Base random seed.
    pub seed: u64,
    /// Number of restarts.
    pub n_init: usize,
    /// Maximum Lloyd iterations per restart.
    pub max_iter: usize,
    /// Early stop when total squared centroid shift drops below this.
    pub tol: f64,
}

impl Default for KmeansParams {
    fn default() -> Self {
        Self {
            seed: 42,
            n_init: 10,
            max_iter: 300,
            tol: 1e-4,
        }
    }
}

impl KmeansParams {
    /// Reject values that would make a run meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.n_init == 0 {
            return Err(Error::InvalidParameter {
                name: "n_init",
                message: "at least one restart is required".into(),
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be positive".into(),
            });
        }
        if self.tol.is_nan() || self.tol < 0.0 {
            return Err(Error::InvalidParameter {
                name: "tol",
                message: "must be a non-negative number".into(),
            });
        }
        Ok(())
    }
}

/// Result of a k-means fit.
#[derive(Debug, Clone, PartialEq)]
pub struct KmeansFit {
    /// Cluster id per input row, in input order.
    pub labels: Vec<usize>,
    /// k × d centroid matrix.
    pub centroids: Array2<f64>,
    /// Sum of squared distances from each point to its centroid.
    pub inertia: f64,
    /// Lloyd iterations used by the winning restart.
    pub n_iter: usize,
}

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    params: KmeansParams,
}

impl Kmeans {
    /// Create a new K-means clusterer with default parameters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            params: KmeansParams::default(),
        }
    }

    /// Replace all parameters.
    pub fn with_params(mut self, params: KmeansParams) -> Self {
        self.params = params;
        self
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.params.max_iter = max_iter;
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.params.tol = tol;
        self
    }

    /// Set base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.params.seed = seed;
        self
    }

    /// Set number of restarts.
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.params.n_init = n_init;
        self
    }

    /// Parameters in use.
    pub fn params(&self) -> &KmeansParams {
        &self.params
    }

    /// Fit and return labels, centroids and inertia.
    pub fn fit(&self, data: &[Vec<f64>]) -> Result<KmeansFit> {
        self.params.validate()?;
        let data_arr = super::to_matrix(data)?;
        let n = data_arr.nrows();

        if self.k == 0 || self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }

        self.fit_matrix(&data_arr)
    }

    /// Restart `r` is seeded with `seed + r`.
    fn restart_seeds(&self) -> Vec<u64> {
        (0..self.params.n_init as u64)
            .map(|r| self.params.seed.wrapping_add(r))
            .collect()
    }

    pub(crate) fn fit_matrix(&self, data: &Array2<f64>) -> Result<KmeansFit> {
        let seeds = self.restart_seeds();

        #[cfg(feature = "parallel")]
        let runs: Vec<KmeansFit> = seeds.par_iter().map(|&s| self.run(data, s)).collect();

        #[cfg(not(feature = "parallel"))]
        let runs: Vec<KmeansFit> = seeds.iter().map(|&s| self.run(data, s)).collect();

        select_best(runs)
    }

    /// One seeded Lloyd run.
    fn run(&self, data: &Array2<f64>, seed: u64) -> KmeansFit {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut centroids = self.init_centroids(data, &mut rng);
        let mut labels = assign(data, &centroids);
        let mut n_iter = 0;
        let mut stable = false;

        for _ in 0..self.params.max_iter {
            n_iter += 1;
            let new_centroids = self.update(data, &labels, &mut rng);

            let shift: f64 = centroids
                .iter()
                .zip(new_centroids.iter())
                .map(|(a, b)| (a - b).powi(2))
                .sum();
            centroids = new_centroids;

            let new_labels = assign(data, &centroids);
            stable = new_labels == labels;
            labels = new_labels;

            if stable || shift < self.params.tol {
                break;
            }
        }

        if !stable {
            // Labels moved on the last pass; keep centroids equal to member means.
            centroids = self.update(data, &labels, &mut rng);
        }

        let inertia: f64 = labels
            .iter()
            .enumerate()
            .map(|(i, &c)| squared_distance(&data.row(i), &centroids.row(c)))
            .sum();

        KmeansFit {
            labels,
            centroids,
            inertia,
            n_iter,
        }
    }

    /// Initialize centroids using k-means++.
    fn init_centroids(&self, data: &Array2<f64>, rng: &mut StdRng) -> Array2<f64> {
        let n = data.nrows();
        let d = data.ncols();
        let mut centroids = Array2::zeros((self.k, d));

        // First centroid: random point
        let first = rng.random_range(0..n);
        centroids.row_mut(0).assign(&data.row(first));

        for i in 1..self.k {
            let distances: Vec<f64> = (0..n)
                .map(|j| {
                    let point = data.row(j);
                    (0..i)
                        .map(|c| squared_distance(&point, &centroids.row(c)))
                        .fold(f64::MAX, f64::min)
                })
                .collect();

            // Sample proportional to squared distance
            let total: f64 = distances.iter().sum();
            if total == 0.0 {
                let idx = rng.random_range(0..n);
                centroids.row_mut(i).assign(&data.row(idx));
                continue;
            }

            let threshold = rng.random::<f64>() * total;
            let mut cumsum = 0.0;
            let mut selected = distances.iter().rposition(|&d| d > 0.0).unwrap_or(0);

            for (j, &d) in distances.iter().enumerate() {
                cumsum += d;
                if d > 0.0 && cumsum > threshold {
                    selected = j;
                    break;
                }
            }

            centroids.row_mut(i).assign(&data.row(selected));
        }

        centroids
    }

    /// Recompute centroids as member means. Empty clusters are re-seeded from
    /// a random point.
    fn update(&self, data: &Array2<f64>, labels: &[usize], rng: &mut StdRng) -> Array2<f64> {
        let n = data.nrows();
        let mut centroids = Array2::zeros((self.k, data.ncols()));
        let mut counts = vec![0usize; self.k];

        for (i, &c) in labels.iter().enumerate() {
            let mut row = centroids.row_mut(c);
            row += &data.row(i);
            counts[c] += 1;
        }

        for (c, &count) in counts.iter().enumerate() {
            if count > 0 {
                centroids.row_mut(c).mapv_inplace(|v| v / count as f64);
            } else {
                let idx = rng.random_range(0..n);
                centroids.row_mut(c).assign(&data.row(idx));
            }
        }

        centroids
    }
}

/// Nearest centroid per row; ties go to the lower centroid index.
fn assign(data: &Array2<f64>, centroids: &Array2<f64>) -> Vec<usize> {
    data.rows()
        .into_iter()
        .map(|point| {
            let mut best_cluster = 0;
            let mut best_dist = f64::MAX;
            for (c, centroid) in centroids.rows().into_iter().enumerate() {
                let dist = squared_distance(&point, &centroid);
                if dist < best_dist {
                    best_dist = dist;
                    best_cluster = c;
                }
            }
            best_cluster
        })
        .collect()
}

/// Squared Euclidean distance.
pub(crate) fn squared_distance(a: &ArrayView1<'_, f64>, b: &ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        self.fit(data).map(|fit| fit.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// Lowest inertia wins; the earliest restart wins ties.
fn select_best(runs: Vec<KmeansFit>) -> Result<KmeansFit> {
    let mut best: Option<KmeansFit> = None;
    for (r, fit) in runs.into_iter().enumerate() {
        log::trace!("kmeans restart {r}: inertia={:.6} iters={}", fit.inertia, fit.n_iter);
        match &best {
            Some(b) if fit.inertia >= b.inertia => {}
            _ => best = Some(fit),
        }
    }
    best.ok_or_else(|| Error::InvalidParameter {
        name: "n_init",
        message: "at least one restart is required".into(),
    })
}
