//! End-to-end recommendation: vectorize → cluster → score.
//!
//! The new student is appended after the reference population and the whole
//! batch is clustered once. The student's cluster is read back from the last
//! position of the assignment, so reference order never matters.
//!
//! # Raw vs standardized space
//!
//! `Recommendation::centroid` is in standardized units, while
//! `Recommendation::vector` is raw. Plotting one against the other is not
//! meaningful. Use `centroid_raw` (the same centroid mapped back through the
//! batch's [`Standardizer`]) or `member_mean` (raw mean of the cluster's
//! members) for a like-for-like comparison.

use crate::cluster::{cluster, Standardizer};
use crate::config::RecommenderConfig;
use crate::error::Result;
use crate::profile::{FeatureVector, ProfileFields, StudentProfile, Vectorizer};
use crate::recommend::{MajorScore, Scorer};
use serde::Serialize;

/// Result of one recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Student name.
    pub name: String,
    /// Cluster the student was assigned to.
    pub cluster_id: usize,
    /// Orientation label of that cluster, if the table has one.
    pub cluster_label: Option<String>,
    /// Inertia of the clustering (standardized space).
    pub sse: f64,
    /// Clusters actually used after small-batch reduction.
    pub k: usize,
    /// Candidate majors, best first.
    pub majors: Vec<MajorScore>,
    /// Axis names for `vector`, `centroid`, `centroid_raw` and `member_mean`.
    pub feature_names: Vec<String>,
    /// The student's raw feature vector.
    pub vector: FeatureVector,
    /// Cluster centroid in standardized space.
    pub centroid: Option<Vec<f64>>,
    /// Cluster centroid in raw units.
    pub centroid_raw: Option<Vec<f64>>,
    /// Raw-space mean of every row in the student's cluster.
    pub member_mean: Vec<f64>,
    /// Scaling fitted on the batch.
    pub standardizer: Option<Standardizer>,
}

impl Recommendation {
    /// Best-scoring major.
    pub fn top(&self) -> Option<&MajorScore> {
        self.majors.first()
    }
}

/// A configured pipeline.
#[derive(Debug, Clone)]
pub struct Recommender {
    config: RecommenderConfig,
    vectorizer: Vectorizer,
    scorer: Scorer,
}

impl Recommender {
    /// Build a pipeline from a validated configuration.
    pub fn new(config: RecommenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            vectorizer: Vectorizer::for_version(config.schema),
            scorer: Scorer::new(config.clusters.clone()),
            config,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Vectorizer in use.
    pub fn vectorizer(&self) -> &Vectorizer {
        &self.vectorizer
    }

    /// Scorer in use.
    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Recommend majors for `profile` against a reference population.
    pub fn recommend<R: ProfileFields>(
        &self,
        profile: &StudentProfile,
        reference: &[R],
    ) -> Result<Recommendation> {
        profile.validate()?;

        let vector = self.vectorizer.vectorize(profile);
        let mut batch = self.vectorizer.vectorize_all(reference);
        batch.push(vector.clone());

        let outcome = cluster(&batch, self.config.k, &self.config.kmeans)?;
        let cluster_id = outcome.assignment[batch.len() - 1];

        let majors = self.scorer.score(profile, cluster_id);
        let member_mean = mean_of(outcome.members(cluster_id).map(|i| &batch[i]), vector.len());

        log::info!(
            "{}: cluster {} of {} (sse={:.3}), top={:?}",
            profile.name(),
            cluster_id,
            outcome.k,
            outcome.sse,
            majors.first().map(|m| m.major.as_str())
        );

        Ok(Recommendation {
            name: profile.name().to_string(),
            cluster_id,
            cluster_label: self.scorer.cluster_label(cluster_id).map(str::to_string),
            sse: outcome.sse,
            k: outcome.k,
            majors,
            feature_names: self.vectorizer.schema().feature_names(),
            centroid: outcome.centroid(cluster_id),
            centroid_raw: outcome.centroid_raw(cluster_id),
            member_mean,
            vector,
            standardizer: outcome.standardizer,
        })
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self {
            config: RecommenderConfig::default(),
            vectorizer: Vectorizer::default(),
            scorer: Scorer::new(RecommenderConfig::default().clusters),
        }
    }
}

fn mean_of<'a>(rows: impl Iterator<Item = &'a FeatureVector>, dim: usize) -> Vec<f64> {
    let mut sum = vec![0.0; dim];
    let mut n = 0usize;
    for row in rows {
        for (s, v) in sum.iter_mut().zip(row) {
            *s += v;
        }
        n += 1;
    }
    if n > 0 {
        sum.iter_mut().for_each(|s| *s /= n as f64);
    }
    sum
}
