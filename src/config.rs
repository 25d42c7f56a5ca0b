//! Pipeline configuration.
//!
//! One versioned table parameterizes the whole pipeline: which feature schema
//! to encode with, how many clusters to ask for, how k-means is seeded, and
//! what each cluster recommends. It round-trips through JSON so alternate
//! weight schemes can be tested without code changes.
//!
//! ```rust
//! use major_match::config::RecommenderConfig;
//!
//! let json = r#"{ "schema": "v2", "k": 3 }"#;
//! let cfg = RecommenderConfig::from_json(json).unwrap();
//! assert_eq!(cfg.clusters.len(), 3); // built-in table filled in
//! ```

use crate::cluster::KmeansParams;
use crate::error::{Error, Result};
use crate::recommend::{default_clusters, ClusterProfile};
use crate::schema::SchemaVersion;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default number of clusters.
pub const DEFAULT_K: usize = 3;

/// Configuration of a [`crate::pipeline::Recommender`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Feature schema version.
    #[serde(default)]
    pub schema: SchemaVersion,
    /// Requested cluster count.
    #[serde(default = "default_k")]
    pub k: usize,
    /// K-means tunables.
    #[serde(default)]
    pub kmeans: KmeansParams,
    /// Cluster table. Empty in the input means "built-in table for `schema`".
    #[serde(default)]
    pub clusters: Vec<ClusterProfile>,
}

fn default_k() -> usize {
    DEFAULT_K
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self::for_version(SchemaVersion::default())
    }
}

impl RecommenderConfig {
    /// Built-in configuration for a schema version.
    pub fn for_version(schema: SchemaVersion) -> Self {
        Self {
            schema,
            k: DEFAULT_K,
            kmeans: KmeansParams::default(),
            clusters: default_clusters(schema),
        }
    }

    /// Set cluster count.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set k-means parameters.
    pub fn with_kmeans(mut self, kmeans: KmeansParams) -> Self {
        self.kmeans = kmeans;
        self
    }

    /// Replace the cluster table.
    pub fn with_clusters(mut self, clusters: Vec<ClusterProfile>) -> Self {
        self.clusters = clusters;
        self
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut cfg: Self = serde_json::from_str(json)?;
        if cfg.clusters.is_empty() {
            cfg.clusters = default_clusters(cfg.schema);
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every invariant the pipeline relies on.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1".into(),
            });
        }
        self.kmeans.validate()?;

        let mut ids = HashSet::new();
        for c in &self.clusters {
            if !ids.insert(c.id) {
                return Err(Error::InvalidParameter {
                    name: "clusters",
                    message: format!("duplicate cluster id {}", c.id),
                });
            }
            c.weights.validate()?;
            if c.candidates.iter().any(|m| m.major.trim().is_empty()) {
                return Err(Error::InvalidParameter {
                    name: "clusters",
                    message: format!("cluster {} has a candidate without a name", c.id),
                });
            }
        }
        if (0..self.clusters.len()).any(|id| !ids.contains(&id)) {
            return Err(Error::InvalidParameter {
                name: "clusters",
                message: "cluster ids must be 0..n without gaps".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::recommend::WeightTable;
    use crate::ErrorKind;

    #[test]
    fn test_default_is_valid() {
        for v in [SchemaVersion::V1, SchemaVersion::V2] {
            RecommenderConfig::for_version(v).validate().unwrap();
        }
    }

    #[test]
    fn test_json_round_trip() {
        let cfg = RecommenderConfig::default().with_k(4);
        let back = RecommenderConfig::from_json(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let cfg = RecommenderConfig::from_json(r#"{ "schema": "v1", "kmeans": { "seed": 7 } }"#)
            .unwrap();
        assert_eq!(cfg.schema, SchemaVersion::V1);
        assert_eq!(cfg.k, DEFAULT_K);
        assert_eq!(cfg.kmeans.seed, 7);
        assert_eq!(cfg.kmeans.n_init, KmeansParams::default().n_init);
        assert_eq!(cfg.clusters, default_clusters(SchemaVersion::V1));
    }

    #[test]
    fn test_bad_weights_rejected() {
        let mut cfg = RecommenderConfig::default();
        cfg.clusters[1].weights = WeightTable {
            interest: 0.6,
            activity: 0.3,
            skill: 0.3,
        };
        let err = RecommenderConfig::from_json(&cfg.to_json().unwrap()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }

    #[test]
    fn test_gap_in_cluster_ids_rejected() {
        let mut cfg = RecommenderConfig::default();
        cfg.clusters[2].id = 5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = RecommenderConfig::from_json("{ k: }").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_zero_k_rejected() {
        assert!(RecommenderConfig::default().with_k(0).validate().is_err());
    }
}
