//! Major recommendation scoring.
//!
//! Every cluster id maps to a short, fixed list of candidate majors. A
//! candidate's score is a weighted sum of three sub-criteria:
//!
//! ```text
//! score = w_interest · [interest ∈ allowed]
//!       + w_activity · [activity ∈ allowed]
//!       + w_skill    · |skills ∩ relevant| / |relevant|
//! ```
//!
//! clamped to `[0, 1]`. The weights belong to the cluster and sum to 1.
//! Candidates are returned best-first; equal scores keep table order.

mod table;

pub use table::default_clusters;

use crate::error::{Error, Result};
use crate::profile::ProfileFields;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Tolerance for the weights-sum-to-one check.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Per-cluster weights of the three sub-criteria.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    /// Weight of the interest match.
    pub interest: f64,
    /// Weight of the activity match.
    pub activity: f64,
    /// Weight of the skill overlap.
    pub skill: f64,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            interest: 0.4,
            activity: 0.3,
            skill: 0.3,
        }
    }
}

impl WeightTable {
    /// Sum of the three weights.
    pub fn total(&self) -> f64 {
        self.interest + self.activity + self.skill
    }

    /// Weights must be finite, non-negative and sum to 1.
    pub fn validate(&self) -> Result<()> {
        let parts = [self.interest, self.activity, self.skill];
        if parts.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(Error::InvalidParameter {
                name: "weights",
                message: format!("weights must be finite and non-negative, got {parts:?}"),
            });
        }
        if (self.total() - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(Error::InvalidParameter {
                name: "weights",
                message: format!("weights must sum to 1, got {}", self.total()),
            });
        }
        Ok(())
    }
}

/// A major offered for a cluster, with the sets it is matched against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMajor {
    /// Major name.
    pub major: String,
    /// Academic interests that count as a match.
    #[serde(default)]
    pub interests: Vec<String>,
    /// Activities that count as a match.
    #[serde(default)]
    pub activities: Vec<String>,
    /// Skills relevant to the major.
    #[serde(default)]
    pub skills: Vec<String>,
}

impl CandidateMajor {
    /// Candidate with empty match sets.
    pub fn new(major: impl Into<String>) -> Self {
        Self {
            major: major.into(),
            interests: Vec::new(),
            activities: Vec::new(),
            skills: Vec::new(),
        }
    }

    /// Set matching interests.
    pub fn with_interests(mut self, labels: &[&str]) -> Self {
        self.interests = labels.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set matching activities.
    pub fn with_activities(mut self, labels: &[&str]) -> Self {
        self.activities = labels.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set relevant skills.
    pub fn with_skills(mut self, labels: &[&str]) -> Self {
        self.skills = labels.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// One cluster's label, weights and candidate list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterProfile {
    /// Cluster id.
    pub id: usize,
    /// Human-readable orientation, e.g. "Analytical-Oriented".
    pub label: String,
    /// Sub-criteria weights.
    #[serde(default)]
    pub weights: WeightTable,
    /// Candidates in presentation order.
    pub candidates: Vec<CandidateMajor>,
}

/// A scored candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajorScore {
    /// Major name.
    pub major: String,
    /// Score in `[0, 1]`.
    pub score: f64,
}

/// Sort best-first. Equal scores keep their incoming order.
pub fn rank(mut scores: Vec<MajorScore>) -> Vec<MajorScore> {
    // `sort_by` is stable.
    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
    scores
}

/// Scores profiles against a cluster table.
#[derive(Debug, Clone)]
pub struct Scorer {
    clusters: Vec<ClusterProfile>,
}

impl Scorer {
    /// Scorer over a cluster table, ordered by cluster id.
    pub fn new(mut clusters: Vec<ClusterProfile>) -> Self {
        clusters.sort_by_key(|c| c.id);
        Self { clusters }
    }

    /// The cluster table.
    pub fn clusters(&self) -> &[ClusterProfile] {
        &self.clusters
    }

    /// Table entry for a cluster id.
    ///
    /// Ids past the end of the table wrap around, so a clustering run with
    /// more groups than the table describes still gets a recommendation.
    pub fn cluster(&self, cluster_id: usize) -> Option<&ClusterProfile> {
        if self.clusters.is_empty() {
            return None;
        }
        let idx = cluster_id % self.clusters.len();
        if idx != cluster_id {
            log::debug!("cluster {cluster_id} not in table, using entry {idx}");
        }
        self.clusters.get(idx)
    }

    /// Orientation label for a cluster id.
    pub fn cluster_label(&self, cluster_id: usize) -> Option<&str> {
        self.cluster(cluster_id).map(|c| c.label.as_str())
    }

    /// Score every candidate of `cluster_id` for `profile`, best first.
    pub fn score<P: ProfileFields + ?Sized>(&self, profile: &P, cluster_id: usize) -> Vec<MajorScore> {
        let Some(cluster) = self.cluster(cluster_id) else {
            return Vec::new();
        };

        let skills: HashSet<&str> = profile.skill_labels().into_iter().collect();
        let scored = cluster
            .candidates
            .iter()
            .map(|c| MajorScore {
                major: c.major.clone(),
                score: candidate_score(profile, &skills, c, &cluster.weights),
            })
            .collect();
        rank(scored)
    }
}

fn candidate_score<P: ProfileFields + ?Sized>(
    profile: &P,
    skills: &HashSet<&str>,
    candidate: &CandidateMajor,
    weights: &WeightTable,
) -> f64 {
    let mut score = 0.0;

    if candidate.interests.iter().any(|i| i == profile.interest()) {
        score += weights.interest;
    }
    if candidate.activities.iter().any(|a| a == profile.activity()) {
        score += weights.activity;
    }

    let relevant: HashSet<&str> = candidate.skills.iter().map(String::as_str).collect();
    if !relevant.is_empty() {
        let overlap = relevant.intersection(skills).count();
        score += weights.skill * overlap as f64 / relevant.len() as f64;
    }

    score.clamp(0.0, 1.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::profile::StudentProfile;
    use crate::schema::SchemaVersion;
    use proptest::prelude::*;

    fn scorer() -> Scorer {
        Scorer::new(default_clusters(SchemaVersion::V2))
    }

    fn ms(major: &str, score: f64) -> MajorScore {
        MajorScore {
            major: major.into(),
            score,
        }
    }

    #[test]
    fn test_rank_ties_keep_candidate_order() {
        let ranked = rank(vec![ms("A", 0.5), ms("B", 0.5), ms("C", 0.3)]);
        let names: Vec<_> = ranked.iter().map(|m| m.major.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);

        let ranked = rank(vec![ms("C", 0.3), ms("B", 0.5), ms("A", 0.5)]);
        let names: Vec<_> = ranked.iter().map(|m| m.major.as_str()).collect();
        assert_eq!(names, ["B", "A", "C"]);
    }

    #[test]
    fn test_analytical_profile_on_cluster_zero() {
        let p = StudentProfile::new("Iis", "Ilmu Komputer", "Robotik")
            .with_skills(["Analisis Data", "Problem Solving"]);
        let ranked = scorer().score(&p, 0);

        assert_eq!(ranked[0].major, "Ilmu Komputer");
        // Interest + activity matched, two of three relevant skills.
        let w = WeightTable::default();
        let expected = w.interest + w.activity + w.skill * 2.0 / 3.0;
        assert!((ranked[0].score - expected).abs() < 1e-12);
        assert!(ranked[0].score < 1.0);
    }

    #[test]
    fn test_score_components() {
        let s = Scorer::new(vec![ClusterProfile {
            id: 0,
            label: "T".into(),
            weights: WeightTable {
                interest: 0.5,
                activity: 0.25,
                skill: 0.25,
            },
            candidates: vec![
                CandidateMajor::new("Only interest").with_interests(&["Fisika"]),
                CandidateMajor::new("Only activity").with_activities(&["Debat"]),
                CandidateMajor::new("Half skills").with_skills(&["Menulis", "Desain"]),
                CandidateMajor::new("No skills listed"),
            ],
        }]);
        let p = StudentProfile::new("n", "Fisika", "Debat").with_skills(["Menulis"]);
        let ranked = s.score(&p, 0);

        let by_name = |name: &str| ranked.iter().find(|m| m.major == name).unwrap().score;
        assert_eq!(by_name("Only interest"), 0.5);
        assert_eq!(by_name("Only activity"), 0.25);
        assert_eq!(by_name("Half skills"), 0.125);
        assert_eq!(by_name("No skills listed"), 0.0);
    }

    #[test]
    fn test_duplicate_relevant_skills_counted_once() {
        let s = Scorer::new(vec![ClusterProfile {
            id: 0,
            label: "T".into(),
            weights: WeightTable::default(),
            candidates: vec![CandidateMajor::new("M").with_skills(&["Desain", "Desain"])],
        }]);
        let p = StudentProfile::new("n", "", "x").with_skills(["Desain"]);
        assert!((s.score(&p, 0)[0].score - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_cluster_ids_wrap() {
        let s = scorer();
        assert_eq!(s.cluster_label(0), Some("Analytical-Oriented"));
        assert_eq!(s.cluster_label(4), Some("Creative-Oriented"));
        let p = StudentProfile::new("n", "Manajemen", "OSIS");
        assert_eq!(s.score(&p, 5), s.score(&p, 2));
    }

    #[test]
    fn test_empty_table() {
        let s = Scorer::new(Vec::new());
        let p = StudentProfile::new("n", "Manajemen", "OSIS");
        assert!(s.score(&p, 0).is_empty());
        assert!(s.cluster_label(0).is_none());
    }

    #[test]
    fn test_weight_validation() {
        assert!(WeightTable::default().validate().is_ok());
        let bad = WeightTable {
            interest: 0.5,
            activity: 0.5,
            skill: 0.5,
        };
        assert!(bad.validate().is_err());
        let negative = WeightTable {
            interest: 1.2,
            activity: -0.2,
            skill: 0.0,
        };
        assert!(negative.validate().is_err());
    }

    proptest! {
        #[test]
        fn scores_bounded_and_sorted(
            interest in prop::sample::select(SchemaVersion::V2.schema().interests().labels().collect::<Vec<_>>()),
            activity in prop::sample::select(SchemaVersion::V2.schema().activities().labels().collect::<Vec<_>>()),
            skills in prop::sample::subsequence(SchemaVersion::V2.schema().skills().to_vec(), 0..=10),
            cluster_id in 0usize..6,
        ) {
            let p = StudentProfile::new("n", interest, activity).with_skills(&skills);
            let ranked = scorer().score(&p, cluster_id);
            prop_assert_eq!(ranked.len(), 3);
            for m in &ranked {
                prop_assert!((0.0..=1.0).contains(&m.score));
            }
            for w in ranked.windows(2) {
                prop_assert!(w[0].score >= w[1].score);
            }
        }
    }
}
