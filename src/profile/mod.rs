//! Student profiles and their numeric encoding.
//!
//! A [`StudentProfile`] is what a student submits. Reference rows loaded from
//! a dataset carry the same fields under different names; both expose them
//! through [`ProfileFields`], which is all the [`Vectorizer`] needs.
//!
//! ```rust
//! use major_match::profile::{StudentProfile, Vectorizer};
//!
//! let p = StudentProfile::new("Iis", "Ilmu Komputer", "Robotik")
//!     .with_skills(["Analisis Data", "Problem Solving"])
//!     .with_club_count(2)
//!     .with_contribution(4.0)
//!     .with_achievement(5.0);
//!
//! let v = Vectorizer::default().vectorize(&p);
//! assert_eq!(v.len(), 15);
//! assert_eq!(v[0], 1.0); // Ilmu Komputer
//! ```

mod vectorize;

pub use vectorize::{FeatureVector, Vectorizer};

use crate::error::{Error, Result};
use serde::Serialize;

/// Lower bound for contribution / achievement ratings.
pub const RATING_MIN: f64 = 1.0;
/// Upper bound for contribution / achievement ratings.
pub const RATING_MAX: f64 = 5.0;

/// Read access to the fields the vectorizer encodes.
pub trait ProfileFields {
    /// Academic interest label.
    fn interest(&self) -> &str;

    /// Primary extracurricular activity label.
    fn activity(&self) -> &str;

    /// Skill labels, possibly with duplicates or unknown entries.
    fn skill_labels(&self) -> Vec<&str>;

    /// Average contribution rating.
    fn contribution(&self) -> f64;

    /// Average achievement rating.
    fn achievement(&self) -> f64;

    /// Number of clubs joined.
    fn club_count(&self) -> f64;
}

/// Split a comma-joined skill field into trimmed, non-empty labels.
pub fn split_skills(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// A submitted student profile.
///
/// Ratings are clamped to `[1, 5]` and the club count to at least 1 when set.
/// Skills are kept in submission order without duplicates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentProfile {
    name: String,
    interest: String,
    activity: String,
    skills: Vec<String>,
    club_count: u32,
    contribution: f64,
    achievement: f64,
}

impl StudentProfile {
    /// Create a profile with no skills, one club and the lowest ratings.
    pub fn new(
        name: impl Into<String>,
        interest: impl Into<String>,
        activity: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            interest: interest.into(),
            activity: activity.into(),
            skills: Vec::new(),
            club_count: 1,
            contribution: RATING_MIN,
            achievement: RATING_MIN,
        }
    }

    /// Set skills from a list of labels.
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.skills.clear();
        for s in skills {
            let s = s.as_ref().trim();
            if !s.is_empty() && !self.skills.iter().any(|x| x == s) {
                self.skills.push(s.to_string());
            }
        }
        self
    }

    /// Set skills from the comma-joined storage form.
    pub fn with_skills_text(self, text: &str) -> Self {
        let labels: Vec<&str> = split_skills(text).collect();
        self.with_skills(labels)
    }

    /// Set club count (at least 1).
    pub fn with_club_count(mut self, club_count: u32) -> Self {
        self.club_count = club_count.max(1);
        self
    }

    /// Set average contribution rating (clamped to `[1, 5]`).
    pub fn with_contribution(mut self, rating: f64) -> Self {
        self.contribution = clamp_rating(rating);
        self
    }

    /// Set average achievement rating (clamped to `[1, 5]`).
    pub fn with_achievement(mut self, rating: f64) -> Self {
        self.achievement = clamp_rating(rating);
        self
    }

    /// Student name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Skills in submission order.
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Skills in the comma-joined storage form.
    pub fn skills_text(&self) -> String {
        self.skills.join(", ")
    }

    /// Check the submission contract: a non-blank name and an activity.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidProfile("name must not be empty".into()));
        }
        if self.activity.trim().is_empty() {
            return Err(Error::InvalidProfile("an activity is required".into()));
        }
        Ok(())
    }
}

fn clamp_rating(rating: f64) -> f64 {
    if rating.is_nan() {
        RATING_MIN
    } else {
        rating.clamp(RATING_MIN, RATING_MAX)
    }
}

impl ProfileFields for StudentProfile {
    fn interest(&self) -> &str {
        &self.interest
    }

    fn activity(&self) -> &str {
        &self.activity
    }

    fn skill_labels(&self) -> Vec<&str> {
        self.skills.iter().map(String::as_str).collect()
    }

    fn contribution(&self) -> f64 {
        self.contribution
    }

    fn achievement(&self) -> f64 {
        self.achievement
    }

    fn club_count(&self) -> f64 {
        f64::from(self.club_count)
    }
}
