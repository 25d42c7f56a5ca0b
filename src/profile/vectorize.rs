use super::ProfileFields;
use crate::schema::{FeatureSchema, SchemaVersion, UNKNOWN_CODE};

/// Encoded profile, laid out as described in [`crate::schema`].
pub type FeatureVector = Vec<f64>;

/// Encodes profiles against one [`FeatureSchema`].
///
/// Never fails: unknown interest/activity labels encode as the sentinel code
/// and unknown skills are ignored, so a malformed row cannot abort a batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vectorizer {
    schema: FeatureSchema,
}

impl Vectorizer {
    /// Vectorizer for a schema.
    pub fn new(schema: FeatureSchema) -> Self {
        Self { schema }
    }

    /// Vectorizer for a schema version.
    pub fn for_version(version: SchemaVersion) -> Self {
        Self::new(version.schema())
    }

    /// Schema in use.
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Encode one profile.
    pub fn vectorize<P: ProfileFields + ?Sized>(&self, profile: &P) -> FeatureVector {
        let mut v = Vec::with_capacity(self.schema.dim());

        let interest = self.schema.interests().code(profile.interest());
        if interest == UNKNOWN_CODE {
            log::debug!("unknown interest label {:?}", profile.interest());
        }
        let activity = self.schema.activities().code(profile.activity());
        if activity == UNKNOWN_CODE {
            log::debug!("unknown activity label {:?}", profile.activity());
        }
        v.push(f64::from(interest));
        v.push(f64::from(activity));

        let selected = profile.skill_labels();
        for skill in self.schema.skills() {
            let flag = selected.contains(skill);
            v.push(if flag { 1.0 } else { 0.0 });
        }

        v.push(profile.contribution());
        v.push(profile.achievement());
        v.push(profile.club_count());
        v
    }

    /// Encode a batch, preserving order.
    pub fn vectorize_all<P: ProfileFields>(&self, profiles: &[P]) -> Vec<FeatureVector> {
        profiles.iter().map(|p| self.vectorize(p)).collect()
    }
}
