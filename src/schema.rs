//! Code tables and feature layout.
//!
//! Categorical profile fields are encoded through fixed label → code tables.
//! Codes are positive, unique within a table and never renumbered; a label
//! that is not in the table encodes as [`UNKNOWN_CODE`].
//!
//! Two layouts exist:
//!
//! | Version | Interests | Activities | Skills | Vector length |
//! |---------|-----------|------------|--------|---------------|
//! | [`SchemaVersion::V1`] | 3 (IPA/IPS/Bahasa) | 10 | 6 | 11 |
//! | [`SchemaVersion::V2`] | 10 (faculties) | 10 | 10 | 15 |
//!
//! The vector layout is the same for both:
//!
//! ```text
//! [interest_code, activity_code, skill_flag_1..N, contribution, achievement, club_count]
//! ```

use serde::{Deserialize, Serialize};

/// Code emitted for a label missing from its table.
pub const UNKNOWN_CODE: u32 = 0;

/// Number of leading categorical codes (interest, activity).
pub const N_CATEGORICAL: usize = 2;

/// Number of trailing numeric fields (contribution, achievement, club count).
pub const N_NUMERIC: usize = 3;

/// A label → code table.
#[derive(Debug, Clone, Copy)]
pub struct CodeTable {
    entries: &'static [(&'static str, u32)],
}

impl CodeTable {
    const fn new(entries: &'static [(&'static str, u32)]) -> Self {
        Self { entries }
    }

    /// Code for `label`, or [`UNKNOWN_CODE`] when absent. Matching is exact.
    pub fn code(&self, label: &str) -> u32 {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|&(_, c)| c)
            .unwrap_or(UNKNOWN_CODE)
    }

    /// Whether `label` has a code in this table.
    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|(l, _)| *l == label)
    }

    /// Labels in code order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|&(l, _)| l)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const V2_INTERESTS: CodeTable = CodeTable::new(&[
    ("Ilmu Komputer", 1),
    ("Manajemen", 2),
    ("Psikologi", 3),
    ("Ilmu Komunikasi", 4),
    ("Ekonomi", 5),
    ("Teknik Sipil", 6),
    ("Biologi", 7),
    ("Fisika", 8),
    ("Kimia", 9),
    ("Sastra Inggris", 10),
]);

const V2_ACTIVITIES: CodeTable = CodeTable::new(&[
    ("Debat", 1),
    ("PMR", 2),
    ("OSIS", 3),
    ("Pramuka", 4),
    ("Seni Musik", 5),
    ("Seni Rupa", 6),
    ("Olahraga", 7),
    ("Robotik", 8),
    ("Jurnalistik", 9),
    ("Teater", 10),
]);

const V2_SKILLS: &[&str] = &[
    "Publik Speaking",
    "Analisis Data",
    "Menulis",
    "Leadership",
    "Desain",
    "Negosiasi",
    "Kolaborasi",
    "Kreativitas",
    "Problem Solving",
    "Ketekunan",
];

const V1_INTERESTS: CodeTable = CodeTable::new(&[("IPA", 1), ("IPS", 2), ("Bahasa", 3)]);

const V1_ACTIVITIES: CodeTable = CodeTable::new(&[
    ("Paskibra", 1),
    ("Musik", 2),
    ("Tari", 3),
    ("Science Club", 4),
    ("Futsal", 5),
    ("Teater", 6),
    ("Robotik", 7),
    ("PMR", 8),
    ("Basket", 9),
    ("Jurnalistik", 10),
]);

// "Negoisasi" is the spelling stored in legacy rows.
const V1_SKILLS: &[&str] = &[
    "Public Speaking",
    "Analisis Data",
    "Menulis",
    "Leadership",
    "Desain",
    "Negoisasi",
];

/// Feature schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// Legacy layout: school tracks as interests, six skills.
    V1,
    /// Current layout: faculties as interests, ten skills.
    #[default]
    V2,
}

impl SchemaVersion {
    /// Tables for this version.
    pub fn schema(self) -> FeatureSchema {
        match self {
            SchemaVersion::V1 => FeatureSchema {
                version: self,
                interests: V1_INTERESTS,
                activities: V1_ACTIVITIES,
                skills: V1_SKILLS,
            },
            SchemaVersion::V2 => FeatureSchema {
                version: self,
                interests: V2_INTERESTS,
                activities: V2_ACTIVITIES,
                skills: V2_SKILLS,
            },
        }
    }
}

/// The complete set of tables behind one vector layout.
#[derive(Debug, Clone, Copy)]
pub struct FeatureSchema {
    version: SchemaVersion,
    interests: CodeTable,
    activities: CodeTable,
    skills: &'static [&'static str],
}

impl FeatureSchema {
    /// Schema version.
    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    /// Academic interest table.
    pub fn interests(&self) -> &CodeTable {
        &self.interests
    }

    /// Primary activity table.
    pub fn activities(&self) -> &CodeTable {
        &self.activities
    }

    /// Ordered skill set; position = one-hot index.
    pub fn skills(&self) -> &'static [&'static str] {
        self.skills
    }

    /// Length of every vector produced under this schema.
    pub fn dim(&self) -> usize {
        N_CATEGORICAL + self.skills.len() + N_NUMERIC
    }

    /// Axis names in vector order.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.dim());
        names.push("interest_code".to_string());
        names.push("activity_code".to_string());
        for skill in self.skills {
            names.push(format!("skill_{}", slug(skill)));
        }
        names.push("contribution".to_string());
        names.push("achievement".to_string());
        names.push("club_count".to_string());
        names
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        SchemaVersion::default().schema()
    }
}

fn slug(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_unique_positive(table: &CodeTable) {
        let codes: HashSet<u32> = table.entries.iter().map(|&(_, c)| c).collect();
        assert_eq!(codes.len(), table.len());
        assert!(!codes.contains(&UNKNOWN_CODE));
    }

    #[test]
    fn test_codes_unique_and_positive() {
        for v in [SchemaVersion::V1, SchemaVersion::V2] {
            let s = v.schema();
            assert_unique_positive(s.interests());
            assert_unique_positive(s.activities());
        }
    }

    #[test]
    fn test_codes_are_stable() {
        let s = SchemaVersion::V2.schema();
        assert_eq!(s.interests().code("Ilmu Komputer"), 1);
        assert_eq!(s.interests().code("Sastra Inggris"), 10);
        assert_eq!(s.activities().code("Robotik"), 8);
        assert_eq!(s.activities().code("Teater"), 10);

        let legacy = SchemaVersion::V1.schema();
        assert_eq!(legacy.interests().code("Bahasa"), 3);
        assert_eq!(legacy.activities().code("Robotik"), 7);
    }

    #[test]
    fn test_unknown_label_is_sentinel() {
        let s = FeatureSchema::default();
        assert_eq!(s.interests().code("Astrologi"), UNKNOWN_CODE);
        assert_eq!(s.activities().code(""), UNKNOWN_CODE);
        // Matching is exact, including case.
        assert_eq!(s.activities().code("robotik"), UNKNOWN_CODE);
    }

    #[test]
    fn test_feature_names_align_with_dim() {
        for v in [SchemaVersion::V1, SchemaVersion::V2] {
            let s = v.schema();
            let names = s.feature_names();
            assert_eq!(names.len(), s.dim());
            assert_eq!(names[0], "interest_code");
            assert_eq!(names[3], "skill_analisis_data");
            assert_eq!(names[s.dim() - 1], "club_count");
        }
        assert_eq!(SchemaVersion::V2.schema().dim(), 15);
        assert_eq!(SchemaVersion::V1.schema().dim(), 11);
    }
}
