use super::{CandidateMajor, ClusterProfile, WeightTable};
use crate::schema::SchemaVersion;

/// Built-in cluster table for a schema version.
///
/// Three orientations: analytical (0), creative (1) and leadership (2), each with
/// three candidate majors. Match sets use the labels of the given schema.
pub fn default_clusters(version: SchemaVersion) -> Vec<ClusterProfile> {
    match version {
        SchemaVersion::V2 => v2(),
        SchemaVersion::V1 => v1(),
    }
}

fn cluster(id: usize, label: &str, candidates: Vec<CandidateMajor>) -> ClusterProfile {
    ClusterProfile {
        id,
        label: label.to_string(),
        weights: WeightTable::default(),
        candidates,
    }
}

fn v2() -> Vec<ClusterProfile> {
    vec![
        cluster(
            0,
            "Analytical-Oriented",
            vec![
                CandidateMajor::new("Ilmu Komputer")
                    .with_interests(&["Ilmu Komputer", "Fisika"])
                    .with_activities(&["Robotik"])
                    .with_skills(&["Analisis Data", "Problem Solving", "Ketekunan"]),
                CandidateMajor::new("Matematika")
                    .with_interests(&["Fisika", "Kimia", "Ekonomi"])
                    .with_activities(&["Robotik", "Debat"])
                    .with_skills(&["Analisis Data", "Problem Solving", "Ketekunan", "Menulis"]),
                CandidateMajor::new("Statistika")
                    .with_interests(&["Ekonomi", "Biologi", "Psikologi"])
                    .with_activities(&["Robotik", "Jurnalistik"])
                    .with_skills(&["Analisis Data", "Ketekunan"]),
            ],
        ),
        cluster(
            1,
            "Creative-Oriented",
            vec![
                CandidateMajor::new("Desain Komunikasi Visual")
                    .with_interests(&["Ilmu Komunikasi", "Sastra Inggris", "Ilmu Komputer"])
                    .with_activities(&["Seni Rupa", "Jurnalistik"])
                    .with_skills(&["Desain", "Kreativitas", "Kolaborasi"]),
                CandidateMajor::new("Sastra")
                    .with_interests(&["Sastra Inggris", "Psikologi"])
                    .with_activities(&["Teater", "Jurnalistik", "Debat"])
                    .with_skills(&["Menulis", "Kreativitas", "Publik Speaking"]),
                CandidateMajor::new("Film & Media")
                    .with_interests(&["Ilmu Komunikasi", "Sastra Inggris"])
                    .with_activities(&["Teater", "Seni Musik", "Seni Rupa"])
                    .with_skills(&["Kreativitas", "Kolaborasi", "Desain", "Menulis"]),
            ],
        ),
        cluster(
            2,
            "Leadership-Oriented",
            vec![
                CandidateMajor::new("Manajemen")
                    .with_interests(&["Manajemen", "Ekonomi"])
                    .with_activities(&["OSIS", "Pramuka"])
                    .with_skills(&["Leadership", "Negosiasi", "Kolaborasi"]),
                CandidateMajor::new("Ilmu Komunikasi")
                    .with_interests(&["Ilmu Komunikasi", "Psikologi"])
                    .with_activities(&["Debat", "Jurnalistik", "OSIS"])
                    .with_skills(&["Publik Speaking", "Negosiasi", "Menulis"]),
                CandidateMajor::new("Hubungan Internasional")
                    .with_interests(&["Ilmu Komunikasi", "Sastra Inggris", "Ekonomi"])
                    .with_activities(&["Debat", "OSIS"])
                    .with_skills(&["Negosiasi", "Publik Speaking", "Leadership"]),
            ],
        ),
    ]
}

fn v1() -> Vec<ClusterProfile> {
    vec![
        cluster(
            0,
            "Analytical-Oriented",
            vec![
                CandidateMajor::new("Ilmu Komputer")
                    .with_interests(&["IPA"])
                    .with_activities(&["Robotik", "Science Club"])
                    .with_skills(&["Analisis Data"]),
                CandidateMajor::new("Matematika")
                    .with_interests(&["IPA"])
                    .with_activities(&["Science Club"])
                    .with_skills(&["Analisis Data", "Menulis"]),
                CandidateMajor::new("Statistika")
                    .with_interests(&["IPA", "IPS"])
                    .with_activities(&["Science Club", "Robotik"])
                    .with_skills(&["Analisis Data"]),
            ],
        ),
        cluster(
            1,
            "Creative-Oriented",
            vec![
                CandidateMajor::new("Desain Komunikasi Visual")
                    .with_interests(&["Bahasa", "IPS"])
                    .with_activities(&["Musik", "Tari"])
                    .with_skills(&["Desain"]),
                CandidateMajor::new("Sastra")
                    .with_interests(&["Bahasa"])
                    .with_activities(&["Teater", "Jurnalistik"])
                    .with_skills(&["Menulis", "Public Speaking"]),
                CandidateMajor::new("Film & Media")
                    .with_interests(&["Bahasa", "IPS"])
                    .with_activities(&["Teater", "Musik", "Jurnalistik"])
                    .with_skills(&["Desain", "Menulis"]),
            ],
        ),
        cluster(
            2,
            "Leadership-Oriented",
            vec![
                CandidateMajor::new("Manajemen")
                    .with_interests(&["IPS"])
                    .with_activities(&["Paskibra", "Basket", "Futsal"])
                    .with_skills(&["Leadership", "Negoisasi"]),
                CandidateMajor::new("Ilmu Komunikasi")
                    .with_interests(&["IPS", "Bahasa"])
                    .with_activities(&["Jurnalistik", "Paskibra"])
                    .with_skills(&["Public Speaking", "Negoisasi"]),
                CandidateMajor::new("Hubungan Internasional")
                    .with_interests(&["IPS", "Bahasa"])
                    .with_activities(&["Paskibra", "PMR"])
                    .with_skills(&["Public Speaking", "Leadership", "Negoisasi"]),
            ],
        ),
    ]
}
