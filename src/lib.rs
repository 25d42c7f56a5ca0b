//! # major-match
//!
//! Student profile → cluster → major recommendation.
//!
//! A profile (academic interest, main extracurricular, skills, ratings) is
//! encoded as a fixed-length feature vector, clustered together with a
//! reference population via standardized k-means, and scored against the
//! candidate majors of the cluster it lands in.
//!
//! ```rust
//! use major_match::{Recommender, StudentProfile};
//! use major_match::dataset::read_reference;
//!
//! let csv = "\
//! minat,ekskul,skill,club_count,contribution,achievement
//! Ilmu Komputer,Robotik,\"Analisis Data, Problem Solving\",2,4,5
//! Manajemen,OSIS,\"Leadership, Negosiasi\",4,5,3
//! Sastra Inggris,Teater,\"Menulis, Kreativitas\",1,3,4
//! ";
//! let reference = read_reference(csv.as_bytes()).unwrap();
//!
//! let me = StudentProfile::new("Iis", "Fisika", "Robotik")
//!     .with_skills(["Analisis Data"])
//!     .with_contribution(4.0)
//!     .with_achievement(4.0);
//!
//! let rec = Recommender::default().recommend(&me, &reference).unwrap();
//! assert!(rec.cluster_id < rec.k);
//! assert_eq!(rec.majors.len(), 3);
//! ```

pub mod cluster;
pub mod config;
pub mod dataset;
/// Error types used across `major_match`.
pub mod error;
pub mod pipeline;
pub mod profile;
pub mod recommend;
pub mod schema;
pub mod session;

pub use cluster::{cluster, ClusterOutcome, Clustering, Kmeans, KmeansParams, Standardizer};
pub use config::RecommenderConfig;
pub use error::{Error, ErrorKind, Result};
pub use pipeline::{Recommendation, Recommender};
pub use profile::{FeatureVector, ProfileFields, StudentProfile, Vectorizer};
pub use recommend::{MajorScore, Scorer};
pub use schema::{FeatureSchema, SchemaVersion};
pub use session::{Page, Session};
