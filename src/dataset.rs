//! Reference population input.
//!
//! The reference set is a CSV table with one student per row:
//!
//! ```text
//! nama,minat,ekskul,skill,club_count,contribution,achievement
//! Ani,Ilmu Komputer,Robotik,"Analisis Data, Problem Solving",2,4,5
//! ```
//!
//! Columns are matched by header name and extra columns are ignored. Numeric
//! cells that are blank, unparseable or non-finite read as 0, and unknown labels encode as
//! the sentinel code. Either way a legacy row degrades instead of failing the
//! whole load. Only structural CSV errors are reported.

use crate::error::{Error, Result};
use crate::profile::{split_skills, ProfileFields};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// One reference student, as stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRow {
    /// Academic interest label.
    #[serde(default)]
    pub minat: String,
    /// Primary activity label.
    #[serde(default)]
    pub ekskul: String,
    /// Comma-joined skill labels.
    #[serde(default)]
    pub skill: String,
    /// Number of clubs joined.
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub club_count: Option<f64>,
    /// Average contribution rating.
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub contribution: Option<f64>,
    /// Average achievement rating.
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub achievement: Option<f64>,
}

impl ProfileFields for ReferenceRow {
    fn interest(&self) -> &str {
        &self.minat
    }

    fn activity(&self) -> &str {
        &self.ekskul
    }

    fn skill_labels(&self) -> Vec<&str> {
        split_skills(&self.skill).collect()
    }

    fn contribution(&self) -> f64 {
        cell(self.contribution)
    }

    fn achievement(&self) -> f64 {
        cell(self.achievement)
    }

    fn club_count(&self) -> f64 {
        cell(self.club_count)
    }
}

/// Missing, unparseable or non-finite (`NaN`, `inf`) cells read as 0.
fn cell(v: Option<f64>) -> f64 {
    v.filter(|x| x.is_finite()).unwrap_or(0.0)
}

/// Read reference rows from CSV.
pub fn read_reference<R: io::Read>(reader: R) -> Result<Vec<ReferenceRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows: Vec<ReferenceRow> = Vec::new();
    for record in rdr.deserialize() {
        rows.push(record?);
    }
    log::debug!("loaded {} reference rows", rows.len());
    Ok(rows)
}

/// Read reference rows from a CSV file.
pub fn read_reference_path(path: impl AsRef<Path>) -> Result<Vec<ReferenceRow>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| Error::Dataset(format!("{}: {e}", path.display())))?;
    read_reference(io::BufReader::new(file))
}
