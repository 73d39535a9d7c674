//! Response models: suggestions, search options and per-year analyses.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use super::AuthorRecord;

/// A candidate author offered after a failed or ambiguous lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// "First Last" display name.
    pub name: String,
    /// Country code.
    pub cntry: String,
    /// Institution.
    pub institution: String,
    /// Institution, repeated under the request field name.
    pub inst_name: String,
}

impl From<&AuthorRecord> for Suggestion {
    fn from(record: &AuthorRecord) -> Self {
        Self {
            name: format!("{} {}", record.first_name, record.last_name),
            cntry: record.cntry.clone(),
            institution: record.inst_name.clone(),
            inst_name: record.inst_name.clone(),
        }
    }
}

/// One row of an ambiguous fuzzy search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOption {
    /// Raw "Last, First" name.
    pub authfull: String,
    /// Country code.
    pub cntry: String,
    /// Institution.
    pub inst_name: String,
    /// Parsed first name.
    pub first_name: String,
    /// Parsed last name.
    pub last_name: String,
}

impl From<&AuthorRecord> for SearchOption {
    fn from(record: &AuthorRecord) -> Self {
        Self {
            authfull: record.authfull.clone(),
            cntry: record.cntry.clone(),
            inst_name: record.inst_name.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
        }
    }
}

/// Self-citation tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SelfCitationLevel {
    /// Below 10 %.
    #[default]
    Low,
    /// 10 % up to but excluding 20 %.
    Moderate,
    /// 20 % and above.
    High,
}

impl SelfCitationLevel {
    /// Classify a self-citation fraction (0.0–1.0).
    #[must_use]
    pub fn from_rate(rate: f64) -> Self {
        let percent = rate * 100.0;
        if percent < 10.0 {
            Self::Low
        } else if percent < 20.0 {
            Self::Moderate
        } else {
            Self::High
        }
    }

    /// Label as used in responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

impl fmt::Display for SelfCitationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metrics derived for one author in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearAnalysis {
    pub year: u16,
    pub total_publications: i64,
    pub average_publications_per_year: f64,
    pub rank_ns: i64,
    pub rank: i64,
    pub self_citation_rate: f64,
    pub self_citation_level: SelfCitationLevel,
    pub h_index_ns: f64,
    pub cites_ns: i64,
    pub cites: i64,
    pub composite_ns: f64,
    pub citation_ratio_ns: f64,
    pub main_field: String,
    pub subfield: String,
    pub npsfl: i64,
    pub cpsf: i64,
    pub nps: i64,
    /// First active year; serialized as "N/A" when there is no data.
    #[serde(serialize_with = "year_or_na")]
    pub firstyr: Option<i64>,
    /// Last active year; serialized as "N/A" when there is no data.
    #[serde(serialize_with = "year_or_na")]
    pub lastyr: Option<i64>,
    pub summary: String,
}

impl YearAnalysis {
    /// Summary used for years without a matching row.
    pub const NO_DATA_SUMMARY: &'static str = "No data available for this year.";

    /// Zeroed record for a year where the author has no row.
    #[must_use]
    pub fn placeholder(year: u16) -> Self {
        Self {
            year,
            total_publications: 0,
            average_publications_per_year: 0.0,
            rank_ns: 0,
            rank: 0,
            self_citation_rate: 0.0,
            self_citation_level: SelfCitationLevel::Low,
            h_index_ns: 0.0,
            cites_ns: 0,
            cites: 0,
            composite_ns: 0.0,
            citation_ratio_ns: 0.0,
            main_field: "Unknown".to_string(),
            subfield: "Unknown".to_string(),
            npsfl: 0,
            cpsf: 0,
            nps: 0,
            firstyr: None,
            lastyr: None,
            summary: Self::NO_DATA_SUMMARY.to_string(),
        }
    }

    /// Whether this year came from a real row.
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.firstyr.is_some()
    }
}

fn year_or_na<S: Serializer>(year: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
    match year {
        Some(year) => serializer.serialize_i64(*year),
        None => serializer.serialize_str("N/A"),
    }
}

/// Identity echoed back with an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportAuthor {
    pub first_name: String,
    pub last_name: String,
    pub cntry: String,
    pub inst_name: String,
}

/// Response of `POST /api/generate_analysis`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub author: ReportAuthor,
    pub analysis: BTreeMap<u16, YearAnalysis>,
}
