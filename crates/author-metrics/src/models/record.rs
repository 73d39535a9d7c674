//! Author row model matching one line of a yearly table.

use serde::Serialize;

use crate::normalize::{normalize_country, normalize_name, split_full_name};

/// Institution placeholder for rows without one.
pub const UNKNOWN_INSTITUTION: &str = "Unknown";

/// One author in one year's table.
///
/// Built once at load time and never mutated. `(first_name, last_name, cntry)`
/// identifies a person loosely; it is not guaranteed unique.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorRecord {
    /// Dataset year this row belongs to.
    pub year: u16,

    /// Raw "Last, First" name.
    pub authfull: String,

    /// Parsed first name.
    pub first_name: String,

    /// Parsed last name.
    pub last_name: String,

    /// "First Last" display name.
    pub full_name: String,

    /// `authfull` after name normalization, used for exact matching.
    #[serde(skip)]
    pub name_key: String,

    /// Lowercase country code.
    pub cntry: String,

    /// Lowercase institution, "unknown" when the table has none.
    pub inst_name: String,

    /// Publications in the year's counting window.
    pub total_pubs: i64,

    /// Citations.
    pub cites: i64,

    /// Citations excluding self-citations.
    pub cites_ns: i64,

    /// h-index excluding self-citations.
    pub h_index_ns: f64,

    /// Rank by composite score.
    pub rank: i64,

    /// Rank by composite score excluding self-citations.
    pub rank_ns: i64,

    /// Composite score excluding self-citations.
    pub composite_ns: f64,

    /// Fraction of citations that are self-citations.
    pub self_rate: f64,

    /// Distinct citing papers excluding self-citations.
    pub citing_ns: i64,

    /// First publication year.
    pub firstyr: i64,

    /// Last publication year.
    pub lastyr: i64,

    /// Primary field.
    pub main_field: Option<String>,

    /// Primary subfield.
    pub subfield: Option<String>,

    /// Papers as single, first or last author.
    pub npsfl: i64,

    /// Citations to papers as single or first author.
    pub cpsf: i64,

    /// Single-author papers.
    pub nps: i64,
}

impl AuthorRecord {
    /// Create a record from the identity columns; every metric starts at zero.
    #[must_use]
    pub fn new(year: u16, authfull: &str, cntry: &str, inst_name: Option<&str>) -> Self {
        let (first_name, last_name) = split_full_name(authfull);
        let full_name = format!("{first_name} {last_name}");
        let inst_name = inst_name.unwrap_or(UNKNOWN_INSTITUTION).trim().to_lowercase();

        Self {
            year,
            authfull: authfull.to_string(),
            name_key: normalize_name(authfull),
            first_name,
            last_name,
            full_name,
            cntry: normalize_country(cntry),
            inst_name,
            total_pubs: 0,
            cites: 0,
            cites_ns: 0,
            h_index_ns: 0.0,
            rank: 0,
            rank_ns: 0,
            composite_ns: 0.0,
            self_rate: 0.0,
            citing_ns: 0,
            firstyr: 0,
            lastyr: 0,
            main_field: None,
            subfield: None,
            npsfl: 0,
            cpsf: 0,
            nps: 0,
        }
    }

    /// Primary field, falling back to "Unknown".
    #[must_use]
    pub fn main_field_or_default(&self) -> &str {
        self.main_field.as_deref().unwrap_or("Unknown")
    }

    /// Primary subfield, falling back to "Unknown".
    #[must_use]
    pub fn subfield_or_default(&self) -> &str {
        self.subfield.as_deref().unwrap_or("Unknown")
    }

    /// Check whether this row's stored name matches any normalized variant.
    #[must_use]
    pub fn matches_name(&self, variants: &[String]) -> bool {
        variants.iter().any(|v| *v == self.name_key)
    }
}
