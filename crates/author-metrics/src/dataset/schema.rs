//! Per-year column schema.
//!
//! The yearly tables name the same metrics differently (`np6020` vs `np6023`,
//! `nc2020` vs `nc2323`, ...). [`FieldMapping`] records the literal names for
//! each year, and [`ColumnLayout`] resolves them to positions once per file so
//! a renamed or missing column fails the load instead of reading as zero.

use csv::StringRecord;

use crate::error::{LoadError, LoadResult};
use crate::models::AuthorRecord;

/// Column names shared by every year.
pub mod columns {
    pub const AUTHFULL: &str = "authfull";
    pub const CNTRY: &str = "cntry";
    pub const INST_NAME: &str = "inst_name";
    pub const FIRSTYR: &str = "firstyr";
    pub const LASTYR: &str = "lastyr";
    pub const RANK: &str = "rank";
    pub const RANK_NS: &str = "rank (ns)";
    pub const SELF_RATE: &str = "self%";
    pub const COMPOSITE_NS: &str = "c (ns)";
    pub const CITING_NS: &str = "npciting (ns)";
    pub const FIELD: &str = "sm-field";
    pub const SUBFIELD: &str = "sm-subfield-1";
}

/// Cell values that mean "not available".
const NA_MARKERS: &[&str] = &["nan", "na", "n/a", "#n/a", "null", "none"];

/// Literal column names of the year-specific metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub total_pubs: &'static str,
    pub cites_ns: &'static str,
    pub cites: &'static str,
    pub h_index_ns: &'static str,
    pub npsfl: &'static str,
    pub cpsf: &'static str,
    pub nps: &'static str,
}

const FIELD_MAPPINGS: &[(u16, FieldMapping)] = &[
    (
        2020,
        FieldMapping {
            total_pubs: "np6020",
            cites_ns: "nc2020 (ns)",
            cites: "nc2020",
            h_index_ns: "h20 (ns)",
            npsfl: "npsfl (ns)",
            cpsf: "cpsf (ns)",
            nps: "nps (ns)",
        },
    ),
    (
        2021,
        FieldMapping {
            total_pubs: "np6021",
            cites_ns: "nc2121 (ns)",
            cites: "nc2121",
            h_index_ns: "h21 (ns)",
            npsfl: "npsfl (ns)",
            cpsf: "cpsf (ns)",
            nps: "nps (ns)",
        },
    ),
    (
        2022,
        FieldMapping {
            total_pubs: "np6022",
            cites_ns: "nc2222 (ns)",
            cites: "nc2222",
            h_index_ns: "h22 (ns)",
            npsfl: "npsfl (ns)",
            cpsf: "cpsf (ns)",
            nps: "nps (ns)",
        },
    ),
    (
        2023,
        FieldMapping {
            total_pubs: "np6023",
            cites_ns: "nc2323 (ns)",
            cites: "nc2323",
            h_index_ns: "h23 (ns)",
            npsfl: "npsfl (ns)",
            cpsf: "cpsf (ns)",
            nps: "nps (ns)",
        },
    ),
];

impl FieldMapping {
    /// Mapping for `year`, if the year is supported.
    #[must_use]
    pub fn for_year(year: u16) -> Option<&'static Self> {
        FIELD_MAPPINGS.iter().find(|(y, _)| *y == year).map(|(_, mapping)| mapping)
    }
}

/// Header positions of one yearly table.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    year: u16,
    authfull: usize,
    cntry: usize,
    total_pubs: usize,
    cites_ns: usize,
    cites: usize,
    h_index_ns: usize,
    npsfl: usize,
    cpsf: usize,
    nps: usize,
    inst_name: Option<usize>,
    firstyr: Option<usize>,
    lastyr: Option<usize>,
    rank: Option<usize>,
    rank_ns: Option<usize>,
    self_rate: Option<usize>,
    composite_ns: Option<usize>,
    citing_ns: Option<usize>,
    field: Option<usize>,
    subfield: Option<usize>,
}

impl ColumnLayout {
    /// Resolve the year's columns against a header row.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MissingColumn`] for the first required column that
    /// is not present.
    pub fn resolve(year: u16, mapping: &FieldMapping, headers: &StringRecord) -> LoadResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| find(name).ok_or_else(|| LoadError::missing_column(year, name));

        Ok(Self {
            year,
            authfull: require(columns::AUTHFULL)?,
            cntry: require(columns::CNTRY)?,
            total_pubs: require(mapping.total_pubs)?,
            cites_ns: require(mapping.cites_ns)?,
            cites: require(mapping.cites)?,
            h_index_ns: require(mapping.h_index_ns)?,
            npsfl: require(mapping.npsfl)?,
            cpsf: require(mapping.cpsf)?,
            nps: require(mapping.nps)?,
            inst_name: find(columns::INST_NAME),
            firstyr: find(columns::FIRSTYR),
            lastyr: find(columns::LASTYR),
            rank: find(columns::RANK),
            rank_ns: find(columns::RANK_NS),
            self_rate: find(columns::SELF_RATE),
            composite_ns: find(columns::COMPOSITE_NS),
            citing_ns: find(columns::CITING_NS),
            field: find(columns::FIELD),
            subfield: find(columns::SUBFIELD),
        })
    }

    /// Build a typed record from one data row.
    #[must_use]
    pub fn parse_row(&self, row: &StringRecord) -> AuthorRecord {
        let authfull = cell(row, Some(self.authfull)).unwrap_or_default();
        let cntry = cell(row, Some(self.cntry)).unwrap_or_default();
        let inst_name = cell(row, self.inst_name);

        AuthorRecord {
            total_pubs: int_cell(row, Some(self.total_pubs)),
            cites: int_cell(row, Some(self.cites)),
            cites_ns: int_cell(row, Some(self.cites_ns)),
            h_index_ns: float_cell(row, Some(self.h_index_ns)),
            rank: int_cell(row, self.rank),
            rank_ns: int_cell(row, self.rank_ns),
            composite_ns: float_cell(row, self.composite_ns),
            self_rate: float_cell(row, self.self_rate),
            citing_ns: int_cell(row, self.citing_ns),
            firstyr: int_cell(row, self.firstyr),
            lastyr: int_cell(row, self.lastyr),
            main_field: cell(row, self.field).map(String::from),
            subfield: cell(row, self.subfield).map(String::from),
            npsfl: int_cell(row, Some(self.npsfl)),
            cpsf: int_cell(row, Some(self.cpsf)),
            nps: int_cell(row, Some(self.nps)),
            ..AuthorRecord::new(self.year, authfull, cntry, inst_name)
        }
    }
}

/// Trimmed cell text, `None` when absent, blank or a not-available marker.
fn cell(row: &StringRecord, index: Option<usize>) -> Option<&str> {
    let value = row.get(index?)?.trim();
    if value.is_empty() || NA_MARKERS.iter().any(|m| value.eq_ignore_ascii_case(m)) {
        return None;
    }
    Some(value)
}

/// Integer cell; float text truncates toward zero, anything else reads as 0.
fn int_cell(row: &StringRecord, index: Option<usize>) -> i64 {
    let Some(value) = cell(row, index) else {
        return 0;
    };
    value.parse::<i64>().unwrap_or_else(|_| {
        let parsed = parse_float(value);
        if parsed.is_finite() { parsed.trunc() as i64 } else { 0 }
    })
}

fn float_cell(row: &StringRecord, index: Option<usize>) -> f64 {
    cell(row, index).map(parse_float).filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn parse_float(value: &str) -> f64 {
    value.parse::<f64>().unwrap_or_else(|_| {
        tracing::debug!(value, "Unparseable numeric cell, using 0");
        0.0
    })
}
