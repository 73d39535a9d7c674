//! Author lookup over the yearly datasets.
//!
//! Three entry points:
//! - [`search_author`]: substring search in the most recent year, for pickers
//! - [`find_latest`]: exact first/last name in the most recent year
//! - [`load_author_data`]: exact cross-year resolution used by the analysis
//!
//! Ambiguity is always reported to the caller; no entry point picks an
//! arbitrary row when several match.

use std::collections::BTreeMap;

use crate::config::defaults;
use crate::dataset::{DatasetStore, YearlyDataset};
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{AuthorRecord, SearchOption, SearchRequest, Suggestion};
use crate::normalize::{name_variants, normalize_country};

/// Result of a fuzzy search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    /// No name criterion, or nothing matched.
    NotFound,
    /// First, last and country given and exactly one row matched.
    Exact(&'a AuthorRecord),
    /// Every matching row otherwise.
    Ambiguous(Vec<SearchOption>),
}

/// Identity used for exact resolution.
#[derive(Debug, Clone, Copy)]
pub struct AuthorQuery<'q> {
    pub first_name: &'q str,
    pub last_name: &'q str,
    pub country: &'q str,
    pub institution: Option<&'q str>,
}

impl AuthorQuery<'_> {
    fn describe(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Rows matched for one identity, by year. Years without a match are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedAuthor<'a> {
    records: BTreeMap<u16, &'a AuthorRecord>,
}

impl<'a> ResolvedAuthor<'a> {
    #[must_use]
    pub fn get(&self, year: u16) -> Option<&'a AuthorRecord> {
        self.records.get(&year).copied()
    }

    /// Years with a match, ascending.
    #[must_use]
    pub fn years(&self) -> Vec<u16> {
        self.records.keys().copied().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Outcome of exact cross-year resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// At least one year matched a single row.
    Found(ResolvedAuthor<'a>),
    /// Some year matched several rows.
    Ambiguous {
        year: u16,
        candidates: Vec<Suggestion>,
    },
    /// No year matched.
    NotFound { suggestions: Vec<Suggestion> },
}

impl<'a> Resolution<'a> {
    /// Turn non-`Found` outcomes into request errors.
    pub fn into_result(self, query: &AuthorQuery<'_>) -> AnalysisResult<ResolvedAuthor<'a>> {
        match self {
            Self::Found(resolved) => Ok(resolved),
            Self::Ambiguous { year, candidates } => Err(AnalysisError::Ambiguous {
                message: format!(
                    "Multiple authors match {} (country: {}, year: {year})",
                    query.describe(),
                    query.country
                ),
                year,
                candidates,
            }),
            Self::NotFound { suggestions } => Err(AnalysisError::not_found(
                format!("No match for {}", query.describe()),
                suggestions,
            )),
        }
    }
}

fn latest(store: &DatasetStore) -> AnalysisResult<&YearlyDataset> {
    store.latest().ok_or(AnalysisError::DataUnavailable { year: defaults::LATEST_YEAR })
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Substring search on first/last name plus exact country, in the most recent year.
///
/// # Errors
///
/// Returns [`AnalysisError::DataUnavailable`] if no year is loaded.
pub fn search_author<'a>(
    store: &'a DatasetStore,
    request: &SearchRequest,
) -> AnalysisResult<SearchOutcome<'a>> {
    let dataset = latest(store)?;

    tracing::info!(
        year = dataset.year(),
        first_name = ?request.first_name(),
        last_name = ?request.last_name(),
        country = ?request.country(),
        "search_author"
    );

    let (first, last) = (request.first_name(), request.last_name());
    if first.is_none() && last.is_none() {
        return Ok(SearchOutcome::NotFound);
    }
    let country = request.country().map(normalize_country);

    let matches: Vec<&AuthorRecord> = dataset
        .records()
        .iter()
        .filter(|r| first.is_none_or(|f| contains_ci(&r.first_name, f)))
        .filter(|r| last.is_none_or(|l| contains_ci(&r.last_name, l)))
        .filter(|r| country.as_ref().is_none_or(|c| r.cntry == *c))
        .collect();

    let complete_query = first.is_some() && last.is_some() && country.is_some();
    Ok(match matches.as_slice() {
        [] => SearchOutcome::NotFound,
        [only] if complete_query => SearchOutcome::Exact(*only),
        rows => SearchOutcome::Ambiguous(rows.iter().map(|r| SearchOption::from(*r)).collect()),
    })
}

/// Exact first/last name lookup in the most recent year.
///
/// The country filter is dropped when it leaves nothing.
///
/// # Errors
///
/// Returns `NotFound` with suggestions, `Ambiguous` when several rows match,
/// or `DataUnavailable` when no year is loaded.
pub fn find_latest<'a>(
    store: &'a DatasetStore,
    first_name: &str,
    last_name: &str,
    country: Option<&str>,
) -> AnalysisResult<&'a AuthorRecord> {
    let dataset = latest(store)?;
    let (first, last) = (first_name.trim().to_lowercase(), last_name.trim().to_lowercase());

    let by_name: Vec<&AuthorRecord> = dataset
        .records()
        .iter()
        .filter(|r| r.first_name.to_lowercase() == first && r.last_name.to_lowercase() == last)
        .collect();

    let country = country.map(normalize_country);
    let mut matched: Vec<&AuthorRecord> = match &country {
        Some(c) => by_name.iter().copied().filter(|r| r.cntry == *c).collect(),
        None => by_name.clone(),
    };
    if matched.is_empty() && country.is_some() {
        tracing::info!(year = dataset.year(), "No match with country, retrying by name only");
        matched = by_name;
    }

    match matched.as_slice() {
        [] => Err(AnalysisError::not_found(
            format!("No match for {first_name} {last_name}"),
            suggestions(store, first_name, last_name),
        )),
        [only] => {
            tracing::info!(author = %only.full_name, year = dataset.year(), "Resolved author");
            Ok(*only)
        }
        rows => Err(AnalysisError::Ambiguous {
            message: format!(
                "Multiple authors match {first_name} {last_name} (year: {})",
                dataset.year()
            ),
            year: dataset.year(),
            candidates: rows.iter().map(|r| Suggestion::from(*r)).collect(),
        }),
    }
}

/// Resolve one identity in every loaded year.
///
/// Per year: name variants plus country, falling back to name only, then the
/// optional institution filter. A year with several rows left makes the whole
/// resolution ambiguous.
#[must_use]
pub fn load_author_data<'a>(store: &'a DatasetStore, query: &AuthorQuery<'_>) -> Resolution<'a> {
    let variants = name_variants(query.first_name, query.last_name);
    let country = normalize_country(query.country);
    let institution = query.institution.map(|i| i.trim().to_lowercase());

    tracing::info!(
        first_name = query.first_name,
        last_name = query.last_name,
        country = %country,
        institution = ?institution,
        "Resolving author across years"
    );

    let mut records = BTreeMap::new();
    for dataset in store.iter() {
        let year = dataset.year();
        let by_name: Vec<&AuthorRecord> =
            dataset.records().iter().filter(|r| r.matches_name(&variants)).collect();

        let mut rows: Vec<&AuthorRecord> =
            by_name.iter().copied().filter(|r| r.cntry == country).collect();
        if rows.is_empty() {
            tracing::debug!(year, "No match with country, retrying by name only");
            rows = by_name;
        }
        if rows.is_empty() {
            tracing::debug!(year, "No matching author");
            continue;
        }

        if let Some(inst) = &institution {
            rows.retain(|r| r.inst_name == *inst);
            if rows.is_empty() {
                tracing::debug!(year, institution = %inst, "No match at institution");
                continue;
            }
        }

        if let [only] = rows.as_slice() {
            tracing::info!(year, authfull = %only.authfull, inst_name = %only.inst_name, "Matched author");
            records.insert(year, *only);
        } else {
            let candidates: Vec<Suggestion> = rows.iter().map(|r| Suggestion::from(*r)).collect();
            tracing::warn!(year, count = candidates.len(), "Multiple matching authors");
            return Resolution::Ambiguous { year, candidates };
        }
    }

    if records.is_empty() {
        return Resolution::NotFound {
            suggestions: suggestions(store, query.first_name, query.last_name),
        };
    }
    Resolution::Found(ResolvedAuthor { records })
}

/// Namesakes from the most recent year: same first initial, same last name.
#[must_use]
pub fn suggestions(store: &DatasetStore, first_name: &str, last_name: &str) -> Vec<Suggestion> {
    let Some(dataset) = store.latest() else {
        return Vec::new();
    };
    let initial = first_name.trim().chars().next().map(|c| c.to_lowercase().collect::<String>());
    let last = last_name.trim().to_lowercase();

    dataset
        .records()
        .iter()
        .filter(|r| r.last_name.to_lowercase() == last)
        .filter(|r| {
            initial.as_ref().is_none_or(|i| r.first_name.to_lowercase().starts_with(i.as_str()))
        })
        .take(defaults::SUGGESTION_LIMIT)
        .map(Suggestion::from)
        .collect()
}
