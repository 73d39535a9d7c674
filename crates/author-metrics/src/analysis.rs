//! Per-year metrics and narrative for a resolved author.

use std::collections::BTreeMap;

use crate::dataset::DatasetStore;
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{
    AnalysisReport, AuthorRecord, GenerateAnalysisRequest, ReportAuthor, SelfCitationLevel,
    UNKNOWN_INSTITUTION, YearAnalysis,
};
use crate::resolver::{self, AuthorQuery};

/// Publications per active year, rounded to two decimals.
///
/// Zero unless `lastyr > firstyr`.
#[must_use]
pub fn average_publications_per_year(total_pubs: i64, firstyr: i64, lastyr: i64) -> f64 {
    if lastyr > firstyr { round2(raw_average(total_pubs, firstyr, lastyr)) } else { 0.0 }
}

fn raw_average(total_pubs: i64, firstyr: i64, lastyr: i64) -> f64 {
    total_pubs as f64 / (lastyr - firstyr + 1) as f64
}

/// Citations per distinct citing paper, zero when nothing cites the author.
#[must_use]
pub fn citation_ratio(cites_ns: i64, citing_ns: i64) -> f64 {
    if citing_ns > 0 { cites_ns as f64 / citing_ns as f64 } else { 0.0 }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derive the year's metrics from one row.
#[must_use]
pub fn analyze_year(record: &AuthorRecord) -> YearAnalysis {
    let (firstyr, lastyr) = (record.firstyr, record.lastyr);
    let average = if lastyr > firstyr { raw_average(record.total_pubs, firstyr, lastyr) } else { 0.0 };
    let level = SelfCitationLevel::from_rate(record.self_rate);

    let summary = format!(
        "Author Impact Analysis Report for {year}:\n\
         The author has published {total} papers from {firstyr} to {lastyr}, \
         with an average of {average:.2} papers per year.\n\
         The author has been cited {cites} times, with an H-index of {h_index:.2}, \
         and citations from {citing} distinct sources.\n\
         The self-citation rate is {rate:.2}%, which is {level}.\n\
         Research is primarily focused on {subfield}.",
        year = record.year,
        total = record.total_pubs,
        cites = record.cites,
        h_index = record.h_index_ns,
        citing = record.citing_ns,
        rate = record.self_rate * 100.0,
        level = level.as_str().to_lowercase(),
        subfield = record.subfield_or_default(),
    );

    YearAnalysis {
        year: record.year,
        total_publications: record.total_pubs,
        average_publications_per_year: round2(average),
        rank_ns: record.rank_ns,
        rank: record.rank,
        self_citation_rate: record.self_rate,
        self_citation_level: level,
        h_index_ns: record.h_index_ns,
        cites_ns: record.cites_ns,
        cites: record.cites,
        composite_ns: record.composite_ns,
        citation_ratio_ns: citation_ratio(record.cites_ns, record.citing_ns),
        main_field: record.main_field_or_default().to_string(),
        subfield: record.subfield_or_default().to_string(),
        npsfl: record.npsfl,
        cpsf: record.cpsf,
        nps: record.nps,
        firstyr: Some(firstyr),
        lastyr: Some(lastyr),
        summary,
    }
}

/// Resolve the author and build one analysis per requested year.
///
/// Years where the author has no row get [`YearAnalysis::placeholder`].
///
/// # Errors
///
/// - `Validation` for a blank name or country
/// - `DataUnavailable` for a requested year that is not loaded
/// - `Ambiguous` / `NotFound` from resolution
/// - `NotFound` when none of the requested years has data
pub fn generate_analysis(
    store: &DatasetStore,
    request: &GenerateAnalysisRequest,
) -> AnalysisResult<AnalysisReport> {
    request.validate()?;

    let years = request.requested_years(&store.years());
    if let Some(&year) = years.iter().find(|&&y| !store.contains(y)) {
        return Err(AnalysisError::DataUnavailable { year });
    }

    tracing::info!(
        first_name = %request.first_name,
        last_name = %request.last_name,
        cntry = %request.cntry,
        inst_name = ?request.institution(),
        years = ?years,
        "generate_analysis"
    );

    let query = AuthorQuery {
        first_name: &request.first_name,
        last_name: &request.last_name,
        country: &request.cntry,
        institution: request.institution(),
    };
    let resolved = resolver::load_author_data(store, &query).into_result(&query)?;

    let analysis: BTreeMap<u16, YearAnalysis> = years
        .iter()
        .map(|&year| {
            let entry = resolved.get(year).map_or_else(
                || {
                    tracing::debug!(year, "No data for year, using placeholder");
                    YearAnalysis::placeholder(year)
                },
                analyze_year,
            );
            (year, entry)
        })
        .collect();

    if !analysis.values().any(YearAnalysis::has_data) {
        return Err(AnalysisError::not_found(
            format!(
                "No data for {} {} in the requested years",
                request.first_name, request.last_name
            ),
            resolver::suggestions(store, &request.first_name, &request.last_name),
        ));
    }

    Ok(AnalysisReport {
        author: ReportAuthor {
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            cntry: request.cntry.clone(),
            inst_name: request.institution().unwrap_or(UNKNOWN_INSTITUTION).to_string(),
        },
        analysis,
    })
}
