//! JSON payloads for author profiles, search results and errors.

use serde_json::{Map, Value, json};

use crate::dataset::FieldMapping;
use crate::error::AnalysisError;
use crate::models::AuthorRecord;
use crate::resolver::SearchOutcome;

/// Full author payload for an exact match.
///
/// Metric labels carry the record's year; `analysis_data` is keyed by that
/// year's literal column names.
#[must_use]
pub fn author_profile(record: &AuthorRecord) -> Value {
    let year = record.year;
    let mapping = FieldMapping::for_year(year);

    let mut metrics = Map::new();
    metrics.insert(format!("Papers (1960-{year})"), json!(record.total_pubs));
    metrics.insert(format!("Citations ({year})"), json!(record.cites_ns));
    metrics.insert(format!("H-Index ({year})"), json!(record.h_index_ns));
    metrics.insert("Composite Score".to_string(), json!(record.composite_ns));
    metrics.insert("Self-Citation %".to_string(), json!(record.self_rate));

    let mut analysis_data = Map::new();
    analysis_data.insert(
        mapping.map_or("total_pubs", |m| m.total_pubs).to_string(),
        json!(record.total_pubs),
    );
    analysis_data.insert(
        mapping.map_or("cites", |m| m.cites).to_string(),
        json!(record.cites_ns),
    );
    analysis_data.insert("h_index".to_string(), json!(record.h_index_ns));
    analysis_data.insert("composite_score".to_string(), json!(record.composite_ns));

    json!({
        "type": "exact",
        "author": {
            "name": record.full_name,
            "first_name": record.first_name,
            "last_name": record.last_name,
            "cntry": record.cntry,
            "institution": record.inst_name,
            "rank": record.rank_ns,
            "main_field": record.main_field_or_default(),
        },
        "metrics": metrics,
        "analysis_data": analysis_data,
    })
}

/// Tagged search result: `not_found`, `ambiguous` with options, or an exact profile.
#[must_use]
pub fn search_response(outcome: &SearchOutcome<'_>) -> Value {
    match outcome {
        SearchOutcome::NotFound => json!({"type": "not_found"}),
        SearchOutcome::Ambiguous(options) => json!({
            "type": "ambiguous",
            "options": options,
        }),
        SearchOutcome::Exact(record) => author_profile(record),
    }
}

/// Error detail object: kind, message and any suggestions.
#[must_use]
pub fn error_detail(err: &AnalysisError) -> Value {
    let mut detail = json!({
        "error": err.kind(),
        "message": err.to_user_message(),
    });

    match err {
        AnalysisError::NotFound { suggestions, .. } => {
            detail["suggestions"] = json!(suggestions);
        }
        AnalysisError::Ambiguous { year, candidates, .. } => {
            detail["year"] = json!(year);
            detail["suggestions"] = json!(candidates);
        }
        AnalysisError::DataUnavailable { year } => {
            detail["year"] = json!(year);
        }
        AnalysisError::Validation { field, .. } => {
            detail["field"] = json!(field);
        }
    }

    detail
}
