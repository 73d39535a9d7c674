//! Request models for the HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Output format for analysis reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Structured JSON.
    #[default]
    Json,
    /// Human readable Markdown.
    Markdown,
}

/// Body of `POST /search_author`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Substring of the first name.
    #[serde(default)]
    pub first_name: Option<String>,

    /// Substring of the last name.
    #[serde(default)]
    pub last_name: Option<String>,

    /// Country name or code.
    #[serde(default)]
    pub country: Option<String>,
}

impl SearchRequest {
    /// First name criterion, ignoring blank input.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        non_blank(self.first_name.as_deref())
    }

    /// Last name criterion, ignoring blank input.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        non_blank(self.last_name.as_deref())
    }

    /// Country criterion, ignoring blank input.
    #[must_use]
    pub fn country(&self) -> Option<&str> {
        non_blank(self.country.as_deref())
    }
}

/// Query string of `POST /analyze_author`.
///
/// Missing names read as empty so [`AnalyzeQuery::validate`] reports them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeQuery {
    /// Exact first name.
    #[serde(default)]
    pub first_name: String,

    /// Exact last name.
    #[serde(default)]
    pub last_name: String,

    /// Optional country name or code.
    #[serde(default)]
    pub country: Option<String>,
}

impl AnalyzeQuery {
    /// Check both names are present.
    pub fn validate(&self) -> AnalysisResult<()> {
        require("first_name", &self.first_name)?;
        require("last_name", &self.last_name)
    }
}

/// Body of `POST /api/generate_analysis`.
///
/// Missing identity fields read as empty so
/// [`GenerateAnalysisRequest::validate`] reports them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateAnalysisRequest {
    /// First name.
    #[serde(default)]
    pub first_name: String,

    /// Last name.
    #[serde(default)]
    pub last_name: String,

    /// Country name or code.
    #[serde(default)]
    pub cntry: String,

    /// Optional institution used to separate namesakes.
    #[serde(default)]
    pub inst_name: Option<String>,

    /// Years to report; all loaded years when omitted or empty.
    #[serde(default)]
    pub years: Option<Vec<u16>>,

    /// Output format.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl GenerateAnalysisRequest {
    /// Check the identity fields are present.
    pub fn validate(&self) -> AnalysisResult<()> {
        require("first_name", &self.first_name)?;
        require("last_name", &self.last_name)?;
        require("cntry", &self.cntry)
    }

    /// Institution filter, ignoring blank input.
    #[must_use]
    pub fn institution(&self) -> Option<&str> {
        non_blank(self.inst_name.as_deref())
    }

    /// Requested years, ascending and deduplicated, defaulting to `supported`.
    #[must_use]
    pub fn requested_years(&self, supported: &[u16]) -> Vec<u16> {
        let mut years = match &self.years {
            Some(years) if !years.is_empty() => years.clone(),
            _ => supported.to_vec(),
        };
        years.sort_unstable();
        years.dedup();
        years
    }
}

fn require(field: &str, value: &str) -> AnalysisResult<()> {
    if value.trim().is_empty() {
        return Err(AnalysisError::validation(field, "cannot be empty"));
    }
    Ok(())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
