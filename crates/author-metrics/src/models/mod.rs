//! Data models for author rows, requests and responses.

mod inputs;
mod outputs;
mod record;

pub use inputs::{AnalyzeQuery, GenerateAnalysisRequest, ResponseFormat, SearchRequest};
pub use outputs::{
    AnalysisReport, ReportAuthor, SearchOption, SelfCitationLevel, Suggestion, YearAnalysis,
};
pub use record::{AuthorRecord, UNKNOWN_INSTITUTION};
