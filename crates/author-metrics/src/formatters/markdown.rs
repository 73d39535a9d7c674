//! Markdown output formatting.

use crate::models::{AnalysisReport, YearAnalysis};

/// Format an analysis report as Markdown.
#[must_use]
pub fn format_report_markdown(report: &AnalysisReport) -> String {
    let author = &report.author;
    let mut output =
        format!("# Author Impact Analysis: {} {}\n\n", author.first_name, author.last_name);

    output.push_str(&format!(
        "**Country**: {} | **Institution**: {}\n\n",
        author.cntry, author.inst_name
    ));

    output.push_str(
        "| Year | Papers | Papers/yr | Citations | H-index (ns) | Self-citation | Rank (ns) |\n",
    );
    output.push_str("|------|--------|-----------|-----------|--------------|---------------|-----------|\n");
    for analysis in report.analysis.values() {
        output.push_str(&format_year_row(analysis));
    }
    output.push('\n');

    for analysis in report.analysis.values() {
        output.push_str(&format!("## {}\n\n", analysis.year));
        if analysis.has_data() {
            output.push_str(&format!(
                "**Field**: {} | **Subfield**: {}\n\n",
                analysis.main_field, analysis.subfield
            ));
        }
        output.push_str(&analysis.summary.replace('\n', "\n\n"));
        output.push_str("\n\n");
    }

    output
}

fn format_year_row(analysis: &YearAnalysis) -> String {
    if !analysis.has_data() {
        return format!("| {} | - | - | - | - | - | - |\n", analysis.year);
    }
    format!(
        "| {} | {} | {:.2} | {} | {:.2} | {:.2}% ({}) | {} |\n",
        analysis.year,
        analysis.total_publications,
        analysis.average_publications_per_year,
        analysis.cites,
        analysis.h_index_ns,
        analysis.self_citation_rate * 100.0,
        analysis.self_citation_level,
        analysis.rank_ns,
    )
}
