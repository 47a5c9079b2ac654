//! Command handlers for the RFP Analyzer CLI.

pub mod ask;
pub mod generate;
pub mod search;

pub use ask::AskCommand;
pub use generate::GenerateCommand;
pub use search::SearchCommand;

use rfp_core::AppResult;
use serde::Serialize;

/// Print a value to stdout as pretty JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print an analysis the way `--cli` always has: count, sources, then answer.
pub(crate) fn print_report(document_count: usize, sources: &str, response: &str) {
    print!("{}", format_report(document_count, sources, response));
}

fn format_report(document_count: usize, sources: &str, response: &str) -> String {
    format!(
        "Found {} documents matching the query.\n\n--- SOURCES ---\n\n{}\n\n--- MODEL RESPONSE ---\n\n{}\n",
        document_count, sources, response
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_headers_are_followed_by_blank_line() {
        let report = format_report(1, "프로젝트명: A\n", "답변");
        assert_eq!(
            report,
            "Found 1 documents matching the query.\n\
             \n--- SOURCES ---\n\n\
             프로젝트명: A\n\n\
             \n--- MODEL RESPONSE ---\n\n\
             답변\n"
        );
    }

    #[test]
    fn test_report_without_documents() {
        let report = format_report(0, "", "정보가 충분하지 않습니다");
        assert!(report.starts_with("Found 0 documents matching the query.\n"));
        assert!(report.contains("--- SOURCES ---\n\n\n\n--- MODEL RESPONSE ---"));
        assert!(report.ends_with("정보가 충분하지 않습니다\n"));
    }
}
