//! Rendering of result records into the text the model reads.

use rfp_search::{fields, ResultRecord};

/// Labels of a rendered source block, in output order.
const PROJECT_NAME_LABEL: &str = "프로젝트명";
const FUNCTIONAL_LABEL: &str = "기능 요구사항";
const NON_FUNCTIONAL_LABEL: &str = "비기능 요구사항";
const TECHNICAL_LABEL: &str = "기술 요구사항";
const IMPORTANCE_LABEL: &str = "중요도";
const SKILLSETS_LABEL: &str = "스킬셋";
const CHUNK_LABEL: &str = "본문(Chunk)";

/// Render records as labeled source blocks separated by blank lines.
///
/// Every block has the same seven lines in the same order. Missing fields
/// render as empty text. An empty slice renders as an empty string.
pub fn render_sources(records: &[ResultRecord]) -> String {
    records
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_block(record: &ResultRecord) -> String {
    let lines = [
        (PROJECT_NAME_LABEL, record.text(fields::PROJECT_NAME)),
        (FUNCTIONAL_LABEL, record.text(fields::FUNCTIONAL_REQUIREMENTS)),
        (NON_FUNCTIONAL_LABEL, record.text(fields::NON_FUNCTIONAL_REQUIREMENTS)),
        (TECHNICAL_LABEL, record.text(fields::TECHNICAL_REQUIREMENTS)),
        (IMPORTANCE_LABEL, record.text(fields::IMPORTANCE)),
        (SKILLSETS_LABEL, record.skillsets().joined()),
        (CHUNK_LABEL, record.text(fields::CHUNK)),
    ];

    let mut block = String::new();
    for (label, value) in lines {
        block.push_str(label);
        block.push_str(": ");
        block.push_str(&value);
        block.push('\n');
    }
    block
}
