//! The grounded answering template.

/// Identifier recorded in built prompt metadata.
pub const GROUNDED_PROMPT_ID: &str = "rfp.grounded.v1";

/// Instruction block for RFP analysis.
///
/// The model must answer only from the supplied sources, use a structured
/// format, invent nothing, and say "정보가 충분하지 않습니다" (not enough
/// information) when the sources fall short.
pub const GROUNDED_PROMPT: &str = "\
당신은 RFP 문서를 분석하고 요구사항을 추출하는 전문가입니다.
아래 제공된 소스 정보만을 사용하여 질문에 답변하세요.
답변은 명확하고 구조화된 형식으로 작성하며, 제공된 소스에 없는 내용은 생성하지 마세요.
정보가 부족한 경우 \"정보가 충분하지 않습니다\"라고 답변하세요.

Query: {{query}}
Sources:
{{sources}}
";
