//! Analysis result types.

use rfp_search::ResultRecord;
use serde::{Deserialize, Serialize};

/// Question asked when the caller does not supply one.
///
/// Asks for the project name, period, purpose, scope, core technologies,
/// client, briefing date, bid date, presentation date, preferred-bidder
/// announcement date and constraints, answering "내용 없음" for any item the
/// sources lack.
pub const DEFAULT_QUERY: &str = "RFP 문서를 참고해서 사업명, 사업기간, 사업목적, 사업범위, \
핵심기술, 고객사명, 사업설명회날짜, 입찰일자, PT발표일, 우선협상대상자 선정 발표일, \
제약사항을 알려주세요. 단, 해당항목이 없을 경우에는 내용 없음으로 답변해주세요";

/// Number of documents retrieved when the caller does not choose.
pub const DEFAULT_TOP: u32 = 5;

/// Documents retrieved for a query together with the model's answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    /// Records in the order the search service ranked them
    pub documents: Vec<ResultRecord>,

    /// Grounded answer text
    pub response: String,
}

impl Analysis {
    pub fn into_parts(self) -> (Vec<ResultRecord>, String) {
        (self.documents, self.response)
    }
}
