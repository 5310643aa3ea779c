use crate::commands::common;
use crate::contracts::envelope::{self, SuccessEnvelope};
use crate::contracts::types::{CandidateRow, StatementParseData};
use crate::import::statement::parse_statement;
use crate::EngineResult;

/// Parses a bank-statement CSV into transaction candidates without touching
/// any existing records. Parse failures fail the whole file.
pub fn parse(path: &str) -> EngineResult<SuccessEnvelope> {
    let content = common::read_input_file(path, "statement")?;
    let candidates = parse_statement(&content)?;

    let rows = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| common::candidate_row((index as i64) + 1, candidate))
        .collect::<Vec<CandidateRow>>();

    envelope::success(
        "statement parse",
        StatementParseData {
            path: path.to_string(),
            rows_read: rows.len() as i64,
            candidates: rows,
        },
    )
}
