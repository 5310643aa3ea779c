use crate::commands::common;
use crate::contracts::envelope::{self, SuccessEnvelope};
use crate::contracts::types::{DuplicateRow, ImportAnalysisData, ImportAnalysisSummary};
use crate::import::dedupe::{DuplicateRecord, partition_candidates};
use crate::import::statement::parse_statement;
use crate::EngineResult;

#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub statement_path: String,
    pub existing_path: Option<String>,
}

/// Parses a statement and partitions its rows into {new, duplicate} against
/// one snapshot of existing records. Analysis only: the store decides what
/// to do with each side of the partition and owns insert-time uniqueness.
pub fn analyze(options: AnalyzeOptions) -> EngineResult<SuccessEnvelope> {
    let content = common::read_input_file(&options.statement_path, "statement")?;
    let candidates = parse_statement(&content)?;
    let rows_read = candidates.len() as i64;

    let existing = match options.existing_path.as_deref() {
        Some(path) => common::load_transactions(path)?,
        None => Vec::new(),
    };

    let partition = partition_candidates(candidates, &existing);

    let new_rows = partition
        .new_rows
        .iter()
        .map(|row| common::candidate_row(row.source_row, &row.candidate))
        .collect::<Vec<_>>();
    let duplicate_rows = partition
        .duplicate_rows
        .iter()
        .map(duplicate_row)
        .collect::<Vec<DuplicateRow>>();

    let summary = ImportAnalysisSummary {
        rows_read,
        new: new_rows.len() as i64,
        duplicate: duplicate_rows.len() as i64,
    };
    let message = format!(
        "Analyzed {} statement rows: {} new, {} duplicate. No rows were written.",
        summary.rows_read, summary.new, summary.duplicate
    );

    envelope::success(
        "import analyze",
        ImportAnalysisData {
            statement_path: options.statement_path,
            message,
            summary,
            new_rows,
            duplicate_rows,
        },
    )
}

fn duplicate_row(record: &DuplicateRecord) -> DuplicateRow {
    DuplicateRow {
        row: record.source_row,
        date: record.candidate.date.format("%Y-%m-%d").to_string(),
        value: record.candidate.value,
        entry_type: record.candidate.entry_type.as_str().to_string(),
        description: record.candidate.description.clone(),
        reason: record.reason.as_str().to_string(),
        matched_row: record.matched_row,
        matched_id: record.matched_id.clone(),
    }
}
