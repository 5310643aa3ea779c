use crate::import::statement::StatementCandidate;
use crate::records::Transaction;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DedupeReason {
    Batch,
    Existing,
}

impl DedupeReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Batch => "batch",
            Self::Existing => "existing",
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewRow {
    pub candidate: StatementCandidate,
    pub source_row: i64,
}

#[derive(Debug, Clone)]
pub struct DuplicateRecord {
    pub candidate: StatementCandidate,
    pub source_row: i64,
    pub reason: DedupeReason,
    pub matched_row: Option<i64>,
    pub matched_id: Option<String>,
}

/// `|new| + |duplicates|` always equals the input batch size.
#[derive(Debug, Clone)]
pub struct DedupePartition {
    pub new_rows: Vec<NewRow>,
    pub duplicate_rows: Vec<DuplicateRecord>,
}

/// Same transaction if date, value, and type are identical and the
/// descriptions are equal ignoring case. Equality, not substring.
pub fn is_duplicate(candidate: &StatementCandidate, existing: &Transaction) -> bool {
    existing.date == candidate.date
        && value_cents(existing.value) == value_cents(candidate.value)
        && existing.entry_type == Some(candidate.entry_type)
        && existing.description.to_lowercase() == candidate.description.to_lowercase()
}

/// Partitions an import batch into {new, duplicate} against one snapshot of
/// existing records, suppressing within-batch repeats as well. The check is
/// pure classification: concurrent imports of the same statement can both
/// see a row as new, so the store must enforce its own uniqueness constraint
/// at insert time.
pub fn partition_candidates(
    candidates: Vec<StatementCandidate>,
    existing: &[Transaction],
) -> DedupePartition {
    let mut new_rows: Vec<NewRow> = Vec::new();
    let mut duplicate_rows = Vec::new();

    for (index, candidate) in candidates.into_iter().enumerate() {
        let source_row = (index as i64) + 1;

        if let Some(matched) = existing
            .iter()
            .find(|record| is_duplicate(&candidate, record))
        {
            duplicate_rows.push(DuplicateRecord {
                candidate,
                source_row,
                reason: DedupeReason::Existing,
                matched_row: None,
                matched_id: matched.id.clone(),
            });
            continue;
        }

        if let Some(matched) = new_rows
            .iter()
            .find(|accepted| candidates_match(&accepted.candidate, &candidate))
        {
            duplicate_rows.push(DuplicateRecord {
                candidate,
                source_row,
                reason: DedupeReason::Batch,
                matched_row: Some(matched.source_row),
                matched_id: None,
            });
            continue;
        }

        new_rows.push(NewRow {
            candidate,
            source_row,
        });
    }

    DedupePartition {
        new_rows,
        duplicate_rows,
    }
}

fn candidates_match(left: &StatementCandidate, right: &StatementCandidate) -> bool {
    left.date == right.date
        && value_cents(left.value) == value_cents(right.value)
        && left.entry_type == right.entry_type
        && left.description.to_lowercase() == right.description.to_lowercase()
}

fn value_cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}
