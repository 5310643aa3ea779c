use std::fs;

use serde_json::Value;

use crate::classify::rules::RuleSet;
use crate::contracts::types::CandidateRow;
use crate::import::statement::StatementCandidate;
use crate::records::{
    PlannedExpense, RecordIssue, Transaction, planned_expense_from_value, transaction_from_value,
};
use crate::{EngineError, EngineResult};

pub fn read_input_file(path: &str, what: &str) -> EngineResult<String> {
    fs::read_to_string(path)
        .map_err(|error| EngineError::input_file_unreadable(path, what, &error.to_string()))
}

pub fn load_transactions(path: &str) -> EngineResult<Vec<Transaction>> {
    let items = load_record_array(path, "transactions")?;
    let mut transactions = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let transaction = transaction_from_value(index, item)
            .map_err(|issue| records_issue_error(path, "transactions", &issue))?;
        transactions.push(transaction);
    }
    Ok(transactions)
}

pub fn load_planned_expenses(path: Option<&str>) -> EngineResult<Vec<PlannedExpense>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let items = load_record_array(path, "planned expenses")?;
    let mut expenses = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let expense = planned_expense_from_value(index, item)
            .map_err(|issue| records_issue_error(path, "planned expenses", &issue))?;
        expenses.push(expense);
    }
    Ok(expenses)
}

pub fn load_rules(path: Option<&str>) -> EngineResult<RuleSet> {
    let Some(path) = path else {
        return Ok(RuleSet::default());
    };

    let body = read_input_file(path, "rules")?;
    serde_json::from_str::<RuleSet>(&body)
        .map_err(|error| EngineError::invalid_rules_file(path, &error.to_string()))
}

pub fn candidate_row(source_row: i64, candidate: &StatementCandidate) -> CandidateRow {
    CandidateRow {
        row: source_row,
        date: candidate.date.format("%Y-%m-%d").to_string(),
        value: candidate.value,
        entry_type: candidate.entry_type.as_str().to_string(),
        description: candidate.description.clone(),
    }
}

fn load_record_array(path: &str, what: &str) -> EngineResult<Vec<Value>> {
    let body = read_input_file(path, what)?;
    let parsed = serde_json::from_str::<Value>(&body)
        .map_err(|error| EngineError::invalid_records_file(path, what, &error.to_string()))?;

    let Some(items) = parsed.as_array() else {
        return Err(EngineError::invalid_records_file(
            path,
            what,
            "expected a top-level JSON array of record objects",
        ));
    };
    Ok(items.clone())
}

fn records_issue_error(path: &str, what: &str, issue: &RecordIssue) -> EngineError {
    EngineError::invalid_records_file(
        path,
        what,
        &format!("record {} ({}): {}", issue.record, issue.field, issue.detail),
    )
}
