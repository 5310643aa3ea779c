use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct EngineError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl EngineError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::new(
            "invalid_argument",
            message,
            vec!["Run `saldo --help` for usage.".to_string()],
        )
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn input_file_unreadable(path: &str, what: &str, detail: &str) -> Self {
        Self::new(
            "input_file_unreadable",
            &format!("Could not read {what} file `{path}`: {detail}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                "Rerun the command with a valid file path.".to_string(),
            ],
        )
    }

    pub fn invalid_records_file(path: &str, what: &str, detail: &str) -> Self {
        Self::new(
            "invalid_records_file",
            &format!("The {what} file `{path}` is not valid: {detail}"),
            vec![
                format!("Provide a JSON array of {what} objects."),
                "Run `saldo summary --help` for the records file schema.".to_string(),
            ],
        )
    }

    pub fn invalid_rules_file(path: &str, detail: &str) -> Self {
        Self::new(
            "invalid_rules_file",
            &format!("The rules file `{path}` is not valid: {detail}"),
            vec![
                "Provide a JSON object with rule list fields.".to_string(),
                "Omit --rules to use the built-in rule set.".to_string(),
            ],
        )
    }

    pub fn statement_schema_mismatch(expected: Vec<String>, actual: Vec<String>) -> Self {
        Self::new(
            "statement_schema_mismatch",
            "Statement headers do not include the required Date/Value/Description columns.",
            vec![
                "Keep the statement header row intact when exporting from your bank.".to_string(),
                "Rerun `saldo statement parse <path>` once the headers match.".to_string(),
            ],
        )
        .with_data(json!({
            "expected_any_of": expected,
            "actual_headers": actual,
        }))
    }

    pub fn statement_parse_failed(row: i64, field: &str, detail: &str) -> Self {
        Self::new(
            "statement_parse_failed",
            &format!("Statement row {row} could not be parsed ({field}): {detail}"),
            vec![
                "Fix or remove the malformed row in the statement file.".to_string(),
                "Rerun `saldo statement parse <path>` to confirm the file reads cleanly."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "row": row,
            "field": field,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
