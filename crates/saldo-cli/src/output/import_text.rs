use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

const PREVIEW_LIMIT: usize = 20;

pub fn render_statement_parse(data: &Value) -> io::Result<String> {
    let candidates = data
        .get("candidates")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("statement parse output requires candidates"))?;
    let path = data.get("path").and_then(Value::as_str).unwrap_or("unknown");

    let count_label = if candidates.len() == 1 {
        format!("Parsed 1 row from `{path}`.")
    } else {
        format!("Parsed {} rows from `{path}`.", candidates.len())
    };

    let mut lines = vec![count_label];
    if candidates.is_empty() {
        return Ok(lines.join("\n"));
    }

    lines.push(String::new());
    lines.push(preview_heading(candidates.len()));
    lines.extend(candidate_table(candidates, &[]));

    Ok(lines.join("\n"))
}

pub fn render_import_analysis(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("import analysis output requires a summary"))?;
    let message = data
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Analysis complete.");

    let mut lines = vec![message.to_string(), String::new(), "Summary:".to_string()];
    lines.extend(format::key_value_rows(
        &[
            ("Rows read:", count(summary, "rows_read")),
            ("New:", count(summary, "new")),
            ("Duplicate:", count(summary, "duplicate")),
        ],
        2,
    ));

    if let Some(new_rows) = data.get("new_rows").and_then(Value::as_array)
        && !new_rows.is_empty()
    {
        lines.push(String::new());
        lines.push("New rows:".to_string());
        lines.extend(candidate_table(new_rows, &[]));
    }

    if let Some(duplicates) = data.get("duplicate_rows").and_then(Value::as_array)
        && !duplicates.is_empty()
    {
        lines.push(String::new());
        lines.push("Duplicates:".to_string());
        lines.extend(candidate_table(
            duplicates,
            &[Column {
                name: "Reason",
                align: Align::Left,
            }],
        ));
    }

    Ok(lines.join("\n"))
}

fn preview_heading(total: usize) -> String {
    if total > PREVIEW_LIMIT {
        format!("Candidates (first {PREVIEW_LIMIT} of {total}):")
    } else {
        "Candidates:".to_string()
    }
}

fn candidate_table(rows: &[Value], extra_columns: &[Column<'_>]) -> Vec<String> {
    let mut columns = vec![
        Column {
            name: "Row",
            align: Align::Right,
        },
        Column {
            name: "Date",
            align: Align::Left,
        },
        Column {
            name: "Value",
            align: Align::Right,
        },
        Column {
            name: "Type",
            align: Align::Left,
        },
        Column {
            name: "Description",
            align: Align::Left,
        },
    ];
    columns.extend_from_slice(extra_columns);
    let with_reason = extra_columns.iter().any(|column| column.name == "Reason");

    let table_rows = rows
        .iter()
        .take(PREVIEW_LIMIT)
        .map(|row| {
            let mut cells = vec![
                row.get("row").and_then(Value::as_i64).unwrap_or(0).to_string(),
                text(row, "date"),
                format::money(row.get("value").and_then(Value::as_f64).unwrap_or(0.0)),
                text(row, "type"),
                text(row, "description"),
            ];
            if with_reason {
                cells.push(duplicate_reason(row));
            }
            cells
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table(&columns, &table_rows)
}

fn duplicate_reason(row: &Value) -> String {
    let reason = row.get("reason").and_then(Value::as_str).unwrap_or("unknown");
    if let Some(matched_id) = row.get("matched_id").and_then(Value::as_str) {
        return format!("{reason} ({matched_id})");
    }
    if let Some(matched_row) = row.get("matched_row").and_then(Value::as_i64) {
        return format!("{reason} (row {matched_row})");
    }
    reason.to_string()
}

fn text(row: &Value, key: &str) -> String {
    row.get(key).and_then(Value::as_str).unwrap_or("").to_string()
}

fn count(summary: &Value, key: &str) -> String {
    summary
        .get(key)
        .and_then(Value::as_i64)
        .unwrap_or(0)
        .to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{render_import_analysis, render_statement_parse};

    #[test]
    fn statement_parse_text_lists_candidates() {
        let payload = json!({
            "path": "extrato.csv",
            "rows_read": 2,
            "candidates": [
                {"row": 1, "date": "2024-01-15", "value": 1234.56, "type": "entrada", "description": "TRANSFERENCIA RECEBIDA"},
                {"row": 2, "date": "2024-01-16", "value": 89.9, "type": "saida", "description": "MERCADO X"}
            ]
        });

        let rendered = render_statement_parse(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Parsed 2 rows from `extrato.csv`."));
            assert!(text.contains("Candidates:"));
            assert!(text.contains("TRANSFERENCIA RECEBIDA"));
            assert!(text.contains("1234.56"));
        }
    }

    #[test]
    fn statement_parse_text_handles_empty_statements() {
        let payload = json!({"path": "extrato.csv", "rows_read": 0, "candidates": []});
        let rendered = render_statement_parse(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert_eq!(text, "Parsed 0 rows from `extrato.csv`.");
        }
    }

    #[test]
    fn import_analysis_text_shows_partition_and_reasons() {
        let payload = json!({
            "statement_path": "extrato.csv",
            "message": "Analyzed 3 statement rows: 2 new, 1 duplicate. No rows were written.",
            "summary": {"rows_read": 3, "new": 2, "duplicate": 1},
            "new_rows": [
                {"row": 2, "date": "2024-01-16", "value": 89.9, "type": "saida", "description": "MERCADO X"},
                {"row": 3, "date": "2024-01-17", "value": 45.0, "type": "saida", "description": "FARMACIA"}
            ],
            "duplicate_rows": [
                {"row": 1, "date": "2024-01-15", "value": 25.5, "type": "saida", "description": "UBER", "reason": "existing", "matched_id": "tx_1"}
            ]
        });

        let rendered = render_import_analysis(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Analyzed 3 statement rows"));
            assert!(text.contains("Rows read:  3"));
            assert!(text.contains("New rows:"));
            assert!(text.contains("Duplicates:"));
            assert!(text.contains("existing (tx_1)"));
        }
    }
}
