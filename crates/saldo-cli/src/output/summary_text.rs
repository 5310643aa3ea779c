use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_summary(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("summary output requires a summary object"))?;
    let month_label = get_str(summary, "month");

    let mut lines = vec![
        format!("Reconciliation for {month_label}."),
        String::new(),
        "Totals:".to_string(),
    ];

    lines.extend(format::key_value_rows(&summary_entries(summary), 2));

    if let Some(equation) = summary
        .get("detalhes_calculo")
        .and_then(|detail| detail.get("equation"))
        .and_then(Value::as_str)
    {
        lines.push(String::new());
        lines.push(format!("  Saldo:  {equation}"));
    }

    if let Some(months) = data.get("months").and_then(Value::as_array)
        && !months.is_empty()
    {
        lines.push(String::new());
        lines.push("Per month:".to_string());
        lines.extend(render_months_table(months));
    }

    if let Some(validation) = data.get("validation") {
        lines.push(String::new());
        lines.extend(render_validation_section(validation));
    }

    Ok(lines.join("\n"))
}

pub fn render_validate(data: &Value) -> io::Result<String> {
    let validation = data
        .get("validation")
        .ok_or_else(|| io::Error::other("validate output requires a validation object"))?;
    let scope = get_str(data, "scope");

    let mut lines = vec![format!("Validation report ({scope} scope)."), String::new()];
    lines.extend(format::key_value_rows(
        &[
            (
                "Saldo (classification):",
                format::money(get_f64(validation, "saldo_primary")),
            ),
            (
                "Saldo (cross-check):",
                format::money(get_f64(validation, "saldo_alternate")),
            ),
        ],
        2,
    ));
    lines.push(String::new());
    lines.extend(render_validation_section(validation));

    Ok(lines.join("\n"))
}

fn summary_entries(summary: &Value) -> Vec<(&'static str, String)> {
    vec![
        (
            "Entradas:",
            format::money(get_f64(summary, "total_entradas")),
        ),
        ("Salario:", format::money(get_f64(summary, "salario"))),
        (
            "Outras entradas:",
            format::money(get_f64(summary, "outras_entradas")),
        ),
        ("Saidas:", format::money(get_f64(summary, "total_saidas"))),
        (
            "Despesas planejadas:",
            format::money(get_f64(summary, "total_despesas_forms")),
        ),
        (
            "Saldo final:",
            format::money(get_f64(summary, "saldo_final")),
        ),
    ]
}

fn render_months_table(months: &[Value]) -> Vec<String> {
    let columns = [
        Column {
            name: "Mes",
            align: Align::Left,
        },
        Column {
            name: "Entradas",
            align: Align::Right,
        },
        Column {
            name: "Saidas",
            align: Align::Right,
        },
        Column {
            name: "Planejado",
            align: Align::Right,
        },
        Column {
            name: "Saldo",
            align: Align::Right,
        },
    ];

    let rows = months
        .iter()
        .map(|month| {
            vec![
                get_str(month, "month").to_string(),
                format::money(get_f64(month, "total_entradas")),
                format::money(get_f64(month, "total_saidas")),
                format::money(get_f64(month, "total_despesas_forms")),
                format::money(get_f64(month, "saldo_final")),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table(&columns, &rows)
}

fn render_validation_section(validation: &Value) -> Vec<String> {
    let errors = issue_lines(validation, "errors");
    let warnings = issue_lines(validation, "warnings");
    let is_valid = validation
        .get("is_valid")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let mut lines = Vec::new();
    if is_valid {
        lines.push("Validation: the cross-check formula agrees.".to_string());
    } else {
        lines.push("Validation: the cross-check formula disagrees.".to_string());
    }

    let no_issues = errors.is_empty() && warnings.is_empty();
    if !errors.is_empty() {
        lines.push(String::new());
        lines.push("Errors:".to_string());
        lines.extend(errors);
    }
    if !warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings:".to_string());
        lines.extend(warnings);
    }
    if no_issues {
        lines.push("No data-quality issues found.".to_string());
    }

    lines
}

fn issue_lines(validation: &Value, key: &str) -> Vec<String> {
    let Some(issues) = validation.get(key).and_then(Value::as_array) else {
        return Vec::new();
    };

    issues
        .iter()
        .map(|issue| {
            let code = get_str(issue, "code");
            let message = get_str(issue, "message");
            match issue.get("record").and_then(Value::as_i64) {
                Some(record) => format!("  - [{code}] record {record}: {message}"),
                None => format!("  - [{code}] {message}"),
            }
        })
        .collect()
}

fn get_f64(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn get_str<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{render_summary, render_validate};

    fn monthly_payload() -> serde_json::Value {
        json!({
            "scope": "monthly",
            "month": "janeiro 2024",
            "summary": {
                "month": "janeiro 2024",
                "total_entradas": 5000.0,
                "outras_entradas": 0.0,
                "total_saidas": 1200.0,
                "total_despesas_forms": 0.0,
                "salario": 5000.0,
                "salario_detectado": 5000.0,
                "saldo_final": 3800.0,
                "detalhes_calculo": {
                    "formula": "(salario + outras_entradas) - total_saidas - total_despesas_forms",
                    "equation": "(5000.00 + 0.00) - 1200.00 - 0.00 = 3800.00"
                }
            },
            "months": [],
            "validation": {
                "is_valid": true,
                "saldo_primary": 3800.0,
                "saldo_alternate": 3800.0,
                "warnings": [],
                "errors": []
            }
        })
    }

    #[test]
    fn summary_text_shows_totals_and_equation() {
        let rendered = render_summary(&monthly_payload());
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Reconciliation for janeiro 2024."));
            assert!(text.contains("Saldo final:"));
            assert!(text.contains("3800.00"));
            assert!(text.contains("(5000.00 + 0.00) - 1200.00 - 0.00 = 3800.00"));
            assert!(!text.contains("Per month:"));
        }
    }

    #[test]
    fn summary_text_lists_months_in_global_scope() {
        let payload = json!({
            "scope": "global",
            "summary": {
                "month": "todos os meses",
                "total_entradas": 5000.0,
                "outras_entradas": 0.0,
                "total_saidas": 0.0,
                "total_despesas_forms": 0.0,
                "salario": 5000.0,
                "salario_detectado": 5000.0,
                "saldo_final": 5000.0,
                "detalhes_calculo": {
                    "formula": "(salario + outras_entradas) - total_saidas - total_despesas_forms",
                    "equation": "(5000.00 + 0.00) - 0.00 - 0.00 = 5000.00"
                }
            },
            "months": [
                {
                    "month": "janeiro 2024",
                    "total_entradas": 5000.0,
                    "total_saidas": 1200.0,
                    "total_despesas_forms": 0.0,
                    "saldo_final": 3800.0
                }
            ],
            "validation": {
                "is_valid": true,
                "saldo_primary": 5000.0,
                "saldo_alternate": 5000.0,
                "warnings": [],
                "errors": []
            }
        });

        let rendered = render_summary(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("Reconciliation for todos os meses."));
            assert!(text.contains("Per month:"));
            assert!(text.contains("janeiro 2024"));
        }
    }

    #[test]
    fn validate_text_lists_issues() {
        let payload = json!({
            "scope": "global",
            "validation": {
                "is_valid": false,
                "saldo_primary": 1500.0,
                "saldo_alternate": 500.0,
                "warnings": [
                    {"code": "missing_entry_type", "message": "transaction has no type", "record": 3}
                ],
                "errors": [
                    {"code": "balance_mismatch", "message": "formulas disagree by 1000.00"}
                ]
            }
        });

        let rendered = render_validate(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("the cross-check formula disagrees"));
            assert!(text.contains("  - [balance_mismatch] formulas disagree by 1000.00"));
            assert!(text.contains("  - [missing_entry_type] record 3: transaction has no type"));
        }
    }
}
