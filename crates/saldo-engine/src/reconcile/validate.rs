use crate::classify::rules::{RuleSet, ScopeContext};
use crate::contracts::types::{ValidationIssue, ValidationReport};
use crate::records::{PlannedExpense, Transaction};
use crate::reconcile::aggregate::{AggregateInput, aggregate};
use crate::reconcile::balance::round_money;
use crate::reconcile::month::same_month_label;

/// Primary and alternate computations must agree to the cent.
pub const BALANCE_TOLERANCE: f64 = 0.01;

/// Sanity-checks the reconciliation: recomputes the balance via the
/// alternate expression `(total_entradas - total_saidas) - (manual_salary -
/// total_despesas_forms)` and flags data-quality defects. Advisory only;
/// the caller still gets its aggregated summary regardless of the outcome.
pub fn validate(
    transactions: &[Transaction],
    planned_expenses: &[PlannedExpense],
    manual_salary: f64,
    month: Option<&str>,
    scope: ScopeContext,
    rules: &RuleSet,
) -> ValidationReport {
    let summary = aggregate(
        &AggregateInput {
            transactions,
            planned_expenses,
            manual_salary,
            month,
            scope,
        },
        rules,
    );

    let saldo_primary = summary.saldo_final;
    let saldo_alternate = round_money(
        (summary.total_entradas - summary.total_saidas)
            - (round_money(manual_salary) - summary.total_despesas_forms),
    );

    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    for (index, transaction) in transactions.iter().enumerate() {
        if let Some(filter) = month
            && !same_month_label(
                &crate::reconcile::month::month_key(transaction.date),
                filter,
            )
        {
            continue;
        }

        let record = (index as i64) + 1;
        if !transaction.value.is_finite() || transaction.value <= 0.0 {
            warnings.push(issue(
                "non_positive_value",
                &format!(
                    "transaction {record} has a non-positive or non-numeric value ({})",
                    transaction.value
                ),
                record,
                "value",
            ));
        }
        if transaction.entry_type.is_none() {
            warnings.push(issue(
                "missing_entry_type",
                &format!("transaction {record} has no entrada/saida tag and is skipped from typed sums"),
                record,
                "type",
            ));
        }
    }

    for (index, expense) in planned_expenses.iter().enumerate() {
        if let Some(filter) = month
            && !same_month_label(&expense.month, filter)
        {
            continue;
        }

        let record = (index as i64) + 1;
        let total = expense.derived_total();
        if !total.is_finite() || total <= 0.0 {
            warnings.push(issue(
                "non_positive_planned_total",
                &format!("planned expense {record} derives a non-positive total ({total})"),
                record,
                "total",
            ));
        }
    }

    if (saldo_primary - saldo_alternate).abs() > BALANCE_TOLERANCE {
        errors.push(issue(
            "balance_mismatch",
            &format!(
                "primary saldo {saldo_primary:.2} disagrees with the alternate computation {saldo_alternate:.2}"
            ),
            0,
            "saldo_final",
        ));
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        saldo_primary,
        saldo_alternate,
        warnings,
        errors,
    }
}

fn issue(code: &str, message: &str, record: i64, field: &str) -> ValidationIssue {
    ValidationIssue {
        code: code.to_string(),
        message: message.to_string(),
        record: if record > 0 { Some(record) } else { None },
        field: Some(field.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::classify::rules::{RuleSet, ScopeContext};
    use crate::records::{EntryType, PlannedExpense, Transaction};

    use super::validate;

    fn transaction(date: &str, value: f64, entry_type: Option<EntryType>, description: &str) -> Transaction {
        Transaction {
            id: None,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap_or(NaiveDate::MIN),
            value,
            entry_type,
            description: description.to_string(),
            category_ref: None,
            contact_ref: None,
        }
    }

    #[test]
    fn agreement_between_formulas_is_valid() {
        // manual salary 200, planned total 100: primary and alternate agree.
        let transactions = vec![transaction(
            "2024-01-12",
            80.0,
            Some(EntryType::Saida),
            "Mercado X",
        )];
        let planned_expenses = vec![PlannedExpense {
            month: "janeiro 2024".to_string(),
            name: "feira".to_string(),
            category_ref: None,
            quantity: 1.0,
            unit_value: None,
            total_value: Some(100.0),
        }];

        let report = validate(
            &transactions,
            &planned_expenses,
            200.0,
            Some("janeiro 2024"),
            ScopeContext::Monthly,
            &RuleSet::default(),
        );

        assert!(report.is_valid);
        assert_eq!(report.saldo_primary, 20.0);
        assert_eq!(report.saldo_alternate, 20.0);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn formula_disagreement_is_a_hard_error_but_still_reports_saldo() {
        let transactions = vec![transaction(
            "2024-01-12",
            500.0,
            Some(EntryType::Entrada),
            "Venda usados",
        )];

        let report = validate(
            &transactions,
            &[],
            1000.0,
            Some("janeiro 2024"),
            ScopeContext::Monthly,
            &RuleSet::default(),
        );

        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, "balance_mismatch");
        assert_eq!(report.saldo_primary, 1500.0);
        assert_eq!(report.saldo_alternate, 500.0);
    }

    #[test]
    fn data_quality_defects_surface_as_warnings() {
        let transactions = vec![
            transaction("2024-01-05", -10.0, Some(EntryType::Saida), "valor invertido"),
            transaction("2024-01-06", 25.0, None, "sem tipo"),
        ];
        let planned_expenses = vec![PlannedExpense {
            month: "janeiro 2024".to_string(),
            name: "zerado".to_string(),
            category_ref: None,
            quantity: 0.0,
            unit_value: None,
            total_value: None,
        }];

        let report = validate(
            &transactions,
            &planned_expenses,
            0.0,
            Some("janeiro 2024"),
            ScopeContext::Monthly,
            &RuleSet::default(),
        );

        let codes = report
            .warnings
            .iter()
            .map(|warning| warning.code.as_str())
            .collect::<Vec<&str>>();
        assert!(codes.contains(&"non_positive_value"));
        assert!(codes.contains(&"missing_entry_type"));
        assert!(codes.contains(&"non_positive_planned_total"));
    }

    #[test]
    fn warnings_respect_the_month_filter() {
        let transactions = vec![transaction("2024-02-05", -10.0, None, "outro mes")];

        let report = validate(
            &transactions,
            &[],
            0.0,
            Some("janeiro 2024"),
            ScopeContext::Monthly,
            &RuleSet::default(),
        );

        assert!(report.warnings.is_empty());
    }
}
