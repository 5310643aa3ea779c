use std::collections::BTreeMap;

use crate::classify::rules::{RuleSet, ScopeContext};
use crate::contracts::types::MonthSummary;
use crate::records::{EntryType, PlannedExpense, Transaction};
use crate::reconcile::balance::{calculation_detail, round_money, saldo_final};
use crate::reconcile::month::{month_key, parse_month_label, same_month_label};

pub const GLOBAL_SCOPE_LABEL: &str = "todos os meses";

#[derive(Debug, Clone)]
pub struct AggregateInput<'a> {
    pub transactions: &'a [Transaction],
    pub planned_expenses: &'a [PlannedExpense],
    pub manual_salary: f64,
    /// Canonical month label filter; `None` aggregates the whole set.
    pub month: Option<&'a str>,
    /// Chosen by the caller: `Monthly` when a month filter is active,
    /// `Global` otherwise.
    pub scope: ScopeContext,
}

/// Buckets transactions and planned expenses, applies the ignore and salary
/// classifiers, and derives the month summary. Pure function; empty inputs
/// yield an all-zero summary and untyped transactions are skipped from the
/// typed sums.
pub fn aggregate(input: &AggregateInput<'_>, rules: &RuleSet) -> MonthSummary {
    let mut salario_detectado = 0.0;
    let mut outras_entradas = 0.0;
    let mut total_saidas = 0.0;

    for transaction in input.transactions {
        if let Some(filter) = input.month
            && !same_month_label(&month_key(transaction.date), filter)
        {
            continue;
        }
        if rules.is_ignorable(&transaction.description, input.scope) {
            continue;
        }

        match transaction.entry_type {
            Some(EntryType::Entrada) => {
                if rules.is_salary(&transaction.description) {
                    salario_detectado += transaction.value;
                } else {
                    outras_entradas += transaction.value;
                }
            }
            Some(EntryType::Saida) => total_saidas += transaction.value,
            None => {}
        }
    }

    let mut total_despesas_forms = 0.0;
    for expense in input.planned_expenses {
        if let Some(filter) = input.month
            && !same_month_label(&expense.month, filter)
        {
            continue;
        }
        total_despesas_forms += expense.derived_total();
    }

    salario_detectado = round_money(salario_detectado);
    outras_entradas = round_money(outras_entradas);
    total_saidas = round_money(total_saidas);
    total_despesas_forms = round_money(total_despesas_forms);

    // Detected payroll deposits always take precedence over the manual
    // estimate.
    let salario = if salario_detectado > 0.0 {
        salario_detectado
    } else {
        round_money(input.manual_salary)
    };

    MonthSummary {
        month: input
            .month
            .map(str::to_string)
            .unwrap_or_else(|| GLOBAL_SCOPE_LABEL.to_string()),
        total_entradas: round_money(salario + outras_entradas),
        outras_entradas,
        total_saidas,
        total_despesas_forms,
        salario,
        salario_detectado,
        saldo_final: saldo_final(salario, outras_entradas, total_saidas, total_despesas_forms),
        detalhes_calculo: calculation_detail(
            salario,
            outras_entradas,
            total_saidas,
            total_despesas_forms,
        ),
    }
}

/// One summary per distinct month key present in the input, in chronological
/// order. Planned-expense months that do not parse as canonical labels sort
/// last, alphabetically.
pub fn month_breakdown(
    transactions: &[Transaction],
    planned_expenses: &[PlannedExpense],
    manual_salary: f64,
    rules: &RuleSet,
) -> Vec<MonthSummary> {
    let mut ordered: BTreeMap<(i32, u32), String> = BTreeMap::new();
    let mut unrecognized: BTreeMap<String, String> = BTreeMap::new();

    for transaction in transactions {
        let label = month_key(transaction.date);
        if let Some(key) = parse_month_label(&label) {
            ordered.entry(key).or_insert(label);
        }
    }
    for expense in planned_expenses {
        match parse_month_label(&expense.month) {
            Some(key) => {
                ordered.entry(key).or_insert_with(|| expense.month.clone());
            }
            None => {
                unrecognized
                    .entry(expense.month.to_lowercase())
                    .or_insert_with(|| expense.month.clone());
            }
        }
    }

    ordered
        .into_values()
        .chain(unrecognized.into_values())
        .map(|label| {
            aggregate(
                &AggregateInput {
                    transactions,
                    planned_expenses,
                    manual_salary,
                    month: Some(&label),
                    scope: ScopeContext::Monthly,
                },
                rules,
            )
        })
        .collect()
}
