use crate::classify::rules::ScopeContext;
use crate::contracts::envelope::{self, SuccessEnvelope};
use crate::contracts::types::SummaryData;
use crate::reconcile::aggregate::{AggregateInput, aggregate, month_breakdown};
use crate::reconcile::validate::validate;
use crate::{EngineResult, commands::common};

#[derive(Debug, Clone)]
pub struct SummaryOptions {
    pub transactions_path: String,
    pub expenses_path: Option<String>,
    pub rules_path: Option<String>,
    pub manual_salary: f64,
    pub month: Option<String>,
}

/// Reconciles the records files into a month summary (or the all-months
/// aggregate) plus a per-month breakdown and the validation report.
pub fn run(options: SummaryOptions) -> EngineResult<SuccessEnvelope> {
    let transactions = common::load_transactions(&options.transactions_path)?;
    let planned_expenses = common::load_planned_expenses(options.expenses_path.as_deref())?;
    let rules = common::load_rules(options.rules_path.as_deref())?;

    // Scope selection happens here, at the component boundary: monthly views
    // keep bill settlements in the sums, the aggregate view excludes them.
    let scope = match options.month {
        Some(_) => ScopeContext::Monthly,
        None => ScopeContext::Global,
    };

    let summary = aggregate(
        &AggregateInput {
            transactions: &transactions,
            planned_expenses: &planned_expenses,
            manual_salary: options.manual_salary,
            month: options.month.as_deref(),
            scope,
        },
        &rules,
    );

    let months = match options.month {
        Some(_) => Vec::new(),
        None => month_breakdown(
            &transactions,
            &planned_expenses,
            options.manual_salary,
            &rules,
        ),
    };

    let validation = validate(
        &transactions,
        &planned_expenses,
        options.manual_salary,
        options.month.as_deref(),
        scope,
        &rules,
    );

    envelope::success(
        "summary",
        SummaryData {
            scope: scope_label(scope).to_string(),
            month: options.month,
            summary,
            months,
            validation,
        },
    )
}

pub(crate) fn scope_label(scope: ScopeContext) -> &'static str {
    match scope {
        ScopeContext::Global => "global",
        ScopeContext::Monthly => "monthly",
    }
}
