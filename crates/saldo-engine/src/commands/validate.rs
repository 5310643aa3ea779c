use crate::classify::rules::ScopeContext;
use crate::commands::common;
use crate::commands::summary::{SummaryOptions, scope_label};
use crate::contracts::envelope::{self, SuccessEnvelope};
use crate::contracts::types::ValidateData;
use crate::reconcile::validate::validate;
use crate::EngineResult;

/// Standalone consistency check: the same inputs as `summary`, reporting
/// only the validation outcome. Advisory; a failed report still exits
/// successfully so callers can inspect the diagnostics.
pub fn run(options: SummaryOptions) -> EngineResult<SuccessEnvelope> {
    let transactions = common::load_transactions(&options.transactions_path)?;
    let planned_expenses = common::load_planned_expenses(options.expenses_path.as_deref())?;
    let rules = common::load_rules(options.rules_path.as_deref())?;

    let scope = match options.month {
        Some(_) => ScopeContext::Monthly,
        None => ScopeContext::Global,
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
        "validate",
        ValidateData {
            scope: scope_label(scope).to_string(),
            month: options.month,
            validation,
        },
    )
}
