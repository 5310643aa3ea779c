use crate::contracts::types::{CalculationDetail, CalculationOperand};

/// Single source of truth for "how much money is actually left". Planned
/// expenses subtract as if already spent, a deliberately pessimistic
/// planning assumption.
pub const BALANCE_FORMULA: &str =
    "(salario_efetivo + outras_entradas) - total_saidas - total_despesas_forms";

pub fn saldo_final(
    salario_efetivo: f64,
    outras_entradas: f64,
    total_saidas: f64,
    total_despesas_forms: f64,
) -> f64 {
    round_money((salario_efetivo + outras_entradas) - total_saidas - total_despesas_forms)
}

pub fn calculation_detail(
    salario_efetivo: f64,
    outras_entradas: f64,
    total_saidas: f64,
    total_despesas_forms: f64,
) -> CalculationDetail {
    let result = saldo_final(
        salario_efetivo,
        outras_entradas,
        total_saidas,
        total_despesas_forms,
    );

    CalculationDetail {
        formula: BALANCE_FORMULA.to_string(),
        operands: vec![
            operand("salario_efetivo", salario_efetivo),
            operand("outras_entradas", outras_entradas),
            operand("total_saidas", total_saidas),
            operand("total_despesas_forms", total_despesas_forms),
        ],
        equation: format!(
            "({:.2} + {:.2}) - {:.2} - {:.2} = {:.2}",
            salario_efetivo, outras_entradas, total_saidas, total_despesas_forms, result
        ),
    }
}

fn operand(name: &str, value: f64) -> CalculationOperand {
    CalculationOperand {
        name: name.to_string(),
        value: round_money(value),
    }
}

pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
