use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CalculationOperand {
    pub name: String,
    pub value: f64,
}

/// Structured trace of how a saldo figure was computed, kept alongside the
/// numeric result so every summary stays auditable.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationDetail {
    pub formula: String,
    pub operands: Vec<CalculationOperand>,
    pub equation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthSummary {
    pub month: String,
    pub total_entradas: f64,
    pub outras_entradas: f64,
    pub total_saidas: f64,
    pub total_despesas_forms: f64,
    pub salario: f64,
    pub salario_detectado: f64,
    pub saldo_final: f64,
    pub detalhes_calculo: CalculationDetail,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub saldo_primary: f64,
    pub saldo_alternate: f64,
    pub warnings: Vec<ValidationIssue>,
    pub errors: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub scope: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    pub summary: MonthSummary,
    pub months: Vec<MonthSummary>,
    pub validation: ValidationReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateData {
    pub scope: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    pub validation: ValidationReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateRow {
    pub row: i64,
    pub date: String,
    pub value: f64,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatementParseData {
    pub path: String,
    pub rows_read: i64,
    pub candidates: Vec<CandidateRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DuplicateRow {
    pub row: i64,
    pub date: String,
    pub value: f64,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub description: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_row: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportAnalysisSummary {
    pub rows_read: i64,
    pub new: i64,
    pub duplicate: i64,
}

/// Pure {new, duplicate} partition of an import batch. Persistence stays with
/// the store collaborator, which must enforce its own uniqueness constraint;
/// two concurrent analyses of the same statement can both report a row as new.
#[derive(Debug, Clone, Serialize)]
pub struct ImportAnalysisData {
    pub statement_path: String,
    pub message: String,
    pub summary: ImportAnalysisSummary,
    pub new_rows: Vec<CandidateRow>,
    pub duplicate_rows: Vec<DuplicateRow>,
}
