use serde::Deserialize;

use crate::classify::normalize::normalize;

/// Which exclusion policy applies. Callers pick the scope based on whether a
/// month filter is active; the classifier never infers it from ambient state.
///
/// At `Monthly` scope a card-bill settlement is a real outflow and must count
/// toward total saidas; at `Global` scope it would double-count against the
/// card purchases already excluded, so the global-only patterns kick in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeContext {
    Global,
    Monthly,
}

/// Data-driven classification rule tables. The heuristics are substring
/// lists over normalized text, kept as data so they stay testable and
/// tunable independently of the aggregation logic. The defaults reproduce
/// the upstream household's lists; a JSON rules file replaces them wholesale.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Excluded at every scope: investment round-trips and internally
    /// generated ledger adjustments.
    pub ignore_patterns: Vec<String>,
    /// Excluded only for the all-months aggregate: bill settlements and
    /// outbound transfers.
    pub ignore_patterns_global_only: Vec<String>,
    pub salary_keywords: Vec<String>,
    pub received_transfer_phrase: String,
    pub salary_payer_names: Vec<String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            ignore_patterns: vec![
                "resgate".to_string(),
                "adicionado".to_string(),
                "aplicacao rdb".to_string(),
            ],
            ignore_patterns_global_only: vec![
                "pagamento de fatura".to_string(),
                "pagamento fatura".to_string(),
                "pagamento cartao".to_string(),
                "transferencia enviada".to_string(),
            ],
            salary_keywords: vec!["salario".to_string(), "provento".to_string()],
            received_transfer_phrase: "transferencia recebida".to_string(),
            salary_payer_names: vec!["otavio lopes".to_string()],
        }
    }
}

impl RuleSet {
    /// Broad substring match over folded text. False positives are an
    /// accepted trade-off of the heuristic, not a bug.
    pub fn is_ignorable(&self, description: &str, scope: ScopeContext) -> bool {
        let folded = normalize(Some(description));
        if contains_any(&folded, &self.ignore_patterns) {
            return true;
        }
        scope == ScopeContext::Global && contains_any(&folded, &self.ignore_patterns_global_only)
    }

    /// True for a salary keyword, or for a received transfer whose folded
    /// text also names a configured payer. Recognizes payroll deposits that
    /// arrive as generic bank transfers rather than labeled salary entries.
    pub fn is_salary(&self, description: &str) -> bool {
        let folded = normalize(Some(description));
        if contains_any(&folded, &self.salary_keywords) {
            return true;
        }
        folded.contains(&normalize(Some(&self.received_transfer_phrase)))
            && contains_any(&folded, &self.salary_payer_names)
    }
}

fn contains_any(folded: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| {
        let folded_pattern = normalize(Some(pattern));
        !folded_pattern.is_empty() && folded.contains(&folded_pattern)
    })
}

#[cfg(test)]
mod tests {
    use super::{RuleSet, ScopeContext};

    #[test]
    fn investment_round_trip_is_ignored_at_both_scopes() {
        let rules = RuleSet::default();
        assert!(rules.is_ignorable("APLICACAO RDB", ScopeContext::Global));
        assert!(rules.is_ignorable("APLICACAO RDB", ScopeContext::Monthly));
        assert!(rules.is_ignorable("Resgate RDB", ScopeContext::Monthly));
    }

    #[test]
    fn card_bill_settlement_counts_at_monthly_scope_only() {
        let rules = RuleSet::default();
        assert!(rules.is_ignorable("PAGAMENTO CARTAO", ScopeContext::Global));
        assert!(!rules.is_ignorable("PAGAMENTO CARTAO", ScopeContext::Monthly));
        assert!(rules.is_ignorable("Pagamento de fatura", ScopeContext::Global));
        assert!(!rules.is_ignorable("Pagamento de fatura", ScopeContext::Monthly));
    }

    #[test]
    fn match_is_accent_and_case_insensitive_substring() {
        let rules = RuleSet::default();
        assert!(rules.is_ignorable("Transferência enviada pelo Pix", ScopeContext::Global));
        assert!(!rules.is_ignorable("Mercado X", ScopeContext::Global));
    }

    #[test]
    fn salary_keyword_matches() {
        let rules = RuleSet::default();
        assert!(rules.is_salary("Pagamento Salário"));
        assert!(rules.is_salary("PROVENTOS EMPRESA LTDA"));
        assert!(!rules.is_salary("Mercado X"));
    }

    #[test]
    fn received_transfer_needs_a_known_payer() {
        let rules = RuleSet::default();
        assert!(rules.is_salary("TRANSFERENCIA RECEBIDA OTAVIO LOPES"));
        assert!(!rules.is_salary("TRANSFERENCIA RECEBIDA FULANO DE TAL"));
    }

    #[test]
    fn rules_file_replaces_lists_wholesale() {
        let parsed = serde_json::from_str::<RuleSet>(
            r#"{
                "ignore_patterns": ["estorno"],
                "salary_payer_names": ["empresa xpto"]
            }"#,
        );
        assert!(parsed.is_ok());
        if let Ok(rules) = parsed {
            assert!(rules.is_ignorable("Estorno de compra", ScopeContext::Monthly));
            assert!(!rules.is_ignorable("APLICACAO RDB", ScopeContext::Monthly));
            assert!(rules.is_salary("transferencia recebida EMPRESA XPTO"));
        }
    }
}
