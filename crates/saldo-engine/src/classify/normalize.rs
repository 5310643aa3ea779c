use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Case/diacritic fold shared by every classifier: lower-case, NFD
/// decomposition, combining marks removed. Absent text folds to the empty
/// string. Pure and total.
pub fn normalize(text: Option<&str>) -> String {
    let Some(raw) = text else {
        return String::new();
    };

    raw.nfd()
        .filter(|character| !is_combining_mark(*character))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn folds_case_and_diacritics() {
        assert_eq!(normalize(Some("Aplicação RDB")), "aplicacao rdb");
        assert_eq!(normalize(Some("SAÍDA")), "saida");
        assert_eq!(normalize(Some("Transferência Recebida")), "transferencia recebida");
    }

    #[test]
    fn absent_text_folds_to_empty() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(Some("")), "");
    }

    #[test]
    fn plain_ascii_passes_through_lowercased() {
        assert_eq!(normalize(Some("PAGAMENTO CARTAO")), "pagamento cartao");
    }
}
