use chrono::NaiveDate;

use crate::classify::normalize::normalize;
use crate::records::EntryType;
use crate::{EngineError, EngineResult};

/// A transaction candidate parsed from a bank statement row. No id: the
/// store assigns identifiers when (and if) the candidate is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementCandidate {
    pub date: NaiveDate,
    pub value: f64,
    pub entry_type: EntryType,
    pub description: String,
}

const DATE_HEADERS: [&str; 3] = ["data", "date", "dia"];
const VALUE_HEADERS: [&str; 4] = ["valor", "value", "amount", "montante"];
const DESCRIPTION_HEADERS: [&str; 4] = ["descricao", "description", "historico", "lancamento"];

/// Parses a delimited bank statement into transaction candidates.
///
/// Dates arrive as `DD/MM/YYYY`; values use the comma decimal separator and
/// their sign selects entrada/saida while the stored magnitude is absolute.
/// Any row that fails to parse fails the whole file, so the caller can show
/// the statement as unreadable instead of importing corrupted rows.
pub fn parse_statement(content: &str) -> EngineResult<Vec<StatementCandidate>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(EngineError::invalid_argument_with_recovery(
            "Statement file is empty.",
            vec!["Export the statement again and retry.".to_string()],
        ));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(detect_delimiter(trimmed))
        .flexible(true)
        .from_reader(trimmed.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| {
            EngineError::invalid_argument_with_recovery(
                "Statement header row is missing or unreadable.",
                vec!["Keep the header row intact when exporting the statement.".to_string()],
            )
        })?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    let date_index = column_index(&headers, &DATE_HEADERS);
    let value_index = column_index(&headers, &VALUE_HEADERS);
    let description_index = column_index(&headers, &DESCRIPTION_HEADERS);

    let (Some(date_index), Some(value_index)) = (date_index, value_index) else {
        return Err(EngineError::statement_schema_mismatch(
            expected_headers(),
            headers,
        ));
    };

    let mut candidates = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let row = (row_index as i64) + 1;
        let record = result_row.map_err(|_| {
            EngineError::statement_parse_failed(row, "row", "row is malformed or not UTF-8")
        })?;

        let raw_date = record.get(date_index).unwrap_or("").trim();
        let date = parse_statement_date(raw_date)
            .ok_or_else(|| statement_date_error(row, raw_date))?;

        let raw_value = record.get(value_index).unwrap_or("").trim();
        let signed_value = parse_statement_value(raw_value).ok_or_else(|| {
            EngineError::statement_parse_failed(
                row,
                "value",
                &format!("value must be numeric with comma decimals; got \"{raw_value}\""),
            )
        })?;

        let entry_type = if signed_value >= 0.0 {
            EntryType::Entrada
        } else {
            EntryType::Saida
        };

        let description = description_index
            .and_then(|index| record.get(index))
            .unwrap_or("")
            .trim()
            .to_string();

        candidates.push(StatementCandidate {
            date,
            value: signed_value.abs(),
            entry_type,
            description,
        });
    }

    Ok(candidates)
}

fn detect_delimiter(content: &str) -> u8 {
    let first_line = content.lines().next().unwrap_or_default();
    if first_line.contains(';') { b';' } else { b',' }
}

fn column_index(headers: &[String], variants: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let folded = normalize(Some(header));
        variants.iter().any(|variant| folded == *variant)
    })
}

fn expected_headers() -> Vec<String> {
    DATE_HEADERS
        .iter()
        .chain(VALUE_HEADERS.iter())
        .chain(DESCRIPTION_HEADERS.iter())
        .map(|value| value.to_string())
        .collect()
}

/// `DD/MM/YYYY` only. A row missing the separators has no usable date and
/// must surface as a parse failure, never a silently coerced value.
fn parse_statement_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('/');
    let day = parts.next()?.trim().parse::<u32>().ok()?;
    let month = parts.next()?.trim().parse::<u32>().ok()?;
    let year = parts.next()?.trim().parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn statement_date_error(row: i64, raw: &str) -> EngineError {
    EngineError::statement_parse_failed(
        row,
        "date",
        &format!("date must be DD/MM/YYYY; got \"{raw}\""),
    )
}

/// Comma decimal separator; dots are thousands separators when a comma is
/// present ("1.234,56").
fn parse_statement_value(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }

    let cleaned = if raw.contains(',') {
        raw.replace('.', "").replace(',', ".")
    } else {
        raw.to_string()
    };

    let parsed = cleaned.parse::<f64>().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    Some(parsed)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::records::EntryType;

    use super::parse_statement;

    #[test]
    fn parses_a_signed_comma_decimal_row() {
        let parsed = parse_statement("Data,Valor,Descrição\n\"05/03/2024\",\"-150,50\",MERCADO X\n");
        assert!(parsed.is_ok());
        if let Ok(candidates) = parsed {
            assert_eq!(candidates.len(), 1);
            assert_eq!(
                candidates[0].date,
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap_or(NaiveDate::MIN)
            );
            assert_eq!(candidates[0].value, 150.50);
            assert_eq!(candidates[0].entry_type, EntryType::Saida);
            assert_eq!(candidates[0].description, "MERCADO X");
        }
    }

    #[test]
    fn positive_and_zero_values_map_to_entrada() {
        let parsed = parse_statement("Data;Valor;Descricao\n10/01/2024;5000,00;SALARIO\n11/01/2024;0,00;AJUSTE\n");
        assert!(parsed.is_ok());
        if let Ok(candidates) = parsed {
            assert_eq!(candidates[0].entry_type, EntryType::Entrada);
            assert_eq!(candidates[0].value, 5000.0);
            assert_eq!(candidates[1].entry_type, EntryType::Entrada);
        }
    }

    #[test]
    fn thousands_separators_are_stripped() {
        let parsed = parse_statement("Data;Valor;Descricao\n10/01/2024;-1.234,56;ALUGUEL\n");
        assert!(parsed.is_ok());
        if let Ok(candidates) = parsed {
            assert_eq!(candidates[0].value, 1234.56);
        }
    }

    #[test]
    fn header_variants_are_accent_insensitive() {
        let parsed = parse_statement("Dia;Montante;Histórico\n10/01/2024;10,00;PIX\n");
        assert!(parsed.is_ok());
        if let Ok(candidates) = parsed {
            assert_eq!(candidates[0].description, "PIX");
        }
    }

    #[test]
    fn unparseable_value_fails_the_whole_file() {
        let parsed = parse_statement(
            "Data;Valor;Descricao\n10/01/2024;10,00;OK\n11/01/2024;abc;RUIM\n",
        );
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "statement_parse_failed");
        }
    }

    #[test]
    fn malformed_date_fails_the_whole_file() {
        let parsed = parse_statement("Data;Valor;Descricao\n10-01-2024;10,00;OK\n");
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "statement_parse_failed");
            assert!(error.message.contains("date"));
        }
    }

    #[test]
    fn missing_required_columns_is_a_schema_mismatch() {
        let parsed = parse_statement("Quando;Quanto\n10/01/2024;10,00\n");
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "statement_schema_mismatch");
        }
    }
}
