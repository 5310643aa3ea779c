use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: &str = "  ";

pub fn money(value: f64) -> String {
    format!("{value:.2}")
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let label_width = entries
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Renders an indented table at natural column widths. Summary and statement
/// rows are short enough that wrapping to the terminal is not worth the
/// complexity here.
pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let widths = natural_column_widths(columns, rows);
    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();

    let mut output = vec![format_row(columns, &header, &widths)];
    for row in rows {
        output.push(format_row(columns, row, &widths));
    }

    output
}

fn natural_column_widths(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths = columns
        .iter()
        .map(|column| column.name.len())
        .collect::<Vec<usize>>();

    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, value.chars().count());
            }
        }
    }

    widths
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let mut pieces = Vec::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        let width = *widths.get(index).unwrap_or(&0);
        let value = cells.get(index).cloned().unwrap_or_default();
        let pad = width.saturating_sub(value.chars().count());

        let piece = match column.align {
            Align::Left => format!("{value}{}", " ".repeat(pad)),
            Align::Right => format!("{}{value}", " ".repeat(pad)),
        };
        pieces.push(piece);
    }

    let mut line = format!("{}{}", " ".repeat(INDENT), pieces.join(COLUMN_GAP));
    let kept = line.trim_end().len();
    line.truncate(kept);
    line
}

#[cfg(test)]
mod tests {
    use super::{Align, Column, key_value_rows, money, render_table};

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Rows read:", "100".to_string()),
                ("New:", "2".to_string()),
            ],
            2,
        );

        assert_eq!(rows[0], "  Rows read:  100");
        assert_eq!(rows[1], "  New:        2");
    }

    #[test]
    fn table_pads_to_widest_cell_per_column() {
        let columns = [
            Column {
                name: "Mes",
                align: Align::Left,
            },
            Column {
                name: "Saldo",
                align: Align::Right,
            },
        ];
        let rows = vec![
            vec!["janeiro 2024".to_string(), "3800.00".to_string()],
            vec!["março 2024".to_string(), "-12.50".to_string()],
        ];

        let rendered = render_table(&columns, &rows);
        assert_eq!(rendered[0], "  Mes             Saldo");
        assert_eq!(rendered[1], "  janeiro 2024  3800.00");
        assert_eq!(rendered[2], "  março 2024     -12.50");
    }

    #[test]
    fn money_always_shows_two_decimals() {
        assert_eq!(money(5000.0), "5000.00");
        assert_eq!(money(-0.5), "-0.50");
    }
}
