use clap::{Parser, Subcommand};
use saldo_engine::reconcile::month::parse_month_label;

pub fn parse_month_label_arg(value: &str) -> Result<String, String> {
    match parse_month_label(value) {
        Some(_) => Ok(value.to_string()),
        None => Err("month must be a Portuguese long label like `janeiro 2024`".to_string()),
    }
}

pub fn parse_from<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Extended help shown after `saldo import analyze --help`.
pub const IMPORT_ANALYZE_AFTER_HELP: &str = "\
How import analysis works:
  Saldo never writes to your store. It parses the statement, checks each row
  against one snapshot of your existing records, and reports which rows are
  new and which are re-imports. Hand the new rows to your store; the store
  must still enforce its own uniqueness constraint at insert time, because
  two concurrent analyses of the same statement can both report a row as new.

Statement format:
  A delimited text export with a header row. Accepted column names:
    date         Data, Date, Dia
    value        Valor, Value, Amount, Montante
    description  Descricao, Description, Historico, Lancamento
  Dates use DD/MM/YYYY. Values use the comma decimal separator; negative
  means saida, positive (or zero) means entrada. Any row that cannot be
  parsed fails the whole file.

Existing records:
  A JSON array of transaction objects with date (YYYY-MM-DD), value, type
  (entrada|saida), and description fields. A statement row is a duplicate of
  a record when date, value, and type are identical and the descriptions are
  equal ignoring case.
";

#[derive(Debug, Parser)]
#[command(
    name = "saldo",
    version,
    about = "transaction classification and monthly reconciliation",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Reconcile transactions and planned expenses into month summaries
    Summary {
        /// Path to the transactions JSON array
        #[arg(long)]
        transactions: String,
        /// Path to the planned-expenses JSON array
        #[arg(long)]
        expenses: Option<String>,
        /// Manually entered salary estimate, used when no salary is detected
        #[arg(long, default_value_t = 0.0)]
        salary: f64,
        /// Restrict to one month label (e.g. "janeiro 2024")
        #[arg(long, value_parser = parse_month_label_arg)]
        month: Option<String>,
        /// Path to a JSON rules file replacing the built-in keyword tables
        #[arg(long)]
        rules: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Cross-check the reconciliation and report data-quality issues
    Validate {
        /// Path to the transactions JSON array
        #[arg(long)]
        transactions: String,
        /// Path to the planned-expenses JSON array
        #[arg(long)]
        expenses: Option<String>,
        /// Manually entered salary estimate, used when no salary is detected
        #[arg(long, default_value_t = 0.0)]
        salary: f64,
        /// Restrict to one month label (e.g. "janeiro 2024")
        #[arg(long, value_parser = parse_month_label_arg)]
        month: Option<String>,
        /// Path to a JSON rules file replacing the built-in keyword tables
        #[arg(long)]
        rules: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Bank statement file commands
    #[command(arg_required_else_help = true)]
    Statement {
        #[command(subcommand)]
        command: StatementCommand,
    },
    /// Statement import analysis
    #[command(arg_required_else_help = true)]
    Import {
        #[command(subcommand)]
        command: ImportCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum StatementCommand {
    /// Parse a bank statement CSV into transaction candidates
    Parse {
        /// Path to the statement file
        path: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ImportCommand {
    /// Partition statement rows into new rows and re-imports
    #[command(after_long_help = IMPORT_ANALYZE_AFTER_HELP)]
    Analyze {
        /// Path to the statement file
        statement: String,
        /// Path to the existing-records JSON array snapshot
        #[arg(long)]
        existing: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::{parse_from, parse_month_label_arg};

    #[test]
    fn month_arguments_must_look_like_canonical_labels() {
        assert!(parse_month_label_arg("janeiro 2024").is_ok());
        assert!(parse_month_label_arg("Março 2024").is_ok());
        assert!(parse_month_label_arg("2024-01").is_err());
        assert!(parse_month_label_arg("january 2024").is_err());
    }

    #[test]
    fn summary_accepts_month_and_rules_flags() {
        let parsed = parse_from([
            "saldo",
            "summary",
            "--transactions",
            "tx.json",
            "--month",
            "janeiro 2024",
            "--rules",
            "rules.json",
        ]);
        assert!(parsed.is_ok());
    }

    #[test]
    fn summary_rejects_malformed_month_labels() {
        let parsed = parse_from([
            "saldo",
            "summary",
            "--transactions",
            "tx.json",
            "--month",
            "2024-01",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn import_analyze_parses_with_existing_snapshot() {
        let parsed = parse_from([
            "saldo",
            "import",
            "analyze",
            "extrato.csv",
            "--existing",
            "tx.json",
        ]);
        assert!(parsed.is_ok());
    }

    #[test]
    fn statement_requires_a_subcommand() {
        let parsed = parse_from(["saldo", "statement"]);
        assert!(parsed.is_err());
    }
}
