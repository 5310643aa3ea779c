use saldo_engine::commands::summary::SummaryOptions;
use saldo_engine::commands::{import, statement, summary, validate};
use saldo_engine::{EngineResult, SuccessEnvelope};

use crate::cli::{Cli, Commands, ImportCommand, StatementCommand};

pub fn dispatch(cli: Cli) -> EngineResult<SuccessEnvelope> {
    match cli.command {
        Commands::Summary {
            transactions,
            expenses,
            salary,
            month,
            rules,
            json: _,
        } => summary::run(SummaryOptions {
            transactions_path: transactions,
            expenses_path: expenses,
            rules_path: rules,
            manual_salary: salary,
            month,
        }),
        Commands::Validate {
            transactions,
            expenses,
            salary,
            month,
            rules,
            json: _,
        } => validate::run(SummaryOptions {
            transactions_path: transactions,
            expenses_path: expenses,
            rules_path: rules,
            manual_salary: salary,
            month,
        }),
        Commands::Statement { command } => match command {
            StatementCommand::Parse { path, json: _ } => statement::parse(&path),
        },
        Commands::Import { command } => match command {
            ImportCommand::Analyze {
                statement,
                existing,
                json: _,
            } => import::analyze(import::AnalyzeOptions {
                statement_path: statement,
                existing_path: existing,
            }),
        },
    }
}
