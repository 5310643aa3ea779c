use crate::cli::{Commands, ImportCommand, StatementCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Summary { json, .. } | Commands::Validate { json, .. } => *json,
        Commands::Statement { command } => match command {
            StatementCommand::Parse { json, .. } => *json,
        },
        Commands::Import { command } => match command {
            ImportCommand::Analyze { json, .. } => *json,
        },
    };

    if json { OutputMode::Json } else { OutputMode::Text }
}
