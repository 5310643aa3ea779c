pub mod dedupe;
pub mod statement;
