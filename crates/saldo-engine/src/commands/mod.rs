pub mod common;
pub mod import;
pub mod statement;
pub mod summary;
pub mod validate;
