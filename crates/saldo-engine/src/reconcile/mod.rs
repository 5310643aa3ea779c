pub mod aggregate;
pub mod balance;
pub mod month;
pub mod validate;
