pub mod employee;
pub mod types;
