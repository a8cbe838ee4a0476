pub mod employees;
pub mod orchestrator;
pub mod structured;
pub mod tools;
