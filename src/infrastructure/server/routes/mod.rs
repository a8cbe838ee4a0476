pub mod chat;
pub mod diagnostics;
pub mod employees;
pub mod ws;
