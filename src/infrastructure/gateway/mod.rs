//! Completion gateway
//!
//! The only path from this service to the hosted language model: given a
//! list of role-tagged messages and an optional structured-output schema,
//! return the completion choices.
//!
//! # Structure
//! - `types` - Request, Completion, Error types
//! - `traits` - the `CompletionGateway` trait
//! - `schema` - structured-output schemas and post-validation
//! - `adapter` - wire format conversion
//! - `clients` - OpenAI-compatible HTTP implementation

pub mod adapter;
pub mod clients;
pub mod schema;
pub mod traits;
pub mod types;

pub use clients::OpenAiGateway;
pub use schema::{OutputSchema, SchemaError};
pub use traits::CompletionGateway;
pub use types::{Completion, CompletionRequest, GatewayError};
