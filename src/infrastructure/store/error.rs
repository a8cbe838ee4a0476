use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("documents in '{collection}' must be JSON objects")]
    NotAnObject { collection: String },
    #[error("failed to encode document for '{collection}': {source}")]
    Encode {
        collection: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode document from '{collection}': {source}")]
    Decode {
        collection: String,
        #[source]
        source: serde_json::Error,
    },
}
