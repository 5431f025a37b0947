use thiserror::Error;

mod cursor;
mod dates;
mod domain_types;

pub use cursor::*;
pub use dates::*;
pub use domain_types::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid repository endpoint: {input} - {reason}")]
    InvalidEndpoint { input: String, reason: String },

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid UID: {uid} - {reason}")]
    InvalidUid { uid: String, reason: String },

    #[error("Invalid document type: {name} - {reason}")]
    InvalidDocumentType { name: String, reason: String },

    #[error("Invalid page size: {0} (must be a positive integer)")]
    InvalidPageSize(u32),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),
}
