//! Crate-wide error type and result alias.

use thiserror::Error;

/// Errors produced by the trailquote library.
///
/// Price lookups never appear here: a missing key or label resolves to a
/// zero delta instead of an error. The fallible surface is file I/O,
/// (de)serialization, pricebook validation, input validation at the
/// boundary, and document rendering.
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid pricebook: {0}")]
    InvalidPricebook(String),

    #[error("unknown option key: {0}")]
    UnknownField(String),

    #[error("label {label:?} is not allowed for option {field:?}")]
    InvalidLabel { field: String, label: String },

    #[error("invalid value for option {field:?}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("invalid line item: {0}")]
    InvalidLineItem(String),

    #[error("template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("render error: {0}")]
    Render(#[from] handlebars::RenderError),
}

pub type Result<T> = std::result::Result<T, QuoteError>;
