//! Error types for task file serialization.

use std::io;
use thiserror::Error;

/// Result type for writer operations.
pub type Result<T> = std::result::Result<T, WriteError>;

/// Errors surfaced by the document writers.
///
/// Encoding problems never show up here: they are recovered by re-encoding the
/// document as UTF-8.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The sink rejected the document.
    #[error("failed to write document to sink: {0}")]
    Sink(#[from] io::Error),

    /// A synchronization setting name cannot be used as an element name.
    #[error("invalid element name: {0:?}")]
    InvalidName(String),

    /// The XML serializer failed.
    #[error("XML serialization failed: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An attribute value could not be formatted.
    #[error("failed to format attribute: {0}")]
    Attribute(#[from] AttributeError),
}

/// Errors raised while converting between attribute strings and domain values.
#[derive(Debug, Error)]
pub enum AttributeError {
    /// Not a `%Y-%m-%d %H:%M:%S` date/time.
    #[error("invalid date/time {value:?}: {source}")]
    DateTime {
        /// Offending text.
        value: String,
        /// Parser diagnostics.
        #[source]
        source: time::error::Parse,
    },

    /// A date/time the format description cannot render.
    #[error("failed to format date/time: {0}")]
    Format(#[from] time::error::Format),

    /// Not an `H:MM:SS` duration.
    #[error("invalid duration: {0:?}")]
    Duration(String),

    /// Not an `(R, G, B[, A])` color.
    #[error("invalid color: {0:?}")]
    Color(String),

    /// Not a font descriptor.
    #[error("invalid font descriptor: {0:?}")]
    Font(String),

    /// Neither `True` nor `False`.
    #[error("invalid boolean: {0:?}")]
    Boolean(String),

    /// Not a tuple of quoted context names.
    #[error("invalid context tuple: {0:?}")]
    Contexts(String),

    /// Not a valid identifier list.
    #[error("invalid identifier list: {0}")]
    Ids(#[from] taskfile_core::IdError),
}

/// Encoding label not supported by the writers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported encoding: {0:?}")]
pub struct UnknownEncoding(pub String);
