//! Module containing the universal error type
use thiserror::Error;

/// Universal error type for this crate
#[derive(Error, Debug)]
pub enum Error {
    /// A build setting or input value is out of range
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The point set is empty
    #[error("point set is empty")]
    EmptyInput,

    /// No reader exists for the given file suffix
    #[error("no reader for file suffix {0:?}")]
    UnknownFormat(String),

    /// Point file could not be parsed
    #[error("parse error on line {line}: {msg}")]
    Parse { line: usize, msg: String },

    /// A file reader for the given format failed
    #[error("could not read {format} file: {msg}")]
    Load { format: &'static str, msg: String },

    /// IO error; see inner code for details
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}
