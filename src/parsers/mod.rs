/*
This module turns the plain-text device and connection files into calls on a `Network`.

--- records / config ---
One line -> one Device or one (idA, idB) pair, or a ParseError
|
v
--- loader ---
Feeds every well-formed record to the Network; malformed records are logged and skipped
*/

pub mod config;
pub mod loader;
pub mod records;

use thiserror::Error;

pub use loader::{LoadError, LoadReport, load_connections, load_devices};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing {field} in line '{line}'")]
    MissingField { field: &'static str, line: String },
    #[error("empty device id in line '{0}'")]
    EmptyId(String),
}
