use pgfilter_schema::{CatalogError, types::Oid};
use std::{io, path::PathBuf};
use thiserror::Error as ThisError;

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

///
/// BuildError
///
/// Schema-construction failures. Ineligible procedures are never errors;
/// these only arise when two registrations disagree about one name.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum BuildError {
    #[error("type '{name}' is already registered with a different shape")]
    TypeConflict { name: String },

    #[error("field '{field}' on filter type '{filter_type}' is already registered with a different definition")]
    FieldConflict { filter_type: String, field: String },

    #[error("field '{field}' on filter type '{filter_type}' already has a different resolver")]
    ResolverConflict { filter_type: String, field: String },

    #[error("catalog has no namespace {id}")]
    UnknownNamespace { id: Oid },

    #[error("catalog has no type {id}")]
    UnknownType { id: Oid },
}

///
/// ResolveError
/// query-time failures for one filter field
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum ResolveError {
    #[error("The value for argument {argument} is missing.")]
    MissingArgument { argument: String },

    #[error("filter type '{filter_type}' has no computed column field '{field}'")]
    UnknownField { filter_type: String, field: String },

    #[error("operators type '{name}' is not registered")]
    UnknownOperatorsType { name: String },

    #[error("operator '{operator}' on field '{field}' expects a {expected} value")]
    InvalidOperatorValue {
        field: String,
        operator: String,
        expected: &'static str,
    },
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
