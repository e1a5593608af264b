use crate::types::Oid;
use derive_more::IntoIterator;
use std::{fmt, io};
use thiserror::Error as ThisError;

///
/// CatalogError
///

#[derive(Debug, ThisError)]
pub enum CatalogError {
    #[error("catalog snapshot is invalid:\n{0}")]
    Invalid(Violations),

    #[error("catalog io error: {0}")]
    Io(#[from] io::Error),

    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

///
/// Violation
/// one inconsistency found while validating a snapshot
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Violation {
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: Oid },

    #[error("{owner} references unknown {kind} {id}")]
    DanglingReference {
        owner: String,
        kind: &'static str,
        id: Oid,
    },

    #[error("procedure '{procedure}' has {names} argument names for {types} argument types")]
    ArgNameArity {
        procedure: String,
        names: usize,
        types: usize,
    },

    #[error("procedure '{procedure}' has {modes} argument modes for {types} argument types")]
    ArgModeArity {
        procedure: String,
        modes: usize,
        types: usize,
    },
}

///
/// Violations
///

#[derive(Clone, Debug, Default, Eq, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct Violations(Vec<Violation>);

impl Violations {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn add(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn result(self) -> Result<(), CatalogError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Invalid(self))
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {violation}")?;
        }

        Ok(())
    }
}
