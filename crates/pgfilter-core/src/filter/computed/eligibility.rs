use crate::{
    config::FilterConfig,
    filter::computed::arguments::{ProjectedArgument, project_arguments},
    naming::Inflector,
};
use derive_more::Display;
use pgfilter_schema::{
    Catalog,
    node::{Capability, Class, Procedure},
    types::{Oid, oid},
};
use serde::Serialize;
use std::collections::HashSet;

/// Smart tag exposing one procedure when computed columns are disabled
/// globally.
pub const FILTERABLE_TAG: &str = "filterable";

///
/// ComputedColumnDescriptor
///
/// Derived once per eligible procedure at build time and immutable after.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ComputedColumnDescriptor {
    pub pseudo_column_name: String,
    pub arguments: Vec<ProjectedArgument>,
}

impl ComputedColumnDescriptor {
    pub fn argument_names(&self) -> impl Iterator<Item = &str> {
        self.arguments.iter().map(|arg| arg.name.as_str())
    }
}

///
/// SkipReason
///
/// Why a procedure is not a filterable computed column. Never an error;
/// only reported through logging and tests.
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum SkipReason {
    #[display("not @filterable and computed column filtering is disabled")]
    NotExposed,

    #[display("omitted from {}", _0.word())]
    Omitted(Capability),

    #[display("not stable")]
    NotStable,

    #[display("lives in another namespace")]
    ForeignNamespace,

    #[display("name does not start with the table prefix")]
    NamePrefix,

    #[display("first argument is not the table row type")]
    FirstArgumentNotRow,

    #[display("returns a set")]
    ReturnsSet,

    #[display("returns a table row")]
    ReturnsRow,

    #[display("returns record")]
    ReturnsRecord,

    #[display("returns void")]
    ReturnsVoid,

    #[display("return type {_0} is not in the catalog")]
    UnknownReturnType(Oid),

    #[display("argument '{_0}' is another table's row")]
    TableArgument(String),

    #[display("two arguments normalize to '{_0}'")]
    DuplicateArgument(String),
}

///
/// Eligibility
///
/// Decides which procedures of a catalog are computed columns of a table.
/// Checks run cheapest first and stop at the first failure.
///

pub struct Eligibility<'a, I: ?Sized> {
    catalog: &'a Catalog,
    config: &'a FilterConfig,
    inflector: &'a I,
}

impl<'a, I: Inflector + ?Sized> Eligibility<'a, I> {
    #[must_use]
    pub const fn new(catalog: &'a Catalog, config: &'a FilterConfig, inflector: &'a I) -> Self {
        Self {
            catalog,
            config,
            inflector,
        }
    }

    /// Return the descriptor for an eligible procedure, logging the reason
    /// when it is skipped.
    #[must_use]
    pub fn computed_column(
        &self,
        table: &Class,
        procedure: &Procedure,
    ) -> Option<ComputedColumnDescriptor> {
        match self.check(table, procedure) {
            Ok(descriptor) => Some(descriptor),
            Err(reason) => {
                tracing::debug!(
                    procedure = %procedure.name,
                    table = %table.name,
                    %reason,
                    "skipping computed column"
                );
                None
            }
        }
    }

    /// Run every eligibility check in order.
    pub fn check(
        &self,
        table: &Class,
        procedure: &Procedure,
    ) -> Result<ComputedColumnDescriptor, SkipReason> {
        // exposure
        if !(procedure.tags.has(FILTERABLE_TAG) || self.config.computed_columns) {
            return Err(SkipReason::NotExposed);
        }
        for capability in [Capability::Execute, Capability::Filter] {
            if procedure.is_omitted(capability) {
                return Err(SkipReason::Omitted(capability));
            }
        }

        // shape of the signature
        if !procedure.is_stable {
            return Err(SkipReason::NotStable);
        }
        if procedure.namespace_id != table.namespace_id {
            return Err(SkipReason::ForeignNamespace);
        }
        let pseudo_column_name = procedure
            .name
            .strip_prefix(table.name.as_str())
            .and_then(|rest| rest.strip_prefix('_'))
            .filter(|rest| !rest.is_empty())
            .ok_or(SkipReason::NamePrefix)?;
        if procedure.arg_type_ids.first() != Some(&table.type_id) {
            return Err(SkipReason::FirstArgumentNotRow);
        }

        // return type
        if procedure.returns_set {
            return Err(SkipReason::ReturnsSet);
        }
        self.check_return_type(procedure.return_type_id)?;

        // extra arguments
        let arguments = project_arguments(self.inflector, procedure);
        if let Some(arg) = arguments.iter().find(|arg| self.is_table_row(arg.type_id)) {
            return Err(SkipReason::TableArgument(arg.name.clone()));
        }
        let mut seen = HashSet::new();
        if let Some(arg) = arguments.iter().find(|arg| !seen.insert(arg.name.as_str())) {
            return Err(SkipReason::DuplicateArgument(arg.name.clone()));
        }

        Ok(ComputedColumnDescriptor {
            pseudo_column_name: pseudo_column_name.to_string(),
            arguments,
        })
    }

    fn check_return_type(&self, id: Oid) -> Result<(), SkipReason> {
        let ty = self
            .catalog
            .ty(id)
            .ok_or(SkipReason::UnknownReturnType(id))?;

        if self.catalog.type_class(ty).is_some() {
            return Err(SkipReason::ReturnsRow);
        }
        if ty.id == oid::RECORD {
            return Err(SkipReason::ReturnsRecord);
        }
        if ty.id == oid::VOID {
            return Err(SkipReason::ReturnsVoid);
        }

        Ok(())
    }

    // A composite argument backed by a selectable relation.
    fn is_table_row(&self, id: Oid) -> bool {
        self.catalog.ty(id).is_some_and(|ty| {
            ty.is_composite()
                && self
                    .catalog
                    .type_class(ty)
                    .is_some_and(|class| class.is_relation() && class.is_selectable)
        })
    }
}
