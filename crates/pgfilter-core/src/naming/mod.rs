//! Schema-level naming.
//!
//! All GraphQL-facing identifiers derived from catalog names are produced
//! here. Argument names in particular are normalized by exactly one
//! function, `argument_field_name`, which both the projector (build time)
//! and the resolver (query time) go through.


use convert_case::{Case, Casing};
use pgfilter_schema::node::{Class, PgType, Procedure};

/// Normalize a procedure argument name to its schema field name.
///
/// Unnamed arguments are addressed by position.
#[must_use]
pub fn argument_field_name(name: Option<&str>, index: usize) -> String {
    match name {
        Some(name) => camel(name),
        None => format!("arg{index}"),
    }
}

#[must_use]
pub fn camel(name: &str) -> String {
    name.to_case(Case::Camel)
}

#[must_use]
pub fn pascal(name: &str) -> String {
    name.to_case(Case::Pascal)
}

///
/// Inflector
///
/// Naming collaborator. Every method has the conventional default; an
/// implementation overrides only what it renames.
///

pub trait Inflector {
    /// Field name for a computed column; `@fieldName` wins over the
    /// pseudo-column name.
    fn computed_column_field(&self, pseudo: &str, procedure: &Procedure, _table: &Class) -> String {
        procedure
            .tags
            .text("fieldName")
            .map_or_else(|| camel(pseudo), ToString::to_string)
    }

    fn argument_field(&self, name: Option<&str>, index: usize) -> String {
        argument_field_name(name, index)
    }

    fn filter_type(&self, table: &Class) -> String {
        format!("{}Filter", pascal(&table.name))
    }

    /// Enum names are qualified by namespace so same-named enums in two
    /// schemas never share a type.
    fn enum_type(&self, namespace: &str, ty: &PgType) -> String {
        format!("{}{}", pascal(namespace), pascal(&ty.name))
    }

    fn operators_type(&self, scalar: &str, is_list: bool) -> String {
        if is_list {
            format!("{scalar}ListFilter")
        } else {
            format!("{scalar}Filter")
        }
    }

    fn computed_column_operators_type(
        &self,
        table: &str,
        pseudo: &str,
        scalar: &str,
        is_list: bool,
    ) -> String {
        let base = self.operators_type(scalar, is_list);

        format!("{}{}{base}", pascal(table), pascal(pseudo))
    }

    fn computed_column_args_type(&self, table: &str, pseudo: &str) -> String {
        format!("{}{}Args", pascal(table), pascal(pseudo))
    }
}

///
/// DefaultInflector
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultInflector;

impl Inflector for DefaultInflector {}
