use crate::naming::Inflector;
use pgfilter_schema::{node::Procedure, types::Oid};
use serde::Serialize;

///
/// ProjectedArgument
///
/// One caller-supplied argument of a computed column. `position` is the
/// argument's index in the procedure signature (always >= 1).
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct ProjectedArgument {
    pub name: String,
    pub position: usize,
    pub type_id: Oid,
}

/// Project the exposable arguments of a computed column procedure.
///
/// Index 0 is the implicit row argument and is never exposed; `out`,
/// `variadic` and `table` arguments are dropped. Signature order is kept,
/// since the resolver re-serializes arguments positionally in this order.
#[must_use]
pub fn project_arguments<I: Inflector + ?Sized>(
    inflector: &I,
    procedure: &Procedure,
) -> Vec<ProjectedArgument> {
    procedure
        .arg_type_ids
        .iter()
        .enumerate()
        .skip(1)
        .filter(|&(position, _)| procedure.arg_mode(position).is_input())
        .map(|(position, &type_id)| ProjectedArgument {
            name: inflector.argument_field(procedure.arg_name(position), position),
            position,
            type_id,
        })
        .collect()
}
