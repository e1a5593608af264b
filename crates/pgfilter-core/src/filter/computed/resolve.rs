use crate::{
    error::ResolveError,
    filter::{
        computed::ComputedColumnFilters,
        resolve::{FieldPredicateInput, FieldPredicateResolver},
    },
    sql::{QueryContext, SqlFragment, function_call},
    value::{FilterValue, Value},
};

impl ComputedColumnFilters {
    /// Resolve the value supplied for one computed column field.
    ///
    /// `source` is the row expression passed as the procedure's first
    /// argument. Every extra argument must be present in the value's `args`;
    /// nothing is bound unless all of them are.
    pub fn resolve<R: FieldPredicateResolver + ?Sized>(
        &self,
        field_name: &str,
        value: Option<&FilterValue>,
        source: &SqlFragment,
        query: &mut QueryContext,
        resolver: &R,
    ) -> Result<Option<SqlFragment>, ResolveError> {
        let Some(value) = value else {
            return Ok(None);
        };
        let filter = self
            .get(field_name)
            .ok_or_else(|| ResolveError::UnknownField {
                filter_type: self.filter_type.clone(),
                field: field_name.to_string(),
            })?;

        let supplied = filter
            .arguments
            .iter()
            .map(|arg| {
                value
                    .argument(&arg.name)
                    .cloned()
                    .ok_or_else(|| ResolveError::MissingArgument {
                        argument: arg.name.clone(),
                    })
            })
            .collect::<Result<Vec<Value>, _>>()?;

        let mut call_args = Vec::with_capacity(supplied.len() + 1);
        call_args.push(source.clone());
        call_args.extend(supplied.into_iter().map(|arg| query.bind(arg)));
        let call = function_call(&filter.schema, &filter.procedure_name, &call_args);

        resolver.resolve_field(
            FieldPredicateInput {
                value,
                column: &call,
                operators_type: &filter.operators_type_name,
                return_type: &filter.return_type,
                type_modifier: None,
                field_name,
            },
            query,
        )
    }
}
