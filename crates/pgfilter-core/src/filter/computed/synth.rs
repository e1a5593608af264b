use crate::{
    config::FilterConfig,
    error::BuildError,
    filter::{
        computed::{
            ComputedColumnFilter, ComputedColumnFilters, Eligibility, FilterField,
        },
        operators::{ComputedColumnArgs, OperatorsTypeBuilder},
        registry::{FilterFieldDef, FilterRegistry, RegisteredType, ResolverKind},
    },
    naming::Inflector,
};
use pgfilter_schema::{Catalog, node::Class};

///
/// ComputedColumnSynthesizer
///
/// Build-time pass turning the eligible procedures of one table into
/// fields of the table's filter type.
///

pub struct ComputedColumnSynthesizer<'a, I: ?Sized> {
    catalog: &'a Catalog,
    config: &'a FilterConfig,
    inflector: &'a I,
}

impl<'a, I: Inflector + ?Sized> ComputedColumnSynthesizer<'a, I> {
    #[must_use]
    pub const fn new(catalog: &'a Catalog, config: &'a FilterConfig, inflector: &'a I) -> Self {
        Self {
            catalog,
            config,
            inflector,
        }
    }

    /// Synthesize the computed column fields of `table`, registering
    /// types, fields and resolvers as it goes.
    pub fn synthesize<B: OperatorsTypeBuilder + ?Sized>(
        &self,
        table: &Class,
        operators: &mut B,
        registry: &mut FilterRegistry,
    ) -> Result<ComputedColumnFilters, BuildError> {
        let filter_type = self.inflector.filter_type(table);
        let eligibility = Eligibility::new(self.catalog, self.config, self.inflector);
        let mut filters = ComputedColumnFilters::new(filter_type.clone());

        for procedure in self.catalog.procedures() {
            let Some(descriptor) = eligibility.computed_column(table, procedure) else {
                continue;
            };

            let field_name = self.inflector.computed_column_field(
                &descriptor.pseudo_column_name,
                procedure,
                table,
            );

            // Phase 1: operators type, nested with `args` when needed.
            let args = (!descriptor.arguments.is_empty()).then(|| ComputedColumnArgs {
                table: &table.name,
                name: &descriptor.pseudo_column_name,
                arguments: &descriptor.arguments,
            });
            let Some(operators_type) =
                operators.operators_type(procedure.return_type_id, None, args.as_ref())
            else {
                tracing::debug!(
                    procedure = %procedure.name,
                    field = %field_name,
                    "skipping computed column without operators type"
                );
                continue;
            };
            let has_args = operators_type.args.is_some();

            // Phase 2: registrations.
            if let Some(args_type) = &operators_type.args {
                registry.insert_type(RegisteredType::Arguments(args_type.clone()))?;
            }
            registry.insert_type(RegisteredType::Operators(operators_type.clone()))?;
            registry.register_field(
                &filter_type,
                FilterFieldDef {
                    name: field_name.clone(),
                    description: format!("Filter by the object’s `{field_name}` field."),
                    type_name: operators_type.name.clone(),
                    is_filter_field: true,
                },
            )?;
            if has_args {
                registry.register_resolver(&operators_type.name, "args", ResolverKind::Noop)?;
            }
            registry.register_resolver(&filter_type, &field_name, ResolverKind::ComputedColumn)?;

            // Phase 3: the record the resolver works from.
            let schema = self
                .catalog
                .namespace(procedure.namespace_id)
                .ok_or(BuildError::UnknownNamespace {
                    id: procedure.namespace_id,
                })?;
            let return_type =
                self.catalog
                    .ty(procedure.return_type_id)
                    .ok_or(BuildError::UnknownType {
                        id: procedure.return_type_id,
                    })?;

            filters.insert(
                FilterField {
                    field_name,
                    procedure_id: procedure.id,
                    operators_type_name: operators_type.name.clone(),
                    has_arguments_subfield: has_args,
                },
                ComputedColumnFilter {
                    procedure_id: procedure.id,
                    schema: schema.name.clone(),
                    procedure_name: procedure.name.clone(),
                    arguments: descriptor.arguments,
                    return_type: return_type.clone(),
                    operators_type_name: operators_type.name,
                },
            )?;
        }

        Ok(filters)
    }
}

impl ComputedColumnFilters {
    fn insert(
        &mut self,
        field: FilterField,
        filter: ComputedColumnFilter,
    ) -> Result<(), BuildError> {
        if let Some(existing) = self.by_field.get(&field.field_name) {
            if existing.procedure_id == filter.procedure_id {
                return Ok(());
            }
            return Err(BuildError::FieldConflict {
                filter_type: self.filter_type.clone(),
                field: field.field_name,
            });
        }

        self.by_field.insert(field.field_name.clone(), filter);
        self.fields.push(field);

        Ok(())
    }
}
