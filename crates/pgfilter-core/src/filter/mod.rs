//! Filter input types for one table: computed column discovery, the
//! operators types behind each field, and predicate resolution.

pub mod computed;
pub mod operators;
pub mod registry;
pub mod resolve;

use crate::{
    config::FilterConfig,
    error::BuildError,
    filter::{
        computed::{ComputedColumnFilters, ComputedColumnSynthesizer},
        operators::StandardOperatorsBuilder,
        registry::FilterRegistry,
    },
    naming::Inflector,
};
use pgfilter_schema::{Catalog, node::Class};

///
/// TableFilter
///
/// Build output for one table: the registrations made while synthesizing
/// it and the computed column lookup its resolver works from.
///

#[derive(Clone, Debug)]
pub struct TableFilter {
    pub registry: FilterRegistry,
    pub computed: ComputedColumnFilters,
}

impl TableFilter {
    /// Synthesize the filter fields of `table` with the standard operators
    /// builder.
    pub fn build<I: Inflector + ?Sized>(
        catalog: &Catalog,
        config: &FilterConfig,
        inflector: &I,
        table: &Class,
    ) -> Result<Self, BuildError> {
        let mut registry = FilterRegistry::new();
        let mut operators = StandardOperatorsBuilder::new(catalog, config, inflector);
        let computed = ComputedColumnSynthesizer::new(catalog, config, inflector).synthesize(
            table,
            &mut operators,
            &mut registry,
        )?;

        tracing::debug!(
            table = %table.name,
            filter_type = computed.filter_type(),
            fields = computed.len(),
            "built table filter"
        );

        Ok(Self { registry, computed })
    }
}
