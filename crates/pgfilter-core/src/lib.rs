//! Computed column filtering for a GraphQL filter layer over Postgres:
//! discovers filterable procedures, synthesizes their filter fields, and
//! resolves filter values into parameterized predicates.

pub mod config;
pub mod error;
pub mod filter;
pub mod naming;
pub mod sql;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use error::Error;

///
/// Prelude
///
/// Build and resolve vocabulary. Errors are reached through `error`.
///

pub mod prelude {
    pub use crate::{
        config::FilterConfig,
        filter::{
            TableFilter,
            computed::{ComputedColumnFilters, ComputedColumnSynthesizer, Eligibility},
            operators::{OperatorsTypeBuilder, StandardOperatorsBuilder},
            registry::FilterRegistry,
            resolve::{FieldPredicateResolver, StandardFieldResolver},
        },
        naming::{DefaultInflector, Inflector},
        sql::{QueryContext, SqlFragment},
        value::{FilterValue, Value},
    };
}
