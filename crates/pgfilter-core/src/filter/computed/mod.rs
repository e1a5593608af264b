//! Module: filter::computed
//! Responsibility: computed column discovery, filter field synthesis and
//! predicate resolution for those fields.
//! Does not own: operator SQL (delegated to a `FieldPredicateResolver`).
//!
//! Invariants:
//! - The argument order fixed by `project_arguments` at build time is the
//!   order arguments are bound in at query time.
//! - After synthesis the field → procedure mapping is immutable.

mod arguments;
mod eligibility;
mod resolve;
mod synth;


pub use arguments::{ProjectedArgument, project_arguments};
pub use eligibility::{ComputedColumnDescriptor, Eligibility, FILTERABLE_TAG, SkipReason};
pub use synth::ComputedColumnSynthesizer;

use pgfilter_schema::{node::PgType, types::Oid};
use serde::Serialize;
use std::collections::BTreeMap;

///
/// FilterField
/// one synthesized field on a filter input type
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FilterField {
    pub field_name: String,
    pub procedure_id: Oid,
    pub operators_type_name: String,
    pub has_arguments_subfield: bool,
}

///
/// ComputedColumnFilter
///
/// Everything the resolver needs for one field, captured at build time so
/// resolution never goes back to the catalog.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComputedColumnFilter {
    pub procedure_id: Oid,
    pub schema: String,
    pub procedure_name: String,
    pub arguments: Vec<ProjectedArgument>,
    pub return_type: PgType,
    pub operators_type_name: String,
}

///
/// ComputedColumnFilters
///
/// The computed column fields of one filter type, keyed by field name.
/// Serves as the single resolver for all of them.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComputedColumnFilters {
    filter_type: String,
    fields: Vec<FilterField>,
    by_field: BTreeMap<String, ComputedColumnFilter>,
}

impl ComputedColumnFilters {
    #[must_use]
    pub const fn new(filter_type: String) -> Self {
        Self {
            filter_type,
            fields: Vec::new(),
            by_field: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn filter_type(&self) -> &str {
        &self.filter_type
    }

    /// Synthesized fields, in catalog order.
    #[must_use]
    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }

    #[must_use]
    pub fn get(&self, field_name: &str) -> Option<&ComputedColumnFilter> {
        self.by_field.get(field_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
