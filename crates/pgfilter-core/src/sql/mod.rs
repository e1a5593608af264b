//! Module: sql
//! Responsibility: SQL text assembly with identifiers quoted and values bound.
//! Does not own: executing SQL or combining predicates across fields.
//!
//! Invariants:
//! - User-supplied values only ever enter SQL through `QueryContext::bind`.
//! - Identifiers only ever enter SQL through `quote_ident`.


use crate::value::Value;
use derive_more::Display;

///
/// SqlFragment
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub struct SqlFragment(String);

impl SqlFragment {
    /// Wrap SQL text that is known not to contain user input.
    #[must_use]
    pub(crate) fn raw(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn identifier(name: &str) -> Self {
        Self(quote_ident(name))
    }

    #[must_use]
    pub fn qualified(schema: &str, name: &str) -> Self {
        Self(format!("{}.{}", quote_ident(schema), quote_ident(name)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    #[must_use]
    pub fn join(fragments: &[Self], separator: &str) -> Self {
        let parts: Vec<&str> = fragments.iter().map(Self::as_str).collect();

        Self(parts.join(separator))
    }

    #[must_use]
    pub fn parens(&self) -> Self {
        Self(format!("({})", self.0))
    }

    #[must_use]
    pub fn cast(&self, ty: &Self) -> Self {
        Self(format!("{}::{}", self.0, ty.0))
    }

    #[must_use]
    pub fn array_of(&self) -> Self {
        Self(format!("{}[]", self.0))
    }
}

/// Double-quote an identifier, doubling embedded quotes.
#[must_use]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Invoke a namespace-qualified function.
#[must_use]
pub fn function_call(schema: &str, name: &str, args: &[SqlFragment]) -> SqlFragment {
    SqlFragment(format!(
        "{}({})",
        SqlFragment::qualified(schema, name),
        SqlFragment::join(args, ", ")
    ))
}

///
/// QueryContext
///
/// Per-query parameter buffer. Placeholders are numbered in bind order,
/// starting at `$1`.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryContext {
    params: Vec<Value>,
}

impl QueryContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value and return its placeholder.
    pub fn bind(&mut self, value: Value) -> SqlFragment {
        self.params.push(value);

        SqlFragment(format!("${}", self.params.len()))
    }

    #[must_use]
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    #[must_use]
    pub fn into_params(self) -> Vec<Value> {
        self.params
    }
}
