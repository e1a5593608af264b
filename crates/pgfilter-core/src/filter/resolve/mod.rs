//! Module: filter::resolve
//! Responsibility: turn the operators portion of one filter value into a
//! predicate over a column expression.
//! Does not own: building the column expression itself, or combining
//! predicates across fields.


use crate::{
    error::ResolveError,
    filter::{operators::Operator, registry::FilterRegistry},
    sql::{QueryContext, SqlFragment},
    value::{FilterValue, Value},
};
use pgfilter_schema::{Catalog, node::PgType};

///
/// FieldPredicateInput
///

#[derive(Clone, Copy, Debug)]
pub struct FieldPredicateInput<'a> {
    pub value: &'a FilterValue,
    pub column: &'a SqlFragment,
    pub operators_type: &'a str,
    pub return_type: &'a PgType,
    pub type_modifier: Option<i32>,
    pub field_name: &'a str,
}

///
/// FieldPredicateResolver
///

pub trait FieldPredicateResolver {
    /// Predicate for one field, or `None` when the value carries no
    /// recognized operator.
    fn resolve_field(
        &self,
        input: FieldPredicateInput<'_>,
        query: &mut QueryContext,
    ) -> Result<Option<SqlFragment>, ResolveError>;
}

///
/// StandardFieldResolver
///
/// Operator SQL backed by the registered operators types. Operands are
/// bound as parameters cast to the column's type.
///

pub struct StandardFieldResolver<'a> {
    catalog: &'a Catalog,
    registry: &'a FilterRegistry,
}

impl<'a> StandardFieldResolver<'a> {
    #[must_use]
    pub const fn new(catalog: &'a Catalog, registry: &'a FilterRegistry) -> Self {
        Self { catalog, registry }
    }

    // Schema-qualified name of the column type, falling back to the bare
    // name for a type whose namespace is unknown.
    fn type_name(&self, ty: &PgType) -> SqlFragment {
        match self.catalog.namespace(ty.namespace_id) {
            Some(ns) => SqlFragment::qualified(&ns.name, &ty.name),
            None => SqlFragment::identifier(&ty.name),
        }
    }

    fn operator_predicate(
        &self,
        input: &FieldPredicateInput<'_>,
        operator: Operator,
        operand: &Value,
        query: &mut QueryContext,
    ) -> Result<SqlFragment, ResolveError> {
        let column = input.column;
        let invalid = |expected: &'static str| ResolveError::InvalidOperatorValue {
            field: input.field_name.to_string(),
            operator: operator.name().to_string(),
            expected,
        };
        let typed = |query: &mut QueryContext, value: Value| {
            query.bind(value).cast(&self.type_name(input.return_type))
        };

        let sql = match operator {
            Operator::IsNull => {
                let is_null = operand.as_bool().ok_or_else(|| invalid("boolean"))?;
                let test = if is_null { "IS NULL" } else { "IS NOT NULL" };
                format!("{column} {test}")
            }
            Operator::In | Operator::NotIn => {
                if !matches!(operand, Value::List(_)) {
                    return Err(invalid("list"));
                }
                let list_type = self.type_name(input.return_type).array_of();
                let param = query.bind(operand.clone()).cast(&list_type);
                if operator == Operator::In {
                    format!("{column} = ANY({param})")
                } else {
                    format!("{column} <> ALL({param})")
                }
            }
            Operator::Contains | Operator::ContainedBy | Operator::Overlaps => {
                if !matches!(operand, Value::List(_)) {
                    return Err(invalid("list"));
                }
                let param = typed(query, operand.clone());
                format!("{column} {} {param}", comparison(operator))
            }
            op if Operator::PATTERN.contains(&op) => {
                let text = operand.as_text().ok_or_else(|| invalid("string"))?;
                let pattern = match op {
                    Operator::Includes | Operator::NotIncludes | Operator::IncludesInsensitive => {
                        format!("%{}%", escape_like(text))
                    }
                    Operator::StartsWith => format!("{}%", escape_like(text)),
                    Operator::EndsWith => format!("%{}", escape_like(text)),
                    _ => text.to_string(),
                };
                let param = query.bind(Value::Text(pattern));
                format!("{column} {} {param}", comparison(op))
            }
            op => {
                let param = typed(query, operand.clone());
                format!("{column} {} {param}", comparison(op))
            }
        };

        Ok(SqlFragment::raw(sql))
    }
}

impl FieldPredicateResolver for StandardFieldResolver<'_> {
    fn resolve_field(
        &self,
        input: FieldPredicateInput<'_>,
        query: &mut QueryContext,
    ) -> Result<Option<SqlFragment>, ResolveError> {
        let operators_type = self.registry.operators_type(input.operators_type).ok_or_else(|| {
            ResolveError::UnknownOperatorsType {
                name: input.operators_type.to_string(),
            }
        })?;

        let mut predicates = Vec::new();
        for (key, operand) in &input.value.operators {
            let operator = Operator::from_name(key).filter(|op| operators_type.supports(*op));
            let Some(operator) = operator else {
                tracing::trace!(field = input.field_name, key = %key, "ignoring unknown operator");
                continue;
            };
            if operand.is_null() {
                continue;
            }

            predicates.push(self.operator_predicate(&input, operator, operand, query)?);
        }

        Ok(match predicates.len() {
            0 => None,
            1 => predicates.pop(),
            _ => Some(SqlFragment::join(&predicates, " AND ").parens()),
        })
    }
}

// SQL operator of a binary comparison.
const fn comparison(operator: Operator) -> &'static str {
    match operator {
        Operator::EqualTo => "=",
        Operator::NotEqualTo => "<>",
        Operator::DistinctFrom => "IS DISTINCT FROM",
        Operator::NotDistinctFrom => "IS NOT DISTINCT FROM",
        Operator::LessThan => "<",
        Operator::LessThanOrEqualTo => "<=",
        Operator::GreaterThan => ">",
        Operator::GreaterThanOrEqualTo => ">=",
        Operator::Includes | Operator::StartsWith | Operator::EndsWith | Operator::Like => "LIKE",
        Operator::NotIncludes | Operator::NotLike => "NOT LIKE",
        Operator::IncludesInsensitive | Operator::LikeInsensitive => "ILIKE",
        Operator::Contains => "@>",
        Operator::ContainedBy => "<@",
        Operator::Overlaps => "&&",
        Operator::IsNull | Operator::In | Operator::NotIn => "",
    }
}

/// Escape `\`, `%` and `_` so text matches literally inside a LIKE pattern.
#[must_use]
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }

    escaped
}
