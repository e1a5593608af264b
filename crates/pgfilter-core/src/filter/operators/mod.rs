//! Module: filter::operators
//! Responsibility: operators input types and the operators they expose.
//! Does not own: SQL generation for an operator (see `filter::resolve`).

mod builder;

#[cfg(test)]
mod tests;

pub use builder::{ComputedColumnArgs, OperatorsTypeBuilder, StandardOperatorsBuilder};

use pgfilter_schema::types::Oid;
use serde::Serialize;

///
/// Operator
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Operator {
    IsNull,
    EqualTo,
    NotEqualTo,
    DistinctFrom,
    NotDistinctFrom,
    In,
    NotIn,
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    Includes,
    NotIncludes,
    IncludesInsensitive,
    StartsWith,
    EndsWith,
    Like,
    NotLike,
    LikeInsensitive,
    Contains,
    ContainedBy,
    Overlaps,
}

impl Operator {
    pub const STANDARD: &'static [Self] = &[
        Self::IsNull,
        Self::EqualTo,
        Self::NotEqualTo,
        Self::DistinctFrom,
        Self::NotDistinctFrom,
    ];

    pub const LIST: &'static [Self] = &[Self::In, Self::NotIn];

    pub const SORT: &'static [Self] = &[
        Self::LessThan,
        Self::LessThanOrEqualTo,
        Self::GreaterThan,
        Self::GreaterThanOrEqualTo,
    ];

    pub const PATTERN: &'static [Self] = &[
        Self::Includes,
        Self::NotIncludes,
        Self::IncludesInsensitive,
        Self::StartsWith,
        Self::EndsWith,
        Self::Like,
        Self::NotLike,
        Self::LikeInsensitive,
    ];

    pub const ARRAY: &'static [Self] = &[Self::Contains, Self::ContainedBy, Self::Overlaps];

    const ALL: [&'static [Self]; 5] = [
        Self::STANDARD,
        Self::LIST,
        Self::SORT,
        Self::PATTERN,
        Self::ARRAY,
    ];

    /// Schema field name of the operator.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::IsNull => "isNull",
            Self::EqualTo => "equalTo",
            Self::NotEqualTo => "notEqualTo",
            Self::DistinctFrom => "distinctFrom",
            Self::NotDistinctFrom => "notDistinctFrom",
            Self::In => "in",
            Self::NotIn => "notIn",
            Self::LessThan => "lessThan",
            Self::LessThanOrEqualTo => "lessThanOrEqualTo",
            Self::GreaterThan => "greaterThan",
            Self::GreaterThanOrEqualTo => "greaterThanOrEqualTo",
            Self::Includes => "includes",
            Self::NotIncludes => "notIncludes",
            Self::IncludesInsensitive => "includesInsensitive",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::Like => "like",
            Self::NotLike => "notLike",
            Self::LikeInsensitive => "likeInsensitive",
            Self::Contains => "contains",
            Self::ContainedBy => "containedBy",
            Self::Overlaps => "overlaps",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .flat_map(|set| set.iter())
            .copied()
            .find(|op| op.name() == name)
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::IsNull => {
                "Is null (if `true` is specified) or is not null (if `false` is specified)."
            }
            Self::EqualTo => "Equal to the specified value.",
            Self::NotEqualTo => "Not equal to the specified value.",
            Self::DistinctFrom => {
                "Not equal to the specified value, treating null like an ordinary value."
            }
            Self::NotDistinctFrom => {
                "Equal to the specified value, treating null like an ordinary value."
            }
            Self::In => "Included in the specified list.",
            Self::NotIn => "Not included in the specified list.",
            Self::LessThan => "Less than the specified value.",
            Self::LessThanOrEqualTo => "Less than or equal to the specified value.",
            Self::GreaterThan => "Greater than the specified value.",
            Self::GreaterThanOrEqualTo => "Greater than or equal to the specified value.",
            Self::Includes => "Contains the specified string (case-sensitive).",
            Self::NotIncludes => "Does not contain the specified string (case-sensitive).",
            Self::IncludesInsensitive => "Contains the specified string (case-insensitive).",
            Self::StartsWith => "Starts with the specified string (case-sensitive).",
            Self::EndsWith => "Ends with the specified string (case-sensitive).",
            Self::Like => {
                "Matches the specified pattern (case-sensitive). An underscore (_) matches any single character; a percent sign (%) matches any sequence of zero or more characters."
            }
            Self::NotLike => "Does not match the specified pattern (case-sensitive).",
            Self::LikeInsensitive => "Matches the specified pattern (case-insensitive).",
            Self::Contains => "Contains the specified list of values.",
            Self::ContainedBy => "Contained by the specified list of values.",
            Self::Overlaps => "Overlaps the specified list of values.",
        }
    }
}

///
/// ScalarKind
///
/// Schema-facing scalar classification of a catalog type, after domains
/// have been resolved to their base type.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum ScalarKind {
    BigFloat,
    BigInt,
    Boolean,
    Date,
    Datetime,
    Enum(String),
    Float,
    Int,
    Interval,
    Json,
    String,
    Time,
    Uuid,
}

impl ScalarKind {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::BigFloat => "BigFloat",
            Self::BigInt => "BigInt",
            Self::Boolean => "Boolean",
            Self::Date => "Date",
            Self::Datetime => "Datetime",
            Self::Enum(name) => name,
            Self::Float => "Float",
            Self::Int => "Int",
            Self::Interval => "Interval",
            Self::Json => "JSON",
            Self::String => "String",
            Self::Time => "Time",
            Self::Uuid => "UUID",
        }
    }

    /// Operators offered on a single value of this scalar.
    #[must_use]
    pub fn scalar_operators(&self) -> Vec<Operator> {
        let mut ops = Operator::STANDARD.to_vec();
        if matches!(self, Self::Json) {
            return ops;
        }

        ops.extend_from_slice(Operator::LIST);
        ops.extend_from_slice(Operator::SORT);
        if matches!(self, Self::String) {
            ops.extend_from_slice(Operator::PATTERN);
        }

        ops
    }

    /// Operators offered on an array of this scalar.
    #[must_use]
    pub fn list_operators() -> Vec<Operator> {
        let mut ops = Operator::STANDARD.to_vec();
        ops.extend_from_slice(Operator::SORT);
        ops.extend_from_slice(Operator::ARRAY);

        ops
    }
}

///
/// ArgumentField
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ArgumentField {
    pub name: String,
    pub type_name: String,
    pub type_id: Oid,
}

///
/// ArgumentsType
/// input object carrying a computed column's extra arguments
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ArgumentsType {
    pub name: String,
    pub fields: Vec<ArgumentField>,
}

///
/// InputField
/// rendered field of an input object, for schema printing
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct InputField {
    pub name: String,
    pub type_ref: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

///
/// OperatorsType
///
/// Schema-facing shape only. Catalog types sharing a scalar (`int2` and
/// `int4`, `text` and `varchar`) share one operators type; the column's
/// own type is carried by the resolver input.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OperatorsType {
    pub name: String,
    pub scalar: ScalarKind,
    pub is_list: bool,
    pub operators: Vec<Operator>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<ArgumentsType>,
}

impl OperatorsType {
    #[must_use]
    pub fn supports(&self, operator: Operator) -> bool {
        self.operators.contains(&operator)
    }

    /// Schema type of an operator's operand.
    #[must_use]
    pub fn operand_type(&self, operator: Operator) -> String {
        let scalar = self.scalar.name();

        match operator {
            Operator::IsNull => "Boolean".to_string(),
            Operator::In | Operator::NotIn => format!("[{scalar}!]"),
            op if Operator::PATTERN.contains(&op) => "String".to_string(),
            _ if self.is_list => format!("[{scalar}]"),
            _ => scalar.to_string(),
        }
    }

    /// Input fields in schema order: `args` first, then operators.
    #[must_use]
    pub fn fields(&self) -> Vec<InputField> {
        let args = self.args.iter().map(|args| InputField {
            name: "args".to_string(),
            type_ref: args.name.clone(),
            description: None,
        });
        let ops = self.operators.iter().map(|&op| InputField {
            name: op.name().to_string(),
            type_ref: self.operand_type(op),
            description: Some(op.description().to_string()),
        });

        args.chain(ops).collect()
    }
}
