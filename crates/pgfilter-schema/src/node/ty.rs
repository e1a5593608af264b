use crate::types::Oid;
use serde::{Deserialize, Serialize};

///
/// TypeKind
/// mirrors `pg_type.typtype`
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
#[remain::sorted]
pub enum TypeKind {
    #[default]
    Base,
    Composite,
    Domain,
    Enum,
    Pseudo,
    Range,
}

///
/// PgType
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PgType {
    pub id: Oid,
    pub name: String,
    pub namespace_id: Oid,

    #[serde(default)]
    pub kind: TypeKind,

    /// `pg_type.typcategory`; `'A'` marks array types.
    #[serde(default = "default_category")]
    pub category: char,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<Oid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_item_type_id: Option<Oid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_base_type_id: Option<Oid>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_variants: Vec<String>,
}

const fn default_category() -> char {
    'U'
}

impl PgType {
    #[must_use]
    pub const fn is_array(&self) -> bool {
        self.category == 'A' && self.array_item_type_id.is_some()
    }

    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self.kind, TypeKind::Composite)
    }
}
