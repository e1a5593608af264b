use crate::types::Oid;
use serde::{Deserialize, Serialize};

///
/// ClassKind
/// relkind of a class, only the kinds the filter layer distinguishes
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Table,
    View,
    MaterializedView,
    ForeignTable,
    PartitionedTable,
    CompositeType,
}

///
/// Class
///
/// A relation (table, view, composite type). Every class owns a row type
/// whose id is `type_id`; a procedure whose first argument has that type
/// is a computed column candidate for the class.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Class {
    pub id: Oid,
    pub name: String,
    pub namespace_id: Oid,
    pub type_id: Oid,

    #[serde(default)]
    pub kind: ClassKind,

    #[serde(default = "default_selectable")]
    pub is_selectable: bool,
}

const fn default_selectable() -> bool {
    true
}

impl Class {
    /// Composite types are classes too, but they are never queried as rows.
    #[must_use]
    pub const fn is_relation(&self) -> bool {
        !matches!(self.kind, ClassKind::CompositeType)
    }
}
