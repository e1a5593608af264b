//! Read-only catalog model for pgfilter: namespaces, classes, types and
//! procedures as loaded from an introspection snapshot.

pub mod catalog;
pub mod error;
pub mod node;
pub mod types;
pub mod validate;

pub use catalog::{Catalog, CatalogSnapshot};
pub use error::CatalogError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        catalog::{Catalog, CatalogSnapshot},
        node::{
            ArgMode, Capability, Class, ClassKind, Namespace, PgType, Procedure, TagValue, Tags,
            TypeKind,
        },
        types::Oid,
    };
}
