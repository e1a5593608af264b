//! Module: catalog
//! Responsibility: id-keyed, read-only access to an introspection snapshot.
//! Does not own: introspection queries against a live database.
//!
//! Invariants:
//! - A `Catalog` is only constructed from a snapshot that passed validation,
//!   so every id reachable from a node resolves.
//! - Collections keep snapshot order; lookups never reorder them.


use crate::{
    error::CatalogError,
    node::{Class, Namespace, PgType, Procedure},
    types::Oid,
    validate::validate_snapshot,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};

///
/// CatalogSnapshot
///
/// Serialized form of the catalog, as produced by introspection.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub namespaces: Vec<Namespace>,

    #[serde(default)]
    pub classes: Vec<Class>,

    #[serde(default)]
    pub types: Vec<PgType>,

    #[serde(default)]
    pub procedures: Vec<Procedure>,
}

///
/// Catalog
///

#[derive(Clone, Debug)]
pub struct Catalog {
    snapshot: CatalogSnapshot,
    namespaces: BTreeMap<Oid, usize>,
    classes: BTreeMap<Oid, usize>,
    types: BTreeMap<Oid, usize>,
}

impl Catalog {
    /// Validate a snapshot and index it.
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Result<Self, CatalogError> {
        validate_snapshot(&snapshot)?;

        let namespaces = index_by(&snapshot.namespaces, |n| n.id);
        let classes = index_by(&snapshot.classes, |c| c.id);
        let types = index_by(&snapshot.types, |t| t.id);

        Ok(Self {
            snapshot,
            namespaces,
            classes,
            types,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let snapshot: CatalogSnapshot = serde_json::from_str(json)?;

        Self::from_snapshot(snapshot)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path)?;

        Self::from_json_str(&json)
    }

    #[must_use]
    pub const fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn namespace(&self, id: Oid) -> Option<&Namespace> {
        self.namespaces
            .get(&id)
            .map(|&i| &self.snapshot.namespaces[i])
    }

    #[must_use]
    pub fn class(&self, id: Oid) -> Option<&Class> {
        self.classes.get(&id).map(|&i| &self.snapshot.classes[i])
    }

    /// Find a class by name, optionally restricted to one namespace name.
    #[must_use]
    pub fn class_by_name(&self, namespace: Option<&str>, name: &str) -> Option<&Class> {
        self.snapshot.classes.iter().find(|class| {
            class.name == name
                && namespace.is_none_or(|ns| {
                    self.namespace(class.namespace_id)
                        .is_some_and(|found| found.name == ns)
                })
        })
    }

    #[must_use]
    pub fn ty(&self, id: Oid) -> Option<&PgType> {
        self.types.get(&id).map(|&i| &self.snapshot.types[i])
    }

    /// The class backing a composite type, if any.
    #[must_use]
    pub fn type_class(&self, ty: &PgType) -> Option<&Class> {
        ty.class_id.and_then(|id| self.class(id))
    }

    /// Follow domains down to their base type.
    ///
    /// Bounded by the number of types so a cyclic domain chain terminates.
    #[must_use]
    pub fn base_type<'a>(&'a self, ty: &'a PgType) -> &'a PgType {
        let mut current = ty;
        for _ in 0..self.types.len() {
            match current.domain_base_type_id.and_then(|id| self.ty(id)) {
                Some(base) => current = base,
                None => break,
            }
        }

        current
    }

    #[must_use]
    pub fn procedures(&self) -> &[Procedure] {
        &self.snapshot.procedures
    }

    #[must_use]
    pub fn classes(&self) -> &[Class] {
        &self.snapshot.classes
    }
}

fn index_by<T>(items: &[T], id: impl Fn(&T) -> Oid) -> BTreeMap<Oid, usize> {
    let mut index = BTreeMap::new();
    for (i, item) in items.iter().enumerate() {
        index.entry(id(item)).or_insert(i);
    }

    index
}
