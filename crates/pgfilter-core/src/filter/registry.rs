//! Module: filter::registry
//! Responsibility: append-checked registries of synthesized types, filter
//! fields and field resolvers.
//!
//! Invariants:
//! - Re-registering an identical entry is a no-op.
//! - Registering a different entry under a taken name is a `BuildError`;
//!   nothing is ever silently replaced.

use crate::{
    error::BuildError,
    filter::operators::{ArgumentsType, OperatorsType},
};
use serde::Serialize;
use std::collections::{BTreeMap, btree_map::Entry};

///
/// FilterFieldDef
/// field definition handed to the schema builder
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FilterFieldDef {
    pub name: String,
    pub description: String,
    pub type_name: String,
    pub is_filter_field: bool,
}

///
/// RegisteredType
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegisteredType {
    Operators(OperatorsType),
    Arguments(ArgumentsType),
}

impl RegisteredType {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Operators(ty) => &ty.name,
            Self::Arguments(ty) => &ty.name,
        }
    }
}

///
/// ResolverKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ResolverKind {
    /// Values are consumed by the enclosing field's resolver.
    Noop,
    ComputedColumn,
}

///
/// FilterRegistry
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterRegistry {
    types: BTreeMap<String, RegisteredType>,
    fields: BTreeMap<String, Vec<FilterFieldDef>>,
    resolvers: BTreeMap<(String, String), ResolverKind>,
}

impl FilterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a type, or reuse an identical one already registered.
    pub fn insert_type(&mut self, ty: RegisteredType) -> Result<(), BuildError> {
        match self.types.entry(ty.name().to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(ty);
                Ok(())
            }
            Entry::Occupied(existing) if *existing.get() == ty => Ok(()),
            Entry::Occupied(existing) => Err(BuildError::TypeConflict {
                name: existing.key().clone(),
            }),
        }
    }

    pub fn register_field(
        &mut self,
        filter_type: &str,
        field: FilterFieldDef,
    ) -> Result<(), BuildError> {
        let fields = self.fields.entry(filter_type.to_string()).or_default();

        match fields.iter().find(|f| f.name == field.name) {
            None => {
                tracing::trace!(filter_type, field = %field.name, "registered filter field");
                fields.push(field);
                Ok(())
            }
            Some(existing) if *existing == field => Ok(()),
            Some(_) => Err(BuildError::FieldConflict {
                filter_type: filter_type.to_string(),
                field: field.name,
            }),
        }
    }

    pub fn register_resolver(
        &mut self,
        type_name: &str,
        field: &str,
        kind: ResolverKind,
    ) -> Result<(), BuildError> {
        match self
            .resolvers
            .entry((type_name.to_string(), field.to_string()))
        {
            Entry::Vacant(slot) => {
                slot.insert(kind);
                Ok(())
            }
            Entry::Occupied(existing) if *existing.get() == kind => Ok(()),
            Entry::Occupied(_) => Err(BuildError::ResolverConflict {
                filter_type: type_name.to_string(),
                field: field.to_string(),
            }),
        }
    }

    /// Fold another registry into this one under the same collision rules.
    pub fn merge(&mut self, other: Self) -> Result<(), BuildError> {
        for ty in other.types.into_values() {
            self.insert_type(ty)?;
        }
        for (filter_type, fields) in other.fields {
            for field in fields {
                self.register_field(&filter_type, field)?;
            }
        }
        for ((type_name, field), kind) in other.resolvers {
            self.register_resolver(&type_name, &field, kind)?;
        }

        Ok(())
    }

    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&RegisteredType> {
        self.types.get(name)
    }

    #[must_use]
    pub fn operators_type(&self, name: &str) -> Option<&OperatorsType> {
        match self.types.get(name) {
            Some(RegisteredType::Operators(ty)) => Some(ty),
            _ => None,
        }
    }

    pub fn types(&self) -> impl Iterator<Item = &RegisteredType> {
        self.types.values()
    }

    #[must_use]
    pub fn fields(&self, filter_type: &str) -> &[FilterFieldDef] {
        self.fields.get(filter_type).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn resolver(&self, type_name: &str, field: &str) -> Option<ResolverKind> {
        self.resolvers
            .get(&(type_name.to_string(), field.to_string()))
            .copied()
    }

    pub fn resolvers(&self) -> impl Iterator<Item = (&str, &str, ResolverKind)> {
        self.resolvers
            .iter()
            .map(|((ty, field), kind)| (ty.as_str(), field.as_str(), *kind))
    }
}
