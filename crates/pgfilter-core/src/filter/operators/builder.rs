use crate::{
    config::FilterConfig,
    filter::{
        computed::ProjectedArgument,
        operators::{ArgumentField, ArgumentsType, OperatorsType, ScalarKind},
    },
    naming::{Inflector, pascal},
};
use pgfilter_schema::{
    Catalog,
    node::{PgType, TypeKind},
    types::{Oid, oid},
};
use std::collections::HashMap;

///
/// ComputedColumnArgs
///
/// Shape of a computed column's extra arguments, nested under `args` in
/// the operators type built for it.
///

#[derive(Clone, Copy, Debug)]
pub struct ComputedColumnArgs<'a> {
    pub table: &'a str,
    pub name: &'a str,
    pub arguments: &'a [ProjectedArgument],
}

///
/// OperatorsTypeBuilder
///

pub trait OperatorsTypeBuilder {
    /// Build (or reuse) the operators type for a value type; `None` when the
    /// type cannot be filtered.
    fn operators_type(
        &mut self,
        return_type_id: Oid,
        type_modifier: Option<i32>,
        args: Option<&ComputedColumnArgs<'_>>,
    ) -> Option<OperatorsType>;
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
struct CacheKey {
    type_id: Oid,
    type_modifier: Option<i32>,
    args: Option<(String, String, Vec<ProjectedArgument>)>,
}

///
/// StandardOperatorsBuilder
///
/// Default operators-type builder, memoized per (type, modifier, args shape).
///

pub struct StandardOperatorsBuilder<'a, I: ?Sized> {
    catalog: &'a Catalog,
    config: &'a FilterConfig,
    inflector: &'a I,
    cache: HashMap<CacheKey, Option<OperatorsType>>,
}

impl<'a, I: Inflector + ?Sized> StandardOperatorsBuilder<'a, I> {
    #[must_use]
    pub fn new(catalog: &'a Catalog, config: &'a FilterConfig, inflector: &'a I) -> Self {
        Self {
            catalog,
            config,
            inflector,
            cache: HashMap::new(),
        }
    }

    /// Scalar classification of a type, resolving domains first.
    #[must_use]
    pub fn scalar_kind(&self, ty: &PgType) -> Option<ScalarKind> {
        let base = self.catalog.base_type(ty);

        match base.kind {
            TypeKind::Enum => {
                let namespace = self.catalog.namespace(base.namespace_id)?;
                Some(ScalarKind::Enum(self.inflector.enum_type(&namespace.name, base)))
            }
            TypeKind::Base => scalar_for_oid(base.id),
            TypeKind::Composite | TypeKind::Domain | TypeKind::Pseudo | TypeKind::Range => None,
        }
    }

    fn build(&self, type_id: Oid, args: Option<&ComputedColumnArgs<'_>>) -> Option<OperatorsType> {
        let ty = self.catalog.base_type(self.catalog.ty(type_id)?);

        let (scalar, is_list) = if ty.is_array() {
            if !self.config.arrays {
                return None;
            }
            let item = self.catalog.ty(ty.array_item_type_id?)?;
            (self.scalar_kind(item)?, true)
        } else {
            (self.scalar_kind(ty)?, false)
        };

        if !self.config.allows_field_type(scalar.name()) {
            return None;
        }

        let operators = if is_list {
            ScalarKind::list_operators()
        } else {
            scalar.scalar_operators()
        };

        let (name, args) = match args {
            Some(args) => (
                self.inflector.computed_column_operators_type(
                    args.table,
                    args.name,
                    scalar.name(),
                    is_list,
                ),
                Some(self.arguments_type(args)),
            ),
            None => (self.inflector.operators_type(scalar.name(), is_list), None),
        };

        Some(OperatorsType {
            name,
            scalar,
            is_list,
            operators,
            args,
        })
    }

    fn arguments_type(&self, args: &ComputedColumnArgs<'_>) -> ArgumentsType {
        let fields = args
            .arguments
            .iter()
            .map(|arg| ArgumentField {
                name: arg.name.clone(),
                type_name: self.argument_type_name(arg.type_id),
                type_id: arg.type_id,
            })
            .collect();

        ArgumentsType {
            name: self
                .inflector
                .computed_column_args_type(args.table, args.name),
            fields,
        }
    }

    // Input type name of an argument; non-scalar types use their inflected
    // input object name.
    fn argument_type_name(&self, type_id: Oid) -> String {
        let Some(ty) = self.catalog.ty(type_id) else {
            return ScalarKind::Json.name().to_string();
        };

        if ty.is_array() {
            let item = ty
                .array_item_type_id
                .and_then(|id| self.catalog.ty(id))
                .and_then(|item| self.scalar_kind(item));
            if let Some(item) = item {
                return format!("[{}]", item.name());
            }
        }

        match self.scalar_kind(ty) {
            Some(scalar) => scalar.name().to_string(),
            None => format!("{}Input", pascal(&ty.name)),
        }
    }
}

impl<I: Inflector + ?Sized> OperatorsTypeBuilder for StandardOperatorsBuilder<'_, I> {
    fn operators_type(
        &mut self,
        return_type_id: Oid,
        type_modifier: Option<i32>,
        args: Option<&ComputedColumnArgs<'_>>,
    ) -> Option<OperatorsType> {
        let key = CacheKey {
            type_id: return_type_id,
            type_modifier,
            args: args.map(|a| (a.table.to_string(), a.name.to_string(), a.arguments.to_vec())),
        };
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let built = self.build(return_type_id, args);
        if built.is_none() {
            tracing::debug!(type_id = %return_type_id, "no operators type for type");
        }
        self.cache.insert(key, built.clone());

        built
    }
}

const fn scalar_for_oid(id: Oid) -> Option<ScalarKind> {
    Some(match id {
        oid::BOOL => ScalarKind::Boolean,
        oid::INT2 | oid::INT4 => ScalarKind::Int,
        oid::INT8 => ScalarKind::BigInt,
        oid::FLOAT4 | oid::FLOAT8 => ScalarKind::Float,
        oid::NUMERIC => ScalarKind::BigFloat,
        oid::TEXT | oid::VARCHAR | oid::BPCHAR | oid::NAME => ScalarKind::String,
        oid::UUID => ScalarKind::Uuid,
        oid::DATE => ScalarKind::Date,
        oid::TIME => ScalarKind::Time,
        oid::TIMESTAMP | oid::TIMESTAMPTZ => ScalarKind::Datetime,
        oid::INTERVAL => ScalarKind::Interval,
        oid::JSON | oid::JSONB => ScalarKind::Json,
        _ => return None,
    })
}
