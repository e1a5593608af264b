use crate::{
    node::{Capability, Tags},
    types::Oid,
};
use serde::{Deserialize, Serialize};

///
/// ArgMode
/// mirrors `pg_proc.proargmodes`; both words and catalog letters deserialize
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgMode {
    #[default]
    #[serde(alias = "i")]
    In,
    #[serde(alias = "o")]
    Out,
    #[serde(alias = "b")]
    InOut,
    #[serde(alias = "v")]
    Variadic,
    #[serde(alias = "t")]
    Table,
}

impl ArgMode {
    /// Modes whose value is supplied by the caller.
    #[must_use]
    pub const fn is_input(self) -> bool {
        matches!(self, Self::In | Self::InOut)
    }
}

///
/// Procedure
///
/// A catalog function. The argument arrays are parallel and cover every
/// argument, including `out` ones; an empty `arg_modes` means every
/// argument is `in`, and an empty `arg_names` means none are named.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Procedure {
    pub id: Oid,
    pub name: String,
    pub namespace_id: Oid,

    #[serde(default)]
    pub arg_names: Vec<String>,

    #[serde(default)]
    pub arg_type_ids: Vec<Oid>,

    #[serde(default)]
    pub arg_modes: Vec<ArgMode>,

    pub return_type_id: Oid,

    #[serde(default)]
    pub returns_set: bool,

    #[serde(default)]
    pub is_stable: bool,

    #[serde(default)]
    pub tags: Tags,
}

impl Procedure {
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arg_type_ids.len()
    }

    #[must_use]
    pub fn arg_mode(&self, index: usize) -> ArgMode {
        self.arg_modes.get(index).copied().unwrap_or_default()
    }

    /// Declared argument name, `None` for unnamed arguments.
    #[must_use]
    pub fn arg_name(&self, index: usize) -> Option<&str> {
        self.arg_names
            .get(index)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    #[must_use]
    pub fn is_omitted(&self, capability: Capability) -> bool {
        self.tags.omits(capability)
    }
}
