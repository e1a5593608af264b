use crate::types::Oid;
use serde::{Deserialize, Serialize};

///
/// Namespace
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Namespace {
    pub id: Oid,
    pub name: String,
}
