use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Oid
///
/// Catalog object identifier. Types, classes, namespaces and procedures
/// share the same id space, as they do in `pg_catalog`.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct Oid(pub u32);

impl Oid {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for Oid {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

///
/// Well-known type ids
///
/// Built-in `pg_catalog` type ids the filter layer needs to recognise
/// without a name lookup.
///

pub mod oid {
    use super::Oid;

    pub const BOOL: Oid = Oid(16);
    pub const NAME: Oid = Oid(19);
    pub const INT8: Oid = Oid(20);
    pub const INT2: Oid = Oid(21);
    pub const INT4: Oid = Oid(23);
    pub const TEXT: Oid = Oid(25);
    pub const JSON: Oid = Oid(114);
    pub const FLOAT4: Oid = Oid(700);
    pub const FLOAT8: Oid = Oid(701);
    pub const BPCHAR: Oid = Oid(1042);
    pub const VARCHAR: Oid = Oid(1043);
    pub const DATE: Oid = Oid(1082);
    pub const TIME: Oid = Oid(1083);
    pub const TIMESTAMP: Oid = Oid(1114);
    pub const TIMESTAMPTZ: Oid = Oid(1184);
    pub const INTERVAL: Oid = Oid(1186);
    pub const NUMERIC: Oid = Oid(1700);
    pub const RECORD: Oid = Oid(2249);
    pub const VOID: Oid = Oid(2278);
    pub const UUID: Oid = Oid(2950);
    pub const JSONB: Oid = Oid(3802);
}
