mod class;
mod namespace;
mod procedure;
mod tags;
mod ty;


pub use class::{Class, ClassKind};
pub use namespace::Namespace;
pub use procedure::{ArgMode, Procedure};
pub use tags::{Capability, TagValue, Tags};
pub use ty::{PgType, TypeKind};
