//! `lux_registry` — the Runtime Meta Registry: a process-wide index,
//! populated at program start by generated registration code, that
//! resolves a string name or hash to a runtime meta record.

mod error;
mod meta;
mod registry;

pub use error::{RegistryError, Result};
pub use meta::{
    ArrayMeta, ConstructorInvoker, DestructorInvoker, EnumMeta, FieldAccessor, FieldMeta,
    FunctionInvoker, FunctionMeta, FundamentalMeta, Meta, MethodInvoker, MethodMeta, MetaKind,
    PointerMeta, PointerToDataMemberMeta, PointerToMethodMeta, ReferenceMeta, RecordMeta,
    RegistryFamily,
};
pub use registry::MetaRegistry;
