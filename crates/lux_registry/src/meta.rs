//! Per-family runtime metadata payloads and the five invoker shapes.
//! Every family shares a `MetaCommon` header (name, hash)
//! the same way `lux_meta::Declaration`/`Type` share `DeclCommon`/
//! `TypeCommon` — a tagged payload behind one common identity, not a
//! family-specific struct hierarchy.

use std::ffi::c_void;

/// `fn(args: *mut *mut void, ret: *mut void)` — free function invoker.
/// `args` is an array of pointers to parameter storage; `ret` may be null
/// for a void return.
pub type FunctionInvoker = unsafe extern "C" fn(args: *mut *mut c_void, ret: *mut c_void);

/// `fn(self: *mut void, args: *mut *mut void, ret: *mut void)`.
pub type MethodInvoker =
    unsafe extern "C" fn(receiver: *mut c_void, args: *mut *mut c_void, ret: *mut c_void);

/// `fn(args: *mut *mut void) -> *mut void` — returns a heap-allocated
/// instance the caller must later destroy via the matching destructor thunk.
pub type ConstructorInvoker = unsafe extern "C" fn(args: *mut *mut c_void) -> *mut c_void;

/// `fn(ptr: *mut void)`.
pub type DestructorInvoker = unsafe extern "C" fn(ptr: *mut c_void);

/// Shape shared by field getters and setters: `fn(obj: *mut void, value: *mut void)`.
/// A const field's setter is `None` rather than a null function pointer.
pub type FieldAccessor = unsafe extern "C" fn(obj: *mut c_void, value: *mut c_void);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryFamily {
    Fundamental,
    Pointer,
    Reference,
    PointerToDataMember,
    PointerToMethod,
    Array,
    Function,
    Method,
    Field,
    Record,
    Enum,
}

impl RegistryFamily {
    pub const ALL: [RegistryFamily; 11] = [
        RegistryFamily::Fundamental,
        RegistryFamily::Pointer,
        RegistryFamily::Reference,
        RegistryFamily::PointerToDataMember,
        RegistryFamily::PointerToMethod,
        RegistryFamily::Array,
        RegistryFamily::Function,
        RegistryFamily::Method,
        RegistryFamily::Field,
        RegistryFamily::Record,
        RegistryFamily::Enum,
    ];
}

#[derive(Debug, Clone)]
pub struct FundamentalMeta {
    pub spelling: String,
    pub size: u64,
    pub align: u64,
}

#[derive(Debug, Clone)]
pub struct PointerMeta {
    pub pointee_hash: u64,
}

#[derive(Debug, Clone)]
pub struct ReferenceMeta {
    pub referred_hash: u64,
    pub is_rvalue: bool,
}

#[derive(Debug, Clone)]
pub struct PointerToDataMemberMeta {
    pub owner_hash: u64,
    pub member_hash: u64,
}

#[derive(Debug, Clone)]
pub struct PointerToMethodMeta {
    pub owner_hash: u64,
    pub method_hash: u64,
}

#[derive(Debug, Clone)]
pub struct ArrayMeta {
    pub element_hash: u64,
    pub extent: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct FunctionMeta {
    pub invoker: FunctionInvoker,
    pub return_type_hash: u64,
    pub parameter_type_hashes: Vec<u64>,
}

#[derive(Debug, Clone)]
pub struct MethodMeta {
    pub invoker: MethodInvoker,
    pub owner_hash: u64,
    pub return_type_hash: u64,
    pub parameter_type_hashes: Vec<u64>,
    pub is_static: bool,
    pub is_const: bool,
}

#[derive(Debug, Clone)]
pub struct FieldMeta {
    pub owner_hash: u64,
    pub field_type_hash: u64,
    pub offset_bytes: u64,
    pub getter: Option<FieldAccessor>,
    pub setter: Option<FieldAccessor>,
}

#[derive(Debug, Clone)]
pub struct RecordMeta {
    pub size: u64,
    pub align: u64,
    pub constructor: Option<ConstructorInvoker>,
    pub destructor: Option<DestructorInvoker>,
    /// Hashes of this record's `Field`-family and `Method`-family entries.
    pub field_hashes: Vec<u64>,
    pub method_hashes: Vec<u64>,
}

#[derive(Debug, Clone)]
pub struct EnumMeta {
    pub underlying_hash: u64,
    pub is_scoped: bool,
    pub variants: Vec<(String, i64)>,
}

#[derive(Debug, Clone)]
pub enum MetaKind {
    Fundamental(FundamentalMeta),
    Pointer(PointerMeta),
    Reference(ReferenceMeta),
    PointerToDataMember(PointerToDataMemberMeta),
    PointerToMethod(PointerToMethodMeta),
    Array(ArrayMeta),
    Function(FunctionMeta),
    Method(MethodMeta),
    Field(FieldMeta),
    Record(RecordMeta),
    Enum(EnumMeta),
}

impl MetaKind {
    pub fn family(&self) -> RegistryFamily {
        match self {
            MetaKind::Fundamental(_) => RegistryFamily::Fundamental,
            MetaKind::Pointer(_) => RegistryFamily::Pointer,
            MetaKind::Reference(_) => RegistryFamily::Reference,
            MetaKind::PointerToDataMember(_) => RegistryFamily::PointerToDataMember,
            MetaKind::PointerToMethod(_) => RegistryFamily::PointerToMethod,
            MetaKind::Array(_) => RegistryFamily::Array,
            MetaKind::Function(_) => RegistryFamily::Function,
            MetaKind::Method(_) => RegistryFamily::Method,
            MetaKind::Field(_) => RegistryFamily::Field,
            MetaKind::Record(_) => RegistryFamily::Record,
            MetaKind::Enum(_) => RegistryFamily::Enum,
        }
    }
}

/// A single record in the registry: the header every family shares plus
/// its family-specific payload.
#[derive(Debug, Clone)]
pub struct Meta {
    pub name: String,
    pub hash: u64,
    pub kind: MetaKind,
}

impl Meta {
    pub fn new(name: impl Into<String>, hash: u64, kind: MetaKind) -> Self {
        Self {
            name: name.into(),
            hash,
            kind,
        }
    }

    pub fn family(&self) -> RegistryFamily {
        self.kind.family()
    }
}
