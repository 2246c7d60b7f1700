//! `lux_frontend` — the AST Adapter: a small facade over a libclang-like
//! front end exposing exactly the cursor/type operations the Parser Core
//! needs.

pub mod adapter;
pub mod cursor;
pub mod error;
pub mod memory;
pub mod types;

pub use adapter::{AstAdapter, TranslationUnit};
pub use cursor::{Access, CursorId, CursorKind, FrontRecordKind, MethodFlags, VisitResult};
pub use error::{FrontEndError, Result};
pub use memory::InMemoryAdapter;
pub use types::{FrontTypeKind, TypeId};
