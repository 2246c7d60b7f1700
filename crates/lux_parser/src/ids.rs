//! Stable textual identifiers for materialized declarations. Since the
//! front end this crate targets is an in-memory fixture rather than a
//! real USR-producing compiler, the qualified name doubles as the id —
//! unique within a translation unit, matching the invariant the id map
//! requires.

use lux_frontend::{AstAdapter, CursorId};

/// Walk semantic parents to build a `::`-joined qualified name.
pub(crate) fn qualified_name(adapter: &dyn AstAdapter, cursor: CursorId) -> String {
    let mut segments = vec![adapter.spelling(cursor).to_string()];
    let mut current = adapter.semantic_parent(cursor);
    while let Some(parent) = current {
        let name = adapter.spelling(parent);
        if !name.is_empty() {
            segments.push(name.to_string());
        }
        current = adapter.semantic_parent(parent);
    }
    segments.reverse();
    segments.join("::")
}

/// Parameters with an empty spelling are synthesized as `arg<i>`.
pub(crate) fn synthesize_param_name(index: u32) -> String {
    format!("arg<{index}>")
}
