//! Discovery pass: walk the root cursor, recurse into
//! namespaces (and records, to reach nested declarations) except a
//! configurable skip set, and record every declaration carrying at least
//! one attribute whose textual payload begins with the marker prefix.

use crate::options::ParseOptions;
use lux_frontend::{AstAdapter, CursorId, CursorKind, VisitResult};

/// A discovered declaration: its cursor and its annotation tokens (the
/// marker prefix stripped, remainder split on `;` and trimmed).
pub(crate) struct Discovered {
    pub cursor: CursorId,
    pub annotations: Vec<String>,
}

pub(crate) fn discover(
    adapter: &dyn AstAdapter,
    root: CursorId,
    opts: &ParseOptions,
) -> Vec<Discovered> {
    let mut found = Vec::new();
    walk(adapter, root, opts, &mut found);
    found
}

fn walk(adapter: &dyn AstAdapter, cursor: CursorId, opts: &ParseOptions, out: &mut Vec<Discovered>) {
    adapter.visit_children(cursor, &mut |child| {
        if let Some(annotations) = marker_annotations(adapter, child, opts) {
            log::debug!(
                "discovered marked declaration {:?} ({:?})",
                adapter.spelling(child),
                adapter.cursor_kind(child)
            );
            out.push(Discovered {
                cursor: child,
                annotations,
            });
        }
        match adapter.cursor_kind(child) {
            CursorKind::Namespace if !opts.skips(adapter.spelling(child)) => {
                walk(adapter, child, opts, out);
                VisitResult::Continue
            }
            CursorKind::Record => {
                walk(adapter, child, opts, out);
                VisitResult::Continue
            }
            _ => VisitResult::Continue,
        }
    });
}

/// If `cursor` carries an `annotate` attribute whose payload starts with
/// `opts.marker_symbol`, return the remainder split on `;` and trimmed.
fn marker_annotations(
    adapter: &dyn AstAdapter,
    cursor: CursorId,
    opts: &ParseOptions,
) -> Option<Vec<String>> {
    adapter
        .annotate_attributes(cursor)
        .iter()
        .find_map(|attr| attr.strip_prefix(opts.marker_symbol.as_str()))
        .map(|rest| {
            rest.split(';')
                .map(|tok| tok.trim().to_string())
                .filter(|tok| !tok.is_empty())
                .collect()
        })
}
