//! `lux_parser` — the Parser Core: drives an `AstAdapter`
//! through discovery and materialization, producing a validated
//! `lux_meta::MetaUnit`.

mod discovery;
mod errors;
mod ids;
mod materialize;
mod options;

pub use errors::{ParseError, Result};
pub use options::{ParseOptions, ParseStatus};

use std::collections::HashMap;
use std::path::Path;

use lux_frontend::AstAdapter;
use lux_meta::MetaUnit;

/// Parse a single translation unit into a `MetaUnit`.
///
/// Front-end failure to open the translation unit is the only error this
/// function returns directly; everything else the front end reports
/// (diagnostics) and everything materialization can't handle (unsupported
/// constructs) is routed through `opts.diagnostic_sink` instead. An
/// invariant violation surfacing from
/// `MetaUnit::validate()` at the end aborts the parse and is returned as
/// `ParseStatus::Failed` alongside whatever partial unit was built, rather
/// than as an `Err` — callers that want the `MetaError` detail can inspect
/// the sink output, which also receives it.
pub fn parse(adapter: &mut dyn AstAdapter, path: &Path, mut opts: ParseOptions) -> (ParseStatus, MetaUnit) {
    let mut unit = MetaUnit::new(opts.name.clone(), opts.version.clone());

    let extra_defs: Vec<String> = opts.pch_file.iter().cloned().collect();
    let tu = match adapter.open_translation_unit(path, &opts.commands, &extra_defs) {
        Ok(tu) => tu,
        Err(err) => {
            (opts.diagnostic_sink)(&format!("failed to open translation unit: {err}"));
            return (ParseStatus::Failed, unit);
        }
    };

    for diag in &tu.diagnostics {
        (opts.diagnostic_sink)(diag);
    }

    let discovered = discovery::discover(adapter, tu.root, &opts);

    let mut index: materialize::DeclIndex = HashMap::new();
    for d in discovered {
        let cursor = d.cursor;
        let annotations = d.annotations;
        materialize::materialize_top_level(adapter, &mut unit, cursor, annotations, &mut index, opts.diagnostic_sink.as_mut());
    }

    match unit.validate() {
        Ok(()) => (ParseStatus::Success, unit),
        Err(err) => {
            (opts.diagnostic_sink)(&format!("invariant violation while registering declarations: {err}"));
            (ParseStatus::Failed, unit)
        }
    }
}
