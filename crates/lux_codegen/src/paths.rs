//! Output path computation: each target file's generated artifacts land
//! next to its path relative to whichever include root contains it.

use std::path::{Path, PathBuf};

use crate::error::{RenderError, Result};

pub struct ArtifactPaths {
    pub static_artifact: PathBuf,
    pub dynamic_records: PathBuf,
    pub dynamic_functions: PathBuf,
    /// Where the serialized Meta Unit would be written if `serial_meta` is
    /// set; always computed, written only when requested.
    pub meta_json: PathBuf,
}

/// `source`'s path relative to whichever `include_roots` entry contains it,
/// preserving that relative path under `out_dir`.
fn relative_to_include_root<'a>(source: &'a Path, include_roots: &[PathBuf]) -> Result<&'a Path> {
    include_roots
        .iter()
        .find_map(|root| source.strip_prefix(root).ok())
        .ok_or_else(|| RenderError::MissingIncludePath(source.display().to_string()))
}

/// For `foo/bar.hpp` under a matched root with `meta_suffix = ".meta.hpp"`:
/// `foo/bar.meta.hpp` (static), `foo/bar.meta.cpp` and
/// `foo/bar.funcs.meta.cpp` (dynamic), all under `out_dir`.
pub fn artifact_paths(
    source: &Path,
    include_roots: &[PathBuf],
    out_dir: &Path,
    meta_suffix: &str,
) -> Result<ArtifactPaths> {
    let rel = relative_to_include_root(source, include_roots)?;
    let stem = rel.with_extension("");
    let stem = stem.display();
    Ok(ArtifactPaths {
        static_artifact: out_dir.join(format!("{stem}{meta_suffix}")),
        dynamic_records: out_dir.join(format!("{stem}.meta.cpp")),
        dynamic_functions: out_dir.join(format!("{stem}.funcs.meta.cpp")),
        meta_json: out_dir.join(format!("{stem}.meta.json")),
    })
}
