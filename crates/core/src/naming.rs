//! Artifact file names.
//!
//! - compressing `name.ext` writes `name.ext.huf`
//! - decompressing `name.ext.huf` writes `name_unc.ext`
//!
//! Only the final path component is rewritten; the directory is kept. The
//! extension starts at the first `.` of the remaining file name that is not
//! its first character (so `archive.tar.gz` keeps `.tar.gz` and `.bashrc`
//! has no extension). A name without the `.huf` suffix is used as-is, and a
//! name without an extension gets an empty one.
//!
//! Names are handled as `OsStr` throughout, so file names that are not valid
//! UTF-8 come through unchanged.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Suffix appended to compressed artifacts.
pub const COMPRESSED_SUFFIX: &str = ".huf";

/// Marker inserted before the extension of decompressed output.
pub const DECOMPRESSED_MARKER: &str = "_unc";

/// `name.ext` -> `name.ext.huf`
pub fn artifact_name(original: &Path) -> PathBuf {
    let mut name = OsString::from(original.as_os_str());
    name.push(COMPRESSED_SUFFIX);
    PathBuf::from(name)
}

/// Split a compressed artifact path into `(base, extension)`.
///
/// `dir/name.ext.huf` -> (`dir/name`, `.ext`). The extension includes its
/// leading dot and may be empty.
pub fn split_output_name(compressed: &Path) -> (PathBuf, OsString) {
    let file_name = compressed.file_name().unwrap_or_default();

    let suffix = &COMPRESSED_SUFFIX[1..];
    let mut base = match Path::new(file_name).file_stem() {
        Some(stem) if Path::new(file_name).extension() == Some(OsStr::new(suffix)) => stem,
        _ => file_name,
    };

    // Peel extensions off the end until none is left; what remains is the base.
    let mut extensions = Vec::new();
    while let (Some(extension), Some(stem)) = (Path::new(base).extension(), Path::new(base).file_stem()) {
        extensions.push(extension);
        base = stem;
    }

    let mut extension = OsString::new();
    for part in extensions.iter().rev() {
        extension.push(".");
        extension.push(part);
    }

    let base = match compressed.parent() {
        Some(dir) => dir.join(base),
        None => PathBuf::from(base),
    };
    (base, extension)
}

/// `name.ext.huf` -> `name_unc.ext`
pub fn output_name(compressed: &Path) -> PathBuf {
    let (base, extension) = split_output_name(compressed);
    let mut name = base.into_os_string();
    name.push(DECOMPRESSED_MARKER);
    name.push(extension);
    PathBuf::from(name)
}
