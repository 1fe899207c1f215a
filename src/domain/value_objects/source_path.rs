//! Path helpers shared by the resolver and the manifest passes.
//!
//! Manifest paths are always stored with forward slashes so the serialized
//! document is identical across platforms.

use std::path::{Component, Path, PathBuf};

/// Render a path with `/` separators.
pub fn path_to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Lexically normalize a path: drop `.` segments and fold `..` into the parent.
///
/// Never touches the file system, so it works for paths that do not exist yet.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// `./x` and `../x` specifiers refer to files; everything else is a package.
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../") || specifier.starts_with('/')
}

/// Resolve a relative specifier against the importing module's directory.
pub fn join_specifier(importer: &Path, specifier: &str) -> PathBuf {
    let base = importer.parent().unwrap_or_else(|| Path::new(""));
    normalize_path(&base.join(specifier))
}

/// Replace a trailing `.from` extension with `.to` on a slash path string.
///
/// Returns `None` when the string does not end in `.from`.
pub fn replace_extension(path: &str, from: &str, to: &str) -> Option<String> {
    let suffix = format!(".{}", from);
    path.strip_suffix(&suffix)
        .map(|stem| format!("{}.{}", stem, to))
}
