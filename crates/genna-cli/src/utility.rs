use std::path::{Path, PathBuf};

/// Inserts `suffix` between the file stem and the extension of `path`.
///
/// `models/user.go` with `_search` becomes `models/user_search.go`; a path
/// without an extension gets the suffix appended.
pub(crate) fn add_suffix(path: &Path, suffix: &str) -> PathBuf {
    let Some(stem) = path.file_stem() else {
        return path.to_path_buf();
    };

    let mut name = stem.to_os_string();
    name.push(suffix);
    if let Some(extension) = path.extension() {
        name.push(".");
        name.push(extension);
    }

    path.with_file_name(name)
}
