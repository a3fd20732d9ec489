use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// One file under the output root, paired with where it goes remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadUnit {
    pub local_path: PathBuf,
    /// Path below the output root, always `/`-separated.
    pub relative_path: String,
    pub remote_path: String,
}

/// Walk `root` and pair every regular file with its remote path.
///
/// Entries are visited depth-first, sorted by file name within each
/// directory, so the order is stable for a given tree.
pub fn collect_upload_units(
    root: &Path,
    prefix: &str,
) -> Result<Vec<UploadUnit>, walkdir::Error> {
    let mut units = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative_path = slash_path(root, entry.path());
        units.push(UploadUnit {
            remote_path: join_remote(prefix, &relative_path),
            relative_path,
            local_path: entry.into_path(),
        });
    }

    Ok(units)
}

fn slash_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Join a remote prefix and a relative path with `/`, collapsing repeated
/// separators.
pub fn join_remote(prefix: &str, relative: &str) -> String {
    let joined = if prefix.is_empty() {
        relative.to_string()
    } else {
        format!("{}/{}", prefix, relative)
    };

    let mut out = String::with_capacity(joined.len());
    let mut last_was_slash = false;
    for c in joined.chars() {
        if c == '/' {
            if last_was_slash {
                continue;
            }
            last_was_slash = true;
        } else {
            last_was_slash = false;
        }
        out.push(c);
    }
    out
}
