//! Collects every regular file below a directory together with its contents.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::TraversalOrder,
    diagnostics::{GenerateError, GenerateResult},
};

/// A file found below the scanned directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Web path relative to the scanned directory. Always starts with `/` and uses `/` as
    /// separator.
    pub path: String,
    pub content: Vec<u8>,
}

impl FileEntry {
    pub fn new<S>(path: S, content: impl Into<Vec<u8>>) -> Self
    where
        S: ToString,
    {
        Self {
            path: path.to_string(),
            content: content.into(),
        }
    }
}

/// Walk `root` depth first and read every regular file.
///
/// Subdirectory results are spliced in where the subdirectory appears in its parent's
/// listing.
pub fn collect(root: &Path, order: TraversalOrder) -> GenerateResult<Vec<FileEntry>> {
    tracing::info!(root = %root.display(), ?order, "Collecting files");

    let mut found = Vec::new();
    walk(root, order, &mut found)?;

    let entries = found
        .into_iter()
        .map(|(path, content)| {
            let entry = FileEntry::new(reroot(&path, root), content);
            tracing::debug!(path = %entry.path, bytes = entry.content.len(), "Collected file");
            entry
        })
        .collect::<Vec<_>>();

    tracing::info!(files = entries.len(), "Collection done");
    Ok(entries)
}

fn walk(
    dir: &Path,
    order: TraversalOrder,
    found: &mut Vec<(PathBuf, Vec<u8>)>,
) -> GenerateResult<()> {
    let mut paths = fs::read_dir(dir)
        .map_err(|e| GenerateError::read_input(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| GenerateError::read_input(dir, e))?;

    if order == TraversalOrder::Sorted {
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }

    for path in paths {
        // Follows symlinks.
        let metadata = fs::metadata(&path).map_err(|e| GenerateError::read_input(&path, e))?;
        if metadata.is_dir() {
            walk(&path, order, found)?;
        } else if metadata.is_file() {
            let content = fs::read(&path).map_err(|e| GenerateError::read_input(&path, e))?;
            found.push((path, content));
        } else {
            tracing::debug!(path = %path.display(), "Skipping special file");
        }
    }
    Ok(())
}

/// Turn a path below `root` into a web path, e.g. `site/css/main.css` into `/css/main.css`.
pub fn reroot(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let relative = relative.to_string_lossy().replace('\\', "/");
    format!("/{}", relative.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn site(files: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (path, content) in files {
            let path = dir.path().join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    fn paths(entries: &[FileEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn collects_nested_files() {
        let dir = site(&[
            ("index.html", "<html>x</html>"),
            ("css/style.css", "body{}"),
            ("js/lib/deep/app.js", "let x = 1;"),
        ]);
        fs::create_dir_all(dir.path().join("empty/dir")).unwrap();

        let entries = collect(dir.path(), TraversalOrder::Sorted).unwrap();

        assert_eq!(
            paths(&entries),
            vec!["/css/style.css", "/index.html", "/js/lib/deep/app.js"]
        );
        assert_eq!(entries[1].content, b"<html>x</html>".to_vec());
    }

    #[test]
    fn subdirectories_are_interleaved_with_files() {
        let dir = site(&[
            ("a.txt", "a"),
            ("b/inner.txt", "inner"),
            ("c.txt", "c"),
        ]);
        let entries = collect(dir.path(), TraversalOrder::Sorted).unwrap();
        assert_eq!(paths(&entries), vec!["/a.txt", "/b/inner.txt", "/c.txt"]);
    }

    #[test]
    fn listing_order_collects_the_same_set() {
        let dir = site(&[("a.txt", "a"), ("sub/b.txt", "b"), ("sub/c/d.txt", "d")]);
        let mut listed = paths(&collect(dir.path(), TraversalOrder::Listing).unwrap())
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        listed.sort();
        assert_eq!(listed, vec!["/a.txt", "/sub/b.txt", "/sub/c/d.txt"]);
    }

    #[test]
    fn paths_are_web_paths() {
        let dir = site(&[("one/two/three.bin", "3"), ("top", "t")]);
        for entry in collect(dir.path(), TraversalOrder::Sorted).unwrap() {
            assert!(entry.path.starts_with('/'));
            assert!(!entry.path.starts_with("//"));
            assert!(!entry.path.contains('\\'));
        }
    }

    #[test]
    fn binary_content_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = vec![0x89, b'P', b'N', b'G', 0x00, 0xff, b'\r', b'\n'];
        fs::write(dir.path().join("logo.png"), &bytes).unwrap();
        let entries = collect(dir.path(), TraversalOrder::Sorted).unwrap();
        assert_eq!(entries, vec![FileEntry::new("/logo.png", bytes)]);
    }

    #[test]
    fn reroot_handles_backslashes() {
        assert_eq!(
            reroot(Path::new("site/sub\\b.txt"), Path::new("site")),
            "/sub/b.txt"
        );
        assert_eq!(reroot(Path::new("site/a.txt"), Path::new("site")), "/a.txt");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        match collect(&missing, TraversalOrder::Sorted) {
            Err(GenerateError::ReadInput { path, .. }) => assert_eq!(path, missing),
            other => panic!("Expected a read error, got {:?}", other),
        }
    }
}
