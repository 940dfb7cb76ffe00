use std::fs;
use std::path::{Path, PathBuf};

use tracing::instrument;

use crate::errors::ScaffoldError;

/// Create each folder (and the root, implicitly) under `root`.
/// Existing directories are left as they are.
#[instrument(level = "debug", skip_all, fields(root = %root.display(), count = folders.len()))]
pub fn create_directories(root: &Path, folders: &[&str]) -> Result<Vec<PathBuf>, ScaffoldError> {
    let mut created = Vec::with_capacity(folders.len());
    for folder in folders {
        let dir = root.join(folder);
        fs::create_dir_all(&dir)
            .map_err(|e| ScaffoldError::io("failed to create directory", &dir, e))?;
        tracing::debug!(dir = %dir.display(), "directory ensured");
        created.push(dir);
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::FOLDERS;

    #[test]
    fn test_create_directories_makes_root_and_nested_folders() {
        let td = tempfile::tempdir().expect("tmpdir");
        let root = td.path().join("myapp");
        let dirs = create_directories(&root, FOLDERS).unwrap();
        assert_eq!(dirs.len(), FOLDERS.len());
        for f in FOLDERS {
            assert!(root.join(f).is_dir(), "missing {}", f);
        }
    }

    #[test]
    fn test_create_directories_is_idempotent() {
        let td = tempfile::tempdir().expect("tmpdir");
        let root = td.path().join("again");
        create_directories(&root, FOLDERS).unwrap();
        std::fs::write(root.join("scripts").join("keep.txt"), "x").unwrap();
        create_directories(&root, FOLDERS).unwrap();
        assert_eq!(
            std::fs::read_to_string(root.join("scripts").join("keep.txt")).unwrap(),
            "x"
        );
    }

    #[test]
    fn test_create_directories_fails_when_a_file_blocks_the_path() {
        let td = tempfile::tempdir().expect("tmpdir");
        let root = td.path().join("blocked");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("data"), "not a dir").unwrap();
        let err = create_directories(&root, &["data/raw"]).unwrap_err();
        assert!(matches!(err, ScaffoldError::Io { .. }), "{:?}", err);
    }
}
