//! File system utilities for build housekeeping.
//!
//! Both operations are idempotent-by-retry rather than atomic: a failure part
//! way through leaves a partial tree, and running the operation again finishes
//! the job.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::path::Path;
use tokio::fs;

/// Removes the folder and everything below it if it exists.
///
/// Calling this on a path that does not exist, or that is not a directory,
/// is a no-op.
pub async fn clear_stale_folder(path: &Path) -> Result<()> {
    let is_dir = match fs::metadata(path).await {
        Ok(metadata) => metadata.is_dir(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => return Err(e).fs_context("checking stale folder", path),
    };
    if !is_dir {
        log::debug!("No folder to clear at {}", path.display());
        return Ok(());
    }

    log::info!("Clearing stale folder {}", path.display());
    fs::remove_dir_all(path)
        .await
        .fs_context("clearing stale folder", path)
}

/// Recursively mirrors `from` into `to`.
///
/// Creates `to` if absent, copies every file over whatever already sits at
/// the destination, and descends into subdirectories. Files present only in
/// `to` are left alone. Symlinks are not recreated.
pub async fn copy_tree(from: &Path, to: &Path) -> Result<u64> {
    if !from.is_dir() {
        return Err(Error::GenericError(format!(
            "{} is not a directory",
            from.display()
        )));
    }

    fs::create_dir_all(to)
        .await
        .fs_context("creating destination directory", to)?;

    let mut copied = 0u64;
    for entry in walkdir::WalkDir::new(from).min_depth(1) {
        let entry = entry?;
        let rel_path = entry.path().strip_prefix(from)?;
        let dest_path = to.join(rel_path);

        if entry.path().is_dir() {
            fs::create_dir_all(&dest_path)
                .await
                .fs_context("creating directory", &dest_path)?;
        } else {
            fs::copy(entry.path(), &dest_path)
                .await
                .fs_context("copying file", entry.path())?;
            copied += 1;
        }
    }

    log::debug!(
        "Copied {copied} file(s) from {} to {}",
        from.display(),
        to.display()
    );
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clear_missing_folder_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("ServerData").join("WebGL");
        clear_stale_folder(&missing).await.unwrap();
        assert!(!missing.exists());
    }

    #[tokio::test]
    async fn clear_leaves_regular_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("catalog");
        std::fs::write(&file, "not a folder").unwrap();

        clear_stale_folder(&file).await.unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "not a folder");
    }

    #[tokio::test]
    async fn clear_removes_nested_contents() {
        let dir = tempfile::tempdir().unwrap();
        let stale = dir.path().join("catalog");
        std::fs::create_dir_all(stale.join("a/b")).unwrap();
        std::fs::write(stale.join("a/b/catalog.json"), "{}").unwrap();

        clear_stale_folder(&stale).await.unwrap();
        assert!(!stale.exists());
        assert!(dir.path().exists());
    }

    #[tokio::test]
    async fn copy_tree_creates_destination_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let dest = dir.path().join("out/StreamingAssets");
        std::fs::create_dir_all(src.join("nested")).unwrap();
        std::fs::write(src.join("root.bin"), "new").unwrap();
        std::fs::write(src.join("nested/child.bin"), "child").unwrap();

        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(dest.join("root.bin"), "old").unwrap();
        std::fs::write(dest.join("extra.bin"), "keep").unwrap();

        let copied = copy_tree(&src, &dest).await.unwrap();
        assert_eq!(copied, 2);
        assert_eq!(std::fs::read_to_string(dest.join("root.bin")).unwrap(), "new");
        assert_eq!(
            std::fs::read_to_string(dest.join("nested/child.bin")).unwrap(),
            "child"
        );
        assert_eq!(std::fs::read_to_string(dest.join("extra.bin")).unwrap(), "keep");
    }

    #[tokio::test]
    async fn copy_tree_rejects_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_tree(&dir.path().join("nope"), &dir.path().join("dest"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }
}
