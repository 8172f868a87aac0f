//! Delivery collaborator: writes the final archive to disk

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::WallsplitConfig;

/// Destination for the archive: `explicit` if given, otherwise the
/// configured save location joined with the configured archive name
pub fn archive_path(config: &WallsplitConfig, explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let dir = config
        .save_location
        .dir()
        .context("Could not determine a save directory; pass --out")?;
    Ok(dir.join(&config.archive_name))
}

/// Atomically write `blob` to `path`, creating parent directories
pub fn deliver(blob: &[u8], path: &Path) -> anyhow::Result<PathBuf> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut file = tempfile::Builder::new()
        .prefix(".wallsplit-")
        .suffix(".part")
        .tempfile_in(&dir)
        .with_context(|| format!("Failed to create a temporary file in {}", dir.display()))?;
    file.write_all(blob)?;
    file.persist(path)
        .with_context(|| format!("Failed to save {}", path.display()))?;

    log::info!("Saved {} ({} bytes)", path.display(), blob.len());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let config = WallsplitConfig::default();
        let path = archive_path(&config, Some(PathBuf::from("/tmp/out.zip"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/out.zip"));
    }

    #[test]
    fn test_deliver_writes_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("wallpaper_monitors.zip");
        deliver(b"first", &path).unwrap();
        deliver(b"second", &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");

        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
