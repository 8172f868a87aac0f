//! Archive collaborator: packages exported images into one ZIP blob

use std::io::{Cursor, Write};

use anyhow::Context;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::ExportedImage;

/// Package the files, in order, into a ZIP archive
///
/// PNG data is already compressed, so entries are stored as-is. Entry
/// timestamps are fixed so identical input gives identical archives.
pub fn package(files: &[ExportedImage]) -> anyhow::Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .last_modified_time(DateTime::default());

    for file in files {
        writer
            .start_file(file.filename.as_str(), options)
            .with_context(|| format!("Failed to add {} to archive", file.filename))?;
        writer
            .write_all(&file.png)
            .with_context(|| format!("Failed to write {} to archive", file.filename))?;
    }

    let cursor = writer.finish().context("Failed to finalize archive")?;
    Ok(cursor.into_inner())
}

/// Names of the entries of an archive, in stored order
#[cfg(test)]
pub fn entry_names(blob: &[u8]) -> anyhow::Result<Vec<String>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(blob)).context("Not a ZIP archive")?;
    (0..archive.len())
        .map(|i| -> anyhow::Result<String> {
            let entry = archive.by_index(i)?;
            Ok(entry.name().to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn file(name: &str, data: &[u8]) -> ExportedImage {
        ExportedImage {
            filename: name.to_string(),
            png: data.to_vec(),
        }
    }

    #[test]
    fn test_package_keeps_order_and_contents() {
        let files = vec![file("wallpaper_01_a_1x1.png", b"first"), file("wallpaper_02_b_1x1.png", b"second")];
        let blob = package(&files).unwrap();
        assert_eq!(
            entry_names(&blob).unwrap(),
            ["wallpaper_01_a_1x1.png", "wallpaper_02_b_1x1.png"]
        );

        let mut archive = ZipArchive::new(Cursor::new(blob)).unwrap();
        let mut contents = String::new();
        archive
            .by_name("wallpaper_02_b_1x1.png")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "second");
    }

    #[test]
    fn test_package_is_deterministic() {
        let files = vec![file("a.png", b"123")];
        assert_eq!(package(&files).unwrap(), package(&files).unwrap());
    }

    #[test]
    fn test_duplicate_names_fail() {
        let files = vec![file("same.png", b"1"), file("same.png", b"2")];
        assert!(package(&files).is_err());
    }

    #[test]
    fn test_garbage_is_not_an_archive() {
        assert!(entry_names(b"nope").is_err());
    }
}
