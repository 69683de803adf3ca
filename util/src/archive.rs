//! Zip helpers for submission bundles.
//!
//! Extraction checks every entry against the destination directory (zip slip)
//! and keeps a running total of uncompressed bytes so a hostile archive cannot
//! fill the disk.

use std::fs::{self, File};
use std::io::{self, BufReader, Read, Seek};
use std::path::Path;

use thiserror::Error;
use zip::read::ZipArchive;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("zip archive contains invalid path (zip slip attack?): {0}")]
    UnsafePath(String),
    #[error("uncompressed zip size exceeds allowed maximum of {0} bytes")]
    TooLarge(u64),
}

/// Opens a zip archive from disk.
pub fn open_zip(path: &Path) -> Result<ZipArchive<BufReader<File>>, ArchiveError> {
    let file = File::open(path)?;
    Ok(ZipArchive::new(BufReader::new(file))?)
}

/// Copies the raw (decompressed) bytes of entry `index` into `destination`,
/// overwriting whatever is there. Returns the number of bytes written.
pub fn extract_entry_to<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    index: usize,
    max_uncompressed_size: u64,
    destination: &Path,
) -> Result<u64, ArchiveError> {
    let entry = archive.by_index(index)?;
    if entry.size() > max_uncompressed_size {
        return Err(ArchiveError::TooLarge(max_uncompressed_size));
    }

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut outfile = File::create(destination)?;
    let written = io::copy(&mut entry.take(max_uncompressed_size + 1), &mut outfile)?;
    if written > max_uncompressed_size {
        drop(outfile);
        fs::remove_file(destination).ok();
        return Err(ArchiveError::TooLarge(max_uncompressed_size));
    }
    Ok(written)
}

/// Unpacks every entry of the zip at `archive_path` into `destination_dir`.
pub fn extract_zip(
    archive_path: &Path,
    max_uncompressed_size: u64,
    destination_dir: &Path,
) -> Result<(), ArchiveError> {
    let mut archive = open_zip(archive_path)?;
    let mut total_uncompressed_size = 0;

    fs::create_dir_all(destination_dir)?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let relative = file
            .enclosed_name()
            .ok_or_else(|| ArchiveError::UnsafePath(file.name().to_string()))?;
        let outpath = destination_dir.join(relative);

        total_uncompressed_size += file.size();
        if total_uncompressed_size > max_uncompressed_size {
            return Err(ArchiveError::TooLarge(max_uncompressed_size));
        }

        if file.is_dir() {
            fs::create_dir_all(&outpath)?;
            continue;
        }

        if let Some(p) = outpath.parent() {
            fs::create_dir_all(p)?;
        }
        let mut outfile = File::create(&outpath)?;
        io::copy(&mut file, &mut outfile)?;

        // Keep shell scripts and prebuilt helpers runnable for the build step.
        #[cfg(unix)]
        if let Some(mode) = file.unix_mode().filter(|m| m & 0o777 != 0) {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&outpath, fs::Permissions::from_mode(mode & 0o777))?;
        }
    }

    Ok(())
}
