//! Batch file operations and folder archiving.
//!
//! Batch copy/move/delete treat per-item problems (missing source, existing
//! destination without overwrite) as warnings that skip the item; only
//! unexpected I/O failures abort the batch. Completed items stay in place
//! when a later item fails; there is no rollback.

use crate::error::FileError;
use crate::utils::logging;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Result of a batch operation. Skipped items are recorded with the reason
/// already printed as a warning.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub processed: usize,
    pub skipped: Vec<PathBuf>,
    pub cancelled: bool,
}

/// Supported archive formats for folder compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    pub fn parse(value: &str) -> Result<Self, FileError> {
        match value {
            "zip" => Ok(ArchiveFormat::Zip),
            "tar.gz" => Ok(ArchiveFormat::TarGz),
            other => Err(FileError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

fn io_err(path: &Path, source: io::Error) -> FileError {
    FileError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Copy files into `dest_dir`, creating it if absent. Missing sources and
/// existing destinations (without `overwrite`) are skipped with a warning.
pub fn copy_files(
    sources: &[PathBuf],
    dest_dir: &Path,
    overwrite: bool,
) -> Result<BatchOutcome, FileError> {
    transfer_files(sources, dest_dir, overwrite, |src, dest| {
        fs::copy(src, dest).map(|_| ())
    })
}

/// Move files into `dest_dir` with the same skip policy as [`copy_files`].
/// Falls back to copy-then-remove when a rename crosses filesystems.
pub fn move_files(
    sources: &[PathBuf],
    dest_dir: &Path,
    overwrite: bool,
) -> Result<BatchOutcome, FileError> {
    transfer_files(sources, dest_dir, overwrite, |src, dest| {
        match fs::rename(src, dest) {
            Ok(()) => Ok(()),
            Err(_) => {
                fs::copy(src, dest)?;
                fs::remove_file(src)
            }
        }
    })
}

fn transfer_files(
    sources: &[PathBuf],
    dest_dir: &Path,
    overwrite: bool,
    transfer: impl Fn(&Path, &Path) -> io::Result<()>,
) -> Result<BatchOutcome, FileError> {
    if !dest_dir.exists() {
        fs::create_dir_all(dest_dir).map_err(|e| io_err(dest_dir, e))?;
    }

    let mut outcome = BatchOutcome::default();
    for source in sources {
        if !source.exists() {
            logging::log_warning(&format!("{} not found, skipping", source.display()));
            outcome.skipped.push(source.clone());
            continue;
        }
        let file_name = match source.file_name() {
            Some(name) => name,
            None => {
                logging::log_warning(&format!("{} has no file name, skipping", source.display()));
                outcome.skipped.push(source.clone());
                continue;
            }
        };
        let dest = dest_dir.join(file_name);
        if dest.exists() && !overwrite {
            logging::log_warning(&format!("{} already exists, skipping", dest.display()));
            outcome.skipped.push(source.clone());
            continue;
        }
        transfer(source, &dest).map_err(|e| io_err(source, e))?;
        outcome.processed += 1;
    }
    Ok(outcome)
}

/// Delete files. The confirmation decision belongs to the caller: pass
/// `confirmed = false` to cancel the whole batch with no deletions. Missing
/// paths are skipped with a warning.
pub fn delete_files(paths: &[PathBuf], confirmed: bool) -> Result<BatchOutcome, FileError> {
    let mut outcome = BatchOutcome::default();
    if !confirmed {
        outcome.cancelled = true;
        return Ok(outcome);
    }
    for path in paths {
        if !path.exists() {
            logging::log_warning(&format!("{} not found, skipping", path.display()));
            outcome.skipped.push(path.clone());
            continue;
        }
        fs::remove_file(path).map_err(|e| io_err(path, e))?;
        outcome.processed += 1;
    }
    Ok(outcome)
}

/// Compress a folder into an archive and return the archive size in bytes.
///
/// Zip archives store every file with its path relative to `folder`; tar.gz
/// archives store the folder itself as the single top-level member.
pub fn compress_folder(
    folder: &Path,
    output: &Path,
    format: ArchiveFormat,
) -> Result<u64, FileError> {
    if !folder.exists() {
        return Err(FileError::NotFound {
            path: folder.display().to_string(),
        });
    }
    if !folder.is_dir() {
        return Err(FileError::NotADirectory {
            path: folder.display().to_string(),
        });
    }

    match format {
        ArchiveFormat::Zip => compress_zip(folder, output)?,
        ArchiveFormat::TarGz => compress_tar_gz(folder, output)?,
    }

    let size = fs::metadata(output).map_err(|e| io_err(output, e))?.len();
    Ok(size)
}

fn compress_zip(folder: &Path, output: &Path) -> Result<(), FileError> {
    let file = File::create(output).map_err(|e| io_err(output, e))?;
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::FileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for entry in WalkDir::new(folder) {
        let entry = entry.map_err(|e| FileError::Io {
            path: folder.display().to_string(),
            source: io::Error::new(io::ErrorKind::Other, e),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        // Entries always live under the walk root.
        let rel = match entry.path().strip_prefix(folder) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        let name = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        zip.start_file(name, options)?;
        let mut reader = File::open(entry.path()).map_err(|e| io_err(entry.path(), e))?;
        io::copy(&mut reader, &mut zip).map_err(|e| io_err(entry.path(), e))?;
    }
    zip.finish()?;
    Ok(())
}

fn compress_tar_gz(folder: &Path, output: &Path) -> Result<(), FileError> {
    let file = File::create(output).map_err(|e| io_err(output, e))?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    let member = folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string());
    builder
        .append_dir_all(member, folder)
        .map_err(|e| io_err(folder, e))?;
    builder
        .into_inner()
        .and_then(|encoder| encoder.finish())
        .map_err(|e| io_err(output, e))?;
    Ok(())
}

/// Extract an archive, dispatching on its file extension
/// (`.zip`, `.tar.gz`, `.tgz`, `.tar`).
pub fn extract_archive(archive: &Path, dest_dir: &Path) -> Result<(), FileError> {
    if !archive.exists() {
        return Err(FileError::NotFound {
            path: archive.display().to_string(),
        });
    }
    if !dest_dir.exists() {
        fs::create_dir_all(dest_dir).map_err(|e| io_err(dest_dir, e))?;
    }

    let name = archive.file_name().unwrap_or_default().to_string_lossy();
    if name.ends_with(".zip") {
        let file = File::open(archive).map_err(|e| io_err(archive, e))?;
        let mut zip = zip::ZipArchive::new(file)?;
        zip.extract(dest_dir)?;
    } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        let file = File::open(archive).map_err(|e| io_err(archive, e))?;
        let mut tar = tar::Archive::new(GzDecoder::new(file));
        tar.unpack(dest_dir).map_err(|e| io_err(archive, e))?;
    } else if name.ends_with(".tar") {
        let file = File::open(archive).map_err(|e| io_err(archive, e))?;
        let mut tar = tar::Archive::new(file);
        tar.unpack(dest_dir).map_err(|e| io_err(archive, e))?;
    } else {
        return Err(FileError::UnknownExtension {
            path: archive.display().to_string(),
        });
    }
    Ok(())
}

/// Size of a file in bytes. Missing files are an error, not a sentinel.
pub fn get_file_size(path: &Path) -> Result<u64, FileError> {
    if !path.exists() {
        return Err(FileError::NotFound {
            path: path.display().to_string(),
        });
    }
    Ok(fs::metadata(path).map_err(|e| io_err(path, e))?.len())
}

/// Format a byte count as "N.NN UNIT", scaling by 1024 through B..PB.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
    let mut size = bytes as f64;
    for unit in &UNITS[..UNITS.len() - 1] {
        if size < 1024.0 {
            return format!("{size:.2} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.2} PB")
}
