use crate::error::{Result, StackgenError};
use crate::fs_utils::{collect_files, entry_name, is_inside};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

/// Packs every regular file under `root` into a zip at `zip_path`
///
/// Entries are stored under their `/`-separated path relative to `root`, in
/// sorted order, with a fixed timestamp and permissions so the same tree
/// always yields the same archive. Returns the entry names written.
///
/// # Errors
///
/// - `StackgenError::ArchiveInsideOutput` if `zip_path` lies inside `root`.
/// - `StackgenError::WalkDir` if `root` cannot be traversed.
/// - `StackgenError::Zip` or `StackgenError::Io` if the archive cannot be written.
pub fn archive_directory(root: &Path, zip_path: &Path) -> Result<Vec<String>> {
    if is_inside(zip_path, root)? {
        return Err(StackgenError::ArchiveInsideOutput {
            archive: zip_path.to_path_buf(),
            root: root.to_path_buf(),
        });
    }

    let files = collect_files(root)?;

    if let Some(parent) = zip_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut writer = ZipWriter::new(BufWriter::new(File::create(zip_path)?));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let mut names = Vec::with_capacity(files.len());
    for path in &files {
        let Some(name) = entry_name(root, path) else {
            continue;
        };
        tracing::trace!(entry = %name, "adding archive entry");
        writer.start_file(name.as_str(), options)?;
        io::copy(&mut File::open(path)?, &mut writer)?;
        names.push(name);
    }

    writer.finish()?.flush()?;
    Ok(names)
}

/// Lists the entry names of an existing zip archive
///
/// # Errors
///
/// Returns `StackgenError::Io` or `StackgenError::Zip` if the archive cannot be read.
pub fn list_archive(zip_path: &Path) -> Result<Vec<String>> {
    let archive = ZipArchive::new(File::open(zip_path)?)?;
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    Ok(names)
}
