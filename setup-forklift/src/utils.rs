use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, SetupError};

/// Extract `archive_path` into `dest_dir`, picking the format from its name:
/// `.zip` archives use the zip reader, everything else is read as gzip tar.
pub fn extract_archive(archive_path: &Path, dest_dir: &Path) -> Result<()> {
    let is_zip = archive_path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".zip"));

    fs::create_dir_all(dest_dir)?;

    let extracted = if is_zip {
        extract_zip(archive_path, dest_dir)
    } else {
        extract_tar_gz(archive_path, dest_dir)
    };

    extracted.map_err(|reason| SetupError::ArchiveExtraction {
        archive: archive_path.display().to_string(),
        target: dest_dir.display().to_string(),
        reason,
    })
}

/// Extract tar.gz archive
fn extract_tar_gz(archive_path: &Path, dest_dir: &Path) -> std::result::Result<(), String> {
    let file = fs::File::open(archive_path).map_err(|e| e.to_string())?;
    let gz_decoder = flate2::read::GzDecoder::new(file);
    let mut archive = tar::Archive::new(gz_decoder);
    archive.unpack(dest_dir).map_err(|e| e.to_string())
}

/// Extract zip archive
fn extract_zip(archive_path: &Path, dest_dir: &Path) -> std::result::Result<(), String> {
    let file = fs::File::open(archive_path).map_err(|e| e.to_string())?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| e.to_string())?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| e.to_string())?;
        let Some(relative) = entry.enclosed_name() else {
            tracing::warn!("Skipping zip entry with unsafe path: {}", entry.name());
            continue;
        };
        let outpath = dest_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&outpath).map_err(|e| e.to_string())?;
        } else {
            if let Some(parent) = outpath.parent() {
                fs::create_dir_all(parent).map_err(|e| e.to_string())?;
            }
            let mut outfile = fs::File::create(&outpath).map_err(|e| e.to_string())?;
            io::copy(&mut entry, &mut outfile).map_err(|e| e.to_string())?;
        }
    }

    Ok(())
}

/// Set mode 755 on Unix
#[cfg(unix)]
pub fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
pub fn make_executable(_path: &Path) -> Result<()> {
    // No permission bits to set
    Ok(())
}
