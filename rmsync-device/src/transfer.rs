//! Local side of a download: parent directory creation and atomic streaming.
//!
//! ## `write_stream` protocol
//!
//! 1. Create missing parent directories one level at a time (`0755`).
//! 2. Copy the body into `<dest>.rmsync.tmp`.
//! 3. Rename to `dest`. On any failure the `.tmp` is removed and `dest` is
//!    left as it was.

use std::fs::{self, File};
use std::io::{self, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{io_err, DeviceError};

/// Create every missing ancestor directory of `path`, outermost first.
///
/// Returns the directories that were created.
pub fn create_parent_dirs(path: &Path) -> Result<Vec<PathBuf>, DeviceError> {
    let Some(parent) = path.parent() else {
        return Ok(Vec::new());
    };

    let mut missing = Vec::new();
    for dir in parent.ancestors() {
        if dir.as_os_str().is_empty() {
            continue;
        }
        match fs::metadata(dir) {
            Ok(meta) if meta.is_dir() => break,
            Ok(_) => {
                return Err(DeviceError::NotADirectory {
                    path: dir.to_path_buf(),
                })
            }
            Err(err) if err.kind() == ErrorKind::NotFound => missing.push(dir.to_path_buf()),
            Err(err) => return Err(io_err(dir, err)),
        }
    }

    missing.reverse();
    for dir in &missing {
        tracing::info!("creating '{}'", dir.display());
        dir_builder().create(dir).map_err(|e| io_err(dir, e))?;
    }
    Ok(missing)
}

/// Stream `body` into `dest` atomically. Returns the number of bytes written.
pub fn write_stream(body: &mut dyn Read, dest: &Path) -> Result<u64, DeviceError> {
    create_parent_dirs(dest)?;
    let tmp = tmp_path(dest);

    let written = match copy_to(body, &tmp) {
        Ok(n) => n,
        Err(err) => {
            let _ = fs::remove_file(&tmp);
            return Err(err);
        }
    };

    if let Err(e) = fs::rename(&tmp, dest) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(dest, e));
    }
    Ok(written)
}

/// `<dest>.rmsync.tmp`. Never carries the managed suffix, so a stray one is
/// invisible to the local snapshot.
pub fn tmp_path(dest: &Path) -> PathBuf {
    PathBuf::from(format!("{}.rmsync.tmp", dest.display()))
}

fn copy_to(body: &mut dyn Read, tmp: &Path) -> Result<u64, DeviceError> {
    let mut file = File::create(tmp).map_err(|e| io_err(tmp, e))?;
    let written = io::copy(body, &mut file).map_err(|e| io_err(tmp, e))?;
    file.flush().map_err(|e| io_err(tmp, e))?;
    Ok(written)
}

#[cfg(unix)]
fn dir_builder() -> fs::DirBuilder {
    use std::os::unix::fs::DirBuilderExt;
    let mut builder = fs::DirBuilder::new();
    builder.mode(0o755);
    builder
}
#[cfg(not(unix))]
fn dir_builder() -> fs::DirBuilder {
    fs::DirBuilder::new()
}
