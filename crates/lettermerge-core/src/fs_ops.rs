//! Filesystem primitives shared by the phases

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Sibling temp path used while writing `path`
fn temp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", file_name))
}

/// Write `chunks` to `path` through a temp file renamed into place.
///
/// Readers see either the previous file or the complete new one.
pub(crate) fn write_atomic<'a, I>(path: &Path, chunks: I) -> io::Result<()>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let temp = temp_path(path);
    let result = (|| {
        let mut writer = BufWriter::new(File::create(&temp)?);
        for chunk in chunks {
            writer.write_all(chunk)?;
        }
        writer.flush()?;
        drop(writer);
        fs::rename(&temp, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp);
    }
    result
}

/// Move a file, replacing any existing destination.
///
/// Falls back to copy-then-delete when a plain rename is refused (for
/// instance across filesystems).
pub(crate) fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if from == to {
        return Ok(());
    }

    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_err) if rename_err.kind() == io::ErrorKind::NotFound => Err(rename_err),
        Err(rename_err) => {
            tracing::debug!(
                from = %from.display(),
                to = %to.display(),
                error = %rename_err,
                "rename failed, falling back to copy"
            );
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
    }
}
