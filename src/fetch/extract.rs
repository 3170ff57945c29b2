// src/fetch/extract.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument};
use zip::ZipArchive;

use crate::error::{Error, Result};

/// Extract every entry of the archive at `zip_path` into `dest_dir`.
///
/// Entry names must stay inside `dest_dir`; an absolute name or one that
/// climbs out with `..` aborts the whole extraction. Returns the paths of the
/// files written, in archive order.
#[instrument(level = "info", skip(zip_path, dest_dir), fields(zip = %zip_path.as_ref().display()))]
pub fn unzip(zip_path: impl AsRef<Path>, dest_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let zip_path = zip_path.as_ref();
    let dest_dir = dest_dir.as_ref();

    let file = File::open(zip_path).map_err(|e| Error::fs(zip_path, e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| Error::archive(zip_path, e))?;
    fs::create_dir_all(dest_dir).map_err(|e| Error::fs(dest_dir, e))?;

    let mut written = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| Error::archive(zip_path, e))?;
        let relative = entry.enclosed_name().ok_or_else(|| Error::UnsafeEntry {
            path: zip_path.to_path_buf(),
            name: entry.name().to_string(),
        })?;
        let out_path = dest_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| Error::fs(&out_path, e))?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::fs(parent, e))?;
        }

        let output = File::create(&out_path).map_err(|e| Error::fs(&out_path, e))?;
        let mut output = BufWriter::new(output);
        let bytes = io::copy(&mut entry, &mut output).map_err(|e| Error::fs(&out_path, e))?;
        output.flush().map_err(|e| Error::fs(&out_path, e))?;

        debug!(entry = %entry.name(), bytes, "extracted");
        written.push(out_path);
    }

    info!(files = written.len(), dest = %dest_dir.display(), "archive extracted");
    Ok(written)
}
