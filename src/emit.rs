// src/emit.rs

use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

use crate::error::{Error, Result};
use crate::process::{group::Bucket, GroupedRecords};

/// Write every bucket to `<out_dir>/<prefix>.json`, creating `out_dir` if needed.
///
/// Each shard is written to a temp file in `out_dir` and renamed into place,
/// so an existing shard is either fully replaced or left untouched. The first
/// failure stops emission. Returns the written paths in prefix order.
pub fn write_shards(grouped: &GroupedRecords, out_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    write_shards_with(grouped, out_dir, |_| {})
}

/// Like [`write_shards`], calling `on_written` as soon as each shard is in
/// place, so shards finished before a failure are still reported.
#[instrument(level = "info", skip_all, fields(out_dir = %out_dir.as_ref().display()))]
pub fn write_shards_with<F>(
    grouped: &GroupedRecords,
    out_dir: impl AsRef<Path>,
    mut on_written: F,
) -> Result<Vec<PathBuf>>
where
    F: FnMut(&Path),
{
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir).map_err(|e| Error::fs(out_dir, e))?;

    let mut written = Vec::with_capacity(grouped.len());
    for (prefix, bucket) in grouped {
        let path = out_dir.join(format!("{}.json", prefix));
        write_shard(bucket, &path)?;
        debug!(path = %path.display(), records = bucket.len(), "wrote shard");
        on_written(&path);
        written.push(path);
    }

    info!(shards = written.len(), "emission complete");
    Ok(written)
}

/// Serialize one bucket as 2-space indented JSON with a trailing newline.
pub fn write_shard(bucket: &Bucket, path: &Path) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let tmp = NamedTempFile::new_in(dir).map_err(|e| Error::fs(dir, e))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(|e| Error::fs(tmp.path(), e))?;
    }

    let mut out = BufWriter::new(tmp);
    serde_json::to_writer_pretty(&mut out, bucket).map_err(|source| {
        if source.is_io() {
            Error::fs(path, source.into())
        } else {
            Error::Serialization {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    out.write_all(b"\n").map_err(|e| Error::fs(path, e))?;

    let tmp = out
        .into_inner()
        .map_err(|e| Error::fs(path, e.into_error()))?;
    tmp.persist(path).map_err(|e| Error::fs(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{group, PostalRecord, Records};
    use crate::test_support::SAMPLE_CSV;
    use anyhow::Result;
    use glob::glob;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn sample() -> GroupedRecords {
        let records = Records::from_reader(SAMPLE_CSV.as_bytes(), "sample.csv");
        group(records, "sample.csv").unwrap()
    }

    #[test]
    fn one_file_per_bucket() -> Result<()> {
        let tmp = tempdir()?;
        let out = tmp.path().join("data");

        let written = write_shards(&sample(), &out)?;

        assert_eq!(written, vec![out.join("060.json"), out.join("152.json")]);
        let on_disk: Vec<_> = glob(&format!("{}/*.json", out.display()))?
            .filter_map(|p| p.ok())
            .collect();
        assert_eq!(on_disk.len(), 2);
        Ok(())
    }

    #[test]
    fn shard_layout_matches_consumers() -> Result<()> {
        let tmp = tempdir()?;
        let grouped = group(
            Records::from_reader("x,y,1520000,a,b,c,東京都,目黒区,一般\n".as_bytes(), "one.csv"),
            "one.csv",
        )?;

        write_shards(&grouped, tmp.path())?;

        let text = fs::read_to_string(tmp.path().join("152.json"))?;
        let expected = r#"{
  "1520000": {
    "zipcode": "1520000",
    "prefectureCode": "13",
    "prefectureNumber": 13,
    "prefecture": "東京都",
    "city": "目黒区",
    "town": "一般"
  }
}
"#;
        assert_eq!(text, expected);
        Ok(())
    }

    #[test]
    fn decoded_keys_match_zipcodes() -> Result<()> {
        let tmp = tempdir()?;
        for path in write_shards(&sample(), tmp.path())? {
            let decoded: BTreeMap<String, PostalRecord> =
                serde_json::from_str(&fs::read_to_string(&path)?)?;
            assert!(!decoded.is_empty());
            for (code, rec) in &decoded {
                assert_eq!(code, &rec.postal_code);
            }
        }
        Ok(())
    }

    #[test]
    fn rerun_is_byte_identical() -> Result<()> {
        let tmp = tempdir()?;
        let first: Vec<Vec<u8>> = write_shards(&sample(), tmp.path())?
            .iter()
            .map(fs::read)
            .collect::<std::io::Result<_>>()?;
        let second: Vec<Vec<u8>> = write_shards(&sample(), tmp.path())?
            .iter()
            .map(fs::read)
            .collect::<std::io::Result<_>>()?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn existing_shard_is_truncated() -> Result<()> {
        let tmp = tempdir()?;
        fs::write(tmp.path().join("152.json"), "x".repeat(10_000))?;

        write_shards(&sample(), tmp.path())?;

        let text = fs::read_to_string(tmp.path().join("152.json"))?;
        assert!(text.starts_with('{') && text.ends_with("}\n"));
        let _: serde_json::Value = serde_json::from_str(&text)?;
        Ok(())
    }

    #[test]
    fn empty_input_writes_nothing() -> Result<()> {
        let tmp = tempdir()?;
        let written = write_shards(&GroupedRecords::default(), tmp.path())?;
        assert!(written.is_empty());
        assert_eq!(fs::read_dir(tmp.path())?.count(), 0);
        Ok(())
    }

    #[test]
    fn shards_before_a_failure_are_reported() -> Result<()> {
        let tmp = tempdir()?;
        // a directory squatting on 152.json makes the rename fail after 060.json
        fs::create_dir(tmp.path().join("152.json"))?;

        let mut reported = Vec::new();
        let err = write_shards_with(&sample(), tmp.path(), |p| reported.push(p.to_path_buf()))
            .unwrap_err();

        assert!(matches!(err, crate::error::Error::Filesystem { .. }), "got {err:?}");
        assert_eq!(reported, vec![tmp.path().join("060.json")]);
        assert!(tmp.path().join("060.json").is_file());
        Ok(())
    }

    #[test]
    fn unwritable_output_dir_fails() -> Result<()> {
        let tmp = tempdir()?;
        let blocker = tmp.path().join("data");
        fs::write(&blocker, "not a directory")?;

        let err = write_shards(&sample(), &blocker).unwrap_err();

        assert!(matches!(err, crate::error::Error::Filesystem { .. }));
        Ok(())
    }
}
