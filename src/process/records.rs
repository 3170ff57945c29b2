// src/process/records.rs

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use super::{group::bucket_key, prefecture};
use crate::error::{Error, ParseErrorKind, Result};

const COL_ZIPCODE: usize = 2;
const COL_PREFECTURE: usize = 6;
const COL_CITY: usize = 7;
const COL_TOWN: usize = 8;
const MIN_COLUMNS: usize = COL_TOWN + 1;

/// One row of the postal-code list. Field names on the wire are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalRecord {
    #[serde(rename = "zipcode")]
    pub postal_code: String,
    #[serde(rename = "prefectureCode")]
    pub prefecture_code: String,
    #[serde(rename = "prefectureNumber")]
    pub prefecture_number: u8,
    #[serde(rename = "prefecture")]
    pub prefecture_name: String,
    #[serde(rename = "city")]
    pub city_name: String,
    #[serde(rename = "town")]
    pub town_name: String,
}

impl PostalRecord {
    /// Map one CSV row, resolving the prefecture name to its code.
    pub fn from_row(row: &StringRecord) -> std::result::Result<Self, ParseErrorKind> {
        if row.len() < MIN_COLUMNS {
            return Err(ParseErrorKind::MissingColumns { found: row.len() });
        }
        let postal_code = &row[COL_ZIPCODE];
        bucket_key(postal_code)?;
        let prefecture_name = &row[COL_PREFECTURE];
        let prefecture_code = prefecture::code_for(prefecture_name)
            .ok_or_else(|| ParseErrorKind::UnknownPrefecture(prefecture_name.to_string()))?;
        let prefecture_number = prefecture_code
            .parse()
            .map_err(|_| ParseErrorKind::UnknownPrefecture(prefecture_name.to_string()))?;

        Ok(Self {
            postal_code: postal_code.to_string(),
            prefecture_code: prefecture_code.to_string(),
            prefecture_number,
            prefecture_name: prefecture_name.to_string(),
            city_name: row[COL_CITY].to_string(),
            town_name: row[COL_TOWN].to_string(),
        })
    }
}

/// Lazy stream of [`PostalRecord`]s over a header-less CSV source.
///
/// Stops at end of input. Errors carry the source path and 1-based row
/// number; callers are expected to stop at the first one.
pub struct Records<R> {
    reader: csv::Reader<R>,
    row: StringRecord,
    path: PathBuf,
    record: u64,
}

impl<R: Read> Records<R> {
    pub fn from_reader(rdr: R, path: impl Into<PathBuf>) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .from_reader(rdr);
        Self {
            reader,
            row: StringRecord::new(),
            path: path.into(),
            record: 0,
        }
    }

    fn fail(&self, kind: ParseErrorKind) -> Error {
        Error::Parse {
            path: self.path.clone(),
            record: self.record,
            kind,
        }
    }
}

impl Records<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::fs(path, e))?;
        Ok(Self::from_reader(file, path))
    }
}

impl<R: Read> Iterator for Records<R> {
    type Item = Result<PostalRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.record += 1;
        match self.reader.read_record(&mut self.row) {
            Ok(false) => None,
            Ok(true) => Some(PostalRecord::from_row(&self.row).map_err(|k| self.fail(k))),
            Err(e) => Some(Err(self.fail(ParseErrorKind::Malformed(e)))),
        }
    }
}
